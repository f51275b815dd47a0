#![cfg(feature = "host")]
#![allow(missing_docs)]
//! Host-level tests for debounced button state.

use embassy_time::Instant;
use joystick_panel::input_state::{
    BORDER_WIDTH_THICK, BORDER_WIDTH_THIN, ButtonId, DEBOUNCE_WINDOW, InputSnapshot, InputState,
};

const fn at(ms: u64) -> Instant {
    Instant::from_millis(ms)
}

#[test]
fn power_up_state_matches_expected() {
    let input_state = InputState::new();
    assert_eq!(
        input_state.snapshot(),
        InputSnapshot {
            toggle_enabled: false,
            pwm_active: true,
            border_width: BORDER_WIDTH_THIN,
        }
    );
}

#[test]
fn joystick_press_flips_toggle_and_border() {
    let input_state = InputState::new();
    assert!(input_state.on_edge(ButtonId::Joystick, at(1_000)));
    assert!(input_state.toggle_enabled());
    assert_eq!(input_state.border_width(), BORDER_WIDTH_THICK);
    assert!(input_state.pwm_active(), "joystick button must not touch pwm_active");
}

#[test]
fn action_press_flips_only_pwm_active() {
    let input_state = InputState::new();
    assert!(input_state.on_edge(ButtonId::Action, at(1_000)));
    assert!(!input_state.pwm_active());
    assert!(!input_state.toggle_enabled());
    assert_eq!(input_state.border_width(), BORDER_WIDTH_THIN);
}

#[test]
fn bounce_inside_window_is_ignored() {
    let input_state = InputState::new();
    assert!(input_state.on_edge(ButtonId::Joystick, at(1_000)));
    for offset in [1, 5, 50, 120, 199] {
        assert!(
            !input_state.on_edge(ButtonId::Joystick, at(1_000 + offset)),
            "edge {offset} ms after a press must be ignored"
        );
    }
    assert!(input_state.toggle_enabled());
    assert_eq!(input_state.border_width(), BORDER_WIDTH_THICK);
}

#[test]
fn edge_exactly_at_window_is_ignored() {
    let input_state = InputState::new();
    assert!(input_state.on_edge(ButtonId::Action, at(1_000)));
    let window_ms = DEBOUNCE_WINDOW.as_millis();
    assert!(!input_state.on_edge(ButtonId::Action, at(1_000 + window_ms)));
    assert!(input_state.on_edge(ButtonId::Action, at(1_000 + window_ms + 1)));
    assert!(input_state.pwm_active(), "two accepted presses restore pwm_active");
}

#[test]
fn ignored_edges_do_not_extend_window() {
    let input_state = InputState::new();
    assert!(input_state.on_edge(ButtonId::Joystick, at(1_000)));
    assert!(!input_state.on_edge(ButtonId::Joystick, at(1_150)));
    // 201 ms after the accepted press, even though only 51 ms after the bounce.
    assert!(input_state.on_edge(ButtonId::Joystick, at(1_201)));
}

#[test]
fn spaced_presses_each_change_state() {
    let input_state = InputState::new();
    let mut expected_toggle = false;
    for press in 1..=6_u64 {
        assert!(input_state.on_edge(ButtonId::Joystick, at(press * 250)));
        expected_toggle = !expected_toggle;
        assert_eq!(input_state.toggle_enabled(), expected_toggle);
    }
}

#[test]
fn buttons_debounce_independently() {
    let input_state = InputState::new();
    assert!(input_state.on_edge(ButtonId::Joystick, at(1_000)));
    // Action press right after a joystick press is still accepted...
    assert!(input_state.on_edge(ButtonId::Action, at(1_010)));
    // ...and does not reset the joystick window.
    assert!(!input_state.on_edge(ButtonId::Joystick, at(1_100)));
    assert!(input_state.on_edge(ButtonId::Joystick, at(1_201)));
    // The action window still runs from its own press.
    assert!(!input_state.on_edge(ButtonId::Action, at(1_205)));
    assert!(input_state.on_edge(ButtonId::Action, at(1_211)));
}

#[test]
fn two_joystick_presses_restore_state() {
    let input_state = InputState::new();
    let before = input_state.snapshot();
    assert!(input_state.on_edge(ButtonId::Joystick, at(500)));
    assert!(input_state.on_edge(ButtonId::Joystick, at(900)));
    assert_eq!(input_state.snapshot(), before);
}

#[test]
fn border_width_stays_in_allowed_set() {
    let input_state = InputState::new();
    for press in 1..=9_u64 {
        input_state.on_edge(ButtonId::Joystick, at(press * 201));
        let width = input_state.border_width();
        assert!(
            width == BORDER_WIDTH_THIN || width == BORDER_WIDTH_THICK,
            "border width {width} out of range"
        );
    }
}

#[test]
fn edges_right_after_boot_are_ignored() {
    let input_state = InputState::new();
    assert!(!input_state.on_edge(ButtonId::Joystick, at(0)));
    assert!(!input_state.on_edge(ButtonId::Action, at(200)));
    assert!(input_state.on_edge(ButtonId::Action, at(201)));
}

#[test]
fn earlier_timestamp_is_treated_as_bounce() {
    let input_state = InputState::new();
    assert!(input_state.on_edge(ButtonId::Action, at(5_000)));
    assert!(!input_state.on_edge(ButtonId::Action, at(1_000)));
    assert!(!input_state.pwm_active());
}

#[test]
fn shared_static_is_visible_through_reference() {
    static INPUT_STATE: InputState = InputState::new();
    let reader: &'static InputState = &INPUT_STATE;
    assert!(INPUT_STATE.on_edge(ButtonId::Joystick, at(10_000)));
    assert!(reader.snapshot().toggle_enabled);
}
