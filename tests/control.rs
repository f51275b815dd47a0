#![cfg(feature = "host")]
#![allow(missing_docs)]
//! Host-level tests for the control loop against mock hardware.

use embassy_futures::block_on;
use embassy_time::Instant;
use embedded_hal::i2c::{ErrorKind, NoAcknowledgeSource};
use joystick_panel::control::{
    AnalogSource, ControlLoop, FrameSink, LedOutputs, TickPlan, plan_tick,
};
use joystick_panel::frame::{MARKER_SIZE, OledFrame, compose};
use joystick_panel::input_state::{ButtonId, InputSnapshot, InputState};
use joystick_panel::intensity::{Axis, LedChannel};
use joystick_panel::{Error, Result};

// ============================================================================
// Mocks
// ============================================================================

struct ScriptedJoystick {
    x_raw: u16,
    y_raw: u16,
    reads: Vec<Axis>,
}

impl ScriptedJoystick {
    const fn new(x_raw: u16, y_raw: u16) -> Self {
        Self {
            x_raw,
            y_raw,
            reads: Vec::new(),
        }
    }
}

impl AnalogSource for ScriptedJoystick {
    async fn read_channel(&mut self, axis: Axis) -> u16 {
        self.reads.push(axis);
        match axis {
            Axis::X => self.x_raw,
            Axis::Y => self.y_raw,
        }
    }
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
enum LedCall {
    Duty(LedChannel, u16),
    Indicator(bool),
}

#[derive(Default)]
struct RecordingLeds {
    calls: Vec<LedCall>,
}

impl LedOutputs for RecordingLeds {
    fn set_duty(&mut self, channel: LedChannel, level: u16) {
        self.calls.push(LedCall::Duty(channel, level));
    }

    fn set_indicator(&mut self, on: bool) {
        self.calls.push(LedCall::Indicator(on));
    }
}

/// Keeps every pushed frame; the flushes numbered in `failing_flushes` (0-based) NACK.
#[derive(Default)]
struct CapturingDisplay {
    frames: Vec<OledFrame>,
    flush_count: usize,
    failing_flushes: Vec<usize>,
}

impl CapturingDisplay {
    fn failing_on(failing_flushes: &[usize]) -> Self {
        Self {
            failing_flushes: failing_flushes.to_vec(),
            ..Self::default()
        }
    }
}

impl FrameSink for CapturingDisplay {
    async fn flush_frame(&mut self, frame: &OledFrame) -> Result<()> {
        let flush_index = self.flush_count;
        self.flush_count += 1;
        if self.failing_flushes.contains(&flush_index) {
            return Err(Error::Display(ErrorKind::NoAcknowledge(
                NoAcknowledgeSource::Address,
            )));
        }
        self.frames.push(*frame);
        Ok(())
    }
}

fn leaked_state() -> &'static InputState {
    Box::leak(Box::new(InputState::new()))
}

fn control_loop(
    input_state: &'static InputState,
    x_raw: u16,
    y_raw: u16,
) -> ControlLoop<ScriptedJoystick, RecordingLeds, CapturingDisplay> {
    ControlLoop::new(
        input_state,
        ScriptedJoystick::new(x_raw, y_raw),
        RecordingLeds::default(),
        CapturingDisplay::default(),
    )
}

// ============================================================================
// plan_tick
// ============================================================================

#[test]
fn plan_for_power_up_state() {
    let snapshot = InputState::new().snapshot();
    assert_eq!(
        plan_tick(3000, 2048, snapshot),
        TickPlan {
            red_level: 952,
            blue_level: 0,
            indicator_on: false,
            marker: (87, 27),
            border_width: 2,
        }
    );
}

#[test]
fn plan_with_pwm_inactive_is_dark_but_still_tracks_position() {
    let snapshot = InputSnapshot {
        toggle_enabled: true,
        pwm_active: false,
        border_width: 4,
    };
    let plan = plan_tick(0, 4095, snapshot);
    assert_eq!(plan.red_level, 0);
    assert_eq!(plan.blue_level, 0);
    assert!(plan.indicator_on);
    assert_eq!(plan.marker, (0, 0));
    assert_eq!(plan.border_width, 4);
}

// ============================================================================
// ControlLoop::tick
// ============================================================================

#[test]
fn tick_reads_x_then_y_and_drives_outputs_in_order() {
    let mut control_loop = control_loop(leaked_state(), 3000, 100);
    let report = block_on(control_loop.tick()).expect("tick must succeed");
    assert_eq!((report.x_raw, report.y_raw), (3000, 100));

    let (joystick, leds, display) = control_loop.into_parts();
    assert_eq!(joystick.reads, [Axis::X, Axis::Y]);
    assert_eq!(
        leds.calls,
        [
            LedCall::Duty(LedChannel::Red, 952),
            LedCall::Duty(LedChannel::Blue, 1948),
            LedCall::Indicator(false),
        ]
    );
    assert_eq!(display.frames.len(), 1);
}

#[test]
fn tick_flushes_the_composed_frame() {
    let mut control_loop = control_loop(leaked_state(), 2048, 2048);
    let report = block_on(control_loop.tick()).expect("tick must succeed");

    let mut expected = OledFrame::new();
    compose(&mut expected, report.plan.marker, MARKER_SIZE, 2);
    assert_eq!(control_loop.frame(), &expected);

    let (_, _, display) = control_loop.into_parts();
    assert_eq!(display.frames, [expected]);
}

#[test]
fn indicator_mirrors_joystick_toggle() {
    let input_state = leaked_state();
    let mut control_loop = control_loop(input_state, 2048, 2048);

    block_on(control_loop.tick()).expect("tick must succeed");
    assert!(input_state.on_edge(ButtonId::Joystick, Instant::from_millis(1_000)));
    let report = block_on(control_loop.tick()).expect("tick must succeed");
    assert!(report.plan.indicator_on);
    assert_eq!(report.plan.border_width, 4);
    assert!(control_loop.frame()[(3, 3)], "thick border must be drawn");

    let (_, leds, _) = control_loop.into_parts();
    let indicator: Vec<bool> = leds
        .calls
        .iter()
        .filter_map(|call| match call {
            LedCall::Indicator(on) => Some(*on),
            LedCall::Duty(..) => None,
        })
        .collect();
    assert_eq!(indicator, [false, true]);
}

#[test]
fn action_button_blanks_leds_until_pressed_again() {
    let input_state = leaked_state();
    let mut control_loop = control_loop(input_state, 0, 4095);

    let report = block_on(control_loop.tick()).expect("tick must succeed");
    assert_eq!((report.plan.red_level, report.plan.blue_level), (2048, 2047));

    assert!(input_state.on_edge(ButtonId::Action, Instant::from_millis(1_000)));
    let report = block_on(control_loop.tick()).expect("tick must succeed");
    assert_eq!((report.plan.red_level, report.plan.blue_level), (0, 0));

    assert!(input_state.on_edge(ButtonId::Action, Instant::from_millis(1_500)));
    let report = block_on(control_loop.tick()).expect("tick must succeed");
    assert_eq!((report.plan.red_level, report.plan.blue_level), (2048, 2047));
}

#[test]
fn centered_stick_keeps_leds_dark() {
    let mut control_loop = control_loop(leaked_state(), 1950, 2090);
    let report = block_on(control_loop.tick()).expect("tick must succeed");
    assert_eq!((report.plan.red_level, report.plan.blue_level), (0, 0));
}

#[test]
fn flush_failure_is_returned_after_leds_update() {
    let mut control_loop = ControlLoop::new(
        leaked_state(),
        ScriptedJoystick::new(3000, 2048),
        RecordingLeds::default(),
        CapturingDisplay::failing_on(&[0]),
    );
    let err = block_on(control_loop.tick()).expect_err("flush failure must surface");
    assert!(matches!(err, Error::Display(ErrorKind::NoAcknowledge(_))));

    let (_, leds, _) = control_loop.into_parts();
    assert_eq!(leds.calls.len(), 3, "LEDs are driven before the frame is pushed");
}

// ============================================================================
// ControlLoop::step
// ============================================================================

fn duty_updates(leds: &RecordingLeds) -> usize {
    leds.calls
        .iter()
        .filter(|call| matches!(call, LedCall::Duty(..)))
        .count()
}

#[test]
fn step_keeps_driving_leds_after_a_failed_flush() {
    let mut control_loop = ControlLoop::new(
        leaked_state(),
        ScriptedJoystick::new(3000, 100),
        RecordingLeds::default(),
        CapturingDisplay::failing_on(&[0]),
    );

    assert_eq!(block_on(control_loop.step()), None, "failed flush yields no report");
    let report = block_on(control_loop.step()).expect("display recovered");
    assert_eq!((report.plan.red_level, report.plan.blue_level), (952, 1948));

    let (_, leds, display) = control_loop.into_parts();
    assert_eq!(duty_updates(&leds), 4, "both ticks drove both LEDs");
    assert_eq!(display.frames.len(), 1);
}

#[test]
fn loop_body_survives_repeated_display_errors() {
    const TICKS: usize = 100;
    let mut control_loop = ControlLoop::new(
        leaked_state(),
        ScriptedJoystick::new(0, 4095),
        RecordingLeds::default(),
        CapturingDisplay::failing_on(&[2, 3, 50]),
    );

    let reports = (0..TICKS)
        .filter_map(|_| block_on(control_loop.step()))
        .count();
    assert_eq!(reports, TICKS - 3);

    let (joystick, leds, display) = control_loop.into_parts();
    assert_eq!(joystick.reads.len(), 2 * TICKS);
    assert_eq!(duty_updates(&leds), 2 * TICKS);
    assert_eq!(display.flush_count, TICKS);
    assert_eq!(display.frames.len(), TICKS - 3);
}
