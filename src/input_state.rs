//! Debounced button state shared between the edge-watch tasks and the control loop.
//!
//! See [`InputState`] for the debounce rule and the effect of each button.

use embassy_time::{Duration, Instant};
use portable_atomic::{AtomicBool, AtomicU8, AtomicU64, Ordering};

// ============================================================================
// Constants
// ============================================================================

/// Edges on the same button closer together than this (inclusive) are ignored.
pub const DEBOUNCE_WINDOW: Duration = Duration::from_millis(200);

/// Border thickness, in pixels, at power-up.
pub const BORDER_WIDTH_THIN: u8 = 2;

/// Border thickness, in pixels, after one joystick-button press.
pub const BORDER_WIDTH_THICK: u8 = 4;

// ============================================================================
// ButtonId - Which button produced the edge
// ============================================================================

/// The two monitored buttons.
#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd, defmt::Format)]
pub enum ButtonId {
    /// The push switch built into the joystick. Flips the indicator and the border width.
    Joystick,
    /// The separate action button. Turns the LED intensity mapping on and off.
    Action,
}

// ============================================================================
// InputSnapshot
// ============================================================================

/// A copy of the toggles, read one field at a time.
///
/// The fields are loaded independently, so a press landing mid-read can leave
/// them from different moments. The loop converges on the next tick.
#[derive(Clone, Copy, Debug, Eq, PartialEq, defmt::Format)]
pub struct InputSnapshot {
    /// Mirrors the joystick-button toggle; drives the indicator LED.
    pub toggle_enabled: bool,
    /// When false, both PWM LEDs are forced to zero.
    pub pwm_active: bool,
    /// Border thickness in pixels, always [`BORDER_WIDTH_THIN`] or [`BORDER_WIDTH_THICK`].
    pub border_width: u8,
}

// ============================================================================
// InputState
// ============================================================================

/// Toggle flags, border width, and last-accepted press times for both buttons.
///
/// Every field is its own atomic so [`on_edge`](Self::on_edge) never blocks and
/// the control loop can read without a lock. `new` is `const`, so the usual home
/// is a plain `static` handed out as `&'static InputState`.
///
/// # Example
///
/// ```
/// use embassy_time::Instant;
/// use joystick_panel::input_state::{ButtonId, InputState};
///
/// static INPUT_STATE: InputState = InputState::new();
///
/// assert!(INPUT_STATE.on_edge(ButtonId::Joystick, Instant::from_millis(1_000)));
/// // Bounce 30 ms later is ignored.
/// assert!(!INPUT_STATE.on_edge(ButtonId::Joystick, Instant::from_millis(1_030)));
/// assert_eq!(INPUT_STATE.border_width(), 4);
/// ```
pub struct InputState {
    toggle_enabled: AtomicBool,
    pwm_active: AtomicBool,
    border_width: AtomicU8,
    last_joystick_ms: AtomicU64,
    last_action_ms: AtomicU64,
}

impl InputState {
    /// Power-up state: indicator off, PWM mapping on, thin border.
    ///
    /// Both press times start at 0 ms since boot, so edges in the first
    /// [`DEBOUNCE_WINDOW`] after boot are ignored.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            toggle_enabled: AtomicBool::new(false),
            pwm_active: AtomicBool::new(true),
            border_width: AtomicU8::new(BORDER_WIDTH_THIN),
            last_joystick_ms: AtomicU64::new(0),
            last_action_ms: AtomicU64::new(0),
        }
    }

    /// Handle one press edge from `source` observed at `now`.
    ///
    /// Returns `true` if the edge was outside the debounce window and its effect
    /// was applied, `false` if it was dropped. Only atomic loads and stores
    /// happen here, so it is safe to call from a tight edge-watch task.
    pub fn on_edge(&self, source: ButtonId, now: Instant) -> bool {
        let last_ms = self.last_press_ms(source);
        let now_ms = now.as_millis();
        let elapsed_ms = now_ms.saturating_sub(last_ms.load(Ordering::Acquire));
        if elapsed_ms <= DEBOUNCE_WINDOW.as_millis() {
            return false;
        }
        last_ms.store(now_ms, Ordering::Release);

        match source {
            ButtonId::Joystick => {
                self.toggle_enabled.fetch_not(Ordering::AcqRel);
                // Single writer: the joystick edge task is the only caller that gets here.
                let next_width = match self.border_width.load(Ordering::Acquire) {
                    BORDER_WIDTH_THIN => BORDER_WIDTH_THICK,
                    _ => BORDER_WIDTH_THIN,
                };
                self.border_width.store(next_width, Ordering::Release);
            }
            ButtonId::Action => {
                self.pwm_active.fetch_not(Ordering::AcqRel);
            }
        }
        true
    }

    /// Whether the joystick-button toggle is currently on.
    #[must_use]
    pub fn toggle_enabled(&self) -> bool {
        self.toggle_enabled.load(Ordering::Acquire)
    }

    /// Whether LED intensity mapping is live.
    #[must_use]
    pub fn pwm_active(&self) -> bool {
        self.pwm_active.load(Ordering::Acquire)
    }

    /// Current border thickness in pixels.
    #[must_use]
    pub fn border_width(&self) -> u8 {
        self.border_width.load(Ordering::Acquire)
    }

    /// Read all toggles, one field at a time.
    #[must_use]
    pub fn snapshot(&self) -> InputSnapshot {
        InputSnapshot {
            toggle_enabled: self.toggle_enabled(),
            pwm_active: self.pwm_active(),
            border_width: self.border_width(),
        }
    }

    const fn last_press_ms(&self, source: ButtonId) -> &AtomicU64 {
        match source {
            ButtonId::Joystick => &self.last_joystick_ms,
            ButtonId::Action => &self.last_action_ms,
        }
    }
}

impl Default for InputState {
    fn default() -> Self {
        Self::new()
    }
}
