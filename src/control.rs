//! One pass of the joystick control loop, and the loop itself.
//!
//! The loop talks to hardware only through three seams: [`AnalogSource`],
//! [`LedOutputs`], and [`FrameSink`]. That keeps [`ControlLoop::tick`] and
//! [`ControlLoop::step`] runnable on the host against mocks.

use embassy_time::Duration;
#[cfg(not(feature = "host"))]
use embassy_time::Timer;

use crate::frame::{MARKER_SIZE, OledFrame, compose};
use crate::input_state::{InputSnapshot, InputState};
use crate::intensity::{Axis, LedChannel, map_intensity};
use crate::oled::Ssd1306;
use crate::position::map_position;
use crate::{Error, Result};

/// Pause between loop iterations (about 20 Hz).
pub const LOOP_PERIOD: Duration = Duration::from_millis(50);

// ============================================================================
// Hardware seams
// ============================================================================

/// Source of raw 12-bit joystick readings.
pub trait AnalogSource {
    /// Read one axis. Never fails from the loop's point of view.
    async fn read_channel(&mut self, axis: Axis) -> u16;
}

/// The PWM LEDs and the on/off indicator LED.
pub trait LedOutputs {
    /// Set a PWM LED's duty level (`0..=4095`).
    fn set_duty(&mut self, channel: LedChannel, level: u16);

    /// Turn the indicator LED on or off.
    fn set_indicator(&mut self, on: bool);
}

/// Where finished frames go.
pub trait FrameSink {
    /// Push a complete frame to the display.
    ///
    /// # Errors
    ///
    /// Returns an error if the display transfer fails.
    async fn flush_frame(&mut self, frame: &OledFrame) -> Result<()>;
}

impl<I: embedded_hal_async::i2c::I2c> FrameSink for Ssd1306<I> {
    async fn flush_frame(&mut self, frame: &OledFrame) -> Result<()> {
        self.flush(frame).await
    }
}

// ============================================================================
// TickPlan / TickReport
// ============================================================================

/// Outputs derived from one pair of readings and the current toggles.
#[derive(Clone, Copy, Debug, Eq, PartialEq, defmt::Format)]
pub struct TickPlan {
    /// Red LED duty level, from the X reading.
    pub red_level: u16,
    /// Blue LED duty level, from the Y reading.
    pub blue_level: u16,
    /// Indicator LED state, mirroring the joystick-button toggle.
    pub indicator_on: bool,
    /// Marker top-left pixel.
    pub marker: (u32, u32),
    /// Border thickness to draw.
    pub border_width: u8,
}

/// What one [`ControlLoop::tick`] read and did.
#[derive(Clone, Copy, Debug, Eq, PartialEq, defmt::Format)]
pub struct TickReport {
    /// Raw X reading.
    pub x_raw: u16,
    /// Raw Y reading.
    pub y_raw: u16,
    /// Outputs applied.
    pub plan: TickPlan,
}

/// Compute every output for one iteration without touching hardware.
#[must_use]
pub fn plan_tick(x_raw: u16, y_raw: u16, snapshot: InputSnapshot) -> TickPlan {
    TickPlan {
        red_level: map_intensity(x_raw, snapshot.pwm_active),
        blue_level: map_intensity(y_raw, snapshot.pwm_active),
        indicator_on: snapshot.toggle_enabled,
        marker: map_position(
            x_raw,
            y_raw,
            OledFrame::SIZE.width,
            OledFrame::SIZE.height,
            MARKER_SIZE,
        ),
        border_width: snapshot.border_width,
    }
}

// ============================================================================
// ControlLoop
// ============================================================================

/// Reads the joystick, drives the LEDs, and redraws the display, forever.
///
/// The toggles come from a shared [`InputState`] updated by the edge-watch tasks.
///
/// # Example
///
/// ```rust,no_run
/// use joystick_panel::control::{AnalogSource, ControlLoop, FrameSink, LedOutputs};
/// use joystick_panel::input_state::InputState;
///
/// static INPUT_STATE: InputState = InputState::new();
///
/// async fn example(
///     analog: impl AnalogSource,
///     leds: impl LedOutputs,
///     display: impl FrameSink,
/// ) -> joystick_panel::Result<()> {
///     let mut control_loop = ControlLoop::new(&INPUT_STATE, analog, leds, display);
///     let report = control_loop.tick().await?;
///     assert!(report.plan.border_width == 2 || report.plan.border_width == 4);
///     Ok(())
/// }
/// ```
pub struct ControlLoop<A, L, D> {
    input_state: &'static InputState,
    analog: A,
    leds: L,
    display: D,
    frame: OledFrame,
}

impl<A: AnalogSource, L: LedOutputs, D: FrameSink> ControlLoop<A, L, D> {
    /// Assemble a loop from its shared state and hardware seams.
    pub const fn new(input_state: &'static InputState, analog: A, leds: L, display: D) -> Self {
        Self {
            input_state,
            analog,
            leds,
            display,
            frame: OledFrame::new(),
        }
    }

    /// Run one iteration without the trailing sleep.
    ///
    /// Reads X then Y, drives both PWM LEDs and the indicator, then composes
    /// and flushes one frame.
    ///
    /// # Errors
    ///
    /// Returns an error if the frame could not be flushed.
    pub async fn tick(&mut self) -> Result<TickReport> {
        let x_raw = self.analog.read_channel(Axis::X).await;
        let y_raw = self.analog.read_channel(Axis::Y).await;

        let plan = plan_tick(x_raw, y_raw, self.input_state.snapshot());

        self.leds.set_duty(LedChannel::Red, plan.red_level);
        self.leds.set_duty(LedChannel::Blue, plan.blue_level);
        self.leds.set_indicator(plan.indicator_on);

        compose(&mut self.frame, plan.marker, MARKER_SIZE, plan.border_width);
        self.display.flush_frame(&self.frame).await?;

        Ok(TickReport { x_raw, y_raw, plan })
    }

    /// The most recently composed frame.
    #[must_use]
    pub const fn frame(&self) -> &OledFrame {
        &self.frame
    }

    /// Tear the loop back into its hardware seams.
    pub fn into_parts(self) -> (A, L, D) {
        (self.analog, self.leds, self.display)
    }

    /// Run one iteration, logging a failed flush instead of returning it.
    ///
    /// The LEDs are driven before the frame is pushed, so a missing or
    /// glitching display never stalls them. Returns `None` for an iteration
    /// whose flush failed.
    pub async fn step(&mut self) -> Option<TickReport> {
        match self.tick().await {
            Ok(report) => Some(report),
            Err(err) => {
                log_flush_error(&err);
                None
            }
        }
    }

    /// [`step`](Self::step) every [`LOOP_PERIOD`], forever.
    #[cfg(not(feature = "host"))]
    pub async fn run(mut self) -> ! {
        defmt::info!("control loop: starting, period {} ms", LOOP_PERIOD.as_millis());
        loop {
            if let Some(report) = self.step().await {
                defmt::trace!("control loop: {}", report);
            }
            Timer::after(LOOP_PERIOD).await;
        }
    }
}

#[cfg(not(feature = "host"))]
fn log_flush_error(err: &Error) {
    defmt::warn!("control loop: {}", defmt::Display2Format(err));
}

#[cfg(feature = "host")]
const fn log_flush_error(_err: &Error) {}
