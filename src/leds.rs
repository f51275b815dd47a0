//! A device abstraction for the red/blue PWM LEDs and the green indicator LED.
//!
//! See [`JoystickLeds`] for usage.

use defmt::info;
use embassy_rp::gpio::Output;
use embassy_rp::pwm::{Config, Pwm};

use crate::control::LedOutputs;
use crate::intensity::{ADC_MAX, LedChannel};

/// PWM counter wrap value; duty levels share the ADC's 12-bit scale.
pub const PWM_TOP: u16 = ADC_MAX;

/// One of the two outputs of a PWM slice.
#[derive(Clone, Copy, Debug, Eq, PartialEq, defmt::Format)]
pub enum PwmOutput {
    /// Even GPIO of the slice.
    A,
    /// Odd GPIO of the slice.
    B,
}

/// Slice configuration for LED dimming: 12-bit edge-aligned counter, no clock
/// divider, both outputs off.
///
/// Pass it to `Pwm::new_output_ab` when building the slice for [`JoystickLeds`].
#[must_use]
pub fn pwm_config() -> Config {
    let mut cfg = Config::default();
    cfg.top = PWM_TOP;
    cfg.phase_correct = false;
    cfg.compare_a = 0;
    cfg.compare_b = 0;
    cfg.enable = true;
    cfg
}

/// The red and blue LEDs on one PWM slice, plus the green indicator on a GPIO.
///
/// # Example
///
/// ```rust,no_run
/// # #![no_std]
/// # #![no_main]
/// # use panic_probe as _;
/// use embassy_rp::gpio::{Level, Output};
/// use embassy_rp::pwm::Pwm;
/// use joystick_panel::control::LedOutputs;
/// use joystick_panel::intensity::LedChannel;
/// use joystick_panel::leds::{JoystickLeds, PwmOutput, pwm_config};
///
/// fn example(p: embassy_rp::Peripherals) {
///     // GPIO 12 is slice 6 output A (blue), GPIO 13 is slice 6 output B (red).
///     let pwm = Pwm::new_output_ab(p.PWM_SLICE6, p.PIN_12, p.PIN_13, pwm_config());
///     let indicator = Output::new(p.PIN_11, Level::Low);
///     let mut leds = JoystickLeds::new(pwm, PwmOutput::B, PwmOutput::A, indicator);
///
///     leds.set_duty(LedChannel::Red, 952);
///     leds.set_indicator(true);
/// }
/// ```
pub struct JoystickLeds<'d> {
    pwm: Pwm<'d>,
    cfg: Config, // Store config to avoid recreating default (which resets divider)
    red: PwmOutput,
    blue: PwmOutput,
    indicator: Output<'d>,
}

impl<'d> JoystickLeds<'d> {
    /// Take over a configured slice and the indicator pin.
    ///
    /// `red` and `blue` say which slice output each LED is wired to. Both LEDs
    /// start dark.
    #[must_use]
    pub fn new(pwm: Pwm<'d>, red: PwmOutput, blue: PwmOutput, indicator: Output<'d>) -> Self {
        assert!(red != blue, "red and blue LEDs must use different slice outputs");
        let mut leds = Self {
            pwm,
            cfg: pwm_config(),
            red,
            blue,
            indicator,
        };
        leds.pwm.set_config(&leds.cfg);
        info!("JoystickLeds: top={} red={} blue={}", PWM_TOP, red, blue);
        leds
    }

    const fn output_for(&self, channel: LedChannel) -> PwmOutput {
        match channel {
            LedChannel::Red => self.red,
            LedChannel::Blue => self.blue,
        }
    }
}

impl LedOutputs for JoystickLeds<'_> {
    /// Levels above [`PWM_TOP`] are clamped.
    ///
    /// Only the compare value changes; the stored config is reapplied so the
    /// divider and wrap stay intact.
    fn set_duty(&mut self, channel: LedChannel, level: u16) {
        let level = level.min(PWM_TOP);
        match self.output_for(channel) {
            PwmOutput::A => self.cfg.compare_a = level,
            PwmOutput::B => self.cfg.compare_b = level,
        }
        self.pwm.set_config(&self.cfg);
    }

    fn set_indicator(&mut self, on: bool) {
        self.indicator.set_level(on.into());
    }
}
