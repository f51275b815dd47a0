//! A device abstraction for the joystick's two analog axes.
//!
//! See [`JoystickAdc`] for usage.

use defmt::warn;
use embassy_rp::Peri;
use embassy_rp::adc::{Adc, AdcPin, Async, Channel, Config};
use embassy_rp::gpio::Pull;
use embassy_rp::peripherals::ADC;

use crate::control::AnalogSource;
use crate::intensity::{ADC_CENTER, Axis};
use crate::irqs::Irqs;

/// Both joystick axes on the RP2040/RP2350 ADC.
///
/// A failed conversion is logged and answered with the last good reading for
/// that axis (mid-scale before the first one), so the control loop never sees
/// an error.
///
/// # Example
///
/// ```rust,no_run
/// # #![no_std]
/// # #![no_main]
/// # use panic_probe as _;
/// use joystick_panel::analog::JoystickAdc;
/// use joystick_panel::control::AnalogSource;
/// use joystick_panel::intensity::Axis;
///
/// async fn example(p: embassy_rp::Peripherals) {
///     // X on GPIO 27 (ADC1), Y on GPIO 26 (ADC0).
///     let mut joystick = JoystickAdc::new(p.ADC, p.PIN_27, p.PIN_26);
///     let x_raw = joystick.read_channel(Axis::X).await;
/// #   let _ = x_raw;
/// }
/// ```
pub struct JoystickAdc {
    adc: Adc<'static, Async>,
    x_channel: Channel<'static>,
    y_channel: Channel<'static>,
    last_x: u16,
    last_y: u16,
}

impl JoystickAdc {
    /// Configure the ADC and both axis pins (no pull resistors).
    #[must_use]
    pub fn new(
        adc: Peri<'static, ADC>,
        x_pin: Peri<'static, impl AdcPin + 'static>,
        y_pin: Peri<'static, impl AdcPin + 'static>,
    ) -> Self {
        Self {
            adc: Adc::new(adc, Irqs, Config::default()),
            x_channel: Channel::new_pin(x_pin, Pull::None),
            y_channel: Channel::new_pin(y_pin, Pull::None),
            last_x: ADC_CENTER,
            last_y: ADC_CENTER,
        }
    }
}

impl AnalogSource for JoystickAdc {
    async fn read_channel(&mut self, axis: Axis) -> u16 {
        let (channel, last) = match axis {
            Axis::X => (&mut self.x_channel, &mut self.last_x),
            Axis::Y => (&mut self.y_channel, &mut self.last_y),
        };
        match self.adc.read(channel).await {
            Ok(raw) => {
                *last = raw;
                raw
            }
            Err(err) => {
                warn!("JoystickAdc: {} conversion failed ({}), reusing {}", axis, err, *last);
                *last
            }
        }
    }
}
