//! Interrupt bindings for the ADC and the display's I2C bus.
#![allow(unsafe_code, reason = "bind_interrupts! emits the interrupt vector entries")]

use embassy_rp::{adc, bind_interrupts, i2c, peripherals::I2C1};

bind_interrupts!(pub struct Irqs {
    ADC_IRQ_FIFO => adc::InterruptHandler;
    I2C1_IRQ => i2c::InterruptHandler<I2C1>;
});
