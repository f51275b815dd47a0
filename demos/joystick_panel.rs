#![no_std]
#![no_main]
#![cfg(not(feature = "host"))]

use core::convert::Infallible;
use core::panic;
use defmt::{Display2Format, info, warn};
use embassy_executor::Spawner;
use embassy_rp::gpio::{Level, Output};
use embassy_rp::i2c::{self, I2c};
use embassy_rp::pwm::Pwm;
use joystick_panel::{
    Result,
    analog::JoystickAdc,
    control::ControlLoop,
    edge_watch::{PressedTo, spawn_edge_watch},
    input_state::{ButtonId, InputState},
    irqs::Irqs,
    leds::{JoystickLeds, PwmOutput, pwm_config},
    oled::{OLED_ADDRESS, OLED_I2C_FREQUENCY_HZ, Ssd1306},
};
use {defmt_rtt as _, panic_probe as _};

// Tells the RP2350 boot ROM this is a runnable image.
#[cfg(feature = "pico2")]
#[allow(unsafe_code, reason = "boot block must land in its linker section")]
#[unsafe(link_section = ".start_block")]
#[used]
pub static IMAGE_DEF: embassy_rp::block::ImageDef = embassy_rp::block::ImageDef::secure_exe();

// Written by the two edge-watch tasks, read by the control loop.
static INPUT_STATE: InputState = InputState::new();

#[embassy_executor::main]
async fn main(spawner: Spawner) -> ! {
    let err = inner_main(spawner).await.unwrap_err();
    panic!("{err}");
}

async fn inner_main(spawner: Spawner) -> Result<Infallible> {
    let p = embassy_rp::init(Default::default());

    // OLED on I2C1: SDA is GPIO 14, SCL is GPIO 15.
    let mut i2c_config = i2c::Config::default();
    i2c_config.frequency = OLED_I2C_FREQUENCY_HZ;
    let i2c = I2c::new_async(p.I2C1, p.PIN_15, p.PIN_14, Irqs, i2c_config);
    let mut oled = Ssd1306::new(i2c, OLED_ADDRESS);
    // On failure the driver re-sends init before the next flush.
    match oled.init().await {
        Ok(()) => info!("OLED ready at {=u8:#x}", OLED_ADDRESS),
        Err(err) => warn!("OLED init failed, retrying on flush: {}", Display2Format(&err)),
    }

    // Joystick push switch on GPIO 22, action button on GPIO 5, both to ground.
    spawn_edge_watch(
        p.PIN_22,
        PressedTo::Ground,
        ButtonId::Joystick,
        &INPUT_STATE,
        spawner,
    )?;
    spawn_edge_watch(
        p.PIN_5,
        PressedTo::Ground,
        ButtonId::Action,
        &INPUT_STATE,
        spawner,
    )?;

    // Blue on GPIO 12 (slice 6 A), red on GPIO 13 (slice 6 B), green indicator on GPIO 11.
    let pwm = Pwm::new_output_ab(p.PWM_SLICE6, p.PIN_12, p.PIN_13, pwm_config());
    let indicator = Output::new(p.PIN_11, Level::Low);
    let leds = JoystickLeds::new(pwm, PwmOutput::B, PwmOutput::A, indicator);

    // X on GPIO 27 (ADC1), Y on GPIO 26 (ADC0).
    let joystick = JoystickAdc::new(p.ADC, p.PIN_27, p.PIN_26);

    ControlLoop::new(&INPUT_STATE, joystick, leds, oled)
        .run()
        .await
}
