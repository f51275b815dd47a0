#![no_std]
#![no_main]
#![cfg(not(feature = "host"))]

//! Logs raw joystick readings and what the panel would do with them.
//!
//! Useful for checking a joystick's rest position against the dead-zone.

use defmt::info;
use embassy_executor::Spawner;
use embassy_time::{Duration, Timer};
use joystick_panel::{
    analog::JoystickAdc,
    control::{AnalogSource, plan_tick},
    input_state::{BORDER_WIDTH_THIN, InputSnapshot},
    intensity::{Axis, in_dead_zone},
};
use {defmt_rtt as _, panic_probe as _};

// Tells the RP2350 boot ROM this is a runnable image.
#[cfg(feature = "pico2")]
#[allow(unsafe_code, reason = "boot block must land in its linker section")]
#[unsafe(link_section = ".start_block")]
#[used]
pub static IMAGE_DEF: embassy_rp::block::ImageDef = embassy_rp::block::ImageDef::secure_exe();

const SAMPLE_PERIOD: Duration = Duration::from_millis(250);

// Power-up toggles, so the logged levels are what the LEDs would show.
const POWER_UP: InputSnapshot = InputSnapshot {
    toggle_enabled: false,
    pwm_active: true,
    border_width: BORDER_WIDTH_THIN,
};

#[embassy_executor::main]
async fn main(_spawner: Spawner) -> ! {
    let p = embassy_rp::init(Default::default());
    let mut joystick = JoystickAdc::new(p.ADC, p.PIN_27, p.PIN_26);

    loop {
        let x_raw = joystick.read_channel(Axis::X).await;
        let y_raw = joystick.read_channel(Axis::Y).await;
        let plan = plan_tick(x_raw, y_raw, POWER_UP);
        info!(
            "x={} (rest={}, red={}) y={} (rest={}, blue={}) marker=({}, {})",
            x_raw,
            in_dead_zone(x_raw),
            plan.red_level,
            y_raw,
            in_dead_zone(y_raw),
            plan.blue_level,
            plan.marker.0,
            plan.marker.1
        );
        Timer::after(SAMPLE_PERIOD).await;
    }
}
