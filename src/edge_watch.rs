//! Background button monitoring that feeds press edges into [`InputState`].
//!
//! Each button gets its own task that sleeps until the pin's press edge, stamps
//! it with the current time, and hands it to [`InputState::on_edge`]. The task
//! does nothing else, so the debounce decision stays short and never blocks the
//! control loop.
//!
//! See [`spawn_edge_watch`] for usage.

use defmt::{info, trace};
use embassy_executor::Spawner;
use embassy_rp::Peri;
use embassy_rp::gpio::{Input, Pin, Pull};
use embassy_time::Instant;

use crate::input_state::{ButtonId, InputState};
use crate::{Error, Result};

// ============================================================================
// PressedTo - Which rail a pressed button ties the pin to
// ============================================================================

/// The rail a pressed button connects its pin to. Picks the pull resistor and
/// which edge counts as a press.
#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd, defmt::Format)]
pub enum PressedTo {
    /// Pressed ties the pin to 3V3. Pulled down; a press is a rising edge.
    ///
    /// Avoid on RP2350 (erratum E9 can latch the pin high after release).
    Voltage,

    /// Pressed ties the pin to GND. Pulled up; a press is a falling edge.
    /// Both panel buttons are wired this way.
    Ground,
}

impl PressedTo {
    const fn pull(self) -> Pull {
        match self {
            Self::Voltage => Pull::Down,
            Self::Ground => Pull::Up,
        }
    }
}

// ============================================================================
// spawn_edge_watch
// ============================================================================

/// Number of buttons that can be watched at once (the task pool size).
pub const EDGE_WATCH_POOL_SIZE: usize = 2;

/// Configure `pin` as a button input and spawn a task that reports its press
/// edges to `input_state` as `button`.
///
/// # Errors
///
/// Returns [`Error::TaskSpawn`] if more than [`EDGE_WATCH_POOL_SIZE`] buttons
/// are watched.
///
/// # Example
///
/// ```rust,no_run
/// # #![no_std]
/// # #![no_main]
/// # use panic_probe as _;
/// use embassy_executor::Spawner;
/// use joystick_panel::edge_watch::{PressedTo, spawn_edge_watch};
/// use joystick_panel::input_state::{ButtonId, InputState};
///
/// static INPUT_STATE: InputState = InputState::new();
///
/// fn example(p: embassy_rp::Peripherals, spawner: Spawner) -> joystick_panel::Result<()> {
///     spawn_edge_watch(p.PIN_22, PressedTo::Ground, ButtonId::Joystick, &INPUT_STATE, spawner)?;
///     spawn_edge_watch(p.PIN_5, PressedTo::Ground, ButtonId::Action, &INPUT_STATE, spawner)?;
///     Ok(())
/// }
/// ```
pub fn spawn_edge_watch<P: Pin>(
    pin: Peri<'static, P>,
    pressed_to: PressedTo,
    button: ButtonId,
    input_state: &'static InputState,
    spawner: Spawner,
) -> Result<()> {
    let input = Input::new(pin, pressed_to.pull());
    let token = edge_watch_task(input, pressed_to, button, input_state);
    spawner.spawn(token).map_err(Error::TaskSpawn)?;
    info!("edge_watch: watching {} ({})", button, pressed_to);
    Ok(())
}

#[embassy_executor::task(pool_size = 2)]
async fn edge_watch_task(
    mut input: Input<'static>,
    pressed_to: PressedTo,
    button: ButtonId,
    input_state: &'static InputState,
) -> ! {
    loop {
        match pressed_to {
            PressedTo::Ground => input.wait_for_falling_edge().await,
            PressedTo::Voltage => input.wait_for_rising_edge().await,
        }

        let now = Instant::now();
        if input_state.on_edge(button, now) {
            info!(
                "edge_watch: {} press at {} ms -> {}",
                button,
                now.as_millis(),
                input_state.snapshot()
            );
        } else {
            trace!("edge_watch: {} bounce at {} ms", button, now.as_millis());
        }
    }
}
