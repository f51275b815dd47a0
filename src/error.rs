//! Crate-wide error type.

use derive_more::{Display, From};
use embassy_executor::SpawnError;
use embedded_hal::i2c::ErrorKind;

/// Result alias used throughout the crate.
pub type Result<T, E = Error> = core::result::Result<T, E>;

/// Errors from the hardware-facing parts of the crate.
///
/// The control core itself is infallible; these only come from spawning
/// background tasks and talking to the display.
#[derive(Debug, Display, From)]
pub enum Error {
    /// A background task could not be spawned (its pool is exhausted).
    #[display("task spawn failed: {_0:?}")]
    TaskSpawn(SpawnError),

    /// An I2C transfer to the OLED failed.
    #[display("display I2C transfer failed: {_0:?}")]
    Display(ErrorKind),
}

impl core::error::Error for Error {}
