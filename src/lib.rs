//! Joystick-driven feedback for the Pico: two PWM LEDs, an indicator LED, and a live
//! position marker on a 128×64 SSD1306 OLED.
//!
//! The behavior is split into small, hardware-free pieces that run on the host
//! ([`input_state`], [`intensity`], [`position`], [`frame`], [`control`]) and thin
//! `embassy-rp` adapters that feed them ([`analog`], [`leds`], [`edge_watch`]).
//! The [`oled`] driver is generic over `embedded-hal-async` I2C and runs anywhere.
//!
//! # Glossary
//!
//! - **Dead-zone:** joystick readings near center treated as "no input".
//! - **Debounce:** ignoring repeated edges from a single physical press.
//! - **Duty level:** PWM compare value, i.e. perceived LED brightness.
//! - **Marker:** the filled square showing the joystick position.
//! - **Page:** an SSD1306 row of 8 vertical pixels stored in one byte per column.
#![cfg_attr(not(feature = "host"), no_std)]
#![cfg_attr(not(feature = "host"), no_main)]
#![allow(async_fn_in_trait, reason = "single-threaded embedded")]

// Compile-time checks: exactly one board must be selected (unless testing with host feature)
#[cfg(all(not(any(feature = "pico1", feature = "pico2")), not(feature = "host")))]
compile_error!("Must enable exactly one board feature: 'pico1' or 'pico2'");

#[cfg(all(feature = "pico1", feature = "pico2"))]
compile_error!("Cannot enable both 'pico1' and 'pico2' features simultaneously");

#[cfg(all(not(feature = "arm"), not(feature = "host")))]
compile_error!("Must enable the 'arm' architecture feature");

// These modules require embassy_rp and are excluded when testing on host
#[cfg(not(feature = "host"))]
pub mod analog;
#[cfg(not(feature = "host"))]
pub mod edge_watch;
#[cfg(not(feature = "host"))]
#[doc(hidden)]
pub mod irqs;
#[cfg(not(feature = "host"))]
pub mod leds;

pub mod control;
mod error;
pub mod frame;
pub mod input_state;
pub mod intensity;
pub mod oled;
pub mod position;
#[cfg(feature = "host")]
pub mod to_png;

// Re-export error types and result (used throughout)
pub use crate::error::{Error, Result};
