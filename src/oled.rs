//! A minimal async SSD1306 driver for 128×64 I2C OLED modules.
//!
//! Only what the panel needs: power-up configuration and full-frame pushes in
//! horizontal addressing mode. Works with any [`embedded_hal_async::i2c::I2c`],
//! so it also runs on the host against a mock bus.
//!
//! See [`Ssd1306`] for usage.

use embedded_hal::i2c::Error as _;
use embedded_hal_async::i2c::I2c;

use crate::frame::MonoFrame;
use crate::{Error, Result};

// ============================================================================
// Constants
// ============================================================================

/// Default 7-bit I2C address of SSD1306 modules (SA0 tied low).
pub const OLED_ADDRESS: u8 = 0x3C;

/// I2C bus frequency used for the display.
pub const OLED_I2C_FREQUENCY_HZ: u32 = 400_000;

/// Control byte announcing that command bytes follow.
pub const CONTROL_COMMAND: u8 = 0x00;

/// Control byte announcing that display RAM bytes follow.
pub const CONTROL_DATA: u8 = 0x40;

/// Display RAM bytes sent per I2C write.
pub const DATA_CHUNK_LEN: usize = 16;

const MAX_COMMAND_LEN: usize = 3;

const SET_MEMORY_MODE: u8 = 0x20;
const SET_COLUMN_ADDRESS: u8 = 0x21;
const SET_PAGE_ADDRESS: u8 = 0x22;
const SET_DISPLAY_START_LINE: u8 = 0x40;
const SET_CONTRAST: u8 = 0x81;
const SET_CHARGE_PUMP: u8 = 0x8D;
const SET_SEGMENT_REMAP: u8 = 0xA1;
const SET_ENTIRE_ON_RESUME: u8 = 0xA4;
const SET_NORMAL_DISPLAY: u8 = 0xA6;
const SET_MULTIPLEX_RATIO: u8 = 0xA8;
const SET_DISPLAY_OFF: u8 = 0xAE;
const SET_DISPLAY_ON: u8 = 0xAF;
const SET_COM_SCAN_DESCENDING: u8 = 0xC8;
const SET_DISPLAY_OFFSET: u8 = 0xD3;
const SET_CLOCK_DIVIDE: u8 = 0xD5;
const SET_PRECHARGE: u8 = 0xD9;
const SET_COM_PINS: u8 = 0xDA;
const SET_VCOM_DESELECT: u8 = 0xDB;

/// Power-up sequence for a 128×64 panel with the internal charge pump.
const INIT_SEQUENCE: [&[u8]; 16] = [
    &[SET_DISPLAY_OFF],
    &[SET_MEMORY_MODE, 0x00], // horizontal addressing
    &[SET_DISPLAY_START_LINE],
    &[SET_SEGMENT_REMAP],
    &[SET_MULTIPLEX_RATIO, 0x3F], // 64 rows
    &[SET_COM_SCAN_DESCENDING],
    &[SET_DISPLAY_OFFSET, 0x00],
    &[SET_COM_PINS, 0x12],
    &[SET_CLOCK_DIVIDE, 0x80],
    &[SET_PRECHARGE, 0xF1],
    &[SET_VCOM_DESELECT, 0x30],
    &[SET_CONTRAST, 0xFF],
    &[SET_ENTIRE_ON_RESUME],
    &[SET_NORMAL_DISPLAY],
    &[SET_CHARGE_PUMP, 0x14],
    &[SET_DISPLAY_ON],
];

// ============================================================================
// Ssd1306
// ============================================================================

/// An SSD1306 OLED on an async I2C bus.
///
/// A failed [`init`](Self::init) or [`flush`](Self::flush) is not final: the
/// next `flush` re-sends the power-up sequence first, so a display that was
/// absent at boot or browned out recovers on its own.
///
/// # Example
///
/// ```rust,no_run
/// use joystick_panel::frame::{OledFrame, compose};
/// use joystick_panel::oled::{OLED_ADDRESS, Ssd1306};
///
/// async fn example<I: embedded_hal_async::i2c::I2c>(i2c: I) -> joystick_panel::Result<()> {
///     let mut oled = Ssd1306::new(i2c, OLED_ADDRESS);
///     oled.init().await?;
///
///     let mut frame = OledFrame::new();
///     compose(&mut frame, (60, 27), 8, 2);
///     oled.flush(&frame).await
/// }
/// ```
pub struct Ssd1306<I> {
    i2c: I,
    address: u8,
    needs_init: bool,
}

impl<I: I2c> Ssd1306<I> {
    /// Wrap a bus. Nothing is sent until [`init`](Self::init).
    #[must_use]
    pub const fn new(i2c: I, address: u8) -> Self {
        Self {
            i2c,
            address,
            needs_init: false,
        }
    }

    /// Send the power-up configuration and switch the panel on.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Display`] if any I2C write fails.
    pub async fn init(&mut self) -> Result<()> {
        self.needs_init = true;
        for command in INIT_SEQUENCE {
            self.command(command).await?;
        }
        self.needs_init = false;
        Ok(())
    }

    /// Whether the next [`flush`](Self::flush) will re-send the power-up
    /// sequence because an earlier transfer failed.
    #[must_use]
    pub const fn needs_init(&self) -> bool {
        self.needs_init
    }

    /// Push a whole frame to display RAM.
    ///
    /// Sets the column and page window to cover the frame, then streams the
    /// pages top to bottom in writes of up to [`DATA_CHUNK_LEN`] bytes, each
    /// prefixed with [`CONTROL_DATA`]. After an earlier failure the power-up
    /// sequence goes out first.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Display`] if any I2C write fails.
    pub async fn flush<const W: usize, const H: usize>(
        &mut self,
        frame: &MonoFrame<W, H>,
    ) -> Result<()> {
        if self.needs_init {
            self.init().await?;
        }
        let result = self.write_frame(frame).await;
        self.needs_init = result.is_err();
        result
    }

    async fn write_frame<const W: usize, const H: usize>(
        &mut self,
        frame: &MonoFrame<W, H>,
    ) -> Result<()> {
        let last_column = u8::try_from(W.saturating_sub(1)).unwrap_or(u8::MAX);
        let last_page =
            u8::try_from(MonoFrame::<W, H>::PAGES.saturating_sub(1)).unwrap_or(u8::MAX);
        self.command(&[SET_COLUMN_ADDRESS, 0, last_column]).await?;
        self.command(&[SET_PAGE_ADDRESS, 0, last_page]).await?;

        for page in 0..MonoFrame::<W, H>::PAGES {
            let page_bytes: [u8; W] = core::array::from_fn(|column| frame.page_byte(page, column));
            for chunk in page_bytes.chunks(DATA_CHUNK_LEN) {
                self.write_prefixed::<{ DATA_CHUNK_LEN + 1 }>(CONTROL_DATA, chunk)
                    .await?;
            }
        }
        Ok(())
    }

    /// Give the bus back.
    #[must_use]
    pub fn release(self) -> I {
        self.i2c
    }

    async fn command(&mut self, bytes: &[u8]) -> Result<()> {
        self.write_prefixed::<{ MAX_COMMAND_LEN + 1 }>(CONTROL_COMMAND, bytes)
            .await
    }

    // One I2C write of `control` followed by `payload`. `N` bounds the whole message.
    async fn write_prefixed<const N: usize>(&mut self, control: u8, payload: &[u8]) -> Result<()> {
        debug_assert!(payload.len() < N, "payload must fit after the control byte");
        let mut buffer = [control; N];
        for (slot, byte) in buffer.iter_mut().skip(1).zip(payload) {
            *slot = *byte;
        }
        let len = payload.len().saturating_add(1).min(N);
        let message = buffer.get(..len).unwrap_or(&buffer);
        self.i2c
            .write(self.address, message)
            .await
            .map_err(|err| Error::Display(err.kind()))
    }
}
