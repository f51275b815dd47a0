//! An in-memory 1-bit frame for the OLED and the rule that composes each one.
//!
//! Draw into a [`MonoFrame`] directly, through the [`embedded-graphics`](https://docs.rs/embedded-graphics)
//! API, or with [`compose`], which renders the joystick marker and border.
//!
//! # Example
//!
//! ```
//! use joystick_panel::frame::{OledFrame, compose};
//!
//! let mut frame = OledFrame::new();
//! compose(&mut frame, (60, 27), 8, 2);
//!
//! assert!(frame[(0, 0)]);      // outer border
//! assert!(frame[(1, 1)]);      // second border ring
//! assert!(!frame[(2, 2)]);     // inside the border
//! assert!(frame[(60, 27)]);    // marker's top-left pixel
//! assert!(frame[(67, 34)]);    // marker's bottom-right pixel
//! ```

use core::{
    convert::Infallible,
    ops::{Deref, DerefMut, Index, IndexMut},
};
use embedded_graphics::{
    Drawable, Pixel,
    geometry::{OriginDimensions, Point, Size},
    pixelcolor::BinaryColor,
    prelude::{DrawTarget, Primitive},
    primitives::{PrimitiveStyle, PrimitiveStyleBuilder, Rectangle, StrokeAlignment},
};

// ============================================================================
// Constants
// ============================================================================

/// OLED width in pixels.
pub const SCREEN_WIDTH: usize = 128;

/// OLED height in pixels.
pub const SCREEN_HEIGHT: usize = 64;

/// Side of the square position marker, in pixels.
pub const MARKER_SIZE: u32 = 8;

/// Rows per SSD1306 page.
pub const PAGE_HEIGHT: usize = 8;

/// The frame type sized for the 128×64 OLED.
pub type OledFrame = MonoFrame<SCREEN_WIDTH, SCREEN_HEIGHT>;

// ============================================================================
// MonoFrame
// ============================================================================

/// A `W`×`H` monochrome pixel buffer, `true` meaning lit.
///
/// Indexed as `frame[(x, y)]` or row-first as `frame[y][x]`.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct MonoFrame<const W: usize, const H: usize>(pub [[bool; W]; H]);

impl<const W: usize, const H: usize> MonoFrame<W, H> {
    /// Frame width in pixels (columns).
    pub const WIDTH: usize = W;
    /// Frame height in pixels (rows).
    pub const HEIGHT: usize = H;
    /// Number of SSD1306 pages covering the frame.
    pub const PAGES: usize = H.div_ceil(PAGE_HEIGHT);
    /// Frame dimensions as a [`Size`].
    #[expect(clippy::cast_possible_truncation, reason = "display dimensions are tiny")]
    pub const SIZE: Size = Size::new(W as u32, H as u32);
    /// Top-left corner coordinate as a [`Point`].
    pub const TOP_LEFT: Point = Point::new(0, 0);

    /// Create a blank (all off) frame.
    #[must_use]
    pub const fn new() -> Self {
        Self([[false; W]; H])
    }

    /// Turn every pixel off.
    pub fn clear(&mut self) {
        self.0 = [[false; W]; H];
    }

    /// Number of lit pixels.
    #[must_use]
    pub fn lit_count(&self) -> usize {
        self.0.iter().flatten().filter(|lit| **lit).count()
    }

    /// Draw a `w`×`h` rectangle with its top-left corner at (`x`, `y`).
    ///
    /// A filled rectangle lights every pixel it covers. An unfilled one lights
    /// only its 1-pixel outline, drawn inside the bounds. Anything outside the
    /// frame is clipped.
    pub fn draw_rect(&mut self, x: u32, y: u32, w: u32, h: u32, filled: bool) {
        let style = if filled {
            PrimitiveStyle::with_fill(BinaryColor::On)
        } else {
            PrimitiveStyleBuilder::new()
                .stroke_color(BinaryColor::On)
                .stroke_width(1)
                .stroke_alignment(StrokeAlignment::Inside)
                .build()
        };
        let top_left = Point::new(to_coord(x), to_coord(y));
        let Ok(()) = Rectangle::new(top_left, Size::new(w, h))
            .into_styled(style)
            .draw(self);
    }

    /// One SSD1306 data byte: 8 vertical pixels of `column` starting at row
    /// `page * 8`, least significant bit on top.
    ///
    /// Rows or columns beyond the frame read as off.
    #[must_use]
    pub fn page_byte(&self, page: usize, column: usize) -> u8 {
        let top = page.saturating_mul(PAGE_HEIGHT);
        self.0
            .iter()
            .skip(top)
            .take(PAGE_HEIGHT)
            .enumerate()
            .filter(|(_, row)| row.get(column).copied().unwrap_or(false))
            .fold(0u8, |byte, (bit, _)| byte | (1u8 << bit))
    }
}

fn to_coord(value: u32) -> i32 {
    i32::try_from(value).unwrap_or(i32::MAX)
}

impl<const W: usize, const H: usize> Deref for MonoFrame<W, H> {
    type Target = [[bool; W]; H];

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl<const W: usize, const H: usize> DerefMut for MonoFrame<W, H> {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.0
    }
}

impl<const W: usize, const H: usize> Index<(usize, usize)> for MonoFrame<W, H> {
    type Output = bool;

    #[expect(clippy::indexing_slicing, reason = "indices are asserted in bounds first")]
    fn index(&self, (x_index, y_index): (usize, usize)) -> &Self::Output {
        assert!(x_index < W, "x_index must be within width");
        assert!(y_index < H, "y_index must be within height");
        &self.0[y_index][x_index]
    }
}

impl<const W: usize, const H: usize> IndexMut<(usize, usize)> for MonoFrame<W, H> {
    #[expect(clippy::indexing_slicing, reason = "indices are asserted in bounds first")]
    fn index_mut(&mut self, (x_index, y_index): (usize, usize)) -> &mut Self::Output {
        assert!(x_index < W, "x_index must be within width");
        assert!(y_index < H, "y_index must be within height");
        &mut self.0[y_index][x_index]
    }
}

impl<const W: usize, const H: usize> Default for MonoFrame<W, H> {
    fn default() -> Self {
        Self::new()
    }
}

impl<const W: usize, const H: usize> OriginDimensions for MonoFrame<W, H> {
    fn size(&self) -> Size {
        Self::SIZE
    }
}

impl<const W: usize, const H: usize> DrawTarget for MonoFrame<W, H> {
    type Color = BinaryColor;
    type Error = Infallible;

    fn draw_iter<I>(&mut self, pixels: I) -> core::result::Result<(), Self::Error>
    where
        I: IntoIterator<Item = Pixel<Self::Color>>,
    {
        for Pixel(coord, color) in pixels {
            let (Ok(x_index), Ok(y_index)) = (usize::try_from(coord.x), usize::try_from(coord.y))
            else {
                continue;
            };
            if let Some(pixel) = self.0.get_mut(y_index).and_then(|row| row.get_mut(x_index)) {
                *pixel = color.is_on();
            }
        }
        Ok(())
    }
}

// ============================================================================
// compose
// ============================================================================

/// Redraw `frame` from scratch: the marker plus a border `border_width` pixels thick.
///
/// The frame is cleared first. The marker is a filled `marker_size` square at
/// `marker_pos`. The border is `border_width` nested outlines, the i-th inset by
/// `i` pixels on every side, so together they read as one solid border.
pub fn compose<const W: usize, const H: usize>(
    frame: &mut MonoFrame<W, H>,
    marker_pos: (u32, u32),
    marker_size: u32,
    border_width: u8,
) {
    frame.clear();

    let (marker_x, marker_y) = marker_pos;
    frame.draw_rect(marker_x, marker_y, marker_size, marker_size, true);

    let Size { width, height } = MonoFrame::<W, H>::SIZE;
    for inset in 0..u32::from(border_width) {
        let double_inset = inset.saturating_mul(2);
        frame.draw_rect(
            inset,
            inset,
            width.saturating_sub(double_inset),
            height.saturating_sub(double_inset),
            false,
        );
    }
}
