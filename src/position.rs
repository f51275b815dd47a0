//! Joystick readings to marker coordinates on the display.

use crate::intensity::ADC_MAX;

/// Top-left pixel of the marker for a pair of raw axis readings.
///
/// X maps left to right. Y is inverted so pushing the stick up moves the marker
/// toward row 0. Both axes scale into `0..=screen_dim - marker_size` with integer
/// truncation, so the marker never leaves the screen:
///
/// - `x = x_raw * (screen_w - marker_size) / 4095`
/// - `y = (4095 - y_raw) * (screen_h - marker_size) / 4095`
///
/// Readings above 4095 are treated as 4095, and a marker larger than the screen
/// pins that axis to 0.
///
/// ```
/// use joystick_panel::position::map_position;
///
/// assert_eq!(map_position(0, 0, 128, 64, 8), (0, 56));
/// assert_eq!(map_position(4095, 4095, 128, 64, 8), (120, 0));
/// assert_eq!(map_position(2048, 2048, 128, 64, 8), (60, 27));
/// ```
#[must_use]
pub fn map_position(
    x_raw: u16,
    y_raw: u16,
    screen_w: u32,
    screen_h: u32,
    marker_size: u32,
) -> (u32, u32) {
    let x_raw = x_raw.min(ADC_MAX);
    let y_raw = y_raw.min(ADC_MAX);
    (
        scale(x_raw, screen_w.saturating_sub(marker_size)),
        scale(ADC_MAX.saturating_sub(y_raw), screen_h.saturating_sub(marker_size)),
    )
}

// `raw <= 4095` and `span <= u32::MAX`, so the product fits in u64 and the quotient
// is at most `span`.
fn scale(raw: u16, span: u32) -> u32 {
    let scaled = u64::from(raw)
        .saturating_mul(u64::from(span))
        .checked_div(u64::from(ADC_MAX))
        .unwrap_or(0);
    u32::try_from(scaled).unwrap_or(span)
}
