//! Joystick deflection to LED brightness.
//!
//! Brightness is the distance of the reading from mid-scale, with a dead-zone
//! around the joystick's rest position. See [`map_intensity`].

// ============================================================================
// Constants
// ============================================================================

/// Largest 12-bit ADC reading.
pub const ADC_MAX: u16 = 4095;

/// Mid-scale reading of a centered joystick.
pub const ADC_CENTER: u16 = 2048;

/// Lowest reading (inclusive) treated as "at rest".
pub const DEAD_ZONE_LOW: u16 = 1900;

/// Highest reading (inclusive) treated as "at rest".
pub const DEAD_ZONE_HIGH: u16 = 2100;

// ============================================================================
// Axis / AnalogSample
// ============================================================================

/// A joystick axis.
#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd, defmt::Format)]
pub enum Axis {
    /// Left/right. Drives the red LED and the marker's column.
    X,
    /// Up/down. Drives the blue LED and the marker's row.
    Y,
}

/// One raw 12-bit reading from an axis.
#[derive(Clone, Copy, Debug, Eq, PartialEq, defmt::Format)]
pub struct AnalogSample {
    /// Which axis was read.
    pub axis: Axis,
    /// Raw conversion result in `0..=4095`.
    pub raw: u16,
}

// ============================================================================
// LedChannel / LedDrive
// ============================================================================

/// The two PWM-driven LEDs.
#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd, defmt::Format)]
pub enum LedChannel {
    /// Follows the X axis.
    Red,
    /// Follows the Y axis.
    Blue,
}

impl From<Axis> for LedChannel {
    fn from(axis: Axis) -> Self {
        match axis {
            Axis::X => Self::Red,
            Axis::Y => Self::Blue,
        }
    }
}

/// A duty level destined for one LED channel.
#[derive(Clone, Copy, Debug, Eq, PartialEq, defmt::Format)]
pub struct LedDrive {
    /// Target LED.
    pub channel: LedChannel,
    /// PWM compare value in `0..=4095`.
    pub level: u16,
}

impl LedDrive {
    /// Map a sample to the drive level of the LED that follows its axis.
    #[must_use]
    pub fn for_sample(sample: AnalogSample, active: bool) -> Self {
        Self {
            channel: sample.axis.into(),
            level: map_intensity(sample.raw, active),
        }
    }
}

// ============================================================================
// map_intensity
// ============================================================================

/// Whether `raw` falls in the rest-position dead-zone.
#[must_use]
pub const fn in_dead_zone(raw: u16) -> bool {
    raw >= DEAD_ZONE_LOW && raw <= DEAD_ZONE_HIGH
}

/// LED duty level for a raw axis reading.
///
/// Inside the dead-zone the result is always 0. Outside it, the result is
/// `|raw - 2048|` when `active`, and 0 otherwise. For 12-bit input the result
/// never exceeds 2048.
///
/// ```
/// use joystick_panel::intensity::map_intensity;
///
/// assert_eq!(map_intensity(3000, true), 952);
/// assert_eq!(map_intensity(3000, false), 0);
/// assert_eq!(map_intensity(2000, true), 0); // dead-zone
/// ```
#[must_use]
pub const fn map_intensity(raw: u16, active: bool) -> u16 {
    if in_dead_zone(raw) || !active {
        return 0;
    }
    raw.abs_diff(ADC_CENTER)
}
