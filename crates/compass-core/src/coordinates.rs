//! Geographic coordinates and degrees/minutes/seconds formatting
//!
//! Conversion truncates at every step (degrees, minutes, seconds); it never
//! rounds. `37.7749` therefore reads `37°46'29"N`, not `37°46'30"N`.

use core::fmt::Write;

use heapless::String;

/// Upper bound for a single formatted DMS value, e.g. `180°59'59"W`.
pub const MAX_DMS_LENGTH: usize = 24;

/// Upper bound for a formatted latitude/longitude pair.
pub const MAX_COORDINATES_LENGTH: usize = 2 * MAX_DMS_LENGTH + 1;

const MINUTES_PER_DEGREE: f64 = 60.0;
const SECONDS_PER_MINUTE: f64 = 60.0;

/// A latitude/longitude pair in signed decimal degrees.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Coordinates {
    /// Degrees north, `-90..=90`.
    pub latitude: f64,
    /// Degrees east, `-180..=180`.
    pub longitude: f64,
}

impl Coordinates {
    pub const fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }

    /// Both components in DMS notation, separated by a space.
    pub fn to_dms(&self) -> String<MAX_COORDINATES_LENGTH> {
        let mut text = String::new();
        write!(
            text,
            "{} {}",
            format_latitude(self.latitude),
            format_longitude(self.longitude)
        )
        .ok();
        text
    }
}

/// Whole degrees, minutes and seconds of an absolute decimal degree value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Dms {
    pub degrees: u32,
    pub minutes: u32,
    pub seconds: u32,
}

impl Dms {
    /// Split a decimal degree value by truncation; the sign is discarded.
    pub fn from_decimal(value: f64) -> Self {
        let absolute = libm::fabs(value);
        let degrees = libm::floor(absolute);

        let total_minutes = (absolute - degrees) * MINUTES_PER_DEGREE;
        let minutes = libm::floor(total_minutes);

        let seconds = libm::floor((total_minutes - minutes) * SECONDS_PER_MINUTE);

        Self {
            degrees: degrees as u32,
            minutes: minutes as u32,
            seconds: seconds as u32,
        }
    }
}

/// Format a signed decimal degree value as DMS text with a hemisphere letter.
///
/// `positive` is used for values `>= 0`, `negative` otherwise.
pub fn format_dms(value: f64, positive: char, negative: char) -> String<MAX_DMS_LENGTH> {
    let dms = Dms::from_decimal(value);
    let hemisphere = if value >= 0.0 { positive } else { negative };

    let mut text = String::new();
    write!(
        text,
        "{}°{}'{}\"{}",
        dms.degrees, dms.minutes, dms.seconds, hemisphere
    )
    .ok();
    text
}

pub fn format_latitude(latitude: f64) -> String<MAX_DMS_LENGTH> {
    format_dms(latitude, 'N', 'S')
}

pub fn format_longitude(longitude: f64) -> String<MAX_DMS_LENGTH> {
    format_dms(longitude, 'E', 'W')
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dms_truncates_seconds() {
        assert_eq!(format_dms(37.7749, 'N', 'S').as_str(), "37°46'29\"N");
    }

    #[test]
    fn test_negative_value_uses_negative_hemisphere() {
        assert_eq!(format_dms(-122.4194, 'E', 'W').as_str(), "122°25'9\"W");
    }

    #[test]
    fn test_zero_is_positive_hemisphere() {
        assert_eq!(format_latitude(0.0).as_str(), "0°0'0\"N");
        assert_eq!(format_longitude(0.0).as_str(), "0°0'0\"E");
    }

    #[test]
    fn test_whole_degrees() {
        assert_eq!(format_latitude(-45.0).as_str(), "45°0'0\"S");
        assert_eq!(format_longitude(180.0).as_str(), "180°0'0\"E");
    }

    #[test]
    fn test_dms_components() {
        let dms = Dms::from_decimal(51.5074);
        assert_eq!(
            dms,
            Dms {
                degrees: 51,
                minutes: 30,
                seconds: 26
            }
        );
    }

    #[test]
    fn test_coordinate_pair() {
        let coords = Coordinates::new(37.7749, -122.4194);
        assert_eq!(coords.to_dms().as_str(), "37°46'29\"N 122°25'9\"W");
    }
}
