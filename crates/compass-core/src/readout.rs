//! Text readouts shown under the dial

use core::fmt::Write;

use heapless::String;

use crate::direction::CompassPoint;
use crate::heading::normalize_degrees;

/// Upper bound for any readout line.
pub const MAX_READOUT_LENGTH: usize = 48;

/// Shown while location is permitted but no fix has reported an altitude yet.
pub const ACQUIRING_ALTITUDE: &str = "Acquiring altitude...";

/// Whole-degree heading followed by its compass point, e.g. `"273° W"`.
pub fn heading_text(heading: f32) -> String<MAX_READOUT_LENGTH> {
    let heading = normalize_degrees(heading);
    let mut text = String::new();
    write!(
        text,
        "{}° {}",
        heading as u32,
        CompassPoint::from_heading(heading)
    )
    .ok();
    text
}

/// Whole metres above sea level, or a placeholder while unknown.
pub fn altitude_text(altitude: Option<f64>) -> String<MAX_READOUT_LENGTH> {
    let mut text = String::new();
    match altitude {
        Some(metres) => {
            write!(text, "{} m above sea level", metres as i32).ok();
        }
        None => {
            text.push_str(ACQUIRING_ALTITUDE).ok();
        }
    }
    text
}
