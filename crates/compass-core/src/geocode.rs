//! Reverse geocoding capability
//!
//! Turns coordinates into a human-readable place such as
//! `"San Francisco, California"`. Lookups are best effort: the caller logs
//! and ignores failures.

use core::future::Future;

use heapless::String;
use thiserror_no_std::Error;

/// Upper bound for a single place component.
pub const MAX_PLACE_PART_LENGTH: usize = 32;

/// Upper bound for the joined place name.
pub const MAX_PLACE_NAME_LENGTH: usize = 2 * MAX_PLACE_PART_LENGTH + 2;

pub type PlaceName = String<MAX_PLACE_NAME_LENGTH>;

#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum GeocodeError {
    #[error("Reverse geocoding is unavailable")]
    Unavailable,
    #[error("Geocoding provider error: {0}")]
    Provider(&'static str),
}

/// The subset of an address the compass displays.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Place {
    /// City or town.
    pub locality: Option<String<MAX_PLACE_PART_LENGTH>>,
    /// State, province or region.
    pub admin_area: Option<String<MAX_PLACE_PART_LENGTH>>,
}

impl Place {
    /// Build a place, truncating components that exceed the part limit.
    pub fn new(locality: Option<&str>, admin_area: Option<&str>) -> Self {
        Self {
            locality: locality.map(bounded),
            admin_area: admin_area.map(bounded),
        }
    }

    /// `"<locality>, <admin area>"` with missing or empty parts skipped.
    ///
    /// Returns `None` when neither part is present.
    pub fn display_name(&self) -> Option<PlaceName> {
        let mut name = PlaceName::new();
        let parts = [self.locality.as_deref(), self.admin_area.as_deref()];
        for part in parts.into_iter().flatten().filter(|p| !p.is_empty()) {
            if !name.is_empty() {
                name.push_str(", ").ok();
            }
            name.push_str(part).ok();
        }
        if name.is_empty() { None } else { Some(name) }
    }
}

/// Copy as much of `text` as fits, never splitting a character.
fn bounded(text: &str) -> String<MAX_PLACE_PART_LENGTH> {
    let mut out = String::new();
    for c in text.chars() {
        if out.push(c).is_err() {
            break;
        }
    }
    out
}

/// Capability that resolves coordinates to at most one place.
pub trait Geocoder {
    fn reverse_geocode(
        &mut self,
        latitude: f64,
        longitude: f64,
    ) -> impl Future<Output = Result<Option<Place>, GeocodeError>>;
}
