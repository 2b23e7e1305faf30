//! Application-wide observable state and error types
//!
//! Every output of the compass is a last-value cell backed by an
//! [`embassy_sync::watch::Watch`]: writers overwrite, readers always see the
//! newest value, and subscribers are woken on change. Intermediate values
//! may be skipped; nothing is queued.

mod compass;

pub use compass::*;

use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::watch::{Receiver, Watch};
use thiserror_no_std::Error;

use crate::config::ConfigError;
use crate::coordinates::Coordinates;
use crate::geocode::PlaceName;
use crate::heading::HeadingReading;
use crate::sensors::SensorError;

/// Number of subscribers each state cell supports
/// - Subscriber 0: compass page / render loop
/// - Subscriber 1: haptics
/// - Subscribers 2-3: spare for platform bridges and tests
pub const STATE_RECEIVERS: usize = 4;

/// A single-slot, last-value-wins broadcast cell.
pub type StateCell<T> = Watch<CriticalSectionRawMutex, T, STATE_RECEIVERS>;

/// Subscription to a [`StateCell`], notified on every change.
pub type StateReceiver<'a, T> = Receiver<'a, CriticalSectionRawMutex, T, STATE_RECEIVERS>;

/// Whether the user allowed access to location.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Permission {
    Granted,
    #[default]
    Denied,
}

/// The observable outputs of the compass.
///
/// Cells start empty. Heading reads as zero until the first sample; every
/// location-derived output reads as `None` until a fix provides it.
pub struct CompassState {
    heading: StateCell<HeadingReading>,
    altitude: StateCell<f64>,
    coordinates: StateCell<Coordinates>,
    place_name: StateCell<PlaceName>,
    permission: StateCell<Permission>,
}

impl Default for CompassState {
    fn default() -> Self {
        Self::new()
    }
}

impl CompassState {
    pub const fn new() -> Self {
        Self {
            heading: Watch::new(),
            altitude: Watch::new(),
            coordinates: Watch::new(),
            place_name: Watch::new(),
            permission: Watch::new(),
        }
    }

    /// Latest raw and cumulative heading.
    pub fn heading(&self) -> HeadingReading {
        self.heading.anon_receiver().try_get().unwrap_or_default()
    }

    /// Latest altitude in metres above sea level.
    pub fn altitude(&self) -> Option<f64> {
        self.altitude.anon_receiver().try_get()
    }

    pub fn coordinates(&self) -> Option<Coordinates> {
        self.coordinates.anon_receiver().try_get()
    }

    pub fn place_name(&self) -> Option<PlaceName> {
        self.place_name.anon_receiver().try_get()
    }

    pub fn permission(&self) -> Permission {
        self.permission.anon_receiver().try_get().unwrap_or_default()
    }

    /// Subscribe to heading changes. `None` once all subscriber slots are taken.
    pub fn subscribe_heading(&self) -> Option<StateReceiver<'_, HeadingReading>> {
        self.heading.receiver()
    }

    pub fn subscribe_altitude(&self) -> Option<StateReceiver<'_, f64>> {
        self.altitude.receiver()
    }

    pub fn subscribe_coordinates(&self) -> Option<StateReceiver<'_, Coordinates>> {
        self.coordinates.receiver()
    }

    pub fn subscribe_place_name(&self) -> Option<StateReceiver<'_, PlaceName>> {
        self.place_name.receiver()
    }

    pub fn subscribe_permission(&self) -> Option<StateReceiver<'_, Permission>> {
        self.permission.receiver()
    }

    pub(crate) fn publish_heading(&self, reading: HeadingReading) {
        self.heading.sender().send(reading);
    }

    pub(crate) fn publish_altitude(&self, altitude: f64) {
        self.altitude.sender().send(altitude);
    }

    pub(crate) fn publish_coordinates(&self, coordinates: Coordinates) {
        self.coordinates.sender().send(coordinates);
    }

    pub(crate) fn publish_place_name(&self, name: PlaceName) {
        self.place_name.sender().send(name);
    }

    pub(crate) fn publish_permission(&self, permission: Permission) {
        self.permission.sender().send(permission);
    }
}

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Sensor error: {0}")]
    Sensor(SensorError),
    #[error("Configuration error: {0}")]
    Config(ConfigError),
}

impl From<SensorError> for AppError {
    fn from(value: SensorError) -> Self {
        Self::Sensor(value)
    }
}

impl From<ConfigError> for AppError {
    fn from(value: ConfigError) -> Self {
        Self::Config(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_state_defaults() {
        let state = CompassState::new();
        assert_eq!(state.heading(), HeadingReading::default());
        assert_eq!(state.altitude(), None);
        assert_eq!(state.coordinates(), None);
        assert_eq!(state.place_name(), None);
        assert_eq!(state.permission(), Permission::Denied);
    }

    #[test]
    fn test_last_value_wins() {
        let state = CompassState::new();
        let mut receiver = state.subscribe_altitude().unwrap();

        state.publish_altitude(10.0);
        state.publish_altitude(20.0);
        state.publish_altitude(30.0);

        // Only the newest value is observed; earlier ones are gone.
        assert_eq!(receiver.try_changed(), Some(30.0));
        assert_eq!(receiver.try_changed(), None);
        assert_eq!(state.altitude(), Some(30.0));
    }

    #[test]
    fn test_every_subscriber_sees_change() {
        let state = CompassState::new();
        let mut first = state.subscribe_heading().unwrap();
        let mut second = state.subscribe_heading().unwrap();

        let reading = HeadingReading {
            raw: 10.0,
            cumulative: 370.0,
        };
        state.publish_heading(reading);

        assert_eq!(first.try_changed(), Some(reading));
        assert_eq!(second.try_changed(), Some(reading));
    }

    #[test]
    fn test_subscriber_slots_are_bounded() {
        let state = CompassState::new();
        let receivers: [_; STATE_RECEIVERS] =
            core::array::from_fn(|_| state.subscribe_permission());
        assert!(receivers.iter().all(Option::is_some));
        assert!(state.subscribe_permission().is_none());
    }

    #[test]
    fn test_async_subscriber_wakes_on_change() {
        let state = CompassState::new();
        let mut receiver = state.subscribe_permission().unwrap();
        state.publish_permission(Permission::Granted);

        let permission = embassy_futures::block_on(receiver.changed());
        assert_eq!(permission, Permission::Granted);
    }
}
