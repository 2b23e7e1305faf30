use core::cell::RefCell;

use embassy_sync::blocking_mutex::Mutex as BlockingMutex;
use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::signal::Signal;
use log::{debug, info, warn};

use super::{CompassState, Permission};
use crate::config::CompassConfig;
use crate::coordinates::Coordinates;
use crate::geocode::Geocoder;
use crate::heading::HeadingTracker;
use crate::sensors::{
    ActiveSensor, HeadingListener, LocationFix, LocationListener, LocationSource,
    OrientationSource, SensorError,
};

/// The compass view-model.
///
/// Owns the heading tracker and the observable [`CompassState`], and acts as
/// the listener that orientation and location sources report into. Sources
/// may call in from another context; the tracker is guarded by a
/// critical-section mutex so `update` is never re-entered.
pub struct Compass {
    config: CompassConfig,
    tracker: BlockingMutex<CriticalSectionRawMutex, RefCell<HeadingTracker>>,
    state: CompassState,
    /// Latest position awaiting reverse geocoding; newer fixes replace older ones.
    geocode_requests: Signal<CriticalSectionRawMutex, Coordinates>,
}

impl Default for Compass {
    fn default() -> Self {
        Self::new(CompassConfig::default())
    }
}

impl Compass {
    pub fn new(config: CompassConfig) -> Self {
        Self {
            config,
            tracker: BlockingMutex::new(RefCell::new(HeadingTracker::new())),
            state: CompassState::new(),
            geocode_requests: Signal::new(),
        }
    }

    pub fn config(&self) -> &CompassConfig {
        &self.config
    }

    pub fn state(&self) -> &CompassState {
        &self.state
    }

    /// Register with an orientation source and start it.
    ///
    /// The returned guard stops the source when dropped.
    pub fn start<'a, 's, S>(
        &'a self,
        source: &'s mut S,
    ) -> Result<ActiveSensor<'s, S>, SensorError>
    where
        S: OrientationSource<'a> + ?Sized,
    {
        source.start(self)?;
        Ok(ActiveSensor::new(source, "orientation"))
    }

    /// Record the location permission and, if granted, start location updates.
    ///
    /// Returns `Ok(None)` when permission is denied; heading tracking is not
    /// affected either way. `Granted` is published only after the source has
    /// started; a failed start publishes `Denied`.
    pub fn start_location_updates<'a, 's, S>(
        &'a self,
        permission: Permission,
        source: &'s mut S,
    ) -> Result<Option<ActiveSensor<'s, S>>, SensorError>
    where
        S: LocationSource<'a> + ?Sized,
    {
        if permission == Permission::Denied {
            self.set_permission(permission);
            info!("Location permission denied; location outputs stay unset");
            return Ok(None);
        }

        // Location outputs only appear once the source is actually running.
        if let Err(e) = source.start(self.config.location, self) {
            warn!("Location updates failed to start: {}", e);
            self.set_permission(Permission::Denied);
            return Err(e);
        }
        self.set_permission(permission);
        Ok(Some(ActiveSensor::new(source, "location")))
    }

    /// Publish a permission change without touching any source.
    pub fn set_permission(&self, permission: Permission) {
        self.state.publish_permission(permission);
    }

    /// Take the newest pending reverse-geocoding request, if any.
    pub fn take_geocode_request(&self) -> Option<Coordinates> {
        self.geocode_requests.try_take()
    }

    /// Resolve `coordinates` to a place name and publish it.
    ///
    /// Best effort: failures and empty answers are logged and leave the
    /// current place name untouched. Never retries.
    pub async fn reverse_geocode<G: Geocoder>(&self, geocoder: &mut G, coordinates: Coordinates) {
        let result = geocoder
            .reverse_geocode(coordinates.latitude, coordinates.longitude)
            .await;

        match result {
            Ok(Some(place)) => match place.display_name() {
                Some(name) => {
                    debug!("Place resolved: {}", name.as_str());
                    self.state.publish_place_name(name);
                }
                None => debug!("Place has neither locality nor admin area"),
            },
            Ok(None) => debug!("No place found for {:?}", coordinates),
            Err(e) => warn!("Reverse geocoding failed: {}", e),
        }
    }

    /// Serve queued geocoding requests forever.
    pub async fn run_geocoder<G: Geocoder>(&self, geocoder: &mut G) {
        loop {
            let coordinates = self.geocode_requests.wait().await;
            self.reverse_geocode(geocoder, coordinates).await;
        }
    }
}

impl HeadingListener for Compass {
    fn on_heading(&self, degrees: f32) {
        let reading = self
            .tracker
            .lock(|tracker| tracker.borrow_mut().update(degrees));
        self.state.publish_heading(reading);
    }
}

impl LocationListener for Compass {
    fn on_location(&self, fix: LocationFix) {
        if !fix.latitude.is_finite() || !fix.longitude.is_finite() {
            warn!("Dropping location fix with non-finite coordinates");
            return;
        }

        let coordinates = fix.coordinates();
        self.state.publish_coordinates(coordinates);

        // Fixes without altitude keep the last known value.
        if let Some(altitude) = fix.altitude.filter(|a| a.is_finite()) {
            self.state.publish_altitude(altitude);
        }

        self.geocode_requests.signal(coordinates);
    }
}
