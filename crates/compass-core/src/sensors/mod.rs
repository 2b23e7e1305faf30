//! Sensor capability traits
//!
//! The core never talks to a concrete platform sensor. Orientation and
//! location providers are injected as capabilities with a `start`/`stop`
//! lifecycle; `start` registers a listener that the provider calls for every
//! new sample, possibly from another execution context.
//!
//! ```text
//!  OrientationSource ──on_heading()──▶ HeadingListener (Compass)
//!  LocationSource    ──on_location()─▶ LocationListener (Compass)
//! ```
//!
//! Use [`ActiveSensor`] to tie a running source to a scope: dropping the
//! guard stops the source on every exit path.

mod rotation;
mod session;

pub use rotation::{RotationVector, azimuth_degrees};
pub use session::ActiveSensor;

use serde::{Deserialize, Serialize};
use thiserror_no_std::Error;

#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum SensorError {
    #[error("{sensor} is not available on this device")]
    Unavailable { sensor: &'static str },
    #[error("{sensor} failed to start: {details}")]
    StartFailed {
        sensor: &'static str,
        details: &'static str,
    },
    #[error("{sensor} requires a permission that was not granted")]
    PermissionDenied { sensor: &'static str },
}

/// Receives raw heading samples in degrees.
///
/// Implementations must tolerate being called from a different context than
/// the one reading their outputs, so listeners are `Sync`.
pub trait HeadingListener: Sync {
    fn on_heading(&self, degrees: f32);

    /// Convert a rotation-vector sample to its azimuth and forward it.
    fn on_rotation_vector(&self, vector: &RotationVector) {
        self.on_heading(azimuth_degrees(vector));
    }
}

/// Receives location fixes.
pub trait LocationListener: Sync {
    fn on_location(&self, fix: LocationFix);
}

/// Anything with a running subscription that can be cancelled.
pub trait Stoppable {
    /// Cancel the subscription. Must be safe to call when already stopped.
    fn stop(&mut self);
}

/// A provider of heading samples (rotation-vector sensor, magnetometer, mock).
pub trait OrientationSource<'a>: Stoppable {
    /// Begin delivering samples to `listener` until [`Stoppable::stop`].
    fn start(&mut self, listener: &'a dyn HeadingListener) -> Result<(), SensorError>;
}

/// A provider of location fixes.
pub trait LocationSource<'a>: Stoppable {
    /// Begin delivering fixes to `listener` at roughly `request` cadence.
    fn start(
        &mut self,
        request: LocationRequest,
        listener: &'a dyn LocationListener,
    ) -> Result<(), SensorError>;
}

/// A single position report.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LocationFix {
    pub latitude: f64,
    pub longitude: f64,
    /// Metres above sea level, when the provider reports one.
    pub altitude: Option<f64>,
}

impl LocationFix {
    pub const fn new(latitude: f64, longitude: f64, altitude: Option<f64>) -> Self {
        Self {
            latitude,
            longitude,
            altitude,
        }
    }

    pub const fn coordinates(&self) -> crate::coordinates::Coordinates {
        crate::coordinates::Coordinates::new(self.latitude, self.longitude)
    }
}

/// Accuracy/power trade-off requested from the location provider.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub enum LocationPriority {
    HighAccuracy,
    Balanced,
    LowPower,
}

/// How often location fixes should arrive.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub struct LocationRequest {
    pub priority: LocationPriority,
    /// Desired interval between fixes.
    pub interval_ms: u32,
    /// Fastest interval the listener accepts.
    pub min_update_interval_ms: u32,
}

impl Default for LocationRequest {
    fn default() -> Self {
        Self {
            priority: LocationPriority::HighAccuracy,
            interval_ms: 5000,
            min_update_interval_ms: 2000,
        }
    }
}
