//! Compass configuration
//!
//! Stored as a compact `postcard` blob so it can live in flash or a file.

extern crate alloc;
use alloc::vec::Vec;

use log::info;
use serde::{Deserialize, Serialize};
use thiserror_no_std::Error;

use crate::animation::DEFAULT_ANIMATION_MS;
use crate::sensors::LocationRequest;

/// Default frame pacing (~30 FPS).
pub const DEFAULT_FRAME_MS: u32 = 33;

/// Default detent spacing in whole degrees.
pub const DEFAULT_DETENT_DEGREES: u16 = 30;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Failed to decode configuration")]
    Decode,
    #[error("Failed to encode configuration")]
    Encode,
    #[error("Invalid configuration: {0}")]
    Invalid(&'static str),
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub struct CompassConfig {
    /// Location update cadence requested once permission is granted.
    pub location: LocationRequest,
    /// Length of the dial tween.
    pub animation_ms: u32,
    /// Haptic detent spacing in degrees.
    pub detent_degrees: u16,
    /// Target frame duration of the render loop.
    pub frame_ms: u32,
}

impl Default for CompassConfig {
    fn default() -> Self {
        Self {
            location: LocationRequest::default(),
            animation_ms: DEFAULT_ANIMATION_MS as u32,
            detent_degrees: DEFAULT_DETENT_DEGREES,
            frame_ms: DEFAULT_FRAME_MS,
        }
    }
}

impl CompassConfig {
    /// Decode and validate a configuration blob.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, ConfigError> {
        let config: Self = postcard::from_bytes(bytes).map_err(|_| ConfigError::Decode)?;
        config.validate()?;
        info!("Loaded compass configuration: {:?}", config);
        Ok(config)
    }

    pub fn to_bytes(&self) -> Result<Vec<u8>, ConfigError> {
        postcard::to_allocvec(self).map_err(|_| ConfigError::Encode)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.detent_degrees == 0 || self.detent_degrees > 180 {
            return Err(ConfigError::Invalid("detent spacing must be 1..=180 degrees"));
        }
        if self.frame_ms == 0 {
            return Err(ConfigError::Invalid("frame duration must be non-zero"));
        }
        if self.location.interval_ms == 0 {
            return Err(ConfigError::Invalid("location interval must be non-zero"));
        }
        if self.location.min_update_interval_ms > self.location.interval_ms {
            return Err(ConfigError::Invalid(
                "minimum location interval exceeds the requested interval",
            ));
        }
        Ok(())
    }
}
