//! Hardware-independent core library for the compass
//!
//! This crate contains all platform-agnostic logic: heading tracking and
//! unwrapping, direction bucketing, coordinate formatting, observable state
//! cells, sensor/location/geocoder capability traits, dial geometry and
//! rendering, and the compass page.
//!
//! It is `#![no_std]` with `extern crate alloc` so it compiles on both
//! embedded targets and desktop hosts (for the simulator and tests).

#![no_std]

extern crate alloc;

pub mod animation;
pub mod app_state;
pub mod config;
pub mod coordinates;
pub mod detent;
pub mod direction;
pub mod geocode;
pub mod heading;
pub mod pages;
pub mod readout;
pub mod sensors;
pub mod ui;

pub use app_state::{Compass, CompassState, Permission};
pub use direction::CompassPoint;
pub use heading::{HeadingReading, HeadingTracker};
