//! Bridge from observable state cells to page events

use heapless::Vec;

use crate::app_state::{CompassState, Permission, StateReceiver};
use crate::coordinates::Coordinates;
use crate::geocode::PlaceName;
use crate::heading::HeadingReading;
use crate::ui::PageEvent;

/// At most one event per state cell per poll.
pub const MAX_EVENTS_PER_POLL: usize = 5;

/// One subscription to each state cell.
///
/// Polling never blocks: each cell yields its newest value if it changed
/// since the last poll, so a slow render loop simply skips intermediate
/// values.
pub struct StateEvents<'a> {
    heading: StateReceiver<'a, HeadingReading>,
    altitude: StateReceiver<'a, f64>,
    coordinates: StateReceiver<'a, Coordinates>,
    place_name: StateReceiver<'a, PlaceName>,
    permission: StateReceiver<'a, Permission>,
}

impl<'a> StateEvents<'a> {
    /// Subscribe to every cell. `None` if any cell has no free subscriber slot.
    pub fn subscribe(state: &'a CompassState) -> Option<Self> {
        Some(Self {
            heading: state.subscribe_heading()?,
            altitude: state.subscribe_altitude()?,
            coordinates: state.subscribe_coordinates()?,
            place_name: state.subscribe_place_name()?,
            permission: state.subscribe_permission()?,
        })
    }

    /// Collect the changes since the previous poll.
    pub fn poll(&mut self) -> Vec<PageEvent, MAX_EVENTS_PER_POLL> {
        let mut events = Vec::new();

        if let Some(permission) = self.permission.try_changed() {
            events.push(PageEvent::Permission(permission)).ok();
        }
        if let Some(reading) = self.heading.try_changed() {
            events.push(PageEvent::Heading(reading)).ok();
        }
        if let Some(altitude) = self.altitude.try_changed() {
            events.push(PageEvent::Altitude(altitude)).ok();
        }
        if let Some(coordinates) = self.coordinates.try_changed() {
            events.push(PageEvent::Coordinates(coordinates)).ok();
        }
        if let Some(name) = self.place_name.try_changed() {
            events.push(PageEvent::PlaceName(name)).ok();
        }

        events
    }
}
