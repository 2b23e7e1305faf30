//! Detent slots for haptic feedback
//!
//! The dial is split into fixed-width slots (30° by default, one per numeric
//! label). Whenever the heading moves into a different slot the presentation
//! layer gets a single "tick" to turn into haptic feedback.

use log::trace;

use crate::heading::normalize_degrees;

/// Default slot width, matching the spacing of the numeric dial labels.
pub const DEFAULT_DETENT_DEG: f32 = 30.0;

/// Reports slot changes of a heading.
#[derive(Debug, Clone)]
pub struct DetentTracker {
    spacing: f32,
    slot: u32,
}

impl DetentTracker {
    /// Create a tracker whose first slot is the one containing `initial_heading`.
    ///
    /// A non-positive `spacing` falls back to [`DEFAULT_DETENT_DEG`].
    pub fn new(spacing: f32, initial_heading: f32) -> Self {
        let spacing = if spacing > 0.0 {
            spacing
        } else {
            DEFAULT_DETENT_DEG
        };
        Self {
            spacing,
            slot: Self::slot_of(spacing, initial_heading),
        }
    }

    fn slot_of(spacing: f32, heading: f32) -> u32 {
        (normalize_degrees(heading) / spacing) as u32
    }

    /// Feed a new heading; returns `true` if it entered a different slot.
    pub fn update(&mut self, heading: f32) -> bool {
        let slot = Self::slot_of(self.spacing, heading);
        if slot == self.slot {
            return false;
        }

        trace!("Detent {} -> {}", self.slot, slot);
        self.slot = slot;
        true
    }

    pub fn slot(&self) -> u32 {
        self.slot
    }
}

impl Default for DetentTracker {
    fn default() -> Self {
        Self::new(DEFAULT_DETENT_DEG, 0.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_movement_within_slot_is_silent() {
        let mut detent = DetentTracker::default();
        assert!(!detent.update(5.0));
        assert!(!detent.update(29.9));
        assert_eq!(detent.slot(), 0);
    }

    #[test]
    fn test_crossing_slot_boundary_ticks_once() {
        let mut detent = DetentTracker::default();
        assert!(detent.update(30.0));
        assert!(!detent.update(31.0));
        assert!(detent.update(29.0));
    }

    #[test]
    fn test_crossing_north_ticks() {
        let mut detent = DetentTracker::new(DEFAULT_DETENT_DEG, 355.0);
        assert_eq!(detent.slot(), 11);
        assert!(detent.update(2.0));
        assert_eq!(detent.slot(), 0);
    }

    #[test]
    fn test_invalid_spacing_falls_back() {
        let mut detent = DetentTracker::new(0.0, 0.0);
        assert!(!detent.update(29.0));
        assert!(detent.update(30.0));
    }
}
