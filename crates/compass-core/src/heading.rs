//! Heading tracking with wraparound unwrapping
//!
//! Raw headings wrap at 0°/360°. Feeding them straight into a rotation
//! animation makes the dial spin the long way round whenever the device
//! crosses north. [`HeadingTracker`] folds every new sample into a continuous
//! cumulative angle instead, always taking the shortest angular path from the
//! previous reading.
//!
//! ```text
//! raw:        350 ──▶ 10
//! cumulative: 350 ──▶ 370   (+20, not -340)
//! ```

use log::{debug, warn};

/// Degrees in a full turn.
pub const FULL_TURN_DEG: f32 = 360.0;

/// Largest step the tracker will take between two samples.
pub const HALF_TURN_DEG: f32 = 180.0;

/// Fold any finite angle into `[0, 360)`.
pub fn normalize_degrees(degrees: f32) -> f32 {
    ((degrees % FULL_TURN_DEG) + FULL_TURN_DEG) % FULL_TURN_DEG
}

/// Signed shortest angular step from `from` to `to`, in `[-180, 180]`.
///
/// Both inputs are expected in `[0, 360)`. An exact half turn keeps its sign.
pub fn shortest_delta(from: f32, to: f32) -> f32 {
    let mut delta = to - from;
    if delta > HALF_TURN_DEG {
        delta -= FULL_TURN_DEG;
    }
    if delta < -HALF_TURN_DEG {
        delta += FULL_TURN_DEG;
    }
    delta
}

/// A raw heading paired with its unwrapped cumulative value.
///
/// Published as a single value so readers never see a raw heading from one
/// sample next to a cumulative heading from another.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct HeadingReading {
    /// Latest heading in `[0, 360)`, 0 = north, clockwise.
    pub raw: f32,
    /// Continuous, unbounded heading suitable for rotation animation.
    pub cumulative: f32,
}

/// Converts wrap-around heading samples into a continuous signal.
///
/// Starts at 0° with a cumulative value of 0 and lives as long as its owner;
/// the only way to reset it is to build a new one.
#[derive(Debug, Clone, Default)]
pub struct HeadingTracker {
    cumulative: f32,
    last_raw: f32,
}

impl HeadingTracker {
    pub const fn new() -> Self {
        Self {
            cumulative: 0.0,
            last_raw: 0.0,
        }
    }

    /// Fold a new raw sample into the cumulative heading.
    ///
    /// Samples outside `[0, 360)` are normalized first. Non-finite samples are
    /// dropped and the previous reading is returned unchanged.
    pub fn update(&mut self, raw: f32) -> HeadingReading {
        if !raw.is_finite() {
            warn!("Dropping non-finite heading sample: {}", raw);
            return self.reading();
        }

        let raw = normalize_degrees(raw);
        let current = normalize_degrees(self.cumulative);
        let delta = shortest_delta(current, raw);

        self.cumulative += delta;
        self.last_raw = raw;

        debug!(
            "Heading {:.1} (delta {:+.1}, cumulative {:.1})",
            raw, delta, self.cumulative
        );

        self.reading()
    }

    /// Latest raw heading in `[0, 360)`.
    pub fn raw(&self) -> f32 {
        self.last_raw
    }

    /// Latest unwrapped heading.
    pub fn cumulative(&self) -> f32 {
        self.cumulative
    }

    pub fn reading(&self) -> HeadingReading {
        HeadingReading {
            raw: self.last_raw,
            cumulative: self.cumulative,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPSILON: f32 = 1e-3;

    /// Distance between two angles on the circle, so 359.9999 and 0 compare equal.
    fn circular_distance(a: f32, b: f32) -> f32 {
        let d = libm::fabsf(normalize_degrees(a) - normalize_degrees(b));
        d.min(FULL_TURN_DEG - d)
    }

    #[test]
    fn test_new_tracker_starts_at_zero() {
        let tracker = HeadingTracker::new();
        assert_eq!(tracker.reading(), HeadingReading::default());
    }

    #[test]
    fn test_wraparound_forward_takes_short_path() {
        let mut tracker = HeadingTracker::new();
        for raw in [90.0, 180.0, 270.0, 350.0] {
            tracker.update(raw);
        }
        assert_eq!(tracker.cumulative(), 350.0);

        let reading = tracker.update(10.0);
        assert_eq!(reading.raw, 10.0);
        assert_eq!(reading.cumulative, 370.0);
    }

    #[test]
    fn test_wraparound_backward_takes_short_path() {
        let mut tracker = HeadingTracker::new();
        tracker.update(10.0);
        let reading = tracker.update(350.0);
        assert_eq!(reading.raw, 350.0);
        assert_eq!(reading.cumulative, -10.0);
    }

    #[test]
    fn test_same_sample_twice_is_idempotent() {
        let mut tracker = HeadingTracker::new();
        tracker.update(123.5);
        let before = tracker.cumulative();
        tracker.update(123.5);
        assert_eq!(tracker.cumulative(), before);
    }

    #[test]
    fn test_first_sample_above_half_turn_goes_negative() {
        let mut tracker = HeadingTracker::new();
        let reading = tracker.update(350.0);
        assert_eq!(reading.cumulative, -10.0);
    }

    #[test]
    fn test_exact_half_turn_keeps_positive_direction() {
        let mut tracker = HeadingTracker::new();
        let reading = tracker.update(180.0);
        assert_eq!(reading.cumulative, 180.0);
    }

    #[test]
    fn test_residue_and_continuity_over_long_sequence() {
        let samples = [
            0.0, 45.5, 170.0, 355.0, 2.5, 181.0, 0.25, 359.75, 90.0, 271.0, 271.0, 10.0, 200.0,
            19.0, 300.5, 120.0, 300.0, 299.0, 1.0, 359.0,
        ];

        let mut tracker = HeadingTracker::new();
        let mut previous = tracker.cumulative();
        for raw in samples {
            let reading = tracker.update(raw);
            assert!(
                circular_distance(reading.cumulative, raw) < EPSILON,
                "residue of {} should be {}",
                reading.cumulative,
                raw
            );
            assert!(
                libm::fabsf(reading.cumulative - previous) <= HALF_TURN_DEG + EPSILON,
                "step from {} to {} exceeds a half turn",
                previous,
                reading.cumulative
            );
            previous = reading.cumulative;
        }
    }

    #[test]
    fn test_many_full_turns_accumulate() {
        let mut tracker = HeadingTracker::new();
        for _ in 0..3 {
            for step in 1..=12 {
                tracker.update((step * 30 % 360) as f32);
            }
        }
        assert_eq!(tracker.cumulative(), 3.0 * FULL_TURN_DEG);
        assert_eq!(tracker.raw(), 0.0);
    }

    #[test]
    fn test_unnormalized_input_is_folded() {
        let mut tracker = HeadingTracker::new();
        let reading = tracker.update(-90.0);
        assert_eq!(reading.raw, 270.0);
        assert_eq!(reading.cumulative, -90.0);

        let reading = tracker.update(725.0);
        assert_eq!(reading.raw, 5.0);
        assert_eq!(reading.cumulative, 5.0);
    }

    #[test]
    fn test_non_finite_sample_is_dropped() {
        let mut tracker = HeadingTracker::new();
        tracker.update(42.0);
        let before = tracker.reading();

        assert_eq!(tracker.update(f32::NAN), before);
        assert_eq!(tracker.update(f32::INFINITY), before);
        assert_eq!(tracker.update(f32::NEG_INFINITY), before);
    }

    #[test]
    fn test_normalize_degrees_stays_half_open() {
        assert_eq!(normalize_degrees(360.0), 0.0);
        assert_eq!(normalize_degrees(-360.0), 0.0);
        assert_eq!(normalize_degrees(-1e-9), 0.0);
        assert_eq!(normalize_degrees(-10.0), 350.0);
        assert_eq!(normalize_degrees(370.0), 10.0);
    }

    #[test]
    fn test_shortest_delta_bounds() {
        assert_eq!(shortest_delta(350.0, 10.0), 20.0);
        assert_eq!(shortest_delta(10.0, 350.0), -20.0);
        assert_eq!(shortest_delta(0.0, 180.0), 180.0);
        assert_eq!(shortest_delta(180.0, 0.0), -180.0);
    }
}
