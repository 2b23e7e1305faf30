//! Eased tween of the displayed dial angle
//!
//! The dial never jumps straight to a new heading; it tweens toward the
//! latest cumulative heading over a short, decelerating curve. Because the
//! target is the *cumulative* heading, a crossing of north animates the
//! short way round.

use embassy_time::Duration;

/// Default tween length.
pub const DEFAULT_ANIMATION_MS: u64 = 300;

/// Bisection steps used to invert the Bézier x(t) curve.
const BEZIER_SOLVER_ITERATIONS: usize = 24;

/// Cubic Bézier easing curve anchored at (0, 0) and (1, 1).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CubicBezierEasing {
    x1: f32,
    y1: f32,
    x2: f32,
    y2: f32,
}

/// Starts at full speed and decelerates into the target.
pub const LINEAR_OUT_SLOW_IN: CubicBezierEasing = CubicBezierEasing::new(0.0, 0.0, 0.2, 1.0);

impl CubicBezierEasing {
    pub const fn new(x1: f32, y1: f32, x2: f32, y2: f32) -> Self {
        Self { x1, y1, x2, y2 }
    }

    fn evaluate(t: f32, p1: f32, p2: f32) -> f32 {
        let inv = 1.0 - t;
        3.0 * inv * inv * t * p1 + 3.0 * inv * t * t * p2 + t * t * t
    }

    /// Map linear progress in `[0, 1]` to eased progress.
    pub fn transform(&self, fraction: f32) -> f32 {
        if fraction <= 0.0 {
            return 0.0;
        }
        if fraction >= 1.0 {
            return 1.0;
        }

        // x(t) is monotonic for control points inside the unit square.
        let mut low = 0.0;
        let mut high = 1.0;
        let mut t = fraction;
        for _ in 0..BEZIER_SOLVER_ITERATIONS {
            t = (low + high) / 2.0;
            if Self::evaluate(t, self.x1, self.x2) < fraction {
                low = t;
            } else {
                high = t;
            }
        }

        Self::evaluate(t, self.y1, self.y2)
    }
}

/// Tweens a displayed angle toward a moving target.
#[derive(Debug, Clone)]
pub struct HeadingAnimator {
    easing: CubicBezierEasing,
    duration: Duration,
    start: f32,
    target: f32,
    elapsed: Duration,
}

impl HeadingAnimator {
    pub fn new(duration: Duration) -> Self {
        Self {
            easing: LINEAR_OUT_SLOW_IN,
            duration,
            start: 0.0,
            target: 0.0,
            elapsed: duration,
        }
    }

    pub fn with_easing(mut self, easing: CubicBezierEasing) -> Self {
        self.easing = easing;
        self
    }

    /// Start a new tween from the currently displayed value.
    ///
    /// Retargeting to the current target is a no-op so a steady heading does
    /// not restart the curve every frame.
    pub fn set_target(&mut self, target: f32) {
        if target == self.target {
            return;
        }
        self.start = self.value();
        self.target = target;
        self.elapsed = Duration::from_ticks(0);
    }

    /// Jump to `value` without animating.
    pub fn snap_to(&mut self, value: f32) {
        self.start = value;
        self.target = value;
        self.elapsed = self.duration;
    }

    /// Advance the tween clock. Returns `true` while the displayed value moved.
    pub fn advance(&mut self, dt: Duration) -> bool {
        if self.is_settled() {
            return false;
        }
        self.elapsed = (self.elapsed + dt).min(self.duration);
        true
    }

    /// Angle to draw right now.
    pub fn value(&self) -> f32 {
        if self.is_settled() {
            return self.target;
        }
        let fraction = self.elapsed.as_micros() as f32 / self.duration.as_micros() as f32;
        self.start + (self.target - self.start) * self.easing.transform(fraction)
    }

    pub fn target(&self) -> f32 {
        self.target
    }

    pub fn is_settled(&self) -> bool {
        self.elapsed >= self.duration
    }
}

impl Default for HeadingAnimator {
    fn default() -> Self {
        Self::new(Duration::from_millis(DEFAULT_ANIMATION_MS))
    }
}
