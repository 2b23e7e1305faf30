//! Azimuth from a rotation-vector sample
//!
//! Rotation-vector sensors report the device attitude as the vector part of a
//! unit quaternion `(x, y, z)` and, on most devices, the scalar part `w`.
//! The heading is the azimuth of the device's y axis projected onto the
//! horizontal plane, measured clockwise from magnetic north.

use crate::heading::normalize_degrees;

/// Rotation-vector sample: quaternion vector part plus optional scalar part.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RotationVector {
    pub x: f32,
    pub y: f32,
    pub z: f32,
    /// Scalar part; derived from the unit-norm constraint when absent.
    pub w: Option<f32>,
}

impl RotationVector {
    pub const fn new(x: f32, y: f32, z: f32, w: Option<f32>) -> Self {
        Self { x, y, z, w }
    }

    /// Pure rotation of `degrees` about the vertical axis (counter-clockwise
    /// when seen from above).
    pub fn about_vertical(degrees: f32) -> Self {
        let half = degrees.to_radians() / 2.0;
        Self::new(0.0, 0.0, libm::sinf(half), Some(libm::cosf(half)))
    }

    fn scalar(&self) -> f32 {
        match self.w {
            Some(w) => w,
            None => {
                let w2 = 1.0 - self.x * self.x - self.y * self.y - self.z * self.z;
                if w2 > 0.0 { libm::sqrtf(w2) } else { 0.0 }
            }
        }
    }

    /// Row-major 3x3 rotation matrix.
    pub fn rotation_matrix(&self) -> [f32; 9] {
        let (q1, q2, q3) = (self.x, self.y, self.z);
        let q0 = self.scalar();

        let sq_q1 = 2.0 * q1 * q1;
        let sq_q2 = 2.0 * q2 * q2;
        let sq_q3 = 2.0 * q3 * q3;
        let q1_q2 = 2.0 * q1 * q2;
        let q3_q0 = 2.0 * q3 * q0;
        let q1_q3 = 2.0 * q1 * q3;
        let q2_q0 = 2.0 * q2 * q0;
        let q2_q3 = 2.0 * q2 * q3;
        let q1_q0 = 2.0 * q1 * q0;

        [
            1.0 - sq_q2 - sq_q3,
            q1_q2 - q3_q0,
            q1_q3 + q2_q0,
            q1_q2 + q3_q0,
            1.0 - sq_q1 - sq_q3,
            q2_q3 - q1_q0,
            q1_q3 - q2_q0,
            q2_q3 + q1_q0,
            1.0 - sq_q1 - sq_q2,
        ]
    }
}

/// Heading in `[0, 360)` for a rotation-vector sample.
pub fn azimuth_degrees(vector: &RotationVector) -> f32 {
    let r = vector.rotation_matrix();
    let azimuth = libm::atan2f(r[1], r[4]);
    normalize_degrees(azimuth.to_degrees())
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPSILON: f32 = 1e-3;

    #[test]
    fn test_identity_points_north() {
        let identity = RotationVector::new(0.0, 0.0, 0.0, Some(1.0));
        assert!(azimuth_degrees(&identity) < EPSILON);
    }

    #[test]
    fn test_missing_scalar_is_derived() {
        let with_w = RotationVector::about_vertical(40.0);
        let without_w = RotationVector::new(with_w.x, with_w.y, with_w.z, None);
        assert!(libm::fabsf(azimuth_degrees(&with_w) - azimuth_degrees(&without_w)) < EPSILON);
    }

    #[test]
    fn test_counter_clockwise_turn_reads_as_west_of_north() {
        let turned = RotationVector::about_vertical(90.0);
        assert!(libm::fabsf(azimuth_degrees(&turned) - 270.0) < EPSILON);

        let turned = RotationVector::about_vertical(-30.0);
        assert!(libm::fabsf(azimuth_degrees(&turned) - 30.0) < EPSILON);
    }

    #[test]
    fn test_matrix_is_orthonormal() {
        let r = RotationVector::new(0.1, 0.2, 0.3, None).rotation_matrix();
        for row in 0..3 {
            let norm = r[row * 3] * r[row * 3]
                + r[row * 3 + 1] * r[row * 3 + 1]
                + r[row * 3 + 2] * r[row * 3 + 2];
            assert!(libm::fabsf(norm - 1.0) < EPSILON);
        }
    }
}
