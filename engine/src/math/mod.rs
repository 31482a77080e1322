//! Math types for the simulation core
//!
//! Re-exports glam's f64 vector and quaternion types as the engine's
//! mathematical vocabulary, plus the quaternion helpers shared by every
//! integrator. All simulation math is f64; the tolerances the engine is
//! held to (orientation norm, long-run energy drift) sit below f32
//! precision.
//!
//! # Unit System
//!
//! **1 unit = 1 meter** (SI units throughout)
//!
//! - Distances in meters
//! - Velocities in m/s
//! - Accelerations in m/s²
//! - Angular velocities in rad/s
//! - Mass in kg

pub use glam::{DQuat, DVec3};

/// Normalize a quaternion, returning the identity for degenerate input.
///
/// A zero-length quaternion cannot be normalized; the identity
/// `[0, 0, 0, 1]` is returned instead of propagating NaN.
pub fn quat_normalize_or_identity(q: DQuat) -> DQuat {
    let length = q.length();
    if length == 0.0 { DQuat::IDENTITY } else { q / length }
}

/// Advance an orientation by one step of constant angular velocity.
///
/// Uses the small-angle approximation of the quaternion derivative:
/// `dq = quat(ω·0.5·dt, w = 0) ⊗ q`, added componentwise to `q`, then
/// renormalized. Valid for small per-step rotation; kept in this form
/// rather than an exact exponential map because the committed numerical
/// output depends on it.
///
/// # Arguments
/// * `orientation` - Current orientation (assumed near unit length)
/// * `angular_velocity` - World-frame angular velocity (rad/s)
/// * `dt` - Time step in seconds
///
/// # Returns
/// The advanced orientation, renormalized to unit length.
pub fn advance_orientation(orientation: DQuat, angular_velocity: DVec3, dt: f64) -> DQuat {
    let half = angular_velocity * (0.5 * dt);
    let dq = DQuat::from_xyzw(half.x, half.y, half.z, 0.0) * orientation;
    quat_normalize_or_identity(orientation + dq)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_degenerate_quat_returns_identity() {
        let q = quat_normalize_or_identity(DQuat::from_xyzw(0.0, 0.0, 0.0, 0.0));
        assert_eq!(q, DQuat::IDENTITY);
    }

    #[test]
    fn test_normalize_scales_to_unit_length() {
        let q = quat_normalize_or_identity(DQuat::from_xyzw(0.0, 2.0, 0.0, 0.0));
        assert!((q.length() - 1.0).abs() < 1e-15);
        assert_eq!(q.y, 1.0);
    }

    #[test]
    fn test_advance_orientation_zero_spin_is_noop() {
        let q = DQuat::from_xyzw(0.0, 0.0, 0.0, 1.0);
        let advanced = advance_orientation(q, DVec3::ZERO, 1.0 / 60.0);
        assert_eq!(advanced, q);
    }

    #[test]
    fn test_advance_orientation_stays_unit_length() {
        let mut q = DQuat::IDENTITY;
        let spin = DVec3::new(1.0, -2.0, 0.5);
        for _ in 0..10_000 {
            q = advance_orientation(q, spin, 1.0 / 240.0);
        }
        assert!(
            (q.length() - 1.0).abs() < 1e-12,
            "orientation drifted off the unit sphere: |q| = {}",
            q.length()
        );
    }

    #[test]
    fn test_advance_orientation_rotates_about_spin_axis() {
        // Spin about +Y for a quarter turn in many small steps; the
        // result should be close to the exact 90 degree rotation.
        let steps = 10_000;
        let dt = std::f64::consts::FRAC_PI_2 / steps as f64;
        let mut q = DQuat::IDENTITY;
        for _ in 0..steps {
            q = advance_orientation(q, DVec3::Y, dt);
        }
        let exact = DQuat::from_rotation_y(std::f64::consts::FRAC_PI_2);
        assert!(
            q.dot(exact).abs() > 0.999_999,
            "expected ~90 degree yaw, got {:?}",
            q
        );
    }
}
