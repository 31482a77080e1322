//! Force-field accelerations
//!
//! Per-body acceleration contributions from the configured force
//! fields. Gravity is a constant acceleration (F = mg, so a = g
//! independent of mass); linear drag is velocity-proportional
//! (F = -b·v, so a = -b·v/m).

use crate::config::ForcesConfig;
use crate::math::DVec3;

/// Acceleration from the configured gravity field.
///
/// Independent of mass. Zero if no gravity is configured.
pub fn gravity_acceleration(forces: &ForcesConfig) -> DVec3 {
    match &forces.gravity {
        Some(gravity) => gravity.direction * gravity.g,
        None => DVec3::ZERO,
    }
}

/// Acceleration from the configured linear drag.
///
/// Returns `v · (-coefficient / mass)`. Zero if no drag is configured
/// or the mass is non-positive (this path guards the division so a
/// malformed mass does not poison every body's velocity).
pub fn linear_drag_acceleration(mass: f64, velocity: DVec3, forces: &ForcesConfig) -> DVec3 {
    match &forces.linear_drag {
        Some(drag) if mass > 0.0 => velocity * (-drag.coefficient / mass),
        _ => DVec3::ZERO,
    }
}

/// Total field acceleration on a body: gravity plus drag.
///
/// Springs are accumulated separately and only apply to point masses;
/// rigid bodies receive exactly this.
pub fn field_acceleration(mass: f64, velocity: DVec3, forces: &ForcesConfig) -> DVec3 {
    gravity_acceleration(forces) + linear_drag_acceleration(mass, velocity, forces)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{GravityConfig, LinearDragConfig};

    #[test]
    fn test_no_fields_means_no_acceleration() {
        let forces = ForcesConfig::default();
        assert_eq!(
            field_acceleration(1.0, DVec3::new(3.0, 0.0, 0.0), &forces),
            DVec3::ZERO
        );
    }

    #[test]
    fn test_gravity_is_direction_times_g() {
        let forces = ForcesConfig {
            gravity: Some(GravityConfig {
                g: 10.0,
                direction: DVec3::new(0.0, -1.0, 0.0),
            }),
            linear_drag: None,
        };
        assert_eq!(
            gravity_acceleration(&forces),
            DVec3::new(0.0, -10.0, 0.0)
        );
        // Independent of mass
        assert_eq!(
            field_acceleration(0.5, DVec3::ZERO, &forces),
            field_acceleration(50.0, DVec3::ZERO, &forces)
        );
    }

    #[test]
    fn test_drag_opposes_velocity_scaled_by_inverse_mass() {
        let forces = ForcesConfig {
            gravity: None,
            linear_drag: Some(LinearDragConfig { coefficient: 0.5 }),
        };
        let accel = linear_drag_acceleration(2.0, DVec3::new(4.0, 0.0, -8.0), &forces);
        assert_eq!(accel, DVec3::new(-1.0, 0.0, 2.0));
    }

    #[test]
    fn test_drag_guards_non_positive_mass() {
        let forces = ForcesConfig {
            gravity: None,
            linear_drag: Some(LinearDragConfig { coefficient: 0.5 }),
        };
        assert_eq!(
            linear_drag_acceleration(0.0, DVec3::X, &forces),
            DVec3::ZERO
        );
        assert_eq!(
            linear_drag_acceleration(-1.0, DVec3::X, &forces),
            DVec3::ZERO
        );
    }
}
