//! State-derivative evaluation
//!
//! Composes the force fields and the spring forces over a full state
//! snapshot into per-body accelerations. This is the function every
//! integrator is built on, and it must stay pure over the state it is
//! handed: RK4 evaluates it against intermediate states that are never
//! committed, so reading anything but the arguments would break the
//! multi-stage scheme.

use std::collections::HashMap;

use crate::config::ForcesConfig;
use crate::math::DVec3;
use crate::scene::{SimulationState, Spring};

use super::forces::field_acceleration;
use super::spring::accumulate_spring_accelerations;

/// The instantaneous accelerations implied by one state snapshot.
///
/// Indices follow the state's body lists.
#[derive(Debug, Clone)]
pub struct StateDerivative {
    /// Per-point-mass acceleration: force fields plus springs
    pub point_mass_accel: Vec<DVec3>,
    /// Per-rigid-body linear acceleration: force fields only
    pub body_accel: Vec<DVec3>,
    /// Per-rigid-body angular acceleration: always zero in this model
    pub body_angular_accel: Vec<DVec3>,
}

/// Everything needed to evaluate the state derivative, borrowed from
/// the engine for the duration of one step.
#[derive(Debug, Clone, Copy)]
pub struct Derivatives<'a> {
    /// Force fields applied to every body
    pub forces: &'a ForcesConfig,
    /// Springs between point masses
    pub springs: &'a [Spring],
    /// Point-mass id to state-list index
    pub index_of: &'a HashMap<String, usize>,
}

impl Derivatives<'_> {
    /// Evaluate the full state derivative for `state`.
    ///
    /// Point masses receive the force fields plus every spring that
    /// resolves to them; rigid bodies receive the force fields only
    /// (no springs, no collisions). Angular acceleration is the zero
    /// vector: torque is not modeled, so angular velocity only changes
    /// when set externally.
    pub fn evaluate(&self, state: &SimulationState) -> StateDerivative {
        let mut point_mass_accel: Vec<DVec3> = state
            .point_masses
            .iter()
            .map(|pm| field_acceleration(pm.mass, pm.velocity, self.forces))
            .collect();
        accumulate_spring_accelerations(
            self.springs,
            self.index_of,
            &state.point_masses,
            &mut point_mass_accel,
        );

        let body_accel = state
            .rigid_bodies
            .iter()
            .map(|rb| field_acceleration(rb.mass, rb.velocity, self.forces))
            .collect();

        StateDerivative {
            point_mass_accel,
            body_accel,
            body_angular_accel: vec![DVec3::ZERO; state.rigid_bodies.len()],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::GravityConfig;
    use crate::math::DQuat;
    use crate::scene::{PointMass, RigidBodyBox};

    fn two_mass_state() -> (SimulationState, HashMap<String, usize>) {
        let state = SimulationState {
            time: 0.0,
            step_index: 0,
            point_masses: vec![
                PointMass {
                    id: "a".into(),
                    mass: 1.0,
                    position: DVec3::ZERO,
                    velocity: DVec3::ZERO,
                },
                PointMass {
                    id: "b".into(),
                    mass: 1.0,
                    position: DVec3::new(2.0, 0.0, 0.0),
                    velocity: DVec3::ZERO,
                },
            ],
            rigid_bodies: vec![RigidBodyBox {
                id: "box".into(),
                mass: 4.0,
                size: DVec3::ONE,
                position: DVec3::new(0.0, 5.0, 0.0),
                velocity: DVec3::ZERO,
                orientation: DQuat::IDENTITY,
                angular_velocity: DVec3::new(0.0, 1.0, 0.0),
            }],
        };
        let index_of = state
            .point_masses
            .iter()
            .enumerate()
            .map(|(i, pm)| (pm.id.clone(), i))
            .collect();
        (state, index_of)
    }

    #[test]
    fn test_springs_reach_point_masses_but_not_rigid_bodies() {
        let (state, index_of) = two_mass_state();
        let forces = ForcesConfig::default();
        let springs = vec![Spring {
            id: "s".into(),
            a_id: "a".into(),
            b_id: "b".into(),
            rest_length: 1.0,
            stiffness: 10.0,
            damping: 0.0,
        }];
        let derivative = Derivatives {
            forces: &forces,
            springs: &springs,
            index_of: &index_of,
        }
        .evaluate(&state);

        assert!(derivative.point_mass_accel[0].x > 0.0);
        assert!(derivative.point_mass_accel[1].x < 0.0);
        assert_eq!(derivative.body_accel[0], DVec3::ZERO);
    }

    #[test]
    fn test_rigid_bodies_feel_gravity() {
        let (state, index_of) = two_mass_state();
        let forces = ForcesConfig {
            gravity: Some(GravityConfig::default()),
            linear_drag: None,
        };
        let derivative = Derivatives {
            forces: &forces,
            springs: &[],
            index_of: &index_of,
        }
        .evaluate(&state);

        assert_eq!(derivative.body_accel[0], DVec3::new(0.0, -9.81, 0.0));
        assert_eq!(derivative.point_mass_accel[0], DVec3::new(0.0, -9.81, 0.0));
    }

    #[test]
    fn test_angular_acceleration_is_always_zero() {
        let (state, index_of) = two_mass_state();
        let forces = ForcesConfig::earth_gravity();
        let derivative = Derivatives {
            forces: &forces,
            springs: &[],
            index_of: &index_of,
        }
        .evaluate(&state);
        assert_eq!(derivative.body_angular_accel, vec![DVec3::ZERO]);
    }

    #[test]
    fn test_evaluation_does_not_mutate_the_state() {
        let (state, index_of) = two_mass_state();
        let before = serde_json::to_string(&state).expect("serializable state");
        let forces = ForcesConfig::earth_gravity();
        let _ = Derivatives {
            forces: &forces,
            springs: &[],
            index_of: &index_of,
        }
        .evaluate(&state);
        let after = serde_json::to_string(&state).expect("serializable state");
        assert_eq!(before, after);
    }
}
