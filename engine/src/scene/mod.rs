//! Scene data model
//!
//! Value types describing what is being simulated: point masses,
//! box-shaped rigid bodies, springs, inert joints, and the full
//! [`SimulationState`] the integrators advance. Everything here is a
//! plain `Clone` value with serde support; JSON field names use
//! camelCase to match the scene files the visualization side produces.

use serde::{Deserialize, Serialize};

use crate::math::{DQuat, DVec3};

/// A zero-size mass with position and velocity, no orientation.
///
/// Mutated only by integration or impulse application.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PointMass {
    /// Unique id, referenced by springs and impulse targets
    pub id: String,
    /// Mass (kilograms), must be positive
    pub mass: f64,
    /// Position in world space (meters)
    #[serde(default)]
    pub position: DVec3,
    /// Velocity (meters/second)
    #[serde(default)]
    pub velocity: DVec3,
}

/// An oriented box-shaped rigid body.
///
/// Simplified model: no inertia tensor and no torque coupling, so
/// angular velocity only changes when set externally. The orientation
/// is renormalized to unit length after every integration step.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RigidBodyBox {
    /// Unique id, referenced by impulse targets
    pub id: String,
    /// Mass (kilograms), must be positive
    pub mass: f64,
    /// Box extents along its local axes (meters)
    pub size: DVec3,
    /// Position of the box center in world space (meters)
    #[serde(default)]
    pub position: DVec3,
    /// Velocity (meters/second)
    #[serde(default)]
    pub velocity: DVec3,
    /// Orientation as a unit quaternion, xyzw
    #[serde(default)]
    pub orientation: DQuat,
    /// World-frame angular velocity (rad/s)
    #[serde(default)]
    pub angular_velocity: DVec3,
}

/// A Hookean spring between two point masses, with optional damping
/// acting along the spring axis only.
///
/// Springs never connect rigid bodies. An anchor id that does not
/// resolve to a known point mass makes the spring contribute nothing.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Spring {
    /// Unique id (diagnostic only, not referenced elsewhere)
    pub id: String,
    /// Id of the first anchor point mass
    pub a_id: String,
    /// Id of the second anchor point mass
    pub b_id: String,
    /// Rest length (meters)
    pub rest_length: f64,
    /// Stiffness (N/m)
    pub stiffness: f64,
    /// Axial damping coefficient (Ns/m), zero disables damping
    #[serde(default)]
    pub damping: f64,
}

/// A declared joint between two bodies.
///
/// Parsed and carried through configuration but exerts no force; this
/// is an extension point with no specified constraint behavior.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Joint {
    /// Unique id
    pub id: String,
    /// Id of the first connected body
    pub a_id: String,
    /// Id of the second connected body
    pub b_id: String,
    /// Declared joint kind, uninterpreted
    #[serde(default)]
    pub kind: Option<String>,
}

/// The complete simulation state at one instant.
///
/// `time` and `step_index` advance in lockstep, exactly once per engine
/// step regardless of integrator. The engine only ever hands out deep
/// copies of this value, so a retained snapshot can never alias
/// engine-internal storage.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SimulationState {
    /// Simulated time (seconds), `step_index * dt`
    pub time: f64,
    /// Number of completed steps
    pub step_index: u64,
    /// Point masses, in construction order
    pub point_masses: Vec<PointMass>,
    /// Rigid bodies, in construction order
    pub rigid_bodies: Vec<RigidBodyBox>,
}
