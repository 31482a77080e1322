//! Spring accelerations between point masses
//!
//! Damped harmonic-oscillator force law along the spring axis, applied
//! equal and opposite to the two anchors. A spring whose anchor ids do
//! not both resolve to known point masses contributes nothing; that is
//! a data condition, not an error.

use std::collections::HashMap;

use crate::math::DVec3;
use crate::scene::{PointMass, Spring};

/// Accumulate the acceleration each spring contributes to its anchors.
///
/// For a spring between anchors `a` and `b` with separation direction
/// `dir` pointing from `a` to `b`:
///
/// - extension = |b.pos - a.pos| - rest_length
/// - damping term = damping · ((b.vel - a.vel) · dir)
/// - signed axial force f = -stiffness · extension - damping term
///
/// `f·dir` is applied to `b` and its negation to `a` (Newton's third
/// law), each divided by the anchor's mass before being added to the
/// accumulator. A stretched spring therefore pulls both anchors
/// together. Coincident anchors have no defined axis and contribute
/// nothing.
///
/// # Arguments
/// * `springs` - Every spring in the scene
/// * `index_of` - Point-mass id to list index, built at construction
/// * `point_masses` - The point masses of the state being evaluated
/// * `accel` - Per-point-mass acceleration accumulator, same order as
///   `point_masses`
pub fn accumulate_spring_accelerations(
    springs: &[Spring],
    index_of: &HashMap<String, usize>,
    point_masses: &[PointMass],
    accel: &mut [DVec3],
) {
    for spring in springs {
        let (Some(&ia), Some(&ib)) = (index_of.get(&spring.a_id), index_of.get(&spring.b_id))
        else {
            // Unresolved anchor: the spring is silently inert.
            continue;
        };
        let a = &point_masses[ia];
        let b = &point_masses[ib];

        let separation = b.position - a.position;
        let length = separation.length();
        let direction = if length == 0.0 {
            DVec3::ZERO
        } else {
            separation / length
        };

        let extension = length - spring.rest_length;
        let damping_term = spring.damping * (b.velocity - a.velocity).dot(direction);
        let force = direction * (-spring.stiffness * extension - damping_term);

        accel[ib] += force / b.mass;
        accel[ia] -= force / a.mass;
    }
}
