//! Dynamics: the force model and the integrators
//!
//! Everything that turns a [`SimulationState`](crate::scene::SimulationState)
//! into the next one lives here, split into the layers the data flows
//! through each step:
//!
//! - [`forces`] - per-body accelerations from the configured fields
//!   (gravity, linear drag)
//! - [`spring`] - pairwise spring accelerations between point masses
//! - [`derivative`] - composes both into the full state derivative
//! - [`integrator`] - the stepping algorithms (explicit Euler,
//!   semi-implicit Euler, RK4) built on the derivative evaluator
//!
//! The derivative evaluation is pure over a passed-in state: RK4 probes
//! intermediate states that are never committed, so nothing in this
//! module may read the engine's own storage.

pub mod derivative;
pub mod forces;
pub mod integrator;
pub mod spring;

pub use derivative::{Derivatives, StateDerivative};
pub use integrator::IntegratorKind;
