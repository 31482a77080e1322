//! Springbox Engine Library
//!
//! A fixed-step classical-mechanics simulation for small scenes of
//! point masses and box-shaped rigid bodies connected by springs,
//! under configurable gravity and linear drag, advanced by a
//! selectable integrator (explicit Euler, semi-implicit Euler, RK4).
//! Produces periodic state snapshots for an external visualization.
//!
//! # Modules
//!
//! - [`math`] - f64 vector/quaternion types and the shared orientation
//!   update
//! - [`scene`] - the data model: bodies, springs, joints, state
//! - [`config`] - scene configuration and fail-fast validation
//! - [`dynamics`] - force model, spring model, derivative evaluator,
//!   and the three integrators
//! - [`engine`] - the simulation engine: step / impulse / snapshot
//! - [`session`] - the scheduling shim: command/event contract,
//!   run/pause lifecycle, snapshot throttling, worker thread
//!
//! # Example
//!
//! ```ignore
//! use springbox_engine::config::{ForcesConfig, SimConfig};
//! use springbox_engine::engine::SimulationEngine;
//! use springbox_engine::math::DVec3;
//!
//! let config = SimConfig {
//!     dt: 1.0 / 120.0,
//!     forces: ForcesConfig::earth_gravity(),
//!     ..SimConfig::default()
//! };
//! let mut engine = SimulationEngine::new(config)?;
//! engine.apply_impulse("probe", DVec3::new(0.0, 5.0, 0.0));
//! engine.step();
//! let snapshot = engine.state();
//! ```

pub mod config;
pub mod dynamics;
pub mod engine;
pub mod math;
pub mod scene;
pub mod session;

// Re-export the working vocabulary at crate level for convenience
pub use config::{ConfigError, ForcesConfig, GravityConfig, LinearDragConfig, SimConfig};
pub use dynamics::IntegratorKind;
pub use engine::SimulationEngine;
pub use math::{DQuat, DVec3};
pub use scene::{Joint, PointMass, RigidBodyBox, SimulationState, Spring};
pub use session::{Command, Event, Session, SessionState, SessionWorker};
