//! Simulation Engine
//!
//! Central owner of a running scene: the fixed timestep, the selected
//! integrator, the force and spring configuration, the id lookup, and
//! the committed state. Synchronous and single-caller by design; the
//! only concurrency guarantee it offers is that [`SimulationEngine::state`]
//! returns a deep copy with no aliasing into engine storage, so a
//! consumer on the other side of a thread boundary can hold and read a
//! snapshot while stepping continues.

use std::collections::HashMap;

use crate::config::{ConfigError, ForcesConfig, SimConfig};
use crate::dynamics::{Derivatives, IntegratorKind};
use crate::math::{DVec3, quat_normalize_or_identity};
use crate::scene::{Joint, SimulationState, Spring};

/// The simulation engine: configuration plus the committed state.
#[derive(Debug, Clone)]
pub struct SimulationEngine {
    dt: f64,
    integrator: IntegratorKind,
    forces: ForcesConfig,
    springs: Vec<Spring>,
    joints: Vec<Joint>,
    /// Point-mass id to state-list index, built once at construction.
    /// Rigid bodies are found by linear scan; scenes are small.
    index_of: HashMap<String, usize>,
    state: SimulationState,
}

impl SimulationEngine {
    /// Build an engine from a validated configuration.
    ///
    /// Copies the initial bodies and springs into owned state, builds
    /// the id→index map, normalizes every initial orientation, and
    /// starts at `time = 0`, `step_index = 0`.
    ///
    /// # Errors
    /// [`ConfigError`] if the timestep or any mass is non-positive, or
    /// two bodies share an id.
    pub fn new(config: SimConfig) -> Result<Self, ConfigError> {
        config.validate()?;

        let index_of = config
            .point_masses
            .iter()
            .enumerate()
            .map(|(i, pm)| (pm.id.clone(), i))
            .collect();

        let mut rigid_bodies = config.rigid_bodies;
        for rb in &mut rigid_bodies {
            rb.orientation = quat_normalize_or_identity(rb.orientation);
        }

        Ok(Self {
            dt: config.dt,
            integrator: config.integrator,
            forces: config.forces,
            springs: config.springs,
            joints: config.joints,
            index_of,
            state: SimulationState {
                time: 0.0,
                step_index: 0,
                point_masses: config.point_masses,
                rigid_bodies,
            },
        })
    }

    /// Run the selected integrator once, replacing the committed state.
    pub fn step(&mut self) {
        let derivatives = Derivatives {
            forces: &self.forces,
            springs: &self.springs,
            index_of: &self.index_of,
        };
        self.state = self.integrator.step(&derivatives, self.dt, &self.state);
    }

    /// Apply an instantaneous impulse to a body: `v += impulse / mass`.
    ///
    /// Mutates the committed state directly, bypassing the integrator
    /// and dt. Resolves point masses first (via the id map), then rigid
    /// bodies (by scan). Position, time, and step index are untouched.
    /// An unknown id is silently ignored.
    pub fn apply_impulse(&mut self, id: &str, impulse: DVec3) {
        if let Some(&index) = self.index_of.get(id) {
            let pm = &mut self.state.point_masses[index];
            pm.velocity += impulse / pm.mass;
            return;
        }
        if let Some(rb) = self.state.rigid_bodies.iter_mut().find(|rb| rb.id == id) {
            rb.velocity += impulse / rb.mass;
        }
    }

    /// A fully independent deep copy of the committed state.
    ///
    /// Nothing in the returned value is shared with engine storage, so
    /// the caller may retain or mutate it freely without affecting
    /// later steps.
    pub fn state(&self) -> SimulationState {
        self.state.clone()
    }

    /// The fixed timestep used for every step (seconds).
    pub fn dt(&self) -> f64 {
        self.dt
    }

    /// The integrator the engine was constructed with.
    pub fn integrator(&self) -> IntegratorKind {
        self.integrator
    }

    /// Declared joints, carried from configuration but force-inert.
    pub fn joints(&self) -> &[Joint] {
        &self.joints
    }
}
