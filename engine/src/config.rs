//! Simulation Configuration
//!
//! Centralized configuration for a scene: the fixed timestep, the
//! integrator selection, the force fields, and the initial bodies and
//! springs. Consumed once at engine construction. `Default` gives an
//! empty scene stepped by semi-implicit Euler, the recommended
//! integrator for spring scenes.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::dynamics::integrator::IntegratorKind;
use crate::math::DVec3;
use crate::scene::{Joint, PointMass, RigidBodyBox, Spring};

/// Constant gravity field.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GravityConfig {
    /// Acceleration magnitude (m/s²). Earth default: 9.81
    #[serde(default = "GravityConfig::default_g")]
    pub g: f64,
    /// Unit direction of the field. Default: straight down
    #[serde(default = "GravityConfig::default_direction")]
    pub direction: DVec3,
}

impl GravityConfig {
    fn default_g() -> f64 {
        9.81
    }

    fn default_direction() -> DVec3 {
        DVec3::new(0.0, -1.0, 0.0)
    }
}

impl Default for GravityConfig {
    fn default() -> Self {
        Self {
            g: Self::default_g(),
            direction: Self::default_direction(),
        }
    }
}

/// Velocity-proportional drag, `F = -coefficient · v`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LinearDragConfig {
    /// Drag coefficient (Ns/m)
    pub coefficient: f64,
}

/// The force fields acting on every body.
///
/// Both fields are optional; an absent field contributes no
/// acceleration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ForcesConfig {
    /// Constant acceleration field
    #[serde(default)]
    pub gravity: Option<GravityConfig>,
    /// Velocity-proportional damping
    #[serde(default)]
    pub linear_drag: Option<LinearDragConfig>,
}

impl ForcesConfig {
    /// A gravity-only field with Earth defaults.
    pub fn earth_gravity() -> Self {
        Self {
            gravity: Some(GravityConfig::default()),
            linear_drag: None,
        }
    }
}

/// Full scene configuration, consumed at engine construction.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SimConfig {
    /// Fixed step size (seconds); drives all integrators
    #[serde(default = "SimConfig::default_dt")]
    pub dt: f64,
    /// Integrator selection: `euler`, `semi`, or `rk4`
    #[serde(default)]
    pub integrator: IntegratorKind,
    /// Force fields applied to every body
    #[serde(default)]
    pub forces: ForcesConfig,
    /// Initial point masses
    #[serde(default)]
    pub point_masses: Vec<PointMass>,
    /// Initial rigid bodies
    #[serde(default)]
    pub rigid_bodies: Vec<RigidBodyBox>,
    /// Springs between point masses
    #[serde(default)]
    pub springs: Vec<Spring>,
    /// Declared joints; carried but force-inert
    #[serde(default)]
    pub joints: Vec<Joint>,
}

impl SimConfig {
    fn default_dt() -> f64 {
        1.0 / 60.0
    }

    /// Fail-fast checks run at engine construction.
    ///
    /// Rejects the configurations that would otherwise propagate
    /// `Infinity`/`NaN` through every later division by mass or dt.
    /// Unresolvable spring anchors are deliberately *not* rejected:
    /// at runtime those springs silently contribute nothing.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.dt > 0.0 && self.dt.is_finite()) {
            return Err(ConfigError::NonPositiveTimestep(self.dt));
        }
        let mut seen = std::collections::HashSet::new();
        for (id, mass) in self
            .point_masses
            .iter()
            .map(|pm| (&pm.id, pm.mass))
            .chain(self.rigid_bodies.iter().map(|rb| (&rb.id, rb.mass)))
        {
            if !(mass > 0.0 && mass.is_finite()) {
                return Err(ConfigError::NonPositiveMass {
                    id: id.clone(),
                    mass,
                });
            }
            if !seen.insert(id) {
                return Err(ConfigError::DuplicateId(id.clone()));
            }
        }
        Ok(())
    }
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            dt: Self::default_dt(),
            integrator: IntegratorKind::default(),
            forces: ForcesConfig::default(),
            point_masses: Vec::new(),
            rigid_bodies: Vec::new(),
            springs: Vec::new(),
            joints: Vec::new(),
        }
    }
}

/// Errors that make a scene configuration unusable.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Timestep is zero, negative, or not finite.
    #[error("timestep must be positive and finite, got {0}")]
    NonPositiveTimestep(f64),

    /// A body's mass is zero, negative, or not finite.
    #[error("body `{id}` has non-positive mass {mass}")]
    NonPositiveMass {
        /// Id of the offending body.
        id: String,
        /// The rejected mass value.
        mass: f64,
    },

    /// Two bodies share an id, making impulse targets ambiguous.
    #[error("duplicate body id `{0}`")]
    DuplicateId(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        assert!(SimConfig::default().validate().is_ok());
    }

    #[test]
    fn test_integrator_names_parse() {
        for (name, kind) in [
            ("euler", IntegratorKind::Euler),
            ("semi", IntegratorKind::SemiImplicit),
            ("rk4", IntegratorKind::Rk4),
        ] {
            let config: SimConfig =
                serde_json::from_str(&format!(r#"{{"integrator": "{name}"}}"#))
                    .expect("integrator name should parse");
            assert_eq!(config.integrator, kind);
        }
    }

    #[test]
    fn test_gravity_defaults_point_down() {
        let config: SimConfig =
            serde_json::from_str(r#"{"forces": {"gravity": {}}}"#).expect("valid config");
        let gravity = config.forces.gravity.expect("gravity configured");
        assert_eq!(gravity.g, 9.81);
        assert_eq!(gravity.direction, DVec3::new(0.0, -1.0, 0.0));
    }

    #[test]
    fn test_zero_dt_rejected() {
        let config = SimConfig {
            dt: 0.0,
            ..SimConfig::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::NonPositiveTimestep(_))
        ));
    }

    #[test]
    fn test_non_positive_mass_rejected() {
        let mut config = SimConfig::default();
        config.point_masses.push(PointMass {
            id: "weightless".into(),
            mass: 0.0,
            position: DVec3::ZERO,
            velocity: DVec3::ZERO,
        });
        match config.validate() {
            Err(ConfigError::NonPositiveMass { id, mass }) => {
                assert_eq!(id, "weightless");
                assert_eq!(mass, 0.0);
            }
            other => panic!("expected NonPositiveMass, got {other:?}"),
        }
    }

    #[test]
    fn test_duplicate_id_across_body_kinds_rejected() {
        let mut config = SimConfig::default();
        config.point_masses.push(PointMass {
            id: "shared".into(),
            mass: 1.0,
            position: DVec3::ZERO,
            velocity: DVec3::ZERO,
        });
        config.rigid_bodies.push(RigidBodyBox {
            id: "shared".into(),
            mass: 1.0,
            size: DVec3::ONE,
            position: DVec3::ZERO,
            velocity: DVec3::ZERO,
            orientation: crate::math::DQuat::IDENTITY,
            angular_velocity: DVec3::ZERO,
        });
        assert!(matches!(
            config.validate(),
            Err(ConfigError::DuplicateId(id)) if id == "shared"
        ));
    }
}
