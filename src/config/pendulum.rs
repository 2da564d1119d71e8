use crate::constants::STANDARD_GRAVITY;
use crate::errors::{Result, SimulationError};
use serde::{Deserialize, Serialize};

/// Chain of particles hanging from a pinned anchor.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PendulumConfig {
    pub num_particles: usize,
    pub mass: f64,
    pub drag: f64,
    pub stiffness: f64,
    pub rest_length: f64, // nearest neighbours; second neighbours rest at twice this
    pub gravity: f64,
}

impl Default for PendulumConfig {
    fn default() -> Self {
        PendulumConfig {
            num_particles: 4,
            mass: 0.05,
            drag: 0.05,
            stiffness: 1.5,
            rest_length: 0.4,
            gravity: STANDARD_GRAVITY,
        }
    }
}

impl PendulumConfig {
    pub fn with_particles(num_particles: usize) -> Self {
        PendulumConfig {
            num_particles,
            ..Self::default()
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.num_particles == 0 {
            return Err(SimulationError::InvalidConfig(
                "pendulum needs at least one particle".into(),
            ));
        }
        if !(self.stiffness.is_finite() && self.stiffness >= 0.0) {
            return Err(SimulationError::InvalidConfig(format!(
                "spring stiffness must be non-negative, got {}",
                self.stiffness
            )));
        }
        Ok(())
    }
}
