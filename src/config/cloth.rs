use crate::constants::STANDARD_GRAVITY;
use crate::errors::{Result, SimulationError};
use crate::physics::dynamics::SweepMotion;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SpringParams {
    pub stiffness: f64,
    pub rest_length: f64,
}

impl SpringParams {
    pub fn new(stiffness: f64, rest_length: f64) -> Self {
        SpringParams {
            stiffness,
            rest_length,
        }
    }
}

/// Square-lattice cloth with structural, shear and flexion springs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClothConfig {
    pub rows: usize,
    pub cols: usize,
    pub spacing: f64,
    pub mass: f64,
    pub gravity: f64,
    pub drag: f64,
    pub structural: SpringParams,
    pub shear: SpringParams,
    pub flexion: SpringParams,
    pub sweep: SweepMotion,
}

impl Default for ClothConfig {
    fn default() -> Self {
        ClothConfig {
            rows: 8,
            cols: 8,
            spacing: 0.5,
            mass: 0.005,
            gravity: STANDARD_GRAVITY,
            drag: 0.1,
            structural: SpringParams::new(2.0, 0.5),
            shear: SpringParams::new(2.0, 0.75),
            flexion: SpringParams::new(2.0, 1.0),
            sweep: SweepMotion::default(),
        }
    }
}

impl ClothConfig {
    /// Square grid with the default material.
    pub fn square(grid_size: usize) -> Self {
        ClothConfig {
            rows: grid_size,
            cols: grid_size,
            ..Self::default()
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.rows == 0 || self.cols == 0 {
            return Err(SimulationError::InvalidConfig(format!(
                "cloth grid must be non-empty, got {}x{}",
                self.rows, self.cols
            )));
        }
        if !(self.spacing.is_finite() && self.spacing > 0.0) {
            return Err(SimulationError::InvalidConfig(format!(
                "grid spacing must be positive, got {}",
                self.spacing
            )));
        }
        Ok(())
    }
}
