use crate::config::{ClothConfig, SpringParams};
use crate::errors::Result;
use crate::models::{ParticleSystem, State};
use crate::physics::dynamics::{ForceParams, SpringNetwork};
use crate::physics::gravity::downward_gravity;
use crate::physics::spring::Spring;
use nalgebra as na;

/// Rectangular cloth laid flat in the xz plane, held by the two corners of its
/// first row.
///
/// Node `(row, col)` starts at `(col * spacing, 0, -row * spacing)`.
#[derive(Debug, Clone)]
pub struct ClothSystem {
    network: SpringNetwork,
    rows: usize,
    cols: usize,
}

impl ClothSystem {
    pub fn new(config: &ClothConfig) -> Result<Self> {
        config.validate()?;
        let (rows, cols) = (config.rows, config.cols);
        let index = |row: usize, col: usize| row * cols + col;

        let mut positions = Vec::with_capacity(rows * cols);
        for row in 0..rows {
            for col in 0..cols {
                positions.push(na::Vector3::new(
                    col as f64 * config.spacing,
                    0.0,
                    -(row as f64) * config.spacing,
                ));
            }
        }

        let mut springs = Vec::new();
        let mut link = |a: usize, b: usize, params: &SpringParams| {
            springs.push(Spring::new(a, b, params.stiffness, params.rest_length));
        };
        for row in 0..rows {
            for col in 0..cols {
                let here = index(row, col);
                if col + 1 < cols {
                    link(here, index(row, col + 1), &config.structural);
                }
                if row + 1 < rows {
                    link(here, index(row + 1, col), &config.structural);
                }
                if row + 1 < rows && col + 1 < cols {
                    link(here, index(row + 1, col + 1), &config.shear);
                    link(index(row, col + 1), index(row + 1, col), &config.shear);
                }
                if col + 2 < cols {
                    link(here, index(row, col + 2), &config.flexion);
                }
                if row + 2 < rows {
                    link(here, index(row + 2, col), &config.flexion);
                }
            }
        }

        let mut pins = vec![index(0, 0)];
        if cols > 1 {
            pins.push(index(0, cols - 1));
        }

        let params = ForceParams {
            mass: config.mass,
            gravity: downward_gravity(config.gravity),
            drag: config.drag,
        };
        let network = SpringNetwork::new(&positions, params, springs, pins)?.with_sweep(config.sweep);
        Ok(ClothSystem {
            network,
            rows,
            cols,
        })
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn index(&self, row: usize, col: usize) -> usize {
        row * self.cols + col
    }

    pub fn position(&self, row: usize, col: usize) -> na::Vector3<f64> {
        *self.network.state().position(self.index(row, col))
    }

    pub fn network(&self) -> &SpringNetwork {
        &self.network
    }

    /// Starts or stops the sweep of the pinned corners.
    pub fn toggle_motion(&mut self) {
        self.network.toggle_motion();
    }

    pub fn set_motion(&mut self, enabled: bool) {
        self.network.set_motion(enabled);
    }

    pub fn total_energy(&self) -> f64 {
        self.network.total_energy()
    }
}

impl ParticleSystem<3> for ClothSystem {
    fn state(&self) -> State<3> {
        self.network.state()
    }

    fn set_state(&mut self, state: State<3>) -> Result<()> {
        self.network.set_state(state)
    }

    fn eval_f(&self, state: &State<3>) -> Result<State<3>> {
        self.network.eval_f(state)
    }
}
