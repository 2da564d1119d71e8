use crate::config::PendulumConfig;
use crate::errors::Result;
use crate::models::{ParticleSystem, State};
use crate::physics::dynamics::{ForceParams, SpringNetwork};
use crate::physics::gravity::downward_gravity;
use crate::physics::spring::Spring;
use nalgebra as na;

/// Multi-link pendulum: a chain hanging from particle 0, which is pinned at
/// the origin. Every particle is tied to its first and second neighbours.
#[derive(Debug, Clone)]
pub struct PendulumSystem {
    network: SpringNetwork,
}

impl PendulumSystem {
    pub fn new(config: &PendulumConfig) -> Result<Self> {
        config.validate()?;
        let n = config.num_particles;

        // Zig-zag below the anchor so every spring starts stretched.
        let positions: Vec<_> = (0..n)
            .map(|i| {
                if i == 0 {
                    na::Vector3::zeros()
                } else {
                    let side = if i % 2 == 0 { 0.5 } else { -0.5 };
                    na::Vector3::new(side, -0.5 * i as f64, 0.0)
                }
            })
            .collect();

        let mut springs = Vec::new();
        for i in 0..n {
            if i + 1 < n {
                springs.push(Spring::new(i, i + 1, config.stiffness, config.rest_length));
            }
            if i + 2 < n {
                springs.push(Spring::new(i, i + 2, config.stiffness, 2.0 * config.rest_length));
            }
        }

        let params = ForceParams {
            mass: config.mass,
            gravity: downward_gravity(config.gravity),
            drag: config.drag,
        };
        let network = SpringNetwork::new(&positions, params, springs, vec![0])?;
        Ok(PendulumSystem { network })
    }

    pub fn network(&self) -> &SpringNetwork {
        &self.network
    }

    pub fn num_particles(&self) -> usize {
        self.network.num_particles()
    }

    pub fn position(&self, particle: usize) -> na::Vector3<f64> {
        *self.network.state().position(particle)
    }

    pub fn total_energy(&self) -> f64 {
        self.network.total_energy()
    }
}

impl ParticleSystem<3> for PendulumSystem {
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
