use super::drag::drag_force;
use super::energy::{gravitational_potential, kinetic_energy, spring_potential};
use super::gravity::gravity_force;
use super::spring::Spring;
use crate::constants::{SWEEP_FAR_Z, SWEEP_NEAR_Z, SWEEP_SPEED};
use crate::errors::{ensure_len, Result, SimulationError};
use crate::models::{ParticleSystem, State};
use nalgebra as na;
use serde::{Deserialize, Serialize};

/// Per-particle force parameters shared by every node of a network.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ForceParams {
    pub mass: f64,
    pub gravity: na::Vector3<f64>,
    pub drag: f64,
}

impl ForceParams {
    fn validate(&self) -> Result<()> {
        if !(self.mass.is_finite() && self.mass > 0.0) {
            return Err(SimulationError::InvalidConfig(format!(
                "mass must be positive, got {}",
                self.mass
            )));
        }
        if !(self.drag.is_finite() && self.drag >= 0.0) {
            return Err(SimulationError::InvalidConfig(format!(
                "drag must be non-negative, got {}",
                self.drag
            )));
        }
        if !self.gravity.iter().all(|g| g.is_finite()) {
            return Err(SimulationError::InvalidConfig("gravity must be finite".into()));
        }
        Ok(())
    }
}

/// Back-and-forth motion along z prescribed for pinned nodes.
///
/// Pins sweep toward `far_z` until they pass it, then back toward `near_z`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SweepMotion {
    pub near_z: f64,
    pub far_z: f64,
    pub speed: f64,
}

impl Default for SweepMotion {
    fn default() -> Self {
        SweepMotion {
            near_z: SWEEP_NEAR_Z,
            far_z: SWEEP_FAR_Z,
            speed: SWEEP_SPEED,
        }
    }
}

impl SweepMotion {
    /// Direction after observing a pin at depth `z`; `true` means toward `far_z`.
    pub fn latch(&self, z: f64, backward: bool) -> bool {
        if z < self.far_z {
            false
        } else if z >= self.near_z {
            true
        } else {
            backward
        }
    }

    pub fn velocity(&self, z: f64, backward: bool) -> na::Vector3<f64> {
        if self.latch(z, backward) {
            na::Vector3::new(0.0, 0.0, -self.speed)
        } else {
            na::Vector3::new(0.0, 0.0, self.speed)
        }
    }
}

/// Particles joined by Hooke springs under gravity and viscous drag.
///
/// The state interleaves position and velocity per particle. Pinned particles
/// get zero acceleration and a prescribed velocity: zero, or the sweep motion
/// when it is enabled.
#[derive(Debug, Clone)]
pub struct SpringNetwork {
    state: State<3>,
    params: ForceParams,
    springs: Vec<Spring>,
    pins: Vec<usize>,
    sweep: Option<SweepMotion>,
    motion_enabled: bool,
    sweep_backward: bool,
}

impl SpringNetwork {
    /// Network at rest at `positions`.
    pub fn new(
        positions: &[na::Vector3<f64>],
        params: ForceParams,
        springs: Vec<Spring>,
        pins: Vec<usize>,
    ) -> Result<Self> {
        params.validate()?;
        let n = positions.len();
        if n == 0 {
            return Err(SimulationError::InvalidConfig(
                "a network needs at least one particle".into(),
            ));
        }
        for spring in &springs {
            if spring.a >= n || spring.b >= n || spring.a == spring.b {
                return Err(SimulationError::InvalidConfig(format!(
                    "spring ({}, {}) does not join two distinct particles of {n}",
                    spring.a, spring.b
                )));
            }
            if !(spring.stiffness.is_finite() && spring.rest_length.is_finite())
                || spring.rest_length < 0.0
            {
                return Err(SimulationError::InvalidConfig(format!(
                    "spring ({}, {}) has invalid stiffness or rest length",
                    spring.a, spring.b
                )));
            }
        }
        if let Some(&pin) = pins.iter().find(|&&pin| pin >= n) {
            return Err(SimulationError::InvalidConfig(format!(
                "pinned particle {pin} out of range for {n} particles"
            )));
        }

        let velocities = vec![na::Vector3::zeros(); n];
        Ok(SpringNetwork {
            state: State::from_pairs(positions, &velocities)?,
            params,
            springs,
            pins,
            sweep: None,
            motion_enabled: false,
            sweep_backward: true,
        })
    }

    /// Attaches a motion law to the pins. It stays off until enabled.
    pub fn with_sweep(mut self, sweep: SweepMotion) -> Self {
        self.sweep = Some(sweep);
        self
    }

    pub fn set_motion(&mut self, enabled: bool) {
        self.motion_enabled = enabled;
    }

    pub fn toggle_motion(&mut self) {
        self.motion_enabled = !self.motion_enabled;
    }

    pub fn motion_enabled(&self) -> bool {
        self.motion_enabled
    }

    pub fn num_particles(&self) -> usize {
        self.state.num_particles()
    }

    pub fn params(&self) -> &ForceParams {
        &self.params
    }

    pub fn springs(&self) -> &[Spring] {
        &self.springs
    }

    pub fn pins(&self) -> &[usize] {
        &self.pins
    }

    pub fn is_pinned(&self, particle: usize) -> bool {
        self.pins.contains(&particle)
    }

    /// Net force on every particle of `state`, pins included.
    fn net_forces(&self, state: &State<3>) -> Vec<na::Vector3<f64>> {
        let ForceParams {
            mass,
            gravity,
            drag,
        } = self.params;
        let mut forces: Vec<_> = state
            .velocities()
            .map(|v| gravity_force(mass, &gravity) + drag_force(v, drag))
            .collect();

        for spring in &self.springs {
            let force = spring.force_on_a(state.position(spring.a), state.position(spring.b));
            forces[spring.a] += force;
            forces[spring.b] -= force;
        }
        forces
    }

    /// Kinetic plus gravitational plus spring potential energy.
    pub fn total_energy(&self) -> f64 {
        let ForceParams { mass, gravity, .. } = self.params;
        let particles: f64 = self
            .state
            .positions()
            .zip(self.state.velocities())
            .map(|(p, v)| kinetic_energy(mass, v) + gravitational_potential(mass, &gravity, p))
            .sum();
        let springs: f64 = self
            .springs
            .iter()
            .map(|s| {
                spring_potential(
                    self.state.position(s.a),
                    self.state.position(s.b),
                    s.stiffness,
                    s.rest_length,
                )
            })
            .sum();
        particles + springs
    }

    fn pin_velocity(&self, position: &na::Vector3<f64>) -> na::Vector3<f64> {
        match self.sweep {
            Some(sweep) if self.motion_enabled => sweep.velocity(position.z, self.sweep_backward),
            _ => na::Vector3::zeros(),
        }
    }
}

impl ParticleSystem<3> for SpringNetwork {
    fn state(&self) -> State<3> {
        self.state.clone()
    }

    fn set_state(&mut self, state: State<3>) -> Result<()> {
        ensure_len(self.state.len(), state.len())?;
        // The sweep direction only follows committed positions.
        if let (Some(sweep), true) = (self.sweep, self.motion_enabled) {
            for &pin in &self.pins {
                self.sweep_backward = sweep.latch(state.position(pin).z, self.sweep_backward);
            }
        }
        self.state = state;
        Ok(())
    }

    fn eval_f(&self, state: &State<3>) -> Result<State<3>> {
        ensure_len(self.state.len(), state.len())?;
        let forces = self.net_forces(state);

        let mut derivative = State::zeros(state.len());
        for (i, force) in forces.iter().enumerate() {
            derivative[2 * i] = *state.velocity(i);
            derivative[2 * i + 1] = force / self.params.mass;
        }
        for &pin in &self.pins {
            derivative[2 * pin] = self.pin_velocity(state.position(pin));
            derivative[2 * pin + 1] = na::Vector3::zeros();
        }
        Ok(derivative)
    }
}
