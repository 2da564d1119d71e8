use crate::constants::STANDARD_GRAVITY;
use nalgebra as na;

/// Gravitational acceleration pointing down the y axis.
pub fn downward_gravity(g: f64) -> na::Vector3<f64> {
    na::Vector3::new(0.0, -g, 0.0)
}

pub fn standard_gravity() -> na::Vector3<f64> {
    downward_gravity(STANDARD_GRAVITY)
}

/// Constant force `m g` on a particle.
pub fn gravity_force(mass: f64, gravity: &na::Vector3<f64>) -> na::Vector3<f64> {
    gravity * mass
}
