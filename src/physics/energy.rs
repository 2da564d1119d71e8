use nalgebra as na;

pub fn kinetic_energy(mass: f64, velocity: &na::Vector3<f64>) -> f64 {
    0.5 * mass * velocity.norm_squared()
}

/// Potential of a uniform field, zero at the origin.
pub fn gravitational_potential(
    mass: f64,
    gravity: &na::Vector3<f64>,
    position: &na::Vector3<f64>,
) -> f64 {
    -mass * gravity.dot(position)
}

pub fn spring_potential(
    p_a: &na::Vector3<f64>,
    p_b: &na::Vector3<f64>,
    stiffness: f64,
    rest_length: f64,
) -> f64 {
    let stretch = (p_a - p_b).magnitude() - rest_length;
    0.5 * stiffness * stretch * stretch
}
