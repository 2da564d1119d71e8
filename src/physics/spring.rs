use nalgebra as na;

/// Hooke force on the endpoint at `p_i` from a spring attached at `p_j`.
///
/// Directed along the normalized displacement, proportional to the deviation
/// from the rest length. Coincident endpoints have no direction and give zero.
pub fn spring_force(
    p_i: &na::Vector3<f64>,
    p_j: &na::Vector3<f64>,
    stiffness: f64,
    rest_length: f64,
) -> na::Vector3<f64> {
    let displacement = p_i - p_j;
    let length = displacement.magnitude();
    if length == 0.0 {
        return na::Vector3::zeros();
    }
    displacement * (-stiffness * (length - rest_length) / length)
}

/// A spring between two particles of a network.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Spring {
    pub a: usize,
    pub b: usize,
    pub stiffness: f64,
    pub rest_length: f64,
}

impl Spring {
    pub fn new(a: usize, b: usize, stiffness: f64, rest_length: f64) -> Self {
        Spring {
            a,
            b,
            stiffness,
            rest_length,
        }
    }

    /// Force on particle `a`; particle `b` receives the opposite.
    pub fn force_on_a(&self, p_a: &na::Vector3<f64>, p_b: &na::Vector3<f64>) -> na::Vector3<f64> {
        spring_force(p_a, p_b, self.stiffness, self.rest_length)
    }

    pub fn connects(&self, i: usize, j: usize) -> bool {
        (self.a == i && self.b == j) || (self.a == j && self.b == i)
    }
}
