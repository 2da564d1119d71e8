use nalgebra as na;

/// Linear viscous drag `-b v`.
pub fn drag_force(velocity: &na::Vector3<f64>, drag_coefficient: f64) -> na::Vector3<f64> {
    velocity * -drag_coefficient
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use test_case::test_case;

    #[test_case(na::Vector3::new(1.0, -2.0, 0.5), 0.1, na::Vector3::new(-0.1, 0.2, -0.05); "opposes motion")]
    #[test_case(na::Vector3::zeros(), 0.1, na::Vector3::zeros(); "at rest")]
    #[test_case(na::Vector3::new(3.0, 0.0, 0.0), 0.0, na::Vector3::zeros(); "no drag")]
    fn test_drag_force(velocity: na::Vector3<f64>, b: f64, expected: na::Vector3<f64>) {
        assert_abs_diff_eq!(drag_force(&velocity, b), expected, epsilon = 1e-12);
    }
}
