use super::rk4::RK4;
use super::stepper::{check_step_size, evaluate, TimeStepper};
use crate::constants::{DEFAULT_RKF45_TOLERANCE, RKF45_ERROR_FLOOR};
use crate::errors::{Result, SimulationError};
use crate::models::{ParticleSystem, State};

// Fehlberg tableau. Row i holds the coefficients of K1..Ki for stage i + 2.
const STAGE_WEIGHTS: [&[f64]; 5] = [
    &[1.0 / 4.0],
    &[3.0 / 32.0, 9.0 / 32.0],
    &[1932.0 / 2197.0, -7200.0 / 2197.0, 7296.0 / 2197.0],
    &[439.0 / 216.0, -8.0, 3680.0 / 513.0, -845.0 / 4104.0],
    &[-8.0 / 27.0, 2.0, -3544.0 / 2565.0, 1859.0 / 4104.0, -11.0 / 40.0],
];
const FOURTH_ORDER: [f64; 6] = [25.0 / 216.0, 0.0, 1408.0 / 2565.0, 2197.0 / 4104.0, -1.0 / 5.0, 0.0];
const FIFTH_ORDER: [f64; 6] = [
    16.0 / 135.0,
    0.0,
    6656.0 / 12825.0,
    28561.0 / 56430.0,
    -9.0 / 50.0,
    2.0 / 55.0,
];

/// Rescales the step from the embedded-pair error estimate.
///
/// `h_next = h (tolerance / error)^(1/4)`, optionally clamped in magnitude.
/// An error at or below [`RKF45_ERROR_FLOOR`] keeps `h` as is.
#[derive(Debug, Clone, PartialEq)]
pub struct StepController {
    tolerance: f64,
    min_step: Option<f64>,
    max_step: Option<f64>,
}

impl StepController {
    pub fn new(tolerance: f64) -> Result<Self> {
        if !(tolerance.is_finite() && tolerance > 0.0) {
            return Err(SimulationError::InvalidConfig(format!(
                "RKF45 tolerance must be positive and finite, got {tolerance}"
            )));
        }
        Ok(StepController {
            tolerance,
            min_step: None,
            max_step: None,
        })
    }

    pub fn with_step_bounds(mut self, min_step: f64, max_step: f64) -> Result<Self> {
        if !(min_step >= 0.0 && min_step <= max_step && max_step.is_finite()) {
            return Err(SimulationError::InvalidConfig(format!(
                "invalid step bounds [{min_step}, {max_step}]"
            )));
        }
        self.min_step = Some(min_step);
        self.max_step = Some(max_step);
        Ok(self)
    }

    pub fn tolerance(&self) -> f64 {
        self.tolerance
    }

    pub fn next_step(&self, h: f64, error: f64) -> Result<f64> {
        if !error.is_finite() {
            return Err(SimulationError::NonFiniteErrorEstimate(error));
        }
        if error <= RKF45_ERROR_FLOOR {
            return Ok(h);
        }

        let scaled = h * (self.tolerance / error).powf(0.25);
        let mut magnitude = scaled.abs();
        if let Some(min_step) = self.min_step {
            magnitude = magnitude.max(min_step);
        }
        if let Some(max_step) = self.max_step {
            magnitude = magnitude.min(max_step);
        }
        Ok(magnitude.copysign(h))
    }
}

impl Default for StepController {
    fn default() -> Self {
        StepController {
            tolerance: DEFAULT_RKF45_TOLERANCE,
            min_step: None,
            max_step: None,
        }
    }
}

/// Step size chosen by one adaptation pass.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Adaptation {
    pub trial_step: f64,
    pub error: f64,
    pub next_step: f64,
}

/// Runge-Kutta-Fehlberg step-size adaptation feeding an RK4 update.
///
/// Each step runs the six Fehlberg stages with the trial `h`, takes the L1
/// distance between the fourth- and fifth-order estimates as the local error,
/// rescales the step, then commits an ordinary RK4 step of the rescaled size.
/// Neither embedded estimate is committed.
#[derive(Debug, Clone, Default)]
pub struct Rkf45 {
    controller: StepController,
    last_step: Option<f64>,
}

impl Rkf45 {
    pub fn new(tolerance: f64) -> Result<Self> {
        Ok(Rkf45::with_controller(StepController::new(tolerance)?))
    }

    pub fn with_controller(controller: StepController) -> Self {
        Rkf45 {
            controller,
            last_step: None,
        }
    }

    pub fn controller(&self) -> &StepController {
        &self.controller
    }

    /// Step size committed by the most recent successful step.
    pub fn last_step_size(&self) -> Option<f64> {
        self.last_step
    }

    /// Runs the embedded pair on `state` with trial step `h` and returns the
    /// step size the controller picks.
    pub fn adapt<const D: usize>(
        &self,
        system: &dyn ParticleSystem<D>,
        state: &State<D>,
        h: f64,
    ) -> Result<Adaptation> {
        let (fourth, fifth) = embedded_estimates(system, state, h)?;
        let error = fifth.l1_distance(&fourth)?;
        let next_step = self.controller.next_step(h, error)?;
        Ok(Adaptation {
            trial_step: h,
            error,
            next_step,
        })
    }
}

impl<const D: usize> TimeStepper<D> for Rkf45 {
    fn take_step(&mut self, system: &mut dyn ParticleSystem<D>, h: f64) -> Result<f64> {
        check_step_size(h)?;
        let state = system.state();

        let adaptation = self.adapt(system, &state, h)?;
        log::debug!(
            "RKF45 error {:.3e} with h = {:.3e}, committing h = {:.3e}",
            adaptation.error,
            h,
            adaptation.next_step
        );

        // TODO: commit the fifth-order estimate directly once drivers stop
        // assuming the RK4 trajectory.
        let next = RK4::integrate(system, &state, adaptation.next_step)?;
        system.set_state(next)?;
        self.last_step = Some(adaptation.next_step);
        Ok(adaptation.next_step)
    }

    fn name(&self) -> &'static str {
        "RKF45"
    }
}

fn combine<const D: usize>(state: &State<D>, h: f64, weights: &[f64], ks: &[State<D>]) -> State<D> {
    weights
        .iter()
        .zip(ks)
        .filter(|(w, _)| **w != 0.0)
        .fold(state.clone(), |acc, (w, k)| acc + k.clone() * (w * h))
}

/// Fourth- and fifth-order Fehlberg estimates over `h`.
fn embedded_estimates<const D: usize>(
    system: &dyn ParticleSystem<D>,
    state: &State<D>,
    h: f64,
) -> Result<(State<D>, State<D>)> {
    let mut ks = Vec::with_capacity(6);
    ks.push(evaluate(system, state)?);
    for weights in STAGE_WEIGHTS {
        let stage = combine(state, h, weights, &ks);
        ks.push(evaluate(system, &stage)?);
    }

    Ok((
        combine(state, h, &FOURTH_ORDER, &ks),
        combine(state, h, &FIFTH_ORDER, &ks),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use test_case::test_case;

    #[test]
    fn tableau_rows_are_consistent() {
        // Each stage row sums to its node c_i, and both weight sets sum to one.
        let nodes = [1.0 / 4.0, 3.0 / 8.0, 12.0 / 13.0, 1.0, 1.0 / 2.0];
        for (row, node) in STAGE_WEIGHTS.iter().zip(nodes) {
            assert_relative_eq!(row.iter().sum::<f64>(), node, epsilon = 1e-12);
        }
        assert_relative_eq!(FOURTH_ORDER.iter().sum::<f64>(), 1.0, epsilon = 1e-12);
        assert_relative_eq!(FIFTH_ORDER.iter().sum::<f64>(), 1.0, epsilon = 1e-12);
    }

    #[test_case(0.1, 1e-4 => 0.1; "tolerance met exactly")]
    #[test_case(0.1, 1.6e-3 => 0.05; "sixteen times the tolerance halves")]
    #[test_case(-0.1, 1.6e-3 => -0.05; "backward step keeps its sign")]
    #[test_case(0.1, 0.0 => 0.1; "zero error keeps the step")]
    #[test_case(0.0, 0.0 => 0.0; "zero step stays zero")]
    fn controller_rescales(h: f64, error: f64) -> f64 {
        let controller = StepController::new(1e-4).unwrap();
        let next = controller.next_step(h, error).unwrap();
        (next * 1e9).round() / 1e9
    }

    #[test]
    fn controller_respects_bounds() {
        let controller = StepController::new(1e-4)
            .unwrap()
            .with_step_bounds(0.01, 0.2)
            .unwrap();
        assert_relative_eq!(controller.next_step(0.1, 1e-10).unwrap(), 0.2);
        assert_relative_eq!(controller.next_step(0.1, 1e6).unwrap(), 0.01);
    }

    #[test]
    fn controller_rejects_non_finite_error() {
        let controller = StepController::default();
        assert_eq!(
            controller.next_step(0.1, f64::INFINITY),
            Err(SimulationError::NonFiniteErrorEstimate(f64::INFINITY))
        );
        assert!(controller.next_step(0.1, f64::NAN).is_err());
    }

    #[test_case(0.0; "zero")]
    #[test_case(-1e-3; "negative")]
    #[test_case(f64::NAN; "nan")]
    fn invalid_tolerance_is_rejected(tolerance: f64) {
        assert!(matches!(
            Rkf45::new(tolerance),
            Err(SimulationError::InvalidConfig(_))
        ));
    }

    #[test]
    fn inverted_bounds_are_rejected() {
        assert!(StepController::default().with_step_bounds(0.5, 0.1).is_err());
    }
}
