use super::stepper::{check_step_size, evaluate, TimeStepper};
use crate::errors::Result;
use crate::models::ParticleSystem;

/// Heun's predictor-corrector: an Euler predictor, then the average of the
/// slopes at both ends. Two evaluations per step, second order.
#[derive(Debug, Clone, Copy, Default)]
pub struct Trapezoidal;

impl<const D: usize> TimeStepper<D> for Trapezoidal {
    fn take_step(&mut self, system: &mut dyn ParticleSystem<D>, h: f64) -> Result<f64> {
        check_step_size(h)?;
        let state = system.state();

        let f0 = evaluate(system, &state)?;
        let predicted = state.clone() + f0.clone() * h;
        let f1 = evaluate(system, &predicted)?;

        system.set_state(state + (f0 + f1) * (h / 2.0))?;
        Ok(h)
    }

    fn name(&self) -> &'static str {
        "Trapezoidal"
    }
}
