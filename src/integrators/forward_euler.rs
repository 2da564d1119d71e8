use super::stepper::{check_step_size, evaluate, TimeStepper};
use crate::errors::Result;
use crate::models::ParticleSystem;

/// `x1 = x0 + h f(x0)`. One evaluation per step, first order.
#[derive(Debug, Clone, Copy, Default)]
pub struct ForwardEuler;

impl<const D: usize> TimeStepper<D> for ForwardEuler {
    fn take_step(&mut self, system: &mut dyn ParticleSystem<D>, h: f64) -> Result<f64> {
        check_step_size(h)?;
        let state = system.state();
        let f0 = evaluate(system, &state)?;

        system.set_state(state + f0 * h)?;
        Ok(h)
    }

    fn name(&self) -> &'static str {
        "Forward Euler"
    }
}
