use super::stepper::{check_step_size, evaluate, TimeStepper};
use crate::errors::Result;
use crate::models::{ParticleSystem, State};

/// Classical four-stage Runge-Kutta with a fixed step.
#[derive(Debug, Clone, Copy, Default)]
pub struct RK4;

impl RK4 {
    /// The RK4 update of `state` over `dt`, without committing it.
    pub fn integrate<const D: usize>(
        system: &dyn ParticleSystem<D>,
        state: &State<D>,
        dt: f64,
    ) -> Result<State<D>> {
        let k1 = evaluate(system, state)?;

        let state2 = state.clone() + k1.clone() * (dt / 2.0);
        let k2 = evaluate(system, &state2)?;

        let state3 = state.clone() + k2.clone() * (dt / 2.0);
        let k3 = evaluate(system, &state3)?;

        let state4 = state.clone() + k3.clone() * dt;
        let k4 = evaluate(system, &state4)?;

        Ok(state.clone() + (k1 + k2 * 2.0 + k3 * 2.0 + k4) * (dt / 6.0))
    }
}

impl<const D: usize> TimeStepper<D> for RK4 {
    fn take_step(&mut self, system: &mut dyn ParticleSystem<D>, h: f64) -> Result<f64> {
        check_step_size(h)?;
        let state = system.state();
        let next = RK4::integrate(system, &state, h)?;

        system.set_state(next)?;
        Ok(h)
    }

    fn name(&self) -> &'static str {
        "RK4"
    }
}
