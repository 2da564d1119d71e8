use crate::errors::Result;
use crate::integrators::stepper::check_step_size;
use crate::integrators::{IntegratorKind, TimeStepper};
use crate::models::{ParticleSystem, State};

/// Drives one system with one stepper and keeps the simulated clock.
pub struct Simulation<const D: usize> {
    system: Box<dyn ParticleSystem<D>>,
    stepper: Box<dyn TimeStepper<D>>,
    time: f64,
    steps: usize,
}

impl<const D: usize> Simulation<D> {
    pub fn new(system: Box<dyn ParticleSystem<D>>, stepper: Box<dyn TimeStepper<D>>) -> Self {
        Simulation {
            system,
            stepper,
            time: 0.0,
            steps: 0,
        }
    }

    pub fn with_integrator(system: Box<dyn ParticleSystem<D>>, kind: IntegratorKind) -> Self {
        Simulation::new(system, kind.build())
    }

    pub fn time(&self) -> f64 {
        self.time
    }

    pub fn steps_taken(&self) -> usize {
        self.steps
    }

    pub fn state(&self) -> State<D> {
        self.system.state()
    }

    pub fn system(&self) -> &dyn ParticleSystem<D> {
        self.system.as_ref()
    }

    pub fn system_mut(&mut self) -> &mut dyn ParticleSystem<D> {
        self.system.as_mut()
    }

    pub fn stepper_name(&self) -> &'static str {
        self.stepper.name()
    }

    /// Takes one step and returns the step size committed.
    pub fn advance(&mut self, h: f64) -> Result<f64> {
        check_step_size(h)?;
        let taken = self.stepper.take_step(self.system.as_mut(), h)?;
        self.time += taken;
        self.steps += 1;
        log::trace!("step {} reached t = {:.6}", self.steps, self.time);
        Ok(taken)
    }

    /// Advances `steps` times, handing each committed state to `observer`
    /// together with the step count and the elapsed time.
    pub fn run<F>(&mut self, steps: usize, h: f64, mut observer: F) -> Result<()>
    where
        F: FnMut(usize, f64, &State<D>),
    {
        log::info!(
            "running {} steps of {} with h = {}",
            steps,
            self.stepper.name(),
            h
        );
        for _ in 0..steps {
            self.advance(h)?;
            observer(self.steps, self.time, &self.system.state());
        }

        if !self.system.state().is_finite() {
            log::warn!(
                "state diverged by t = {:.3}; the step size {} is likely too large for {}",
                self.time,
                h,
                self.stepper.name()
            );
        }
        log::info!("finished at t = {:.6} after {} steps", self.time, self.steps);
        Ok(())
    }
}
