use super::{ForwardEuler, Rkf45, Trapezoidal, RK4};
use crate::errors::{ensure_len, Result, SimulationError};
use crate::models::{ParticleSystem, State};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// One explicit integration rule.
///
/// A stepper holds no reference to any system and can be reused across
/// systems and calls. `take_step` either commits a complete step or returns
/// an error with the system's state untouched.
pub trait TimeStepper<const D: usize> {
    /// Advances `system` by one step of nominal size `h`.
    ///
    /// Returns the step size actually committed, which only differs from `h`
    /// for adaptive rules.
    fn take_step(&mut self, system: &mut dyn ParticleSystem<D>, h: f64) -> Result<f64>;

    fn name(&self) -> &'static str;
}

/// Evaluates the derivative and checks it kept the state's shape.
pub(crate) fn evaluate<const D: usize>(
    system: &dyn ParticleSystem<D>,
    state: &State<D>,
) -> Result<State<D>> {
    let derivative = system.eval_f(state)?;
    ensure_len(state.len(), derivative.len())?;
    Ok(derivative)
}

pub(crate) fn check_step_size(h: f64) -> Result<()> {
    if h.is_finite() {
        Ok(())
    } else {
        Err(SimulationError::InvalidStepSize(h))
    }
}

/// Tagged selection of the available steppers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum IntegratorKind {
    ForwardEuler,
    Trapezoidal,
    Rk4,
    Rkf45,
}

impl IntegratorKind {
    pub const ALL: [IntegratorKind; 4] = [
        IntegratorKind::ForwardEuler,
        IntegratorKind::Trapezoidal,
        IntegratorKind::Rk4,
        IntegratorKind::Rkf45,
    ];

    /// Command-line selector character.
    pub fn selector(self) -> char {
        match self {
            IntegratorKind::ForwardEuler => 'e',
            IntegratorKind::Trapezoidal => 't',
            IntegratorKind::Rk4 => 'r',
            IntegratorKind::Rkf45 => 'R',
        }
    }

    /// Order of accuracy of the committed update.
    pub fn order(self) -> u32 {
        match self {
            IntegratorKind::ForwardEuler => 1,
            IntegratorKind::Trapezoidal => 2,
            IntegratorKind::Rk4 | IntegratorKind::Rkf45 => 4,
        }
    }

    pub fn build<const D: usize>(self) -> Box<dyn TimeStepper<D>> {
        match self {
            IntegratorKind::ForwardEuler => Box::new(ForwardEuler),
            IntegratorKind::Trapezoidal => Box::new(Trapezoidal),
            IntegratorKind::Rk4 => Box::new(RK4),
            IntegratorKind::Rkf45 => Box::new(Rkf45::default()),
        }
    }
}

impl TryFrom<char> for IntegratorKind {
    type Error = SimulationError;

    fn try_from(selector: char) -> Result<Self> {
        match selector {
            'e' => Ok(IntegratorKind::ForwardEuler),
            't' => Ok(IntegratorKind::Trapezoidal),
            'r' => Ok(IntegratorKind::Rk4),
            'R' => Ok(IntegratorKind::Rkf45),
            other => Err(SimulationError::UnknownIntegrator(other)),
        }
    }
}

impl FromStr for IntegratorKind {
    type Err = SimulationError;

    fn from_str(s: &str) -> Result<Self> {
        let mut chars = s.chars();
        match (chars.next(), chars.next()) {
            (Some(c), None) => IntegratorKind::try_from(c),
            (Some(c), Some(_)) => Err(SimulationError::UnknownIntegrator(c)),
            (None, _) => Err(SimulationError::UnknownIntegrator(' ')),
        }
    }
}

impl fmt::Display for IntegratorKind {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            IntegratorKind::ForwardEuler => write!(f, "Forward Euler"),
            IntegratorKind::Trapezoidal => write!(f, "Trapezoidal"),
            IntegratorKind::Rk4 => write!(f, "RK4"),
            IntegratorKind::Rkf45 => write!(f, "RKF45"),
        }
    }
}
