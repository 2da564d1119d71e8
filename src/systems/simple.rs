use crate::errors::{ensure_len, Result, SimulationError};
use crate::models::{ParticleSystem, State};
use nalgebra as na;

/// Uniform circular motion in the xy plane: `f(x, y, ..) = (-y, x, 0, ..)`.
///
/// Each vector of the state is an independent point; there is no
/// position/velocity pairing.
#[derive(Debug, Clone)]
pub struct SimpleSystem<const D: usize> {
    state: State<D>,
}

impl SimpleSystem<3> {
    /// A single point starting at `(-1, -1, 0)`.
    pub fn new() -> Self {
        SimpleSystem {
            state: State::new(vec![na::Vector3::new(-1.0, -1.0, 0.0)]),
        }
    }
}

impl Default for SimpleSystem<3> {
    fn default() -> Self {
        Self::new()
    }
}

impl<const D: usize> SimpleSystem<D> {
    pub fn with_state(state: State<D>) -> Result<Self> {
        if D < 2 {
            return Err(SimulationError::InvalidConfig(format!(
                "circular motion needs at least two dimensions, got {D}"
            )));
        }
        if state.is_empty() {
            return Err(SimulationError::InvalidConfig(
                "circular motion needs at least one point".into(),
            ));
        }
        Ok(SimpleSystem { state })
    }

    /// Closed-form solution: `initial` rotated by `t` radians about the z axis.
    pub fn exact(initial: &State<D>, t: f64) -> State<D> {
        let (sin, cos) = t.sin_cos();
        initial
            .iter()
            .map(|v| {
                let mut rotated = *v;
                rotated[0] = cos * v[0] - sin * v[1];
                rotated[1] = sin * v[0] + cos * v[1];
                rotated
            })
            .collect()
    }
}

impl<const D: usize> ParticleSystem<D> for SimpleSystem<D> {
    fn state(&self) -> State<D> {
        self.state.clone()
    }

    fn set_state(&mut self, state: State<D>) -> Result<()> {
        ensure_len(self.state.len(), state.len())?;
        self.state = state;
        Ok(())
    }

    fn eval_f(&self, state: &State<D>) -> Result<State<D>> {
        ensure_len(self.state.len(), state.len())?;
        Ok(state
            .iter()
            .map(|v| {
                let mut dv = na::SVector::<f64, D>::zeros();
                dv[0] = -v[1];
                dv[1] = v[0];
                dv
            })
            .collect())
    }
}
