use super::state::State;
use crate::errors::Result;

/// A dynamical system integrated by a [`TimeStepper`](crate::integrators::TimeStepper).
///
/// The system owns its committed state and whatever immutable topology its
/// derivative needs. Steppers read the state, evaluate `eval_f` on it and on
/// intermediate stage states, then commit once through `set_state`.
pub trait ParticleSystem<const D: usize> {
    /// Current state, returned as a copy.
    fn state(&self) -> State<D>;

    /// Replaces the current state. Fails on a length change.
    fn set_state(&mut self, state: State<D>) -> Result<()>;

    /// Time derivative of `state`, which need not be the committed state.
    ///
    /// Implementations must be pure: the same input yields the same output and
    /// nothing observable changes. Boundary conditions belong here, as
    /// overrides of the derivative at pinned indices.
    fn eval_f(&self, state: &State<D>) -> Result<State<D>>;

    /// Number of vectors in the state, fixed for the system's lifetime.
    fn state_len(&self) -> usize {
        self.state().len()
    }
}
