use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum SimulationError {
    #[error("state has {found} vectors, expected {expected}")]
    ShapeMismatch { expected: usize, found: usize },

    #[error("step size must be finite, got {0}")]
    InvalidStepSize(f64),

    #[error("adaptive error estimate is not finite ({0})")]
    NonFiniteErrorEstimate(f64),

    #[error("unknown integrator '{0}' (expected one of e, t, r, R)")]
    UnknownIntegrator(char),

    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
}

pub type Result<T> = std::result::Result<T, SimulationError>;

/// Fails with [`SimulationError::ShapeMismatch`] unless `found == expected`.
pub fn ensure_len(expected: usize, found: usize) -> Result<()> {
    if expected == found {
        Ok(())
    } else {
        Err(SimulationError::ShapeMismatch { expected, found })
    }
}
