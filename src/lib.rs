pub mod config;
pub mod constants;
pub mod errors;
pub mod integrators;
pub mod models;
pub mod physics;
pub mod simulation;
pub mod systems;

pub use errors::{Result, SimulationError};
pub use integrators::{IntegratorKind, TimeStepper};
pub use models::{ParticleSystem, State};
pub use simulation::Simulation;
