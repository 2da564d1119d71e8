pub mod state;
pub mod system;

pub use state::State;
pub use system::ParticleSystem;
