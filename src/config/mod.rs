pub mod cloth;
pub mod pendulum;

pub use cloth::{ClothConfig, SpringParams};
pub use pendulum::PendulumConfig;
