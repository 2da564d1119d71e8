pub mod drag;
pub mod dynamics;
pub mod energy;
pub mod gravity;
pub mod spring;

pub use dynamics::{ForceParams, SpringNetwork, SweepMotion};
pub use spring::Spring;
