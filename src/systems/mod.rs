pub mod cloth;
pub mod pendulum;
pub mod simple;

pub use cloth::ClothSystem;
pub use pendulum::PendulumSystem;
pub use simple::SimpleSystem;
