pub mod forward_euler;
pub mod rk4;
pub mod rkf45;
pub mod stepper;
pub mod trapezoidal;

pub use forward_euler::ForwardEuler;
pub use rk4::RK4;
pub use rkf45::{Rkf45, StepController};
pub use stepper::{IntegratorKind, TimeStepper};
pub use trapezoidal::Trapezoidal;
