pub const STANDARD_GRAVITY: f64 = 9.81; // m/s²

// Driver defaults
pub const DEFAULT_STEP_SIZE: f64 = 0.04; // s
pub const DEFAULT_STEPS: usize = 500;

// RKF45 step-size control
pub const DEFAULT_RKF45_TOLERANCE: f64 = 1e-4;
pub const RKF45_ERROR_FLOOR: f64 = 1e-12; // below this the step is accepted unchanged

// Cloth anchor sweep
pub const SWEEP_NEAR_Z: f64 = 0.0;
pub const SWEEP_FAR_Z: f64 = -5.0;
pub const SWEEP_SPEED: f64 = 1.0;
