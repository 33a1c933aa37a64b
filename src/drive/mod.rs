// Drive module for the rover's servo-driven wheels
//
// Provides:
// - Speed/angle mapping (block-level speed commands -> servo pulse ticks)
// - PCA9685 register-level controller protocol
// - High-level skid-steer driver API

mod driver;
pub mod mapping;
pub mod pca9685;

pub use driver::{Direction, LEFT_WHEELS, RIGHT_WHEELS, RoverDriver, Servo};
pub use pca9685::Pca9685;
