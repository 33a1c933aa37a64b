// M.A.R.S. rover driver
//
// Maps rover-level motion and lighting commands onto direct I2C register
// writes for the PCA9685 servo controller and the addressable LED strip.
//
// Provides:
// - Skid-steer motion control (forward/backward/turn/stop) over four
//   continuous-rotation wheel servos plus a mast servo
// - PCA9685 channel protocol with one-shot controller initialization
// - LED strip facade with immediate or batched updates
//
// Everything is synchronous and fire-and-forget: inputs are saturated or
// dropped rather than rejected, and bus failures are logged, not returned.

pub mod config;
pub mod drive;
pub mod led;
pub mod transport;

pub use drive::{Direction, RoverDriver, Servo};
pub use led::{LedController, LedStrip, UpdateMode};
pub use transport::{BusError, BusTransport, I2cTransport};
