// High-level driver for the rover's servo-driven wheels and mast
//
// Combines the speed mapping and the PCA9685 protocol to provide the
// forward/backward/turn/stop API the block commands compile down to.

use tracing::{debug, info};

use super::mapping::{clamp_angle, clamp_speed, speed_to_angle};
use super::pca9685::{CHANNEL_COUNT, Pca9685};
use crate::transport::BusTransport;

/// Servo channel assignments on the rover's PWM controller.
#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Servo {
    Mast = 0,
    FrontLeft = 9,
    RearLeft = 11,
    RearRight = 13,
    FrontRight = 15,
}

impl Servo {
    /// The controller channel this servo is wired to.
    pub fn channel(self) -> u8 {
        self as u8
    }
}

/// Wheel servos on each side, front to rear.
pub const LEFT_WHEELS: [Servo; 2] = [Servo::FrontLeft, Servo::RearLeft];
pub const RIGHT_WHEELS: [Servo; 2] = [Servo::FrontRight, Servo::RearRight];

/// Pivot direction for skid-steer turns.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Left,
    Right,
}

/// High-level driver for the rover base.
///
/// Owns the controller handle, the current left/right drive speeds and the
/// per-channel calibration offsets. All commands are fire-and-forget: inputs
/// are saturated or dropped, never rejected.
pub struct RoverDriver<B: BusTransport> {
    pwm: Pca9685<B>,
    left_speed: i16,
    right_speed: i16,
    offsets: [f32; CHANNEL_COUNT],
}

impl<B: BusTransport> RoverDriver<B> {
    /// Create a driver over the given bus transport.
    pub fn new(bus: B) -> Self {
        info!("creating rover driver");
        Self {
            pwm: Pca9685::new(bus),
            left_speed: 0,
            right_speed: 0,
            offsets: [0.0; CHANNEL_COUNT],
        }
    }

    /// Set one motor's speed (-100 to +100).
    ///
    /// The single choke point every motion command passes through: clamps
    /// the speed, maps it to a servo angle, applies the channel's
    /// calibration offset and writes the channel.
    pub fn set_motor_speed(&mut self, servo: Servo, speed: i16) {
        let speed = clamp_speed(speed);
        let angle = speed_to_angle(speed) + self.offsets[servo.channel() as usize];
        self.pwm.write_channel(servo.channel() as i16, angle);
    }

    /// Drive straight at `speed` (0 to 100). Negative values reverse.
    pub fn forward(&mut self, speed: i16) {
        let speed = clamp_speed(speed);
        self.left_speed = speed;
        self.right_speed = speed;
        self.write_wheels();
    }

    /// Drive backwards at `speed` (0 to 100).
    pub fn backward(&mut self, speed: i16) {
        self.forward(-speed);
    }

    /// Skid-steer pivot: the two wheel sides run at opposing speeds.
    pub fn turn(&mut self, direction: Direction, speed: i16) {
        let speed = clamp_speed(speed);
        match direction {
            Direction::Left => {
                self.left_speed = -speed;
                self.right_speed = speed;
            }
            Direction::Right => {
                self.left_speed = speed;
                self.right_speed = -speed;
            }
        }
        self.write_wheels();
    }

    /// Stop all wheels.
    pub fn stop(&mut self) {
        self.left_speed = 0;
        self.right_speed = 0;
        self.write_wheels();
    }

    /// Position a servo at an absolute angle (0-180°), offset applied.
    ///
    /// Meant for the mast servo; harmless but pointless on the
    /// continuous-rotation wheel servos.
    pub fn set_servo_position(&mut self, servo: Servo, degrees: f32) {
        let angle = clamp_angle(degrees) + self.offsets[servo.channel() as usize];
        self.pwm.write_channel(servo.channel() as i16, angle);
    }

    /// Set a servo's calibration offset in degrees.
    pub fn set_servo_offset(&mut self, servo: Servo, degrees: f32) {
        debug!("servo {:?} offset set to {:.1}°", servo, degrees);
        self.offsets[servo.channel() as usize] = degrees;
    }

    /// A servo's current calibration offset in degrees.
    pub fn servo_offset(&self, servo: Servo) -> f32 {
        self.offsets[servo.channel() as usize]
    }

    /// Current (left, right) drive speeds.
    pub fn wheel_speeds(&self) -> (i16, i16) {
        (self.left_speed, self.right_speed)
    }

    // Each intent writes all four wheel channels independently; every write
    // runs its own clamp/map/offset sequence.
    fn write_wheels(&mut self) {
        debug!(
            "driving wheels: left={}, right={}",
            self.left_speed, self.right_speed
        );
        for servo in LEFT_WHEELS {
            self.set_motor_speed(servo, self.left_speed);
        }
        for servo in RIGHT_WHEELS {
            self.set_motor_speed(servo, self.right_speed);
        }
    }
}

impl<B: BusTransport> Drop for RoverDriver<B> {
    fn drop(&mut self) {
        // Stop the wheels when the driver goes away (safety measure).
        self.stop();
    }
}
