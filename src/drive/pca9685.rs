// PCA9685 16-channel PWM controller protocol
//
// The controller sits at a fixed I2C address and exposes one four-register
// block per channel starting at 0x06. A servo update is two single-register
// writes: the low then high byte of the 12-bit pulse tick count.

use tracing::{debug, warn};

use super::mapping::angle_to_ticks;
use crate::config::PCA9685_ADDRESS;
use crate::transport::BusTransport;

/// Number of PWM channels on the controller.
pub const CHANNEL_COUNT: usize = 16;

/// First register of channel 0's block; channel n's block starts at
/// `CHANNEL_REG_BASE + n * CHANNEL_REG_STRIDE`.
pub const CHANNEL_REG_BASE: u8 = 0x06;
const CHANNEL_REG_STRIDE: u8 = 4;

/// Mode value that takes the controller out of sleep into normal operation.
const MODE_NORMAL: u8 = 0x01;

/// Register-level handle for the servo controller.
///
/// Owns the bus transport and the one-shot initialization flag. All bus
/// failures are logged and swallowed; callers never see an error.
pub struct Pca9685<B: BusTransport> {
    bus: B,
    address: u8,
    initialized: bool,
}

impl<B: BusTransport> Pca9685<B> {
    /// Create a handle at the rover's default controller address (0x40).
    pub fn new(bus: B) -> Self {
        Self::with_address(bus, PCA9685_ADDRESS)
    }

    /// Create a handle at a custom controller address.
    pub fn with_address(bus: B, address: u8) -> Self {
        Self {
            bus,
            address,
            initialized: false,
        }
    }

    /// Write a servo angle to a channel.
    ///
    /// Channels outside 0-15 are dropped without any bus traffic. The angle
    /// is clamped to 0-180° and mapped to the pulse tick range before the
    /// two-byte register write.
    pub fn write_channel(&mut self, channel: i16, angle_degrees: f32) {
        if !(0..CHANNEL_COUNT as i16).contains(&channel) {
            debug!("channel {} outside 0-15, dropping write", channel);
            return;
        }

        self.ensure_initialized();

        let ticks = angle_to_ticks(angle_degrees);
        let register = CHANNEL_REG_BASE + channel as u8 * CHANNEL_REG_STRIDE;
        debug!(
            "channel {} <- {:.1}° ({} ticks), registers 0x{:02X}/0x{:02X}",
            channel,
            angle_degrees,
            ticks,
            register,
            register + 1
        );

        self.write_register(register, (ticks & 0xFF) as u8);
        self.write_register(register + 1, (ticks >> 8) as u8);
    }

    /// Put the controller into normal operating mode. Runs at most once per
    /// handle, before the first channel write.
    fn ensure_initialized(&mut self) {
        if self.initialized {
            return;
        }
        self.initialized = true;

        debug!("initializing PWM controller at 0x{:02X}", self.address);
        self.send_byte(0x00);
        self.send_byte(0x00);
        self.send_byte(MODE_NORMAL);
    }

    fn send_byte(&mut self, value: u8) {
        if let Err(e) = self.bus.write_byte(self.address, value) {
            warn!("controller byte write failed: {}", e);
        }
    }

    fn write_register(&mut self, register: u8, value: u8) {
        if let Err(e) = self.bus.write_buffer(self.address, &[register, value]) {
            warn!("register 0x{:02X} write failed: {}", register, e);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::transport::mock::MockBus;

    #[test]
    fn test_init_runs_once_before_first_write() {
        let bus = MockBus::new();
        let log = bus.clone();
        let mut pwm = Pca9685::new(bus);

        pwm.write_channel(0, 90.0);
        let writes = log.writes();
        // Three init bytes, then the two-byte channel update.
        assert_eq!(writes.len(), 5);
        assert_eq!(writes[0], (0x40, vec![0x00]));
        assert_eq!(writes[1], (0x40, vec![0x00]));
        assert_eq!(writes[2], (0x40, vec![0x01]));

        pwm.write_channel(0, 90.0);
        // Second call adds only the channel update.
        assert_eq!(log.write_count(), 7);
    }

    #[test]
    fn test_out_of_range_channel_produces_no_traffic() {
        let bus = MockBus::new();
        let log = bus.clone();
        let mut pwm = Pca9685::new(bus);

        pwm.write_channel(16, 90.0);
        pwm.write_channel(-1, 90.0);
        assert_eq!(log.write_count(), 0);

        // Init must still happen once a valid channel comes along.
        pwm.write_channel(0, 90.0);
        assert_eq!(log.write_count(), 5);
    }

    #[test]
    fn test_channel_register_arithmetic() {
        let bus = MockBus::new();
        let log = bus.clone();
        let mut pwm = Pca9685::new(bus);

        // 90° maps to 307 ticks = 0x133.
        pwm.write_channel(9, 90.0);
        let writes = log.writes();
        assert_eq!(writes[3], (0x40, vec![0x2A, 0x33])); // 0x06 + 9*4 = 0x2A
        assert_eq!(writes[4], (0x40, vec![0x2B, 0x01]));
    }

    #[test]
    fn test_angle_extremes_hit_pulse_bounds() {
        let bus = MockBus::new();
        let log = bus.clone();
        let mut pwm = Pca9685::new(bus);

        pwm.write_channel(3, 0.0);
        pwm.write_channel(3, 180.0);
        let writes = log.writes();
        // 0° -> 102 = 0x066, 180° -> 512 = 0x200, registers 0x12/0x13.
        assert_eq!(writes[3], (0x40, vec![0x12, 0x66]));
        assert_eq!(writes[4], (0x40, vec![0x13, 0x00]));
        assert_eq!(writes[5], (0x40, vec![0x12, 0x00]));
        assert_eq!(writes[6], (0x40, vec![0x13, 0x02]));
    }

    #[test]
    fn test_custom_address() {
        let bus = MockBus::new();
        let log = bus.clone();
        let mut pwm = Pca9685::with_address(bus, 0x41);

        pwm.write_channel(0, 0.0);
        for (device, _) in log.writes() {
            assert_eq!(device, 0x41);
        }
    }
}
