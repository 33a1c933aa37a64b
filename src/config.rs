// Bus addresses and host defaults for the M.A.R.S. rover mainboard

/// I2C address of the PCA9685 servo controller.
pub const PCA9685_ADDRESS: u8 = 0x40;

/// I2C address of the on-board EEPROM.
///
/// Reserved for servo calibration storage. No operation in this crate
/// addresses it; it is documented here so the bus layout stays auditable.
pub const EEPROM_ADDRESS: u8 = 0x50;

/// Default Linux I2C character device the rover board is attached to.
pub const DEFAULT_I2C_DEVICE: &str = "/dev/i2c-1";
