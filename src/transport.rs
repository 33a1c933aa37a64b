// Byte-oriented I2C transport abstraction
//
// The rover mainboard hangs two devices off one I2C bus: the PCA9685 servo
// controller and a (currently unused) calibration EEPROM. Everything above
// this module talks in terms of device address + bytes; everything below is
// whatever embedded-hal implementation the host provides.

use thiserror::Error;

/// Error types for bus communication
#[derive(Debug, Error)]
pub enum BusError {
    #[error("i2c write failed: {0:?}")]
    Write(embedded_hal::i2c::ErrorKind),

    #[error("i2c device unavailable: {0}")]
    Device(String),
}

pub type Result<T> = std::result::Result<T, BusError>;

/// Byte-level write access to devices on the rover's I2C bus.
///
/// Implement this for your platform's I2C peripheral, or wrap any
/// `embedded-hal` bus with [`I2cTransport`].
pub trait BusTransport {
    /// Write a single byte to a device, with no register addressing.
    fn write_byte(&mut self, device: u8, value: u8) -> Result<()>;

    /// Write a buffer of bytes to a device in one bus transaction.
    fn write_buffer(&mut self, device: u8, bytes: &[u8]) -> Result<()>;
}

/// [`BusTransport`] backed by any `embedded-hal` I2C implementation.
pub struct I2cTransport<I2C> {
    i2c: I2C,
}

impl<I2C> I2cTransport<I2C> {
    pub fn new(i2c: I2C) -> Self {
        Self { i2c }
    }
}

impl<I2C: embedded_hal::i2c::I2c> BusTransport for I2cTransport<I2C> {
    fn write_byte(&mut self, device: u8, value: u8) -> Result<()> {
        self.write_buffer(device, &[value])
    }

    fn write_buffer(&mut self, device: u8, bytes: &[u8]) -> Result<()> {
        use embedded_hal::i2c::Error;

        self.i2c
            .write(device, bytes)
            .map_err(|e| BusError::Write(e.kind()))
    }
}

/// Open a Linux I2C character device (e.g. `/dev/i2c-1`) as a transport.
#[cfg(feature = "linux")]
pub fn open_i2c(path: &str) -> Result<I2cTransport<linux_embedded_hal::I2cdev>> {
    let dev = linux_embedded_hal::I2cdev::new(path).map_err(|e| BusError::Device(e.to_string()))?;
    Ok(I2cTransport::new(dev))
}

#[cfg(test)]
pub(crate) mod mock {
    use std::cell::RefCell;
    use std::rc::Rc;

    use super::{BusTransport, Result};

    /// Records every bus write so tests can assert on the exact traffic.
    /// Clones share the log.
    #[derive(Clone, Default)]
    pub struct MockBus {
        writes: Rc<RefCell<Vec<(u8, Vec<u8>)>>>,
    }

    impl MockBus {
        pub fn new() -> Self {
            Self::default()
        }

        /// All writes so far, in order: (device address, bytes).
        pub fn writes(&self) -> Vec<(u8, Vec<u8>)> {
            self.writes.borrow().clone()
        }

        pub fn write_count(&self) -> usize {
            self.writes.borrow().len()
        }

        pub fn clear(&self) {
            self.writes.borrow_mut().clear();
        }
    }

    impl BusTransport for MockBus {
        fn write_byte(&mut self, device: u8, value: u8) -> Result<()> {
            self.writes.borrow_mut().push((device, vec![value]));
            Ok(())
        }

        fn write_buffer(&mut self, device: u8, bytes: &[u8]) -> Result<()> {
            self.writes.borrow_mut().push((device, bytes.to_vec()));
            Ok(())
        }
    }
}
