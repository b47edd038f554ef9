//! Register read protocol.
//!
//! One call is one complete bus transaction:
//!
//! 1. open the bus device
//! 2. select the slave address
//! 3. write the one-byte register address
//! 4. wait for the device to prepare the data (settle delay)
//! 5. read exactly `length` bytes
//!
//! Each step maps to its own [`ReadError`] variant.  The bus handle is a
//! scope guard, so the device is closed on every return path.  No retries
//! happen here; the caller decides what a failure means.

use embedded_hal::delay::DelayNs;
use log::debug;

use crate::app::ports::{BusHandle, I2cBus};
use crate::error::{IoFault, ReadError};
use crate::sensors::SensorAddress;
use crate::sensors::frame::{FRAME_LEN, FRAME_REGISTER, RawFrame};

/// Default delay between the command write and the data read.
pub const DEFAULT_SETTLE_US: u32 = 1_000;

pub struct RegisterReader<B, D> {
    bus: B,
    delay: D,
    settle_us: u32,
}

impl<B: I2cBus, D: DelayNs> RegisterReader<B, D> {
    pub fn new(bus: B, delay: D) -> Self {
        Self::with_settle(bus, delay, DEFAULT_SETTLE_US)
    }

    pub fn with_settle(bus: B, delay: D, settle_us: u32) -> Self {
        Self {
            bus,
            delay,
            settle_us,
        }
    }

    /// Read `length` bytes from `register` on the device at `address`.
    ///
    /// Returns the bytes only when exactly `length` arrived.
    pub fn read(
        &mut self,
        address: SensorAddress,
        register: u8,
        length: usize,
    ) -> Result<Vec<u8>, ReadError> {
        let mut buf = vec![0u8; length];
        self.read_into(address, register, &mut buf)?;
        Ok(buf)
    }

    /// Read one full thermopile frame.
    pub fn read_frame(&mut self, address: SensorAddress) -> Result<RawFrame, ReadError> {
        self.read_frame_from(address, FRAME_REGISTER)
    }

    /// Read one full frame from an explicit register.
    pub fn read_frame_from(
        &mut self,
        address: SensorAddress,
        register: u8,
    ) -> Result<RawFrame, ReadError> {
        let mut buf = [0u8; FRAME_LEN];
        self.read_into(address, register, &mut buf)?;
        Ok(RawFrame::new(buf))
    }

    fn read_into(
        &mut self,
        address: SensorAddress,
        register: u8,
        buf: &mut [u8],
    ) -> Result<(), ReadError> {
        let mut handle = self.bus.open().map_err(ReadError::DeviceOpen)?;

        handle.select(address).map_err(ReadError::DeviceSelect)?;

        match handle.write(&[register]) {
            Ok(1) => {}
            Ok(n) => {
                return Err(ReadError::CommandWrite(IoFault::Incomplete {
                    expected: 1,
                    transferred: n,
                }));
            }
            Err(e) => return Err(ReadError::CommandWrite(e)),
        }

        self.delay.delay_us(self.settle_us);

        let got = handle.read(buf).map_err(ReadError::FrameRead)?;
        if got != buf.len() {
            return Err(ReadError::ShortRead {
                expected: buf.len(),
                got,
            });
        }

        debug!("i2c {address}: read {got} bytes from reg 0x{register:02X}");
        Ok(())
    }

    /// Borrow the underlying bus (test inspection).
    pub fn bus(&self) -> &B {
        &self.bus
    }
}
