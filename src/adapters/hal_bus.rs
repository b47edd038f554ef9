//! `embedded-hal` bus adapter.
//!
//! Lets the register reader drive any [`embedded_hal::i2c::I2c`]
//! implementation (a `linux-embedded-hal` device, an MCU peripheral, a test
//! double).  The HAL already owns the peripheral, so "open" only starts a
//! scoped transaction; the command write and the data read are issued as
//! two separate transfers, which is what the sensor expects.

use embedded_hal::i2c::{Error as _, ErrorKind, I2c, NoAcknowledgeSource};

use crate::app::ports::{BusHandle, I2cBus};
use crate::error::IoFault;
use crate::sensors::SensorAddress;

pub struct HalBus<I> {
    i2c: I,
}

impl<I: I2c> HalBus<I> {
    pub fn new(i2c: I) -> Self {
        Self { i2c }
    }

    pub fn release(self) -> I {
        self.i2c
    }
}

impl<I: I2c> I2cBus for HalBus<I> {
    type Handle<'a>
        = HalHandle<'a, I>
    where
        Self: 'a;

    fn open(&mut self) -> Result<Self::Handle<'_>, IoFault> {
        Ok(HalHandle {
            i2c: &mut self.i2c,
            address: None,
        })
    }
}

pub struct HalHandle<'a, I> {
    i2c: &'a mut I,
    address: Option<u8>,
}

impl<I: I2c> HalHandle<'_, I> {
    fn target(&self) -> Result<u8, IoFault> {
        self.address.ok_or(IoFault::Hal(ErrorKind::NoAcknowledge(
            NoAcknowledgeSource::Address,
        )))
    }
}

impl<I: I2c> BusHandle for HalHandle<'_, I> {
    fn select(&mut self, address: SensorAddress) -> Result<(), IoFault> {
        if !address.is_valid() {
            return Err(IoFault::Hal(ErrorKind::Other));
        }
        self.address = Some(address.raw() as u8);
        Ok(())
    }

    fn write(&mut self, bytes: &[u8]) -> Result<usize, IoFault> {
        let addr = self.target()?;
        self.i2c
            .write(addr, bytes)
            .map_err(|e| IoFault::Hal(e.kind()))?;
        Ok(bytes.len())
    }

    fn read(&mut self, buf: &mut [u8]) -> Result<usize, IoFault> {
        let addr = self.target()?;
        self.i2c
            .read(addr, buf)
            .map_err(|e| IoFault::Hal(e.kind()))?;
        Ok(buf.len())
    }
}
