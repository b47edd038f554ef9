//! Linux `i2c-dev` bus adapter.
//!
//! Implements [`I2cBus`] on top of a character device such as
//! `/dev/i2c-0`.  Each [`I2cBus::open`] opens the device node afresh and the
//! returned [`LinuxI2cHandle`] closes it when dropped, so no descriptor
//! survives past a single register read.

use std::fs::{File, OpenOptions};
use std::io::{Read, Write};
use std::os::fd::AsRawFd;
use std::path::PathBuf;

#[allow(unused_imports)]
use nix::{convert_ioctl_res, ioctl_write_int_bad};

use crate::app::ports::{BusHandle, I2cBus};
use crate::error::IoFault;
use crate::sensors::SensorAddress;

/// `ioctl` request that sets the slave address for subsequent transfers
/// (`linux/i2c-dev.h`).
const I2C_SLAVE: u16 = 0x0703;

// Takes the 7-bit address by value, not through a pointer.
ioctl_write_int_bad!(i2c_set_slave_address, I2C_SLAVE);

pub struct LinuxI2cBus {
    path: PathBuf,
}

impl LinuxI2cBus {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl I2cBus for LinuxI2cBus {
    type Handle<'a> = LinuxI2cHandle;

    fn open(&mut self) -> Result<Self::Handle<'_>, IoFault> {
        let file = OpenOptions::new()
            .read(true)
            .write(true)
            .open(&self.path)?;
        Ok(LinuxI2cHandle { file })
    }
}

/// An open `i2c-dev` descriptor.  Closed on drop.
pub struct LinuxI2cHandle {
    file: File,
}

impl BusHandle for LinuxI2cHandle {
    fn select(&mut self, address: SensorAddress) -> Result<(), IoFault> {
        // SAFETY: the descriptor is owned by `self.file` and stays open for
        // the duration of the call.
        unsafe { i2c_set_slave_address(self.file.as_raw_fd(), i32::from(address.raw())) }?;
        Ok(())
    }

    fn write(&mut self, bytes: &[u8]) -> Result<usize, IoFault> {
        Ok(self.file.write(bytes)?)
    }

    fn read(&mut self, buf: &mut [u8]) -> Result<usize, IoFault> {
        Ok(self.file.read(buf)?)
    }
}
