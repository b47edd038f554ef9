//! Sensor subsystem: bus addressing, the register read protocol and the
//! thermopile frame decoder.

pub mod frame;
pub mod register;

use core::fmt::{self, Write as _};

use serde::{Deserialize, Serialize};

const LABEL_PREFIX: &str = "sensor_";

/// Longest label a sensor can carry: the numbered prefix plus the digits of
/// `usize::MAX`.
pub const LABEL_CAPACITY: usize = LABEL_PREFIX.len() + 20;

/// A 7-bit I2C slave address.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SensorAddress(u16);

impl SensorAddress {
    /// Highest valid 7-bit address.
    pub const MAX: u16 = 0x7F;

    pub const fn new(raw: u16) -> Self {
        Self(raw)
    }

    pub const fn raw(self) -> u16 {
        self.0
    }

    pub const fn is_valid(self) -> bool {
        self.0 <= Self::MAX
    }
}

impl fmt::Display for SensorAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{:02X}", self.0)
    }
}

/// One configured sensor: where it lives on the bus and what it is called
/// in published documents.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SensorDescriptor {
    pub address: SensorAddress,
    pub label: heapless::String<LABEL_CAPACITY>,
}

impl SensorDescriptor {
    /// Descriptor labelled `sensor_<ordinal>` (ordinals start at 1).
    pub fn numbered(ordinal: usize, address: SensorAddress) -> Self {
        let mut label = heapless::String::new();
        // Cannot overflow: LABEL_CAPACITY fits every usize ordinal.
        let _ = write!(label, "{LABEL_PREFIX}{ordinal}");
        Self { address, label }
    }

    pub fn label(&self) -> &str {
        &self.label
    }
}
