//! Collector configuration.
//!
//! Compiled-in defaults for the two-sensor deployment.  There is no
//! command-line or environment override; the struct is serde-enabled so
//! the effective configuration can be logged at startup.

use std::path::PathBuf;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::adapters::fifo::DEFAULT_FIFO_MODE;
use crate::app::poll::{DEFAULT_SENSOR_INTERVAL_MS, PollSettings};
use crate::error::ConfigError;
use crate::sensors::frame::FRAME_REGISTER;
use crate::sensors::register::DEFAULT_SETTLE_US;
use crate::sensors::{SensorAddress, SensorDescriptor};

/// I2C bus the sensors hang off.
pub const DEFAULT_BUS_PATH: &str = "/dev/i2c-0";

/// Where the consumer expects the pipe.
pub const DEFAULT_PIPE_PATH: &str = "/tmp/sensor_data_pipe";

/// Factory addresses of the two D6T units.
pub const DEFAULT_SENSOR_ADDRESSES: [u16; 2] = [0x0A, 0x0B];

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CollectorConfig {
    // --- Bus ---
    /// I2C character device.
    pub bus_path: PathBuf,
    /// Sensors in poll order.
    pub sensors: Vec<SensorDescriptor>,
    /// Register that returns a frame.
    pub frame_register: u8,
    /// Delay between command write and frame read (microseconds).
    pub settle_delay_us: u32,

    // --- Timing ---
    /// Pause after each sensor attempt (milliseconds).
    pub sensor_interval_ms: u32,

    // --- Output ---
    /// Named pipe the documents are written to.
    pub pipe_path: PathBuf,
    /// Permission bits for a newly created pipe.
    pub pipe_mode: u32,
    /// Upper bound on waiting for a reader (milliseconds); `None` waits forever.
    pub pipe_open_timeout_ms: Option<u64>,

    // --- Logging ---
    pub log_level: log::LevelFilter,
}

impl Default for CollectorConfig {
    fn default() -> Self {
        Self {
            bus_path: PathBuf::from(DEFAULT_BUS_PATH),
            sensors: DEFAULT_SENSOR_ADDRESSES
                .iter()
                .enumerate()
                .map(|(i, &addr)| SensorDescriptor::numbered(i + 1, SensorAddress::new(addr)))
                .collect(),
            frame_register: FRAME_REGISTER,
            settle_delay_us: DEFAULT_SETTLE_US,
            sensor_interval_ms: DEFAULT_SENSOR_INTERVAL_MS,
            pipe_path: PathBuf::from(DEFAULT_PIPE_PATH),
            pipe_mode: DEFAULT_FIFO_MODE,
            pipe_open_timeout_ms: None,
            log_level: log::LevelFilter::Info,
        }
    }
}

impl CollectorConfig {
    /// Reject configurations the poll loop cannot run with.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.sensors.is_empty() {
            return Err(ConfigError::ValidationFailed("sensor list is empty"));
        }
        if self.sensors.iter().any(|s| !s.address.is_valid()) {
            return Err(ConfigError::ValidationFailed(
                "sensor address exceeds 7 bits",
            ));
        }
        for (i, a) in self.sensors.iter().enumerate() {
            if self.sensors[i + 1..].iter().any(|b| b.address == a.address) {
                return Err(ConfigError::ValidationFailed("duplicate sensor address"));
            }
            if a.label.is_empty() {
                return Err(ConfigError::ValidationFailed("sensor label is empty"));
            }
        }
        if self.sensor_interval_ms == 0 {
            return Err(ConfigError::ValidationFailed(
                "sensor_interval_ms must be positive",
            ));
        }
        if self.pipe_mode > 0o777 {
            return Err(ConfigError::ValidationFailed(
                "pipe_mode must be permission bits only",
            ));
        }
        Ok(())
    }

    pub fn poll_settings(&self) -> PollSettings {
        PollSettings {
            register: self.frame_register,
            sensor_interval_ms: self.sensor_interval_ms,
        }
    }

    pub fn pipe_open_timeout(&self) -> Option<Duration> {
        self.pipe_open_timeout_ms.map(Duration::from_millis)
    }
}
