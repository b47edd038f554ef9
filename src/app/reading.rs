//! Reading model and the JSON document published for it.

use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};

use crate::sensors::SensorAddress;
use crate::sensors::frame::{PIXEL_COUNT, ThermalFrame};

/// Format of the `date` field, local time.
pub const DATE_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// One decoded reading, stamped and attributed to a sensor.
#[derive(Debug, Clone, PartialEq)]
pub struct Reading {
    pub sensor_id: SensorAddress,
    pub label: String,
    pub timestamp: DateTime<Local>,
    pub reference_temp: f64,
    pub pixels: [f64; PIXEL_COUNT],
}

impl Reading {
    pub fn new(
        sensor_id: SensorAddress,
        label: &str,
        timestamp: DateTime<Local>,
        frame: &ThermalFrame,
    ) -> Self {
        Self {
            sensor_id,
            label: label.to_owned(),
            timestamp,
            reference_temp: frame.reference_c,
            pixels: frame.pixels,
        }
    }
}

/// Wire document consumed by the forwarder process.
///
/// The PTAT reference is deliberately absent: consumers have only ever
/// received the pixel array.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReadingDocument {
    pub sensor_id: String,
    pub date: String,
    pub temperature: Vec<f64>,
}

impl From<&Reading> for ReadingDocument {
    fn from(r: &Reading) -> Self {
        Self {
            sensor_id: r.label.clone(),
            date: r.timestamp.format(DATE_FORMAT).to_string(),
            temperature: r.pixels.to_vec(),
        }
    }
}
