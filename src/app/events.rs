//! Outbound application events.
//!
//! The [`PollLoop`](super::poll::PollLoop) emits these through the
//! [`EventSink`](super::ports::EventSink) port.  Adapters on the other
//! side decide what to do with them (log, count, assert on in tests).

use crate::error::{ChannelError, ReadError};
use crate::sensors::SensorAddress;

/// Structured events emitted by the poll loop.
#[derive(Debug, Clone, PartialEq)]
pub enum AppEvent {
    /// The loop is about to start polling.
    Started { sensor_count: usize },

    /// A register read failed; the sensor is skipped this cycle.
    ReadFailed {
        ordinal: usize,
        address: SensorAddress,
        error: ReadError,
    },

    /// A reading was delivered to the channel.
    Published { ordinal: usize, label: String },

    /// A reading was decoded but could not be delivered.
    Dropped {
        ordinal: usize,
        label: String,
        reason: ChannelError,
    },
}
