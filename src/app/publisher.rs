//! Reading publisher.
//!
//! Stamps a decoded frame, turns it into a [`ReadingDocument`] and hands
//! the newline-terminated JSON to the [`ChannelPort`].  Delivery problems
//! never escape: they are logged and the reading is dropped, and the
//! caller learns about it only through the returned [`PublishOutcome`].

use log::{debug, warn};

use super::ports::{ChannelPort, Clock};
use super::reading::{Reading, ReadingDocument};
use crate::error::ChannelError;
use crate::sensors::SensorDescriptor;
use crate::sensors::frame::ThermalFrame;

/// Result of one publish attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[must_use]
pub enum PublishOutcome {
    /// The document reached the channel.
    Sent { bytes: usize },
    /// The document was discarded.
    Dropped(ChannelError),
}

impl PublishOutcome {
    pub fn is_sent(&self) -> bool {
        matches!(self, Self::Sent { .. })
    }
}

pub struct ReadingPublisher<C, K> {
    channel: C,
    clock: K,
}

impl<C: ChannelPort, K: Clock> ReadingPublisher<C, K> {
    pub fn new(channel: C, clock: K) -> Self {
        Self { channel, clock }
    }

    /// Publish one decoded frame for `sensor`.
    pub fn publish(&mut self, sensor: &SensorDescriptor, frame: &ThermalFrame) -> PublishOutcome {
        let reading = Reading::new(sensor.address, sensor.label(), self.clock.now(), frame);
        debug!(
            "{}: PTAT {:.1}\u{00b0}C (not published)",
            reading.label, reading.reference_temp
        );

        let payload = match encode(&reading) {
            Ok(p) => p,
            Err(e) => {
                warn!("{}: {}", reading.label, e);
                return PublishOutcome::Dropped(e);
            }
        };

        match self.channel.send(&payload) {
            Ok(()) => PublishOutcome::Sent {
                bytes: payload.len(),
            },
            Err(e) => {
                warn!("{}: reading dropped, {}", reading.label, e);
                PublishOutcome::Dropped(e)
            }
        }
    }

    pub fn channel(&self) -> &C {
        &self.channel
    }
}

/// Serialise `reading` as one `\n`-terminated JSON document.
pub fn encode(reading: &Reading) -> Result<Vec<u8>, ChannelError> {
    let mut payload = serde_json::to_vec(&ReadingDocument::from(reading))
        .map_err(|_| ChannelError::Serialize)?;
    payload.push(b'\n');
    Ok(payload)
}
