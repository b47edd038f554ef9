//! Poll loop: read → decode → publish, one sensor at a time, forever.
//!
//! ```text
//!        ┌──────┐  start   ┌───────────────────┐
//!        │ Idle │ ───────▶ │ Polling(index)    │ ──┐
//!        └──────┘          └───────────────────┘   │ attempt + pause,
//!                                    ▲             │ index = (index+1) % N
//!                                    └─────────────┘
//! ```
//!
//! Every attempt, successful or not, is followed by the same fixed pause.
//! A failed read is reported and skipped; nothing is retried.  Buffers are
//! created per attempt, so a failing sensor can never publish a previous
//! sensor's data.

use embedded_hal::delay::DelayNs;

use super::events::AppEvent;
use super::ports::{ChannelPort, Clock, EventSink, I2cBus};
use super::publisher::{PublishOutcome, ReadingPublisher};
use crate::error::{ChannelError, ConfigError, ReadError};
use crate::sensors::SensorDescriptor;
use crate::sensors::frame::{self, FRAME_REGISTER};
use crate::sensors::register::RegisterReader;

/// Default pause after each sensor attempt.
pub const DEFAULT_SENSOR_INTERVAL_MS: u32 = 300;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PollState {
    Idle,
    /// Index of the sensor the next attempt will read.
    Polling(usize),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PollSettings {
    pub register: u8,
    pub sensor_interval_ms: u32,
}

impl Default for PollSettings {
    fn default() -> Self {
        Self {
            register: FRAME_REGISTER,
            sensor_interval_ms: DEFAULT_SENSOR_INTERVAL_MS,
        }
    }
}

/// What happened to one sensor attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Attempt {
    Published,
    Dropped(ChannelError),
    ReadFailed(ReadError),
}

/// Tally of one pass over the sensor list.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct CycleSummary {
    pub published: usize,
    pub dropped: usize,
    pub failed: usize,
}

pub struct PollLoop<B, D, C, K, W> {
    reader: RegisterReader<B, D>,
    publisher: ReadingPublisher<C, K>,
    sensors: Vec<SensorDescriptor>,
    pacing: W,
    settings: PollSettings,
    state: PollState,
}

impl<B, D, C, K, W> PollLoop<B, D, C, K, W>
where
    B: I2cBus,
    D: DelayNs,
    C: ChannelPort,
    K: Clock,
    W: DelayNs,
{
    pub fn new(
        reader: RegisterReader<B, D>,
        publisher: ReadingPublisher<C, K>,
        sensors: Vec<SensorDescriptor>,
        pacing: W,
        settings: PollSettings,
    ) -> Result<Self, ConfigError> {
        if sensors.is_empty() {
            return Err(ConfigError::ValidationFailed("sensor list is empty"));
        }
        Ok(Self {
            reader,
            publisher,
            sensors,
            pacing,
            settings,
            state: PollState::Idle,
        })
    }

    pub fn state(&self) -> PollState {
        self.state
    }

    pub fn sensors(&self) -> &[SensorDescriptor] {
        &self.sensors
    }

    /// Poll forever.
    pub fn run(&mut self, sink: &mut impl EventSink) -> ! {
        loop {
            let _ = self.poll_once(sink);
        }
    }

    /// One pass over every sensor, starting from the current position.
    pub fn run_cycle(&mut self, sink: &mut impl EventSink) -> CycleSummary {
        let mut summary = CycleSummary::default();
        for _ in 0..self.sensors.len() {
            match self.poll_once(sink) {
                Attempt::Published => summary.published += 1,
                Attempt::Dropped(_) => summary.dropped += 1,
                Attempt::ReadFailed(_) => summary.failed += 1,
            }
        }
        summary
    }

    /// Attempt the next sensor, pause, and advance.
    pub fn poll_once(&mut self, sink: &mut impl EventSink) -> Attempt {
        let index = match self.state {
            PollState::Idle => {
                sink.emit(&AppEvent::Started {
                    sensor_count: self.sensors.len(),
                });
                0
            }
            PollState::Polling(i) => i,
        };
        self.state = PollState::Polling(index);

        let attempt = self.attempt(index, sink);

        self.pacing.delay_ms(self.settings.sensor_interval_ms);
        self.state = PollState::Polling((index + 1) % self.sensors.len());
        attempt
    }

    fn attempt(&mut self, index: usize, sink: &mut impl EventSink) -> Attempt {
        let sensor = &self.sensors[index];
        let ordinal = index + 1;

        let raw = match self
            .reader
            .read_frame_from(sensor.address, self.settings.register)
        {
            Ok(raw) => raw,
            Err(error) => {
                sink.emit(&AppEvent::ReadFailed {
                    ordinal,
                    address: sensor.address,
                    error,
                });
                return Attempt::ReadFailed(error);
            }
        };

        let thermal = frame::decode(&raw);
        match self.publisher.publish(sensor, &thermal) {
            PublishOutcome::Sent { .. } => {
                sink.emit(&AppEvent::Published {
                    ordinal,
                    label: sensor.label().to_owned(),
                });
                Attempt::Published
            }
            PublishOutcome::Dropped(reason) => {
                sink.emit(&AppEvent::Dropped {
                    ordinal,
                    label: sensor.label().to_owned(),
                    reason,
                });
                Attempt::Dropped(reason)
            }
        }
    }

    pub fn reader(&self) -> &RegisterReader<B, D> {
        &self.reader
    }

    pub fn publisher(&self) -> &ReadingPublisher<C, K> {
        &self.publisher
    }

    pub fn pacing(&self) -> &W {
        &self.pacing
    }
}
