//! Log-based event sink adapter.
//!
//! Implements [`EventSink`] by writing each poll event to the `log` facade
//! (stderr via `env_logger` in production).

use log::{info, warn};

use crate::app::events::AppEvent;
use crate::app::ports::EventSink;

/// Adapter that logs every [`AppEvent`].
#[derive(Debug, Default)]
pub struct LogEventSink;

impl LogEventSink {
    pub fn new() -> Self {
        Self
    }
}

impl EventSink for LogEventSink {
    fn emit(&mut self, event: &AppEvent) {
        match event {
            AppEvent::Started { sensor_count } => {
                info!("START | monitoring {} sensors", sensor_count);
            }
            AppEvent::ReadFailed {
                ordinal,
                address,
                error,
            } => {
                warn!(
                    "READ  | sensor {} ({}) failed at {} (error code: {}): {}",
                    ordinal,
                    address,
                    error.stage(),
                    error.code(),
                    error
                );
            }
            AppEvent::Published { label, .. } => {
                info!("PUBLISH | data sent from {}", label);
            }
            AppEvent::Dropped { label, reason, .. } => {
                warn!("DROP  | {} reading dropped: {}", label, reason);
            }
        }
    }
}
