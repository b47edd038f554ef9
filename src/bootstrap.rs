//! Wiring of the host adapters into a runnable [`PollLoop`].
//!
//! ```text
//!  LinuxI2cBus ──▶ RegisterReader ──┐
//!                                   ├──▶ PollLoop ──▶ LogEventSink
//!  FifoChannel ◀── ReadingPublisher ┘
//! ```

use log::{debug, info};

use crate::adapters::fifo::{FifoChannel, FifoStatus, ensure_fifo};
use crate::adapters::linux_i2c::LinuxI2cBus;
use crate::adapters::time::{SystemClock, ThreadDelay};
use crate::app::poll::PollLoop;
use crate::app::publisher::ReadingPublisher;
use crate::config::CollectorConfig;
use crate::error::Result;
use crate::sensors::register::RegisterReader;

/// The poll loop as deployed on the gateway.
pub type HostPollLoop = PollLoop<LinuxI2cBus, ThreadDelay, FifoChannel, SystemClock, ThreadDelay>;

/// Validate `config`, make sure the output pipe exists and assemble the
/// loop.  The bus is not touched until the first poll.
pub fn build(config: &CollectorConfig) -> Result<HostPollLoop> {
    config.validate()?;

    match ensure_fifo(&config.pipe_path, config.pipe_mode)? {
        FifoStatus::Created => info!("Named pipe created at {}", config.pipe_path.display()),
        FifoStatus::Existing => debug!("Reusing named pipe at {}", config.pipe_path.display()),
    }

    let reader = RegisterReader::with_settle(
        LinuxI2cBus::new(&config.bus_path),
        ThreadDelay,
        config.settle_delay_us,
    );
    let channel =
        FifoChannel::new(&config.pipe_path).with_open_timeout(config.pipe_open_timeout());
    let publisher = ReadingPublisher::new(channel, SystemClock);

    let poll = PollLoop::new(
        reader,
        publisher,
        config.sensors.clone(),
        ThreadDelay,
        config.poll_settings(),
    )?;
    Ok(poll)
}
