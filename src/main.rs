//! Thermopile bridge: entry point.
//!
//! ```text
//! ┌───────────────────────────────────────────────────────────┐
//! │                 Adapters (outer ring)                      │
//! │  LinuxI2cBus   FifoChannel   SystemClock   ThreadDelay     │
//! │  LogEventSink                                               │
//! │  ──────────────── Port Trait Boundary ───────────────────  │
//! │  ┌─────────────────────────────────────────────────────┐   │
//! │  │ RegisterReader → FrameDecoder → ReadingPublisher     │   │
//! │  │                 PollLoop (forever)                   │   │
//! │  └─────────────────────────────────────────────────────┘   │
//! └───────────────────────────────────────────────────────────┘
//! ```
#![deny(unused_must_use)]

use anyhow::{Context, Result};
use log::{debug, error, info};

use thermopile_bridge::adapters::log_sink::LogEventSink;
use thermopile_bridge::bootstrap;
use thermopile_bridge::config::CollectorConfig;

fn init_logging(level: log::LevelFilter) {
    // Level comes from the compiled-in config, never from RUST_LOG.
    env_logger::Builder::new()
        .filter_level(level)
        .format_target(false)
        .init();
}

fn run() -> Result<()> {
    let config = CollectorConfig::default();
    init_logging(config.log_level);

    info!("Starting D6T-44L-06 temperature collector v{}", env!("CARGO_PKG_VERSION"));
    debug!("Config: {}", serde_json::to_string(&config)?);

    let mut poll = bootstrap::build(&config).context("startup failed")?;

    let mut sink = LogEventSink::new();
    poll.run(&mut sink)
}

fn main() {
    if let Err(e) = run() {
        error!("{e:#}");
        std::process::exit(1);
    }
}
