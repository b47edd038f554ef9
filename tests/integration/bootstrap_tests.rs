//! Host wiring: FIFO creation at startup and the real adapters driven by
//! one poll attempt.

use std::os::unix::fs::FileTypeExt;
use std::path::PathBuf;
use std::sync::atomic::{AtomicU32, Ordering};

use crate::mock_hw::RecordingSink;

use thermopile_bridge::Error;
use thermopile_bridge::app::events::AppEvent;
use thermopile_bridge::app::poll::Attempt;
use thermopile_bridge::bootstrap;
use thermopile_bridge::config::CollectorConfig;
use thermopile_bridge::error::{ChannelCreationError, ConfigError, IoFault, ReadError};

static SEQ: AtomicU32 = AtomicU32::new(0);

fn scratch_dir() -> PathBuf {
    let dir = std::env::temp_dir().join(format!(
        "thermopile-bootstrap-{}-{}",
        std::process::id(),
        SEQ.fetch_add(1, Ordering::Relaxed)
    ));
    std::fs::create_dir_all(&dir).unwrap();
    dir
}

fn test_config() -> CollectorConfig {
    let dir = scratch_dir();
    CollectorConfig {
        bus_path: dir.join("i2c-missing"),
        pipe_path: dir.join("sensor_data_pipe"),
        sensor_interval_ms: 1,
        pipe_open_timeout_ms: Some(20),
        ..CollectorConfig::default()
    }
}

#[test]
fn build_creates_the_pipe() {
    let config = test_config();
    let poll = bootstrap::build(&config).unwrap();

    assert_eq!(poll.sensors().len(), 2);
    let meta = std::fs::metadata(&config.pipe_path).unwrap();
    assert!(meta.file_type().is_fifo());
}

#[test]
fn build_reuses_existing_pipe() {
    let config = test_config();
    bootstrap::build(&config).unwrap();
    assert!(bootstrap::build(&config).is_ok());
}

#[test]
fn pipe_creation_failure_is_fatal() {
    let mut config = test_config();
    config.pipe_path = config.pipe_path.join("nested/too/deep");
    assert!(matches!(
        bootstrap::build(&config),
        Err(Error::ChannelCreation(ChannelCreationError::Create(_)))
    ));
}

#[test]
fn invalid_config_is_rejected_before_touching_the_filesystem() {
    let config = CollectorConfig {
        sensors: Vec::new(),
        ..test_config()
    };
    assert!(matches!(
        bootstrap::build(&config),
        Err(Error::Config(ConfigError::ValidationFailed(_)))
    ));
    assert!(!config.pipe_path.exists());
}

#[test]
fn missing_bus_device_is_reported_and_skipped() {
    let config = test_config();
    let mut poll = bootstrap::build(&config).unwrap();
    let mut sink = RecordingSink::new();

    let first = poll.poll_once(&mut sink);
    let second = poll.poll_once(&mut sink);
    let expected = Attempt::ReadFailed(ReadError::DeviceOpen(IoFault::Os(libc::ENOENT)));
    assert_eq!(first, expected);
    assert_eq!(second, expected);
    assert_eq!(
        sink.count(|e| matches!(e, AppEvent::ReadFailed { .. })),
        2
    );
}
