//! Named-pipe output channel.
//!
//! The consumer process reads documents from a FIFO on the local
//! filesystem.  Opening a FIFO for writing blocks until a reader attaches;
//! [`FifoChannel`] either keeps that behaviour (no timeout) or polls a
//! non-blocking open until its deadline and then gives up on the document.
//!
//! Every document gets its own open/write/close cycle so the reader sees
//! end-of-file after each one.

use std::fs::{File, OpenOptions, Permissions};
use std::io::{ErrorKind, Write};
use std::os::fd::AsRawFd;
use std::os::unix::ffi::OsStrExt;
use std::os::unix::fs::{FileTypeExt, OpenOptionsExt, PermissionsExt};
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

use log::debug;
use nix::errno::Errno;
use nix::fcntl::{FcntlArg, OFlag, fcntl};
use nix::sys::stat::Mode;
use nix::unistd::mkfifo;

use crate::app::ports::ChannelPort;
use crate::error::{ChannelCreationError, ChannelError, IoFault};

/// Read/write for everyone, so an unprivileged consumer can attach.
pub const DEFAULT_FIFO_MODE: u32 = 0o666;

/// How often a bounded open retries while waiting for a reader.
const OPEN_POLL_INTERVAL: Duration = Duration::from_millis(10);

/// Outcome of [`ensure_fifo`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FifoStatus {
    Created,
    Existing,
}

/// Make sure a FIFO exists at `path`, creating it with `mode` if absent.
///
/// The mode is applied explicitly after creation so the process umask does
/// not narrow it.
pub fn ensure_fifo(path: &Path, mode: u32) -> Result<FifoStatus, ChannelCreationError> {
    if path.as_os_str().as_bytes().contains(&0) {
        return Err(ChannelCreationError::InvalidPath);
    }
    match std::fs::metadata(path) {
        Ok(meta) if meta.file_type().is_fifo() => return Ok(FifoStatus::Existing),
        Ok(_) => return Err(ChannelCreationError::NotAFifo),
        Err(e) if e.kind() == ErrorKind::NotFound => {}
        Err(e) => return Err(ChannelCreationError::Create(e.into())),
    }

    mkfifo(path, Mode::from_bits_truncate(mode as _))
        .map_err(|e| ChannelCreationError::Create(e.into()))?;

    std::fs::set_permissions(path, Permissions::from_mode(mode))
        .map_err(|e| ChannelCreationError::Create(e.into()))?;
    Ok(FifoStatus::Created)
}

/// Writer side of the output pipe.
pub struct FifoChannel {
    path: PathBuf,
    open_timeout: Option<Duration>,
}

impl FifoChannel {
    /// Channel whose open blocks until a reader attaches.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            open_timeout: None,
        }
    }

    /// Bound the wait for a reader; `None` waits forever.
    pub fn with_open_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.open_timeout = timeout;
        self
    }

    fn open_blocking(&self) -> Result<File, ChannelError> {
        OpenOptions::new()
            .write(true)
            .open(&self.path)
            .map_err(|e| ChannelError::Open(e.into()))
    }

    fn open_bounded(&self, timeout: Duration) -> Result<File, ChannelError> {
        let deadline = Instant::now() + timeout;
        loop {
            let attempt = OpenOptions::new()
                .write(true)
                .custom_flags(OFlag::O_NONBLOCK.bits())
                .open(&self.path);
            match attempt {
                Ok(file) => {
                    set_blocking(&file)?;
                    return Ok(file);
                }
                // ENXIO: FIFO exists but nobody has it open for reading.
                Err(e) if e.raw_os_error() == Some(Errno::ENXIO as i32) => {
                    let now = Instant::now();
                    if now >= deadline {
                        return Err(ChannelError::TimedOut {
                            waited_ms: timeout.as_millis() as u64,
                        });
                    }
                    std::thread::sleep(OPEN_POLL_INTERVAL.min(deadline - now));
                }
                Err(e) => return Err(ChannelError::Open(e.into())),
            }
        }
    }
}

/// Clear `O_NONBLOCK` so the write itself behaves like a normal pipe write.
fn set_blocking(file: &File) -> Result<(), ChannelError> {
    let fd = file.as_raw_fd();
    let mut flags = OFlag::from_bits_truncate(
        fcntl(fd, FcntlArg::F_GETFL).map_err(|e| ChannelError::Open(e.into()))?,
    );
    flags.remove(OFlag::O_NONBLOCK);
    fcntl(fd, FcntlArg::F_SETFL(flags)).map_err(|e| ChannelError::Open(e.into()))?;
    Ok(())
}

impl ChannelPort for FifoChannel {
    fn send(&mut self, payload: &[u8]) -> Result<(), ChannelError> {
        let mut file = match self.open_timeout {
            None => self.open_blocking()?,
            Some(timeout) => self.open_bounded(timeout)?,
        };
        file.write_all(payload).map_err(|e| {
            if e.kind() == ErrorKind::WriteZero {
                ChannelError::Write(IoFault::Incomplete {
                    expected: payload.len(),
                    transferred: 0,
                })
            } else {
                ChannelError::Write(e.into())
            }
        })?;
        debug!("fifo {}: wrote {} bytes", self.path.display(), payload.len());
        Ok(())
    }
}
