//! Unified error types for the thermopile bridge.
//!
//! Every fallible stage has its own closed enum so callers can match
//! exhaustively; the top-level [`Error`] is what bootstrap code funnels into.
//! Variants are `Copy` so they can be logged and carried through events
//! without allocation.

use core::fmt;

// ---------------------------------------------------------------------------
// Low-level I/O faults
// ---------------------------------------------------------------------------

/// Cause attached to a failed bus or channel operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IoFault {
    /// The OS reported an errno.
    Os(i32),
    /// An `embedded-hal` I2C implementation reported an error kind.
    Hal(embedded_hal::i2c::ErrorKind),
    /// The transfer completed with fewer bytes than requested.
    Incomplete { expected: usize, transferred: usize },
    /// No further detail is available.
    Unknown,
}

impl From<std::io::Error> for IoFault {
    fn from(e: std::io::Error) -> Self {
        e.raw_os_error().map_or(Self::Unknown, Self::Os)
    }
}

impl From<nix::errno::Errno> for IoFault {
    fn from(e: nix::errno::Errno) -> Self {
        Self::Os(e as i32)
    }
}

impl fmt::Display for IoFault {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Os(errno) => write!(f, "{}", std::io::Error::from_raw_os_error(*errno)),
            Self::Hal(kind) => write!(f, "{kind}"),
            Self::Incomplete {
                expected,
                transferred,
            } => write!(f, "transferred {transferred} of {expected} bytes"),
            Self::Unknown => write!(f, "unknown fault"),
        }
    }
}

// ---------------------------------------------------------------------------
// Register read protocol
// ---------------------------------------------------------------------------

/// One variant per stage of the register read protocol.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReadError {
    /// The bus device could not be opened.
    DeviceOpen(IoFault),
    /// The target address could not be selected on the bus.
    DeviceSelect(IoFault),
    /// The register-address byte was not written.
    CommandWrite(IoFault),
    /// The frame read itself failed.
    FrameRead(IoFault),
    /// The device returned fewer bytes than requested.
    ShortRead { expected: usize, got: usize },
}

impl ReadError {
    /// Diagnostic code reported for a successful read.
    pub const OK_CODE: u8 = 0;

    /// Stable numeric code for this stage (never [`Self::OK_CODE`]).
    ///
    /// The values match what the field collectors have always logged, so
    /// existing log filters keep working.
    pub const fn code(self) -> u8 {
        match self {
            Self::DeviceOpen(_) => 21,
            Self::DeviceSelect(_) => 22,
            Self::CommandWrite(_) => 23,
            Self::FrameRead(_) => 24,
            Self::ShortRead { .. } => 25,
        }
    }

    /// Short stage name, used as a log tag.
    pub const fn stage(self) -> &'static str {
        match self {
            Self::DeviceOpen(_) => "open",
            Self::DeviceSelect(_) => "select",
            Self::CommandWrite(_) => "command",
            Self::FrameRead(_) => "read",
            Self::ShortRead { .. } => "short-read",
        }
    }
}

impl fmt::Display for ReadError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::DeviceOpen(e) => write!(f, "error opening device: {e}"),
            Self::DeviceSelect(e) => write!(f, "error selecting device: {e}"),
            Self::CommandWrite(e) => write!(f, "error writing register command: {e}"),
            Self::FrameRead(e) => write!(f, "error reading frame: {e}"),
            Self::ShortRead { expected, got } => {
                write!(f, "short read from device, expected {expected}, got {got}")
            }
        }
    }
}

impl std::error::Error for ReadError {}

// ---------------------------------------------------------------------------
// Output channel
// ---------------------------------------------------------------------------

/// A single publish attempt could not be delivered.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChannelError {
    /// The pipe could not be opened for writing (missing, permissions).
    Open(IoFault),
    /// No reader attached within the configured open timeout.
    TimedOut { waited_ms: u64 },
    /// The pipe was opened but the write failed or was cut short.
    Write(IoFault),
    /// The document could not be serialised.
    Serialize,
}

impl fmt::Display for ChannelError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Open(e) => write!(f, "error opening pipe: {e}"),
            Self::TimedOut { waited_ms } => {
                write!(f, "no reader attached after {waited_ms} ms")
            }
            Self::Write(e) => write!(f, "error writing pipe: {e}"),
            Self::Serialize => write!(f, "document serialisation failed"),
        }
    }
}

impl std::error::Error for ChannelError {}

/// The output pipe could not be created at startup.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChannelCreationError {
    /// The path contains an interior NUL byte.
    InvalidPath,
    /// Something other than a FIFO already exists at the path.
    NotAFifo,
    /// `mkfifo` or `stat` failed.
    Create(IoFault),
}

impl fmt::Display for ChannelCreationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidPath => write!(f, "pipe path contains a NUL byte"),
            Self::NotAFifo => write!(f, "path exists and is not a named pipe"),
            Self::Create(e) => write!(f, "error creating named pipe: {e}"),
        }
    }
}

impl std::error::Error for ChannelCreationError {}

// ---------------------------------------------------------------------------
// Configuration
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigError {
    /// A config field failed range validation.
    /// The `&'static str` names the field and the rule.
    ValidationFailed(&'static str),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ValidationFailed(msg) => write!(f, "validation failed: {msg}"),
        }
    }
}

impl std::error::Error for ConfigError {}

// ---------------------------------------------------------------------------
// Top-level error
// ---------------------------------------------------------------------------

/// Startup-time failures; runtime failures never escape the poll loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Error {
    Config(ConfigError),
    ChannelCreation(ChannelCreationError),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Config(e) => write!(f, "config: {e}"),
            Self::ChannelCreation(e) => write!(f, "channel: {e}"),
        }
    }
}

impl std::error::Error for Error {}

impl From<ConfigError> for Error {
    fn from(e: ConfigError) -> Self {
        Self::Config(e)
    }
}

impl From<ChannelCreationError> for Error {
    fn from(e: ChannelCreationError) -> Self {
        Self::ChannelCreation(e)
    }
}

/// Crate-wide `Result` alias.
pub type Result<T> = core::result::Result<T, Error>;
