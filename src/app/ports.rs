//! Port traits: the hexagonal boundary between domain logic and the outside world.
//!
//! ```text
//!   Adapter ──▶ Port trait ──▶ RegisterReader / ReadingPublisher / PollLoop
//! ```
//!
//! Driven adapters (I2C bus, output pipe, clock, event sinks) implement these
//! traits.  The domain types consume them via generics, so nothing in the
//! core touches a file descriptor directly.  Delays go through
//! [`embedded_hal::delay::DelayNs`] rather than a local trait.

use chrono::{DateTime, Local};

use crate::error::{ChannelError, IoFault};
use crate::sensors::SensorAddress;

// ───────────────────────────────────────────────────────────────
// Bus port (driven adapter: hardware → domain)
// ───────────────────────────────────────────────────────────────

/// An I2C bus that can be opened for one transaction at a time.
pub trait I2cBus {
    /// Exclusive access to the bus for the lifetime of the handle.
    ///
    /// Dropping the handle releases the underlying device.
    type Handle<'a>: BusHandle
    where
        Self: 'a;

    /// Open the bus device.
    fn open(&mut self) -> Result<Self::Handle<'_>, IoFault>;
}

impl<B: I2cBus + ?Sized> I2cBus for &mut B {
    type Handle<'a>
        = B::Handle<'a>
    where
        Self: 'a;

    fn open(&mut self) -> Result<Self::Handle<'_>, IoFault> {
        (**self).open()
    }
}

/// Operations available on an opened bus.
pub trait BusHandle {
    /// Address subsequent transfers to `address`.
    fn select(&mut self, address: SensorAddress) -> Result<(), IoFault>;

    /// Write `bytes`, returning how many were accepted.
    fn write(&mut self, bytes: &[u8]) -> Result<usize, IoFault>;

    /// Read into `buf`, returning how many bytes arrived.
    fn read(&mut self, buf: &mut [u8]) -> Result<usize, IoFault>;
}

// ───────────────────────────────────────────────────────────────
// Channel port (driven adapter: domain → consumer process)
// ───────────────────────────────────────────────────────────────

/// Delivers serialised documents to the consumer.
pub trait ChannelPort {
    /// Send one complete document.  Implementations may block until a
    /// consumer attaches, bounded by their own timeout policy.
    fn send(&mut self, payload: &[u8]) -> Result<(), ChannelError>;
}

// ───────────────────────────────────────────────────────────────
// Clock port
// ───────────────────────────────────────────────────────────────

/// Wall-clock source for reading timestamps.
pub trait Clock {
    fn now(&self) -> DateTime<Local>;
}

// ───────────────────────────────────────────────────────────────
// Event sink port (driven adapter: domain → logging)
// ───────────────────────────────────────────────────────────────

/// The poll loop reports each attempt through this port.
pub trait EventSink {
    fn emit(&mut self, event: &super::events::AppEvent);
}
