//! Mock adapters for integration tests.
//!
//! Records every bus transaction, channel write, delay and event so tests
//! can assert on the full history without a real I2C bus or named pipe.

use std::cell::{Cell, RefCell};
use std::collections::HashMap;
use std::time::Duration;

use chrono::{DateTime, Local, TimeZone};
use embedded_hal::delay::DelayNs;

use thermopile_bridge::app::events::AppEvent;
use thermopile_bridge::app::ports::{BusHandle, ChannelPort, Clock, EventSink, I2cBus};
use thermopile_bridge::error::{ChannelError, IoFault};
use thermopile_bridge::sensors::SensorAddress;
use thermopile_bridge::sensors::frame::{FRAME_LEN, PIXEL_COUNT};

// ── Frame helpers ─────────────────────────────────────────────

/// Build a raw frame from words; the PEC byte is set to `0xFF`.
#[allow(dead_code)]
pub fn frame_bytes(reference: i16, pixels: [i16; PIXEL_COUNT]) -> [u8; FRAME_LEN] {
    let mut bytes = [0u8; FRAME_LEN];
    bytes[..2].copy_from_slice(&reference.to_le_bytes());
    for (j, p) in pixels.iter().enumerate() {
        bytes[2 + 2 * j..4 + 2 * j].copy_from_slice(&p.to_le_bytes());
    }
    bytes[FRAME_LEN - 1] = 0xFF;
    bytes
}

// ── Bus behaviour per device ──────────────────────────────────

/// How a device responds once its address is selected.
#[derive(Debug, Clone, PartialEq)]
#[allow(dead_code)]
pub enum Behaviour {
    /// Answer with these bytes (truncated or zero-padded to the request).
    Reply(Vec<u8>),
    /// `ioctl(I2C_SLAVE)` fails.
    FailSelect,
    /// The command write errors out.
    FailWrite,
    /// The command write reports this many bytes.
    WriteCount(usize),
    /// The data read errors out.
    FailRead,
    /// The data read returns only this many bytes.
    Short(usize),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BusOp {
    Open,
    Select(u16),
    Write(u8),
    Read(usize),
    Close,
}

// ── MockBus ───────────────────────────────────────────────────

#[derive(Default)]
pub struct MockBus {
    devices: HashMap<u16, Behaviour>,
    /// The next N opens fail.
    open_failures: Cell<u32>,
    opens: Cell<u32>,
    closes: Cell<u32>,
    ops: RefCell<Vec<BusOp>>,
}

#[allow(dead_code)]
impl MockBus {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_device(mut self, address: u16, behaviour: Behaviour) -> Self {
        self.devices.insert(address, behaviour);
        self
    }

    pub fn set_device(&mut self, address: u16, behaviour: Behaviour) {
        self.devices.insert(address, behaviour);
    }

    pub fn fail_next_opens(&self, n: u32) {
        self.open_failures.set(n);
    }

    pub fn opens(&self) -> u32 {
        self.opens.get()
    }

    pub fn closes(&self) -> u32 {
        self.closes.get()
    }

    pub fn ops(&self) -> Vec<BusOp> {
        self.ops.borrow().clone()
    }

    fn log(&self, op: BusOp) {
        self.ops.borrow_mut().push(op);
    }
}

pub struct MockHandle<'a> {
    bus: &'a MockBus,
    selected: Option<&'a Behaviour>,
}

impl Drop for MockHandle<'_> {
    fn drop(&mut self) {
        self.bus.closes.set(self.bus.closes.get() + 1);
        self.bus.log(BusOp::Close);
    }
}

impl BusHandle for MockHandle<'_> {
    fn select(&mut self, address: SensorAddress) -> Result<(), IoFault> {
        self.bus.log(BusOp::Select(address.raw()));
        match self.bus.devices.get(&address.raw()) {
            None | Some(Behaviour::FailSelect) => Err(IoFault::Os(libc::EIO)),
            Some(b) => {
                self.selected = Some(b);
                Ok(())
            }
        }
    }

    fn write(&mut self, bytes: &[u8]) -> Result<usize, IoFault> {
        self.bus.log(BusOp::Write(bytes[0]));
        match self.selected {
            Some(Behaviour::FailWrite) => Err(IoFault::Os(libc::EREMOTEIO)),
            Some(Behaviour::WriteCount(n)) => Ok(*n),
            _ => Ok(bytes.len()),
        }
    }

    fn read(&mut self, buf: &mut [u8]) -> Result<usize, IoFault> {
        self.bus.log(BusOp::Read(buf.len()));
        match self.selected {
            Some(Behaviour::FailRead) => Err(IoFault::Os(libc::EIO)),
            Some(Behaviour::Short(n)) => {
                let n = (*n).min(buf.len());
                buf[..n].fill(0xAA);
                Ok(n)
            }
            Some(Behaviour::Reply(bytes)) => {
                let n = bytes.len().min(buf.len());
                buf[..n].copy_from_slice(&bytes[..n]);
                buf[n..].fill(0);
                Ok(buf.len())
            }
            _ => Ok(buf.len()),
        }
    }
}

impl I2cBus for MockBus {
    type Handle<'a> = MockHandle<'a>;

    fn open(&mut self) -> Result<Self::Handle<'_>, IoFault> {
        self.log(BusOp::Open);
        let pending = self.open_failures.get();
        if pending > 0 {
            self.open_failures.set(pending - 1);
            return Err(IoFault::Os(libc::ENOENT));
        }
        self.opens.set(self.opens.get() + 1);
        Ok(MockHandle {
            bus: self,
            selected: None,
        })
    }
}

// ── MockChannel ───────────────────────────────────────────────

#[derive(Default)]
#[allow(dead_code)]
pub struct MockChannel {
    pub sent: Vec<Vec<u8>>,
    pub fail: Option<ChannelError>,
}

#[allow(dead_code)]
impl MockChannel {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn unavailable() -> Self {
        Self {
            sent: Vec::new(),
            fail: Some(ChannelError::Open(IoFault::Os(libc::ENOENT))),
        }
    }

    pub fn documents(&self) -> Vec<serde_json::Value> {
        self.sent
            .iter()
            .map(|p| serde_json::from_slice(p).expect("valid JSON document"))
            .collect()
    }
}

impl ChannelPort for MockChannel {
    fn send(&mut self, payload: &[u8]) -> Result<(), ChannelError> {
        if let Some(e) = self.fail {
            return Err(e);
        }
        self.sent.push(payload.to_vec());
        Ok(())
    }
}

// ── FixedClock ────────────────────────────────────────────────

#[allow(dead_code)]
pub struct FixedClock(pub DateTime<Local>);

impl Default for FixedClock {
    fn default() -> Self {
        Self(Local.with_ymd_and_hms(2024, 6, 1, 12, 30, 45).unwrap())
    }
}

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Local> {
        self.0
    }
}

// ── RecordingDelay ────────────────────────────────────────────

#[derive(Default)]
pub struct RecordingDelay {
    pub waits: Vec<Duration>,
}

#[allow(dead_code)]
impl RecordingDelay {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn total(&self) -> Duration {
        self.waits.iter().sum()
    }
}

impl DelayNs for RecordingDelay {
    fn delay_ns(&mut self, ns: u32) {
        self.waits.push(Duration::from_nanos(u64::from(ns)));
    }

    fn delay_us(&mut self, us: u32) {
        self.waits.push(Duration::from_micros(u64::from(us)));
    }

    fn delay_ms(&mut self, ms: u32) {
        self.waits.push(Duration::from_millis(u64::from(ms)));
    }
}

// ── RecordingSink ─────────────────────────────────────────────

#[derive(Default)]
#[allow(dead_code)]
pub struct RecordingSink {
    pub events: Vec<AppEvent>,
}

#[allow(dead_code)]
impl RecordingSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn count(&self, pred: impl Fn(&AppEvent) -> bool) -> usize {
        self.events.iter().filter(|e| pred(e)).count()
    }
}

impl EventSink for RecordingSink {
    fn emit(&mut self, event: &AppEvent) {
        self.events.push(event.clone());
    }
}
