//! Host time adapters.
//!
//! - [`SystemClock`] implements [`Clock`] with the local wall clock, which is
//!   what the published `date` field is expressed in.
//! - [`ThreadDelay`] implements [`DelayNs`] by parking the calling thread;
//!   both the 1 ms settle delay and the inter-sensor pause go through it.

use std::time::Duration;

use chrono::{DateTime, Local};
use embedded_hal::delay::DelayNs;

use crate::app::ports::Clock;

/// Local wall clock.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Local> {
        Local::now()
    }
}

/// Blocking delay backed by [`std::thread::sleep`].
#[derive(Debug, Default, Clone, Copy)]
pub struct ThreadDelay;

impl DelayNs for ThreadDelay {
    fn delay_ns(&mut self, ns: u32) {
        std::thread::sleep(Duration::from_nanos(u64::from(ns)));
    }

    fn delay_ms(&mut self, ms: u32) {
        std::thread::sleep(Duration::from_millis(u64::from(ms)));
    }
}
