//! Application core: the read → decode → publish pipeline.
//!
//! All interaction with the bus, the output pipe and the clock happens
//! through **port traits** defined in [`ports`], keeping this layer fully
//! testable without real peripherals.

pub mod events;
pub mod poll;
pub mod ports;
pub mod publisher;
pub mod reading;
