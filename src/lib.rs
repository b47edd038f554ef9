//! Thermopile bridge library.
//!
//! Polls D6T thermopile arrays over I2C, decodes their frames and
//! publishes each reading as JSON on a named pipe.  The pure pipeline
//! lives in [`sensors`] and [`app`]; [`adapters`] binds it to Linux.

#![deny(unused_must_use)]

pub mod adapters;
pub mod app;
pub mod bootstrap;
pub mod config;
pub mod error;
pub mod sensors;

pub use error::{Error, Result};
