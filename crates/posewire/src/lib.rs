//! Pose bridge: reads tracking-camera pose samples and streams them to a
//! serial controller as fixed-point hex token frames.
//!
//! The frame format lives in [`posewire_protocol`]; this crate adds the
//! configuration, the pose source, the serial transport and the run loop.

#![deny(static_mut_refs)]

pub mod bridge;
pub mod config;
pub mod error;
pub mod reporter;
pub mod source;
pub mod transport;

pub use bridge::{Bridge, RunStats};
pub use config::{BridgeConfig, ConfigOverrides, DEFAULT_BAUD, DEFAULT_DEVICE};
pub use error::{BridgeError, BridgeResult};
pub use reporter::ConsoleReporter;
pub use source::{JsonLinesSource, PoseSource, ReplaySource, open_source};
pub use transport::{SUPPORTED_BAUD_RATES, Transport, WriterTransport, open_serial};
