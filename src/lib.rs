//! Streaming decoder for a consumer drone remote controller's binary
//! telemetry protocol.
//!
//! Raw bytes arrive from a bulk transport in arbitrary-sized chunks that
//! don't align with frame boundaries. [`FrameParser`] reassembles frames
//! from that stream, validates two independent checksums (an 8-bit header
//! checksum and a 16-bit body checksum, both table-driven with custom
//! seeds), extracts the fixed-layout controller-push payload, and invokes
//! a callback with the decoded [`Snapshot`] — synchronously, on whichever
//! thread called [`FrameParser::feed`].
//!
//! This crate only decodes and encodes the wire protocol. It has no
//! opinion about how bytes get from a USB bulk endpoint into [`feed`], how
//! a UI renders the result, or how a built frame gets written back out to
//! the device — those are a transport collaborator's job.
//!
//! # Example
//!
//! ```
//! use rc_telemetry::{FrameParser, Snapshot};
//!
//! let mut latest: Option<Snapshot> = None;
//! let mut parser = FrameParser::new(|snapshot: &Snapshot| {
//!     latest = Some(*snapshot);
//! });
//!
//! // Bytes from a USB bulk read, fed in whatever chunk size the transport gives you.
//! let mut frame = [0u8; 14];
//! rc_telemetry::frame::build_controller_enable(&mut frame, 1).unwrap();
//! parser.feed(&frame);
//! ```
//!
//! [`feed`]: FrameParser::feed

#![allow(clippy::bool_assert_comparison)]

mod checksum;
mod error;
pub mod frame;
mod parser;
pub mod payload;
mod read_write;

pub use error::Error;
pub use parser::FrameParser;
pub use payload::{decode as decode_payload, encode as encode_payload, FiveD, FlightMode, Snapshot, Stick};
