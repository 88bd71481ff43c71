use thiserror::Error;

/// Errors surfaced by the builder and payload codec.
///
/// The streaming parser never surfaces errors of its own: every validation
/// failure it hits (bad checksum, bad length, ring overflow) is handled by
/// silent resynchronization, so no variant here originates from `FrameParser`.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Error {
	/// A builder call was given inconsistent or missing arguments: a
	/// payload length with no payload slice, or vice versa.
	#[error("invalid arguments")]
	InvalidArgs,

	/// The output buffer passed to a builder is smaller than the frame it
	/// was asked to write.
	#[error("output buffer too small: need {needed} bytes, have {available}")]
	BufferTooSmall { needed: usize, available: usize },

	/// The requested frame would exceed the protocol's maximum length.
	#[error("frame length {len} exceeds the maximum of {max}")]
	TooLarge { len: usize, max: usize },

	/// A payload decode was given fewer than 17 bytes.
	#[error("payload too short: need at least {required} bytes, got {got}")]
	ShortPayload { required: usize, got: usize },
}
