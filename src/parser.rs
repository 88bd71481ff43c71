use crate::checksum::{crc16, crc8};
use crate::frame::{CMD_ID_CONTROLLER_PUSH, CMD_SET_RC, FOOTER_LEN, HEADER_LEN, MAX_FRAME_LEN, MIN_FRAME_LEN};
use crate::payload::{self, Snapshot};

/// Capacity of the parser's internal byte ring. A frame larger than this
/// cannot be assembled and is abandoned on resync (spec.md §4.4).
const RING_CAPACITY: usize = 4096;

/// Fixed-capacity byte FIFO backing the reassembly state machine.
///
/// Never allocates past construction: `push` silently overwrites the oldest
/// byte once the ring is full, matching the reference implementation's
/// "lossy, no backpressure" behavior for a USB bulk transport that doesn't
/// wait on us.
struct RingBuffer {
	buf: Box<[u8; RING_CAPACITY]>,
	head: usize,
	count: usize,
}

impl RingBuffer {
	fn new() -> RingBuffer {
		RingBuffer { buf: Box::new([0u8; RING_CAPACITY]), head: 0, count: 0 }
	}

	fn reset(&mut self) {
		self.head = 0;
		self.count = 0;
	}

	fn push(&mut self, byte: u8) {
		self.buf[self.head] = byte;
		self.head = (self.head + 1) % RING_CAPACITY;
		if self.count < RING_CAPACITY {
			self.count += 1;
		} else {
			log::trace!("ring buffer full, overwriting oldest buffered byte");
		}
	}

	/// Byte at logical position `idx`, where `0` is the oldest buffered byte.
	fn peek(&self, idx: usize) -> u8 {
		let tail = (self.head + RING_CAPACITY - self.count) % RING_CAPACITY;
		self.buf[(tail + idx) % RING_CAPACITY]
	}

	fn copy_out(&self, dst: &mut [u8]) {
		for (i, slot) in dst.iter_mut().enumerate() {
			*slot = self.peek(i);
		}
	}

	fn consume(&mut self, n: usize) {
		self.count -= n.min(self.count);
	}
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
	ScanningForStart,
	ReadingFrame { expected_len: u16 },
}

/// Outcome of one pass through the reassembly state machine.
enum StepOutcome {
	/// Not enough buffered bytes to make progress; wait for more input.
	NeedMore,
	/// A frame was consumed. `Some(snapshot)` if it was a decoded
	/// controller-push frame, `None` if it validated but wasn't one.
	FrameConsumed(Option<Snapshot>),
}

/// Streaming, resynchronizing decoder for the framing protocol.
///
/// Owns a fixed-size ring buffer and a callback invoked synchronously,
/// on the calling thread, for every decoded controller-push frame. This is
/// the Rust-native shape of the reference design's `(callback, userdata)`
/// pair: the closure's captured environment replaces the raw `void*`, so
/// there's no separate "construction fails if the callback is null" failure
/// mode to implement (see SPEC_FULL.md §4.4).
pub struct FrameParser<F: FnMut(&Snapshot)> {
	callback: F,
	ring: RingBuffer,
	state: State,
	/// Reused scratch space for the frame currently being validated, sized
	/// to the largest frame the protocol allows. Owned by the parser rather
	/// than allocated per frame, so steady-state `feed` calls stay
	/// allocation-free (spec.md §5) once this context has been constructed.
	scratch: Box<[u8; MAX_FRAME_LEN]>,
}

impl<F: FnMut(&Snapshot)> FrameParser<F> {
	/// Create a new parser. The callback fires once per decoded
	/// controller-push frame, for as long as this parser lives.
	pub fn new(callback: F) -> FrameParser<F> {
		FrameParser {
			callback,
			ring: RingBuffer::new(),
			state: State::ScanningForStart,
			scratch: Box::new([0u8; MAX_FRAME_LEN]),
		}
	}

	/// Drop all buffered bytes and return to `ScanningForStart`. The
	/// callback binding is untouched.
	pub fn reset(&mut self) {
		self.ring.reset();
		self.state = State::ScanningForStart;
	}

	/// Feed raw bytes into the parser, draining every frame they complete.
	///
	/// Returns the number of controller-push frames decoded and dispatched
	/// during this call. Never blocks, never allocates, never surfaces an
	/// error: corrupt or out-of-sync input is handled by silent
	/// resynchronization (spec.md §4.4, §7). Feeding a byte stream in any
	/// partition produces the same callback sequence as feeding it whole,
	/// because each pushed byte immediately drains the state machine to a
	/// fixed point before the next byte is pushed.
	pub fn feed(&mut self, bytes: &[u8]) -> usize {
		let mut dispatched = 0;
		for &byte in bytes {
			self.ring.push(byte);
			loop {
				match self.step() {
					StepOutcome::NeedMore => break,
					StepOutcome::FrameConsumed(Some(snapshot)) => {
						(self.callback)(&snapshot);
						dispatched += 1;
					}
					StepOutcome::FrameConsumed(None) => {}
				}
			}
		}
		dispatched
	}

	fn step(&mut self) -> StepOutcome {
		loop {
			match self.state {
				State::ScanningForStart => {
					if self.ring.count == 0 {
						return StepOutcome::NeedMore;
					}
					if self.ring.peek(0) != crate::frame::START_BYTE {
						self.ring.consume(1);
						continue;
					}
					if self.ring.count < 4 {
						return StepOutcome::NeedMore;
					}

					let mut header = [0u8; 3];
					self.ring.copy_out(&mut header);
					let expected_crc8 = self.ring.peek(3);
					if crc8(&header) != expected_crc8 {
						log::trace!("header checksum mismatch, resyncing past leading start byte");
						self.ring.consume(1);
						continue;
					}

					let len_ver = u16::from_le_bytes([header[1], header[2]]);
					let frame_len = len_ver & 0x03FF;
					if (frame_len as usize) < MIN_FRAME_LEN || (frame_len as usize) > MAX_FRAME_LEN {
						log::trace!("frame length {} out of range, resyncing", frame_len);
						self.ring.consume(1);
						continue;
					}

					self.state = State::ReadingFrame { expected_len: frame_len };
				}

				State::ReadingFrame { expected_len } => {
					let expected_len = expected_len as usize;
					if self.ring.count < expected_len {
						return StepOutcome::NeedMore;
					}

					self.ring.copy_out(&mut self.scratch[..expected_len]);
					self.ring.consume(expected_len);
					self.state = State::ScanningForStart;

					let frame = &self.scratch[..expected_len];
					let expected_checksum =
						u16::from_le_bytes([frame[expected_len - 2], frame[expected_len - 1]]);
					let actual_checksum = crc16(&frame[..expected_len - FOOTER_LEN]);
					if actual_checksum != expected_checksum {
						log::debug!("body checksum mismatch, dropping {}-byte frame", expected_len);
						return StepOutcome::FrameConsumed(None);
					}

					return StepOutcome::FrameConsumed(dispatch_controller_push(frame));
				}
			}
		}
	}
}

/// Locate and decode a controller-push payload within a validated frame,
/// trying the canonical header offsets first and falling back to a small
/// scan window to tolerate minor version drift (spec.md §4.4, §9).
fn dispatch_controller_push(frame: &[u8]) -> Option<Snapshot> {
	let len = frame.len();

	if len >= MIN_FRAME_LEN && frame[9] == CMD_SET_RC && frame[10] == CMD_ID_CONTROLLER_PUSH {
		let payload_len = len - HEADER_LEN - FOOTER_LEN;
		if payload_len >= payload::PAYLOAD_LEN {
			if let Ok(snapshot) = payload::decode(&frame[11..len - FOOTER_LEN]) {
				return Some(snapshot);
			}
		}
	}

	if len >= 14 {
		for offset in 8..=12 {
			if offset + 2 + payload::PAYLOAD_LEN > len - FOOTER_LEN {
				continue;
			}
			if frame[offset] == CMD_SET_RC && frame[offset + 1] == CMD_ID_CONTROLLER_PUSH {
				let payload_start = offset + 2;
				if let Ok(snapshot) = payload::decode(&frame[payload_start..len - FOOTER_LEN]) {
					return Some(snapshot);
				}
			}
		}
	}

	None
}
