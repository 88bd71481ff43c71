use crate::error::Error;

/// Length in bytes of the controller-push payload this module decodes.
pub const PAYLOAD_LEN: usize = 17;

/// Center value of an analog axis's little-endian `u16` wire encoding.
const AXIS_CENTER: u16 = 0x0400;

/// Maximum magnitude the right-wheel delta's 5-bit field can hold.
const DELTA_MAX_MAGNITUDE: i8 = 31;

/// Flight-mode switch position, decoded from a 2-bit field.
///
/// All four 2-bit values are covered (`Unknown` is the canonical value `3`,
/// not a catch-all for malformed input), so [`FlightMode::name`] is a total
/// function over this type without needing a fallback arm.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FlightMode {
	#[default]
	Sport,
	Normal,
	Tripod,
	Unknown,
}

impl FlightMode {
	/// Human-readable name, per spec.md §4.5.
	pub fn name(&self) -> &'static str {
		match self {
			FlightMode::Sport => "Sport",
			FlightMode::Normal => "Normal",
			FlightMode::Tripod => "Tripod",
			FlightMode::Unknown => "Unknown",
		}
	}

	fn from_bits(bits: u8) -> FlightMode {
		match bits & 0b11 {
			0 => FlightMode::Sport,
			1 => FlightMode::Normal,
			2 => FlightMode::Tripod,
			_ => FlightMode::Unknown,
		}
	}

	fn to_bits(self) -> u8 {
		match self {
			FlightMode::Sport => 0,
			FlightMode::Normal => 1,
			FlightMode::Tripod => 2,
			FlightMode::Unknown => 3,
		}
	}
}

/// State of the 5-direction joystick.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct FiveD {
	pub right: bool,
	pub up: bool,
	pub down: bool,
	pub left: bool,
	pub center: bool,
}

/// One analog stick's horizontal/vertical deflection, centered at zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Stick {
	pub horizontal: i16,
	pub vertical: i16,
}

/// Decoded controller state from a single controller-push payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Snapshot {
	pub pause: bool,
	pub gohome: bool,
	pub shutter: bool,
	pub record: bool,

	pub five_d: FiveD,

	pub custom1: bool,
	pub custom2: bool,
	pub custom3: bool,

	pub flight_mode: FlightMode,

	pub stick_right: Stick,
	pub stick_left: Stick,

	pub left_wheel: i16,
	pub right_wheel: i16,
	pub right_wheel_delta: i8,
}

fn read_axis(payload: &[u8], offset: usize) -> i16 {
	let raw = u16::from_le_bytes([payload[offset], payload[offset + 1]]);
	raw.wrapping_sub(AXIS_CENTER) as i16
}

fn write_axis(out: &mut [u8], offset: usize, value: i16) {
	let raw = (value as u16).wrapping_add(AXIS_CENTER);
	out[offset..offset + 2].copy_from_slice(&raw.to_le_bytes());
}

/// Decode a 17-byte controller-push payload into a [`Snapshot`].
///
/// Trailing bytes beyond [`PAYLOAD_LEN`] are ignored. Reserved bits (payload
/// byte 0 bits 0-3/7, byte 1 bits 1-2, byte 2 bits 5-7, byte 3 entirely, byte
/// 4 bits 0/7) never influence the result.
pub fn decode(payload: &[u8]) -> Result<Snapshot, Error> {
	if payload.len() < PAYLOAD_LEN {
		return Err(Error::ShortPayload {
			required: PAYLOAD_LEN,
			got: payload.len(),
		});
	}

	let b0 = payload[0];
	let b1 = payload[1];
	let b2 = payload[2];
	let b4 = payload[4];

	let mag = ((b4 >> 1) & 0x1F) as i8;
	let sign_positive = (b4 >> 6) & 1 == 1;
	let right_wheel_delta = if sign_positive { mag } else { -mag };

	Ok(Snapshot {
		pause: (b0 >> 4) & 1 == 1,
		gohome: (b0 >> 5) & 1 == 1,
		shutter: (b0 >> 6) & 1 == 1,
		record: b1 & 1 == 1,
		five_d: FiveD {
			right: (b1 >> 3) & 1 == 1,
			up: (b1 >> 4) & 1 == 1,
			down: (b1 >> 5) & 1 == 1,
			left: (b1 >> 6) & 1 == 1,
			center: (b1 >> 7) & 1 == 1,
		},
		custom1: (b2 >> 2) & 1 == 1,
		custom2: (b2 >> 3) & 1 == 1,
		custom3: (b2 >> 4) & 1 == 1,
		flight_mode: FlightMode::from_bits(b2),
		stick_right: Stick {
			horizontal: read_axis(payload, 5),
			vertical: read_axis(payload, 7),
		},
		stick_left: Stick {
			vertical: read_axis(payload, 9),
			horizontal: read_axis(payload, 11),
		},
		left_wheel: read_axis(payload, 13),
		right_wheel: read_axis(payload, 15),
		right_wheel_delta,
	})
}

/// Encode a [`Snapshot`] back into its 17-byte wire payload.
///
/// The exact inverse of [`decode`] for every field within its representable
/// domain (axes in `-0x0400..=0x03FF`, delta in `-31..=31`): reserved bits
/// are always cleared, and out-of-range deltas are clamped rather than
/// wrapped, since the 5-bit magnitude field cannot represent more than 31.
pub fn encode(snapshot: &Snapshot) -> [u8; PAYLOAD_LEN] {
	let mut out = [0u8; PAYLOAD_LEN];

	let mut b0 = 0u8;
	if snapshot.pause {
		b0 |= 1 << 4;
	}
	if snapshot.gohome {
		b0 |= 1 << 5;
	}
	if snapshot.shutter {
		b0 |= 1 << 6;
	}
	out[0] = b0;

	let mut b1 = 0u8;
	if snapshot.record {
		b1 |= 1;
	}
	if snapshot.five_d.right {
		b1 |= 1 << 3;
	}
	if snapshot.five_d.up {
		b1 |= 1 << 4;
	}
	if snapshot.five_d.down {
		b1 |= 1 << 5;
	}
	if snapshot.five_d.left {
		b1 |= 1 << 6;
	}
	if snapshot.five_d.center {
		b1 |= 1 << 7;
	}
	out[1] = b1;

	let mut b2 = snapshot.flight_mode.to_bits();
	if snapshot.custom1 {
		b2 |= 1 << 2;
	}
	if snapshot.custom2 {
		b2 |= 1 << 3;
	}
	if snapshot.custom3 {
		b2 |= 1 << 4;
	}
	out[2] = b2;

	// out[3] is entirely unused.

	let magnitude = snapshot.right_wheel_delta.unsigned_abs().min(DELTA_MAX_MAGNITUDE as u8);
	let mut b4 = (magnitude & 0x1F) << 1;
	if snapshot.right_wheel_delta > 0 {
		b4 |= 1 << 6;
	}
	out[4] = b4;

	write_axis(&mut out, 5, snapshot.stick_right.horizontal);
	write_axis(&mut out, 7, snapshot.stick_right.vertical);
	write_axis(&mut out, 9, snapshot.stick_left.vertical);
	write_axis(&mut out, 11, snapshot.stick_left.horizontal);
	write_axis(&mut out, 13, snapshot.left_wheel);
	write_axis(&mut out, 15, snapshot.right_wheel);

	out
}
