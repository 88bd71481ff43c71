//! Property-based coverage for the round-trip law (spec.md §8.1) and the
//! partition-invariance property (spec.md §8.2), on top of the fixed
//! example values already exercised in the unit and integration suites.

use proptest::prelude::*;

use rc_telemetry::frame::{
	build_frame, device, DeviceAddress, PacketKind, ACK_NO_ACK, CMD_ID_CONTROLLER_PUSH, CMD_SET_RC,
};
use rc_telemetry::payload::{decode, encode, FiveD, FlightMode, Snapshot, Stick, PAYLOAD_LEN};
use rc_telemetry::FrameParser;

fn arb_flight_mode() -> impl Strategy<Value = FlightMode> {
	prop_oneof![
		Just(FlightMode::Sport),
		Just(FlightMode::Normal),
		Just(FlightMode::Tripod),
		Just(FlightMode::Unknown),
	]
}

fn arb_stick() -> impl Strategy<Value = Stick> {
	(-1024i16..=1023, -1024i16..=1023).prop_map(|(horizontal, vertical)| Stick { horizontal, vertical })
}

fn arb_snapshot() -> impl Strategy<Value = Snapshot> {
	(
		any::<bool>(),
		any::<bool>(),
		any::<bool>(),
		any::<bool>(),
		(any::<bool>(), any::<bool>(), any::<bool>(), any::<bool>(), any::<bool>()),
		(any::<bool>(), any::<bool>(), any::<bool>()),
		arb_flight_mode(),
		arb_stick(),
		arb_stick(),
		-1024i16..=1023,
		-1024i16..=1023,
		-31i8..=31,
	)
		.prop_map(
			|(
				pause,
				gohome,
				shutter,
				record,
				(right, up, down, left, center),
				(custom1, custom2, custom3),
				flight_mode,
				stick_right,
				stick_left,
				left_wheel,
				right_wheel,
				right_wheel_delta,
			)| Snapshot {
				pause,
				gohome,
				shutter,
				record,
				five_d: FiveD { right, up, down, left, center },
				custom1,
				custom2,
				custom3,
				flight_mode,
				stick_right,
				stick_left,
				left_wheel,
				right_wheel,
				right_wheel_delta,
			},
		)
}

fn frame_for(snapshot: &Snapshot) -> Vec<u8> {
	let payload = encode(snapshot);
	let mut buf = vec![0u8; 64];
	let len = build_frame(
		&mut buf,
		DeviceAddress::new(device::PC, 0),
		DeviceAddress::new(device::RC, 0),
		1,
		PacketKind::Request,
		ACK_NO_ACK,
		0,
		CMD_SET_RC,
		CMD_ID_CONTROLLER_PUSH,
		Some(&payload[..]),
	)
	.unwrap();
	buf.truncate(len);
	buf
}

proptest! {
	/// `decode(encode(s)) == s` for every representable snapshot (spec.md §8.1).
	#[test]
	fn round_trip_law(snapshot in arb_snapshot()) {
		let encoded = encode(&snapshot);
		prop_assert_eq!(encoded.len(), PAYLOAD_LEN);
		let decoded = decode(&encoded).unwrap();
		prop_assert_eq!(decoded, snapshot);
	}

	/// However a complete byte stream is chopped into `feed` calls, the
	/// parser reports the same snapshots in the same order (spec.md §8.2).
	#[test]
	fn partition_invariance(
		snapshot in arb_snapshot(),
		cut_points in prop::collection::vec(0usize..200, 0..8),
	) {
		let frame = frame_for(&snapshot);

		let whole = {
			let mut seen = Vec::new();
			let mut parser = FrameParser::new(|s: &Snapshot| seen.push(*s));
			parser.feed(&frame);
			seen
		};

		let mut cuts: Vec<usize> = cut_points.into_iter().map(|c| c % (frame.len() + 1)).collect();
		cuts.sort_unstable();
		cuts.dedup();

		let mut chunks = Vec::new();
		let mut prev = 0;
		for &cut in &cuts {
			chunks.push(&frame[prev..cut]);
			prev = cut;
		}
		chunks.push(&frame[prev..]);

		let partitioned = {
			let mut seen = Vec::new();
			let mut parser = FrameParser::new(|s: &Snapshot| seen.push(*s));
			for chunk in chunks {
				parser.feed(chunk);
			}
			seen
		};

		prop_assert_eq!(whole, partitioned);
	}

	/// Two distinct frames back-to-back in one partition yield the same
	/// pair of snapshots as feeding them as two separate calls.
	#[test]
	fn partition_invariance_across_frame_boundaries(
		a in arb_snapshot(),
		b in arb_snapshot(),
		split_in_first_frame in any::<bool>(),
	) {
		let frame_a = frame_for(&a);
		let frame_b = frame_for(&b);
		let mut stream = frame_a.clone();
		stream.extend_from_slice(&frame_b);

		let whole = {
			let mut seen = Vec::new();
			let mut parser = FrameParser::new(|s: &Snapshot| seen.push(*s));
			parser.feed(&stream);
			seen
		};

		let split_at = if split_in_first_frame {
			frame_a.len() / 2
		} else {
			frame_a.len() + frame_b.len() / 2
		};

		let partitioned = {
			let mut seen = Vec::new();
			let mut parser = FrameParser::new(|s: &Snapshot| seen.push(*s));
			parser.feed(&stream[..split_at]);
			parser.feed(&stream[split_at..]);
			seen
		};

		prop_assert_eq!(whole, partitioned);
	}
}
