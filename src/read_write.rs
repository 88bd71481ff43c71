use byteorder::{LittleEndian, WriteBytesExt};
use std::io;

/// Little-endian integer write helpers, so frame assembly in [`crate::frame`]
/// reads as a sequence of typed writes instead of manual byte shuffling.
pub(crate) trait LittleEndianWriter<T> {
	fn write_val(&mut self, v: T) -> Result<(), io::Error>;
}

impl<W: WriteBytesExt> LittleEndianWriter<u8> for W {
	fn write_val(&mut self, v: u8) -> Result<(), io::Error> {
		self.write_u8(v)
	}
}

impl<W: WriteBytesExt> LittleEndianWriter<u16> for W {
	fn write_val(&mut self, v: u16) -> Result<(), io::Error> {
		self.write_u16::<LittleEndian>(v)
	}
}
