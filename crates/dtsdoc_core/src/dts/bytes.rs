use crate::dts::{DecodeOptions, Result, ShapeError, Stream};

/// Bounded little-endian cursor over the unpacked top-level stream.
pub struct Cursor<'a> {
	bytes: &'a [u8],
	pos: usize,
}

impl<'a> Cursor<'a> {
	/// Create a cursor at position 0.
	pub fn new(bytes: &'a [u8]) -> Self {
		Self { bytes, pos: 0 }
	}

	/// Return current byte offset.
	pub fn pos(&self) -> usize {
		self.pos
	}

	/// Return remaining unread bytes.
	pub fn remaining(&self) -> usize {
		self.bytes.len().saturating_sub(self.pos)
	}

	/// Read exactly `n` bytes and advance cursor.
	pub fn read_exact(&mut self, n: usize) -> Result<&'a [u8]> {
		if n > self.remaining() {
			return Err(ShapeError::OutOfData {
				stream: Stream::Top,
				at: self.pos,
				need: n,
				rem: self.remaining(),
			});
		}

		let start = self.pos;
		self.pos += n;
		Ok(&self.bytes[start..self.pos])
	}

	fn read_array<const N: usize>(&mut self) -> Result<[u8; N]> {
		let raw = self.read_exact(N)?;
		let mut buf = [0_u8; N];
		buf.copy_from_slice(raw);
		Ok(buf)
	}

	/// Read one unsigned byte.
	pub fn read_u8(&mut self) -> Result<u8> {
		Ok(self.read_array::<1>()?[0])
	}

	/// Read one signed byte.
	pub fn read_i8(&mut self) -> Result<i8> {
		Ok(i8::from_le_bytes(self.read_array()?))
	}

	/// Read a little-endian `u32`.
	pub fn read_u32(&mut self) -> Result<u32> {
		Ok(u32::from_le_bytes(self.read_array()?))
	}

	/// Read a little-endian `i32`.
	pub fn read_i32(&mut self) -> Result<i32> {
		Ok(i32::from_le_bytes(self.read_array()?))
	}

	/// Read a little-endian `f32`.
	pub fn read_f32(&mut self) -> Result<f32> {
		Ok(f32::from_le_bytes(self.read_array()?))
	}

	/// Read an `i32` count for `table` and validate it against `options`.
	pub fn read_count(&mut self, table: &'static str, options: &DecodeOptions) -> Result<usize> {
		let raw = self.read_i32()?;
		options.count(table, raw)
	}

	/// Read `count` elements with `read`, reserving no more than the stream can hold.
	pub fn read_vec<T>(&mut self, count: usize, elem_size: usize, mut read: impl FnMut(&mut Self) -> Result<T>) -> Result<Vec<T>> {
		let mut out = Vec::with_capacity(count.min(self.remaining() / elem_size.max(1)));
		for _ in 0..count {
			out.push(read(self)?);
		}
		Ok(out)
	}

	/// Read a string stored as one length byte followed by that many bytes, no terminator.
	pub fn read_pascal_string(&mut self) -> Result<String> {
		let len = usize::from(self.read_u8()?);
		let raw = self.read_exact(len)?;
		Ok(String::from_utf8_lossy(raw).into_owned())
	}
}

#[cfg(test)]
mod tests {
	use crate::dts::bytes::Cursor;
	use crate::dts::{ShapeError, Stream};

	#[test]
	fn reads_little_endian_scalars_in_order() {
		let mut bytes = Vec::new();
		bytes.extend_from_slice(&0x1122_3344_u32.to_le_bytes());
		bytes.extend_from_slice(&(-7_i32).to_le_bytes());
		bytes.extend_from_slice(&1.5_f32.to_le_bytes());
		bytes.push(0xFF);

		let mut cursor = Cursor::new(&bytes);
		assert_eq!(cursor.read_u32().expect("u32"), 0x1122_3344);
		assert_eq!(cursor.read_i32().expect("i32"), -7);
		assert_eq!(cursor.read_f32().expect("f32"), 1.5);
		assert_eq!(cursor.read_i8().expect("i8"), -1);
		assert_eq!(cursor.remaining(), 0);
	}

	#[test]
	fn short_read_fails_without_advancing() {
		let bytes = [1_u8, 2, 3];
		let mut cursor = Cursor::new(&bytes);
		let err = cursor.read_u32().expect_err("three bytes cannot hold a u32");
		assert!(matches!(
			err,
			ShapeError::OutOfData {
				stream: Stream::Top,
				at: 0,
				need: 4,
				rem: 3
			}
		));
		assert_eq!(cursor.pos(), 0);
	}

	#[test]
	fn pascal_string_uses_one_byte_length_without_terminator() {
		let bytes = [5_u8, b'g', b'r', b'a', b's', b's', 0xAA];
		let mut cursor = Cursor::new(&bytes);
		assert_eq!(cursor.read_pascal_string().expect("string parses"), "grass");
		assert_eq!(cursor.read_u8().expect("next byte untouched"), 0xAA);
	}

	#[test]
	fn pascal_string_longer_than_stream_is_out_of_data() {
		let bytes = [4_u8, b'a', b'b'];
		let mut cursor = Cursor::new(&bytes);
		let err = cursor.read_pascal_string().expect_err("truncated string should fail");
		assert!(matches!(err, ShapeError::OutOfData { need: 4, rem: 2, .. }));
	}
}
