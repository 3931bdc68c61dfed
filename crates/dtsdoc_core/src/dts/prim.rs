//! Fixed-width value readers layered on the lane cursors.

use glam::{Mat4, Quat, Vec2, Vec3};

use crate::dts::{Bounds, DecodeOptions, Lane, Result, ShapeError, Stream};

/// Scale of the signed 16-bit quaternion components.
const QUAT16_MAX: f32 = 32767.0;

impl Lane<'_, u32> {
	/// Read an `i32`.
	pub fn read_i32(&mut self) -> Result<i32> {
		Ok(self.read()? as i32)
	}

	/// Read an `f32`.
	pub fn read_f32(&mut self) -> Result<f32> {
		Ok(f32::from_bits(self.read()?))
	}

	/// Read a 32-bit boolean (nonzero is `true`).
	pub fn read_bool(&mut self) -> Result<bool> {
		Ok(self.read()? != 0)
	}

	/// Read an `i32` count for `table` and validate it against `options`.
	pub fn read_count(&mut self, table: &'static str, options: &DecodeOptions) -> Result<usize> {
		let raw = self.read_i32()?;
		options.count(table, raw)
	}

	/// Read two consecutive `f32` values.
	pub fn read_vec2(&mut self) -> Result<Vec2> {
		Ok(Vec2::new(self.read_f32()?, self.read_f32()?))
	}

	/// Read three consecutive `f32` values.
	pub fn read_vec3(&mut self) -> Result<Vec3> {
		Ok(Vec3::new(self.read_f32()?, self.read_f32()?, self.read_f32()?))
	}

	/// Read a `{min, max}` axis-aligned box.
	pub fn read_bounds(&mut self) -> Result<Bounds> {
		Ok(Bounds {
			min: self.read_vec3()?,
			max: self.read_vec3()?,
		})
	}

	/// Read a 4x4 matrix stored as 16 row-major `f32` values.
	pub fn read_mat4(&mut self) -> Result<Mat4> {
		let mut values = [0.0_f32; 16];
		for value in &mut values {
			*value = self.read_f32()?;
		}
		Ok(Mat4::from_cols_array(&values).transpose())
	}

	/// Read `count` consecutive `i32` values.
	pub fn read_i32s(&mut self, count: usize) -> Result<Vec<i32>> {
		self.read_records(count, 1, Self::read_i32)
	}

	/// Read `count` consecutive `u32` values.
	pub fn read_u32s(&mut self, count: usize) -> Result<Vec<u32>> {
		self.read_records(count, 1, Self::read)
	}

	/// Read `count` consecutive `f32` values.
	pub fn read_f32s(&mut self, count: usize) -> Result<Vec<f32>> {
		self.read_records(count, 1, Self::read_f32)
	}

	/// Read `count` consecutive 2-component vectors.
	pub fn read_vec2s(&mut self, count: usize) -> Result<Vec<Vec2>> {
		self.read_records(count, 2, Self::read_vec2)
	}

	/// Read `count` consecutive 3-component vectors.
	pub fn read_vec3s(&mut self, count: usize) -> Result<Vec<Vec3>> {
		self.read_records(count, 3, Self::read_vec3)
	}

	/// Read a count for `table` followed by that many `i32` values.
	pub fn read_counted_i32s(&mut self, table: &'static str, options: &DecodeOptions) -> Result<Vec<i32>> {
		let count = self.read_count(table, options)?;
		self.read_i32s(count)
	}
}

impl Lane<'_, u16> {
	/// Read an `i16`.
	pub fn read_i16(&mut self) -> Result<i16> {
		Ok(self.read()? as i16)
	}

	/// Read `count` consecutive `i16` values.
	pub fn read_i16s(&mut self, count: usize) -> Result<Vec<i16>> {
		self.read_records(count, 1, Self::read_i16)
	}

	/// Read a quaternion packed as four signed shorts `{x, y, z, w}`.
	pub fn read_quat16(&mut self) -> Result<Quat> {
		let x = self.read_i16()?;
		let y = self.read_i16()?;
		let z = self.read_i16()?;
		let w = self.read_i16()?;
		Ok(quat_from_i16([x, y, z, w]))
	}

	/// Read `count` packed quaternions.
	pub fn read_quat16s(&mut self, count: usize) -> Result<Vec<Quat>> {
		self.read_records(count, 4, Self::read_quat16)
	}
}

impl Lane<'_, u8> {
	/// Read `count` raw bytes.
	pub fn read_bytes(&mut self, count: usize) -> Result<Vec<u8>> {
		Ok(self.take(count)?.to_vec())
	}

	/// Read a NUL-terminated string, consuming the terminator.
	pub fn read_cstring(&mut self) -> Result<String> {
		let rest = self.rest();
		let Some(len) = rest.iter().position(|byte| *byte == 0) else {
			return Err(ShapeError::OutOfData {
				stream: Stream::Lane8,
				at: self.offset(),
				need: rest.len() + 1,
				rem: rest.len(),
			});
		};
		let raw = self.take(len + 1)?;
		Ok(String::from_utf8_lossy(&raw[..len]).into_owned())
	}
}

/// Build a unit quaternion from four signed-short components.
///
/// A zero-length input decodes as identity.
pub fn quat_from_i16(raw: [i16; 4]) -> Quat {
	let [x, y, z, w] = raw.map(|item| f32::from(item) / QUAT16_MAX);
	let quat = Quat::from_xyzw(x, y, z, w);
	let len = quat.length();
	if len <= f32::EPSILON { Quat::IDENTITY } else { quat / len }
}
