use std::marker::PhantomData;

use crate::dts::{GuardTracker, LaneLayout, Result, ShapeError, Stream};

/// Element type of one lane of the packed region.
pub trait LaneWord: Copy + Into<u32> {
	/// Element width in bytes.
	const WIDTH: usize;
	/// Stream label used in errors.
	const STREAM: Stream;

	/// Decode one element from exactly [`Self::WIDTH`] little-endian bytes.
	fn from_le_slice(raw: &[u8]) -> Self;

	/// Reinterpret a 32-bit counter at this lane's width.
	fn truncate(value: u32) -> Self;
}

impl LaneWord for u32 {
	const WIDTH: usize = 4;
	const STREAM: Stream = Stream::Lane32;

	fn from_le_slice(raw: &[u8]) -> Self {
		let mut buf = [0_u8; 4];
		buf.copy_from_slice(raw);
		u32::from_le_bytes(buf)
	}

	fn truncate(value: u32) -> Self {
		value
	}
}

impl LaneWord for u16 {
	const WIDTH: usize = 2;
	const STREAM: Stream = Stream::Lane16;

	fn from_le_slice(raw: &[u8]) -> Self {
		let mut buf = [0_u8; 2];
		buf.copy_from_slice(raw);
		u16::from_le_bytes(buf)
	}

	fn truncate(value: u32) -> Self {
		value as u16
	}
}

impl LaneWord for u8 {
	const WIDTH: usize = 1;
	const STREAM: Stream = Stream::Lane8;

	fn from_le_slice(raw: &[u8]) -> Self {
		raw[0]
	}

	fn truncate(value: u32) -> Self {
		value as u8
	}
}

/// Bounds-checked read cursor over one lane, yielding fixed-width elements.
///
/// The lane borrows its sub-range of the input buffer; `base` is the absolute offset of
/// that sub-range so errors report positions in the input buffer.
#[derive(Debug)]
pub struct Lane<'a, W: LaneWord> {
	bytes: &'a [u8],
	base: usize,
	pos: usize,
	_word: PhantomData<W>,
}

impl<'a, W: LaneWord> Lane<'a, W> {
	/// Create a lane over `bytes`, located at absolute offset `base`.
	pub fn new(bytes: &'a [u8], base: usize) -> Self {
		Self {
			bytes,
			base,
			pos: 0,
			_word: PhantomData,
		}
	}

	/// Absolute offset of the next unread element.
	pub fn offset(&self) -> usize {
		self.base + self.pos
	}

	/// Remaining unread bytes.
	pub fn remaining(&self) -> usize {
		self.bytes.len().saturating_sub(self.pos)
	}

	/// Remaining whole elements.
	pub fn remaining_words(&self) -> usize {
		self.remaining() / W::WIDTH
	}

	/// Unread bytes, without consuming them.
	pub fn rest(&self) -> &'a [u8] {
		&self.bytes[self.pos.min(self.bytes.len())..]
	}

	/// Consume `words` elements and return their raw bytes.
	pub fn take(&mut self, words: usize) -> Result<&'a [u8]> {
		let need = words.checked_mul(W::WIDTH).ok_or(ShapeError::OutOfData {
			stream: W::STREAM,
			at: self.offset(),
			need: usize::MAX,
			rem: self.remaining(),
		})?;
		if need > self.remaining() {
			return Err(ShapeError::OutOfData {
				stream: W::STREAM,
				at: self.offset(),
				need,
				rem: self.remaining(),
			});
		}

		let start = self.pos;
		self.pos += need;
		Ok(&self.bytes[start..self.pos])
	}

	/// Read one element.
	pub fn read(&mut self) -> Result<W> {
		let raw = self.take(1)?;
		Ok(W::from_le_slice(raw))
	}

	/// Read `count` records with `read`, each spanning `words` lane elements.
	///
	/// Capacity is reserved only for records the lane could still hold, so a corrupt count
	/// fails on the read instead of on allocation.
	pub fn read_records<T>(&mut self, count: usize, words: usize, mut read: impl FnMut(&mut Self) -> Result<T>) -> Result<Vec<T>> {
		let mut out = Vec::with_capacity(count.min(self.remaining_words() / words.max(1)));
		for _ in 0..count {
			out.push(read(self)?);
		}
		Ok(out)
	}
}

/// The three lanes of the packed region plus the guard counter for one decode pass.
pub struct Lanes<'a> {
	/// 32-bit word lane.
	pub l32: Lane<'a, u32>,
	/// 16-bit word lane.
	pub l16: Lane<'a, u16>,
	/// 8-bit byte lane.
	pub l8: Lane<'a, u8>,
	guard: GuardTracker,
}

impl<'a> Lanes<'a> {
	/// Carve the packed `region` (starting at absolute offset `base`) into its three lanes.
	pub fn split(region: &'a [u8], base: usize, layout: LaneLayout) -> Result<Self> {
		let invalid = || ShapeError::InvalidLaneLayout {
			total_words: layout.total_words,
			start16: layout.start16,
			start8: layout.start8,
		};

		let end32 = layout.lane32_bytes();
		let end16 = end32.checked_add(layout.lane16_bytes().ok_or_else(invalid)?).ok_or_else(invalid)?;
		let end8 = end16.checked_add(layout.lane8_bytes().ok_or_else(invalid)?).ok_or_else(invalid)?;
		if end8 != region.len() {
			return Err(invalid());
		}

		Ok(Self {
			l32: Lane::new(&region[..end32], base),
			l16: Lane::new(&region[end32..end16], base + end32),
			l8: Lane::new(&region[end16..end8], base + end16),
			guard: GuardTracker::new(),
		})
	}

	/// Run one guard checkpoint across all three lanes.
	pub fn checkpoint(&mut self) -> Result<()> {
		self.guard.checkpoint(&mut self.l32, &mut self.l16, &mut self.l8)
	}

	/// Number of checkpoints passed so far.
	pub fn checkpoints(&self) -> u32 {
		self.guard.count()
	}
}

#[cfg(test)]
mod tests;
