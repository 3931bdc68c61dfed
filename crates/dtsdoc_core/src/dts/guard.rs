use crate::dts::{Lane, LaneWord, Result, ShapeError};

/// Sequential guard counter cross-checked against the three lanes.
///
/// Each checkpoint reads one element from every lane; all three must equal the counter's
/// value before the checkpoint, reinterpreted at the lane's width.
#[derive(Debug, Default, Clone, Copy)]
pub struct GuardTracker {
	counter: u32,
}

impl GuardTracker {
	/// Start a tracker at zero.
	pub fn new() -> Self {
		Self::default()
	}

	/// Number of checkpoints run so far.
	pub fn count(&self) -> u32 {
		self.counter
	}

	/// Read one guard element from each lane and compare against the counter.
	pub fn checkpoint(&mut self, l32: &mut Lane<'_, u32>, l16: &mut Lane<'_, u16>, l8: &mut Lane<'_, u8>) -> Result<()> {
		let got32 = l32.read()?;
		let got16 = l16.read()?;
		let got8 = l8.read()?;

		let expected = self.counter;
		self.counter = self.counter.wrapping_add(1);

		if got32 != expected || got16 != u16::truncate(expected) || got8 != u8::truncate(expected) {
			return Err(ShapeError::GuardMismatch {
				expected,
				got32,
				got16,
				got8,
			});
		}
		Ok(())
	}
}
