use crate::dts::{Result, ShapeError};

/// Runtime limits and behavior switches for shape decoding.
#[derive(Debug, Clone)]
pub struct DecodeOptions {
	/// Maximum element count accepted for any declared table.
	pub max_elements: usize,
	/// Error when bytes remain after the material section.
	pub strict_trailing: bool,
}

impl Default for DecodeOptions {
	fn default() -> Self {
		Self {
			max_elements: 16 * 1024 * 1024,
			strict_trailing: false,
		}
	}
}

impl DecodeOptions {
	/// Validate a stored signed count for `table` and widen it.
	pub fn count(&self, table: &'static str, raw: i32) -> Result<usize> {
		let count = usize::try_from(raw).map_err(|_| ShapeError::NegativeCount { table, count: raw })?;
		if count > self.max_elements {
			return Err(ShapeError::CountTooLarge {
				table,
				count,
				max: self.max_elements,
			});
		}
		Ok(count)
	}
}
