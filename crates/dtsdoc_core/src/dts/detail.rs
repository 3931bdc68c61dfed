use serde::Serialize;

use crate::dts::{FormatRules, Lane, Result};

/// Billboard tessellation parameters (v26+).
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct BillboardDetail {
	/// Billboard texture dimension.
	pub dimension: i32,
	/// Detail level rendered into the billboard.
	pub detail_level: i32,
	/// Steps around the equator.
	pub equator_steps: u32,
	/// Steps from pole to pole.
	pub polar_steps: u32,
	/// Polar angle.
	pub polar_angle: f32,
	/// Whether the poles are rendered.
	pub include_poles: bool,
}

/// One detail level.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Detail {
	/// Index into the name table.
	pub name: i32,
	/// Subshape rendered at this level.
	pub subshape: i32,
	/// Object detail number.
	pub object_detail: i32,
	/// Minimum pixel size for this level.
	pub size: f32,
	/// Average error.
	pub average_error: f32,
	/// Maximum error.
	pub max_error: f32,
	/// Polygon count.
	pub poly_count: i32,
	/// Billboard parameters, present from v26.
	pub billboard: Option<BillboardDetail>,
	/// Fade-in alpha, read from the trailing per-detail array.
	pub alpha_in: f32,
	/// Fade-out alpha, read from the trailing per-detail array.
	pub alpha_out: f32,
}

impl Detail {
	fn read(lane: &mut Lane<'_, u32>, rules: FormatRules) -> Result<Self> {
		let name = lane.read_i32()?;
		let subshape = lane.read_i32()?;
		let object_detail = lane.read_i32()?;
		let size = lane.read_f32()?;
		let average_error = lane.read_f32()?;
		let max_error = lane.read_f32()?;
		let poly_count = lane.read_i32()?;

		let billboard = if rules.detail_billboard {
			Some(BillboardDetail {
				dimension: lane.read_i32()?,
				detail_level: lane.read_i32()?,
				equator_steps: lane.read()?,
				polar_steps: lane.read()?,
				polar_angle: lane.read_f32()?,
				include_poles: lane.read_bool()?,
			})
		} else {
			None
		};

		Ok(Self {
			name,
			subshape,
			object_detail,
			size,
			average_error,
			max_error,
			poly_count,
			billboard,
			alpha_in: 0.0,
			alpha_out: 0.0,
		})
	}
}

/// Read `count` detail records.
pub fn read_details(lane: &mut Lane<'_, u32>, count: usize, rules: FormatRules) -> Result<Vec<Detail>> {
	let words = if rules.detail_billboard { 13 } else { 7 };
	lane.read_records(count, words, |lane| Detail::read(lane, rules))
}

/// Read the trailing alpha-in and alpha-out arrays into `details`.
pub fn read_detail_alphas(lane: &mut Lane<'_, u32>, details: &mut [Detail]) -> Result<()> {
	for detail in details.iter_mut() {
		detail.alpha_in = lane.read_f32()?;
	}
	for detail in details.iter_mut() {
		detail.alpha_out = lane.read_f32()?;
	}
	Ok(())
}

#[cfg(test)]
mod tests {
	use crate::dts::detail::{read_detail_alphas, read_details};
	use crate::dts::{FormatRules, Lane, ShapeError};

	fn detail_words(billboard: bool) -> Vec<u8> {
		let mut bytes = Vec::new();
		for value in [2_i32, 0, -1] {
			bytes.extend_from_slice(&value.to_le_bytes());
		}
		for value in [64.0_f32, 0.5, 1.0] {
			bytes.extend_from_slice(&value.to_le_bytes());
		}
		bytes.extend_from_slice(&120_i32.to_le_bytes());
		if billboard {
			for value in [128_u32, 1, 4, 3] {
				bytes.extend_from_slice(&value.to_le_bytes());
			}
			bytes.extend_from_slice(&0.25_f32.to_le_bytes());
			bytes.extend_from_slice(&1_u32.to_le_bytes());
		}
		bytes
	}

	#[test]
	fn v25_detail_has_no_billboard_fields() {
		let bytes = detail_words(false);
		let mut lane = Lane::<u32>::new(&bytes, 0);
		let rules = FormatRules::lookup(25).expect("v25 supported");
		let details = read_details(&mut lane, 1, rules).expect("detail parses");
		assert_eq!(details[0].poly_count, 120);
		assert_eq!(details[0].size, 64.0);
		assert!(details[0].billboard.is_none());
		assert_eq!(lane.remaining(), 0);
	}

	#[test]
	fn v26_detail_reads_six_billboard_fields() {
		let bytes = detail_words(true);
		let mut lane = Lane::<u32>::new(&bytes, 0);
		let rules = FormatRules::lookup(26).expect("v26 supported");
		let details = read_details(&mut lane, 1, rules).expect("detail parses");
		let billboard = details[0].billboard.expect("billboard present");
		assert_eq!(billboard.dimension, 128);
		assert_eq!(billboard.equator_steps, 4);
		assert_eq!(billboard.polar_steps, 3);
		assert_eq!(billboard.polar_angle, 0.25);
		assert!(billboard.include_poles);
		assert_eq!(lane.remaining(), 0);
	}

	#[test]
	fn v26_rules_on_v25_data_run_out() {
		let bytes = detail_words(false);
		let mut lane = Lane::<u32>::new(&bytes, 0);
		let rules = FormatRules::lookup(26).expect("v26 supported");
		assert!(matches!(read_details(&mut lane, 1, rules), Err(ShapeError::OutOfData { .. })));
	}

	#[test]
	fn alphas_are_two_parallel_arrays() {
		let mut bytes = detail_words(false);
		bytes.extend(detail_words(false));
		for value in [0.1_f32, 0.2, 0.8, 0.9] {
			bytes.extend_from_slice(&value.to_le_bytes());
		}
		let mut lane = Lane::<u32>::new(&bytes, 0);
		let rules = FormatRules::lookup(24).expect("v24 supported");
		let mut details = read_details(&mut lane, 2, rules).expect("details parse");
		read_detail_alphas(&mut lane, &mut details).expect("alphas parse");
		assert_eq!((details[0].alpha_in, details[0].alpha_out), (0.1, 0.8));
		assert_eq!((details[1].alpha_in, details[1].alpha_out), (0.2, 0.9));
	}
}
