use glam::Vec3;
use serde::Serialize;

use crate::dts::bytes::Cursor;
use crate::dts::{Bounds, DecodeOptions, FormatRules, Lane, Result, ShapeError};

/// Word offsets that split the packed region into its three lanes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct LaneLayout {
	/// Size of the whole packed region in 32-bit words.
	pub total_words: u32,
	/// Word offset where the 16-bit lane begins.
	pub start16: u32,
	/// Word offset where the 8-bit lane begins.
	pub start8: u32,
}

impl LaneLayout {
	/// Size of the packed region in bytes.
	pub fn region_bytes(self) -> usize {
		words_to_bytes(self.total_words)
	}

	/// Size of the 32-bit lane in bytes.
	pub fn lane32_bytes(self) -> usize {
		words_to_bytes(self.start16)
	}

	/// Size of the 16-bit lane in bytes, `None` when offsets are reversed.
	pub fn lane16_bytes(self) -> Option<usize> {
		self.start8.checked_sub(self.start16).map(words_to_bytes)
	}

	/// Size of the 8-bit lane in bytes, `None` when offsets are reversed.
	pub fn lane8_bytes(self) -> Option<usize> {
		self.total_words.checked_sub(self.start8).map(words_to_bytes)
	}

	fn validate(self) -> Result<Self> {
		if self.start16 > self.start8 || self.start8 > self.total_words {
			return Err(ShapeError::InvalidLaneLayout {
				total_words: self.total_words,
				start16: self.start16,
				start8: self.start8,
			});
		}
		Ok(self)
	}
}

fn words_to_bytes(words: u32) -> usize {
	words as usize * 4
}

/// Leading fields of the top-level stream.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct FileHeader {
	/// Format revision (low 16 bits of the first word).
	pub version: u16,
	/// Exporter revision (high 16 bits of the first word).
	pub exporter_version: u16,
	/// Packed-region lane boundaries.
	pub layout: LaneLayout,
}

impl FileHeader {
	/// Size of the file header in bytes.
	pub const SIZE: usize = 16;

	/// Parse the version word and lane layout from the cursor.
	///
	/// The version is checked before any other field is read.
	pub(crate) fn parse(cursor: &mut Cursor<'_>) -> Result<(Self, FormatRules)> {
		let word = cursor.read_u32()?;
		let version = (word & 0xFFFF) as u16;
		let exporter_version = (word >> 16) as u16;
		let rules = FormatRules::for_version(version)?;

		let layout = LaneLayout {
			total_words: cursor.read_u32()?,
			start16: cursor.read_u32()?,
			start8: cursor.read_u32()?,
		}
		.validate()?;

		Ok((
			Self {
				version,
				exporter_version,
				layout,
			},
			rules,
		))
	}
}

/// Table sizes declared at the start of the packed region.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ShapeCounts {
	/// Nodes in the shape.
	pub nodes: usize,
	/// Objects in the shape.
	pub objects: usize,
	/// Decals in the shape (deprecated).
	pub decals: usize,
	/// Subshapes in the shape.
	pub subshapes: usize,
	/// IFL materials in the shape.
	pub ifl_materials: usize,
	/// Node rotation keyframes (all sequences).
	pub node_rotations: usize,
	/// Node translation keyframes (all sequences).
	pub node_translations: usize,
	/// Node uniform scale keyframes.
	pub node_uniform_scales: usize,
	/// Node aligned scale keyframes.
	pub node_aligned_scales: usize,
	/// Node arbitrary scale keyframes.
	pub node_arbitrary_scales: usize,
	/// Ground transform keyframes.
	pub ground_frames: usize,
	/// Object state keyframes.
	pub object_states: usize,
	/// Decal state keyframes.
	pub decal_states: usize,
	/// Triggers (all sequences).
	pub triggers: usize,
	/// Detail levels.
	pub details: usize,
	/// Meshes (all detail levels).
	pub meshes: usize,
	/// Name strings.
	pub names: usize,
}

impl ShapeCounts {
	/// Read the 17 declared counts in format order.
	pub fn read(lane: &mut Lane<'_, u32>, options: &DecodeOptions) -> Result<Self> {
		Ok(Self {
			nodes: lane.read_count("nodes", options)?,
			objects: lane.read_count("objects", options)?,
			decals: lane.read_count("decals", options)?,
			subshapes: lane.read_count("subshapes", options)?,
			ifl_materials: lane.read_count("ifl materials", options)?,
			node_rotations: lane.read_count("node rotations", options)?,
			node_translations: lane.read_count("node translations", options)?,
			node_uniform_scales: lane.read_count("node uniform scales", options)?,
			node_aligned_scales: lane.read_count("node aligned scales", options)?,
			node_arbitrary_scales: lane.read_count("node arbitrary scales", options)?,
			ground_frames: lane.read_count("ground frames", options)?,
			object_states: lane.read_count("object states", options)?,
			decal_states: lane.read_count("decal states", options)?,
			triggers: lane.read_count("triggers", options)?,
			details: lane.read_count("details", options)?,
			meshes: lane.read_count("meshes", options)?,
			names: lane.read_count("names", options)?,
		})
	}
}

/// Smallest-visible-detail info that trails the counts.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SmallestVisible {
	/// Size of the smallest visible detail level.
	pub size: f32,
	/// Index of the smallest visible detail level.
	pub detail: i32,
}

impl SmallestVisible {
	/// Read size then detail index.
	pub fn read(lane: &mut Lane<'_, u32>) -> Result<Self> {
		Ok(Self {
			size: lane.read_f32()?,
			detail: lane.read_i32()?,
		})
	}
}

/// Whole-shape bounding volumes.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ShapeBounds {
	/// Bounding sphere radius.
	pub radius: f32,
	/// Bounding cylinder radius.
	pub tube_radius: f32,
	/// Center of the bounds.
	pub center: Vec3,
	/// Axis-aligned bounding box.
	pub bounds: Bounds,
}

impl ShapeBounds {
	/// Read radius, tube radius, center, and box.
	pub fn read(lane: &mut Lane<'_, u32>) -> Result<Self> {
		Ok(Self {
			radius: lane.read_f32()?,
			tube_radius: lane.read_f32()?,
			center: lane.read_vec3()?,
			bounds: lane.read_bounds()?,
		})
	}
}
