//! Animation sequences from the top-level stream.

use serde::Serialize;

use crate::dts::bytes::Cursor;
use crate::dts::{DecodeOptions, Result};

/// Bitset selecting which entities a sequence animates.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct MattersSet {
	/// Leading size word as stored; readers ignore it.
	pub declared: i32,
	/// Bit words, least significant bit first.
	pub words: Vec<u32>,
}

impl MattersSet {
	/// Read the size word, the word count, and the words.
	pub(crate) fn read(cursor: &mut Cursor<'_>, options: &DecodeOptions) -> Result<Self> {
		let declared = cursor.read_i32()?;
		let count = cursor.read_count("sequence bitset words", options)?;
		let words = cursor.read_vec(count, 4, Cursor::read_u32)?;
		Ok(Self { declared, words })
	}

	/// Whether bit `index` is set.
	pub fn contains(&self, index: usize) -> bool {
		self.words.get(index / 32).is_some_and(|word| word & (1 << (index % 32)) != 0)
	}

	/// Number of set bits.
	pub fn len(&self) -> usize {
		self.words.iter().map(|word| word.count_ones() as usize).sum()
	}

	/// Whether no bit is set.
	pub fn is_empty(&self) -> bool {
		self.len() == 0
	}

	/// Indices of set bits in ascending order.
	pub fn iter(&self) -> impl Iterator<Item = usize> + '_ {
		self.words
			.iter()
			.enumerate()
			.flat_map(|(word_idx, word)| (0..32).filter(move |bit| word & (1 << bit) != 0).map(move |bit| word_idx * 32 + bit))
	}
}

/// Named bits of [`Sequence::flags`].
pub struct SequenceFlags;

impl SequenceFlags {
	/// Uses uniform scale keys.
	pub const UNIFORM_SCALE: u32 = 0x1;
	/// Uses aligned scale keys.
	pub const ALIGNED_SCALE: u32 = 0x2;
	/// Uses arbitrary scale keys.
	pub const ARBITRARY_SCALE: u32 = 0x4;
	/// Blend sequence.
	pub const BLEND: u32 = 0x8;
	/// Loops.
	pub const CYCLIC: u32 = 0x10;
	/// Ground transform forms a path.
	pub const MAKE_PATH: u32 = 0x20;
	/// Initializes IFL state.
	pub const IFL_INIT: u32 = 0x40;
	/// Animates translucent geometry.
	pub const HAS_TRANSLUCENCY: u32 = 0x80;

	const NAMES: [(u32, &'static str); 8] = [
		(Self::UNIFORM_SCALE, "uniform_scale"),
		(Self::ALIGNED_SCALE, "aligned_scale"),
		(Self::ARBITRARY_SCALE, "arbitrary_scale"),
		(Self::BLEND, "blend"),
		(Self::CYCLIC, "cyclic"),
		(Self::MAKE_PATH, "make_path"),
		(Self::IFL_INIT, "ifl_init"),
		(Self::HAS_TRANSLUCENCY, "translucency"),
	];

	/// Names of the bits set in `flags`.
	pub fn names(flags: u32) -> Vec<&'static str> {
		Self::NAMES.iter().filter(|(bit, _)| flags & bit != 0).map(|(_, name)| *name).collect()
	}
}

/// A `{first, count}` window into one keyframe array.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct KeyRange {
	/// First keyframe index.
	pub first: i32,
	/// Number of keyframes.
	pub count: i32,
}

/// A named animation clip.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Sequence {
	/// Index into the name table.
	pub name: i32,
	/// Sequence flag bits, see [`SequenceFlags`].
	pub flags: u32,
	/// Keyframes per animated track.
	pub num_keyframes: i32,
	/// Duration in seconds.
	pub duration: f32,
	/// Blend priority.
	pub priority: i32,
	/// Ground transform keyframe window.
	pub ground_frames: KeyRange,
	/// First node rotation keyframe.
	pub base_rotation: i32,
	/// First node translation keyframe.
	pub base_translation: i32,
	/// First node scale keyframe.
	pub base_scale: i32,
	/// First object state keyframe.
	pub base_object_state: i32,
	/// First decal state keyframe (deprecated).
	pub base_decal_state: i32,
	/// Trigger window.
	pub triggers: KeyRange,
	/// Start of the sequence on the exporting tool's timeline.
	pub tool_begin: f32,
	/// Animated node rotations.
	pub rotation_matters: MattersSet,
	/// Animated node translations.
	pub translation_matters: MattersSet,
	/// Animated node scales.
	pub scale_matters: MattersSet,
	/// Animated decals (deprecated).
	pub decal_matters: MattersSet,
	/// Animated IFL materials.
	pub ifl_matters: MattersSet,
	/// Animated object visibility.
	pub vis_matters: MattersSet,
	/// Animated mesh vertex frames.
	pub frame_matters: MattersSet,
	/// Animated mesh UV frames.
	pub mat_frame_matters: MattersSet,
}

impl Sequence {
	/// Read one sequence record and its eight bitsets.
	pub(crate) fn read(cursor: &mut Cursor<'_>, options: &DecodeOptions) -> Result<Self> {
		let name = cursor.read_i32()?;
		let flags = cursor.read_u32()?;
		let num_keyframes = cursor.read_i32()?;
		let duration = cursor.read_f32()?;
		let priority = cursor.read_i32()?;
		let ground_frames = KeyRange {
			first: cursor.read_i32()?,
			count: cursor.read_i32()?,
		};
		let base_rotation = cursor.read_i32()?;
		let base_translation = cursor.read_i32()?;
		let base_scale = cursor.read_i32()?;
		let base_object_state = cursor.read_i32()?;
		let base_decal_state = cursor.read_i32()?;
		let triggers = KeyRange {
			first: cursor.read_i32()?,
			count: cursor.read_i32()?,
		};
		let tool_begin = cursor.read_f32()?;

		Ok(Self {
			name,
			flags,
			num_keyframes,
			duration,
			priority,
			ground_frames,
			base_rotation,
			base_translation,
			base_scale,
			base_object_state,
			base_decal_state,
			triggers,
			tool_begin,
			rotation_matters: MattersSet::read(cursor, options)?,
			translation_matters: MattersSet::read(cursor, options)?,
			scale_matters: MattersSet::read(cursor, options)?,
			decal_matters: MattersSet::read(cursor, options)?,
			ifl_matters: MattersSet::read(cursor, options)?,
			vis_matters: MattersSet::read(cursor, options)?,
			frame_matters: MattersSet::read(cursor, options)?,
			mat_frame_matters: MattersSet::read(cursor, options)?,
		})
	}

	/// Whether `flag` (a [`SequenceFlags`] constant) is set.
	pub fn has_flag(&self, flag: u32) -> bool {
		self.flags & flag != 0
	}

	/// The eight bitsets with stable labels, in stored order.
	pub fn matters(&self) -> [(&'static str, &MattersSet); 8] {
		[
			("rotation", &self.rotation_matters),
			("translation", &self.translation_matters),
			("scale", &self.scale_matters),
			("decal", &self.decal_matters),
			("ifl", &self.ifl_matters),
			("vis", &self.vis_matters),
			("frame", &self.frame_matters),
			("mat_frame", &self.mat_frame_matters),
		]
	}
}

/// Read `count` sequences.
pub(crate) fn read_sequences(cursor: &mut Cursor<'_>, count: usize, options: &DecodeOptions) -> Result<Vec<Sequence>> {
	cursor.read_vec(count, 15 * 4 + 8 * 8, |cursor| Sequence::read(cursor, options))
}
