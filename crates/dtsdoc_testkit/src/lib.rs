//! Shared test helpers for building synthetic shape files.

/// Appends values to the three packed-region lanes and numbers guard checkpoints.
#[derive(Debug, Default, Clone)]
pub struct LaneWriter {
	/// 32-bit lane words.
	pub l32: Vec<u32>,
	/// 16-bit lane words.
	pub l16: Vec<u16>,
	/// 8-bit lane bytes.
	pub l8: Vec<u8>,
	guards: Vec<usize>,
}

impl LaneWriter {
	/// Create an empty writer.
	pub fn new() -> Self {
		Self::default()
	}

	/// Push a raw 32-bit word.
	pub fn u32(&mut self, value: u32) -> &mut Self {
		self.l32.push(value);
		self
	}

	/// Push an `i32` on the 32-bit lane.
	pub fn i32(&mut self, value: i32) -> &mut Self {
		self.u32(value as u32)
	}

	/// Push an `f32` on the 32-bit lane.
	pub fn f32(&mut self, value: f32) -> &mut Self {
		self.u32(value.to_bits())
	}

	/// Push two `f32` values.
	pub fn vec2(&mut self, value: [f32; 2]) -> &mut Self {
		value.into_iter().fold(self, |lanes, item| lanes.f32(item))
	}

	/// Push three `f32` values.
	pub fn vec3(&mut self, value: [f32; 3]) -> &mut Self {
		value.into_iter().fold(self, |lanes, item| lanes.f32(item))
	}

	/// Push an `i16` on the 16-bit lane.
	pub fn i16(&mut self, value: i16) -> &mut Self {
		self.l16.push(value as u16);
		self
	}

	/// Push four `i16` quaternion components on the 16-bit lane.
	pub fn quat16(&mut self, value: [i16; 4]) -> &mut Self {
		value.into_iter().fold(self, |lanes, item| lanes.i16(item))
	}

	/// Push a byte on the 8-bit lane.
	pub fn u8(&mut self, value: u8) -> &mut Self {
		self.l8.push(value);
		self
	}

	/// Push a NUL-terminated string on the 8-bit lane.
	pub fn cstr(&mut self, value: &str) -> &mut Self {
		self.l8.extend_from_slice(value.as_bytes());
		self.u8(0)
	}

	/// Write the next guard value to all three lanes.
	pub fn guard(&mut self) -> &mut Self {
		let value = self.guards.len() as u32;
		self.guard_with(value)
	}

	/// Write `value` (truncated per lane) where the next guard belongs.
	pub fn guard_with(&mut self, value: u32) -> &mut Self {
		self.guards.push(self.l32.len());
		self.l32.push(value);
		self.l16.push(value as u16);
		self.l8.push(value as u8);
		self
	}

	/// Number of guards written so far.
	pub fn guards(&self) -> u32 {
		self.guards.len() as u32
	}

	/// Index into [`LaneWriter::l32`] of each guard, in write order.
	pub fn guard_positions(&self) -> &[usize] {
		&self.guards
	}

	/// Serialize the lanes into a packed region, padding the 16- and 8-bit lanes to whole words.
	///
	/// Returns the region bytes plus `(total_words, start16, start8)`.
	pub fn region(&self) -> (Vec<u8>, [u32; 3]) {
		let mut bytes: Vec<u8> = self.l32.iter().flat_map(|word| word.to_le_bytes()).collect();
		bytes.extend(self.l16.iter().flat_map(|word| word.to_le_bytes()));
		pad_to_word(&mut bytes);
		let start8 = bytes.len() / 4;
		bytes.extend_from_slice(&self.l8);
		pad_to_word(&mut bytes);

		let layout = [(bytes.len() / 4) as u32, self.l32.len() as u32, start8 as u32];
		(bytes, layout)
	}
}

fn pad_to_word(bytes: &mut Vec<u8>) {
	while bytes.len() % 4 != 0 {
		bytes.push(0);
	}
}

/// Declared table sizes written at the start of the packed region.
#[derive(Debug, Default, Clone, Copy)]
#[allow(missing_docs)]
pub struct Counts {
	pub nodes: i32,
	pub objects: i32,
	pub decals: i32,
	pub subshapes: i32,
	pub ifl_materials: i32,
	pub node_rotations: i32,
	pub node_translations: i32,
	pub node_uniform_scales: i32,
	pub node_aligned_scales: i32,
	pub node_arbitrary_scales: i32,
	pub ground_frames: i32,
	pub object_states: i32,
	pub decal_states: i32,
	pub triggers: i32,
	pub details: i32,
	pub meshes: i32,
	pub names: i32,
}

impl Counts {
	fn in_order(&self) -> [i32; 17] {
		[
			self.nodes,
			self.objects,
			self.decals,
			self.subshapes,
			self.ifl_materials,
			self.node_rotations,
			self.node_translations,
			self.node_uniform_scales,
			self.node_aligned_scales,
			self.node_arbitrary_scales,
			self.ground_frames,
			self.object_states,
			self.decal_states,
			self.triggers,
			self.details,
			self.meshes,
			self.names,
		]
	}
}

/// Packed-region sections after the header, in stored order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[allow(missing_docs)]
pub enum Section {
	Nodes,
	Objects,
	Decals,
	IflMaterials,
	SubShapeStarts,
	SubShapeCounts,
	NodeKeyframes,
	Scales,
	Ground,
	ObjectStates,
	DecalStates,
	Triggers,
	Details,
	Meshes,
	Names,
	DetailAlphas,
}

impl Section {
	/// Every section in stored order.
	pub const ALL: [Section; 16] = [
		Section::Nodes,
		Section::Objects,
		Section::Decals,
		Section::IflMaterials,
		Section::SubShapeStarts,
		Section::SubShapeCounts,
		Section::NodeKeyframes,
		Section::Scales,
		Section::Ground,
		Section::ObjectStates,
		Section::DecalStates,
		Section::Triggers,
		Section::Details,
		Section::Meshes,
		Section::Names,
		Section::DetailAlphas,
	];
}

/// Write a complete packed region: counts, header values and guards, then each section
/// filled by `fill` and followed by a guard (except the trailing detail alphas).
pub fn write_lanes(counts: Counts, mut fill: impl FnMut(Section, &mut LaneWriter)) -> LaneWriter {
	let mut lanes = LaneWriter::new();
	for count in counts.in_order() {
		lanes.i32(count);
	}
	lanes.f32(0.0).i32(-1).guard();
	lanes.f32(1.0).f32(0.5).vec3([0.0; 3]).vec3([-1.0; 3]).vec3([1.0; 3]).guard();

	for section in Section::ALL {
		fill(section, &mut lanes);
		if section != Section::DetailAlphas {
			lanes.guard();
		}
	}
	lanes
}

/// Little-endian writer for the top-level stream after the packed region.
#[derive(Debug, Default, Clone)]
pub struct StreamWriter {
	/// Bytes written so far.
	pub bytes: Vec<u8>,
}

impl StreamWriter {
	/// Create an empty writer.
	pub fn new() -> Self {
		Self::default()
	}

	/// Push an `i32`.
	pub fn i32(&mut self, value: i32) -> &mut Self {
		self.bytes.extend_from_slice(&value.to_le_bytes());
		self
	}

	/// Push a `u32`.
	pub fn u32(&mut self, value: u32) -> &mut Self {
		self.bytes.extend_from_slice(&value.to_le_bytes());
		self
	}

	/// Push an `f32`.
	pub fn f32(&mut self, value: f32) -> &mut Self {
		self.bytes.extend_from_slice(&value.to_le_bytes());
		self
	}

	/// Push an `i8`.
	pub fn i8(&mut self, value: i8) -> &mut Self {
		self.bytes.push(value as u8);
		self
	}

	/// Push a length-prefixed string (one length byte, no terminator).
	pub fn pascal(&mut self, value: &str) -> &mut Self {
		self.bytes.push(value.len() as u8);
		self.bytes.extend_from_slice(value.as_bytes());
		self
	}

	/// Push a bitset: ignored size word, word count, words.
	pub fn bitset(&mut self, words: &[u32]) -> &mut Self {
		self.i32((words.len() * 32) as i32).i32(words.len() as i32);
		for word in words {
			self.u32(*word);
		}
		self
	}

	/// Push a sequence record with the given name, flags, and per-bitset words.
	pub fn sequence(&mut self, name: i32, flags: u32, matters: [&[u32]; 8]) -> &mut Self {
		self.i32(name).u32(flags).i32(4).f32(1.5).i32(0);
		for value in [0, 0, 0, 0, 0, 0, 0, 0, 0] {
			self.i32(value);
		}
		self.f32(0.0);
		for words in matters {
			self.bitset(words);
		}
		self
	}

	/// Push zero sequences and a material flag of 0.
	pub fn empty_tail(&mut self) -> &mut Self {
		self.i32(0).i8(0)
	}

	/// Push a material flag of 1 and a material list in the layout used by `version`.
	///
	/// The first material's reflectance map points at material 1; every other map is unset.
	pub fn materials(&mut self, version: u32, names: &[&str]) -> &mut Self {
		self.i8(1).i32(names.len() as i32);
		for name in names {
			self.pascal(name);
		}
		for _ in names {
			self.u32(0x4);
		}
		for index in 0..names.len() {
			self.i32(if index == 0 { 1 } else { -1 });
		}
		for _ in 0..names.len() * 2 {
			self.i32(-1);
		}
		if version == 25 {
			for _ in names {
				self.i32(0);
			}
		}
		for _ in names {
			self.f32(1.0);
		}
		for _ in names {
			self.f32(0.5);
		}
		self
	}
}

/// Assemble a shape file from a version word, packed lanes, and the trailing stream.
pub fn build_shape(version: u32, lanes: &LaneWriter, stream: &StreamWriter) -> Vec<u8> {
	let (region, [total, start16, start8]) = lanes.region();
	let mut bytes = Vec::with_capacity(16 + region.len() + stream.bytes.len());
	for word in [version, total, start16, start8] {
		bytes.extend_from_slice(&word.to_le_bytes());
	}
	bytes.extend_from_slice(&region);
	bytes.extend_from_slice(&stream.bytes);
	bytes
}

/// A shape with every table empty and nothing after the sequences count.
pub fn empty_shape(version: u32) -> Vec<u8> {
	let lanes = write_lanes(Counts::default(), |_, _| {});
	let mut stream = StreamWriter::new();
	stream.empty_tail();
	build_shape(version, &lanes, &stream)
}

const IDENTITY16: [i16; 4] = [0, 0, 0, 32767];

/// Table sizes of [`sample_shape`].
pub fn sample_counts() -> Counts {
	Counts {
		nodes: 2,
		objects: 1,
		subshapes: 1,
		ifl_materials: 1,
		node_rotations: 1,
		node_translations: 1,
		node_uniform_scales: 1,
		ground_frames: 1,
		object_states: 1,
		triggers: 1,
		details: 1,
		meshes: 2,
		names: 3,
		..Counts::default()
	}
}

/// Push a one-triangle standard mesh, type word and both guards included.
pub fn write_standard_mesh(lanes: &mut LaneWriter, version: u32) {
	lanes.u32(0).guard();
	lanes.i32(1).i32(1).i32(-1);
	lanes.vec3([-1.0; 3]).vec3([1.0; 3]).vec3([0.0; 3]).f32(1.0);
	lanes.i32(1).vec3([0.5, 0.5, 0.5]);
	lanes.i32(1).vec2([0.0, 1.0]);
	if version >= 26 {
		lanes.i32(0).i32(0);
	}
	lanes.vec3([0.0, 0.0, 1.0]);
	lanes.u8(3);
	lanes.i32(1);
	if version <= 24 {
		lanes.i16(0).i16(1).u32(0);
	} else {
		lanes.i32(0).i32(1).u32(0);
	}
	lanes.i32(1);
	if version <= 25 {
		lanes.i16(0);
	} else {
		lanes.i32(0);
	}
	lanes.i32(0).i32(1).u32(0);
	lanes.guard();
}

/// Packed region of [`sample_shape`].
///
/// Nodes `root` (0) and `child` (1, parented to 0), one object `body` with a standard
/// and a null mesh, one subshape, one detail, one trigger, and one keyframe per track.
pub fn sample_lanes(version: u32) -> LaneWriter {
	write_lanes(sample_counts(), |section, lanes| match section {
		Section::Nodes => {
			lanes.i32(0).i32(-1).i32(0).i32(1).i32(-1);
			lanes.i32(1).i32(0).i32(-1).i32(-1).i32(-1);
		}
		Section::Objects => {
			lanes.i32(2).i32(2).i32(0).i32(1).i32(-1).i32(-1);
		}
		Section::IflMaterials => {
			lanes.i32(2).i32(0).i32(0).i32(0).i32(1);
		}
		Section::SubShapeStarts => {
			lanes.i32(0).i32(0).i32(0);
		}
		Section::SubShapeCounts => {
			lanes.i32(2).i32(1).i32(0);
		}
		Section::NodeKeyframes => {
			lanes.quat16(IDENTITY16).quat16(IDENTITY16);
			lanes.vec3([0.0; 3]).vec3([0.0, 1.0, 0.0]);
			lanes.quat16([32767, 0, 0, 0]);
			lanes.vec3([1.0, 0.0, 0.0]);
		}
		Section::Scales => {
			lanes.f32(2.0);
		}
		Section::Ground => {
			lanes.vec3([0.0, 0.0, 1.0]).quat16(IDENTITY16);
		}
		Section::ObjectStates => {
			lanes.f32(1.0).i32(0).i32(0);
		}
		Section::Triggers => {
			lanes.u32(0x8000_0000 | 1).f32(0.5);
		}
		Section::Details => {
			lanes.i32(2).i32(0).i32(0).f32(64.0).f32(0.0).f32(0.0).i32(12);
			if version >= 26 {
				lanes.i32(64).i32(0).u32(4).u32(2).f32(0.25).u32(1);
			}
		}
		Section::Meshes => {
			write_standard_mesh(lanes, version);
			lanes.u32(4);
		}
		Section::Names => {
			lanes.cstr("root").cstr("child").cstr("body");
		}
		Section::DetailAlphas => {
			lanes.f32(1.0).f32(0.0);
		}
		_ => {}
	})
}

/// A small but complete shape: [`sample_lanes`], one cyclic sequence named `child`
/// (flags `0x11`), and materials `skin` and `env`.
pub fn sample_shape(version: u32) -> Vec<u8> {
	let mut stream = StreamWriter::new();
	stream.i32(1).sequence(1, 0x11, [&[0b10], &[], &[1], &[], &[], &[], &[], &[]]);
	stream.materials(version, &["skin", "env"]);
	build_shape(version, &sample_lanes(version), &stream)
}
