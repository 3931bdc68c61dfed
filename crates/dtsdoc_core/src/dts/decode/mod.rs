use crate::dts::bytes::Cursor;
use crate::dts::detail::{read_detail_alphas, read_details};
use crate::dts::keyframe::{read_decal_states, read_ground_section, read_node_section, read_object_states, read_scale_section, read_triggers};
use crate::dts::mesh::read_mesh;
use crate::dts::sequence::read_sequences;
use crate::dts::topology::{read_decals, read_ifl_materials, read_nodes, read_objects, read_subshape_counts, read_subshape_starts};
use crate::dts::{
	Decal, DecodeOptions, DefaultPose, Detail, FileHeader, FormatRules, IflMaterial, Keyframes, Lanes, MaterialList, Mesh, Node, Object, Result, Shape,
	ShapeBounds, ShapeCounts, ShapeError, SmallestVisible, SubShape,
};

/// Decode a shape from an in-memory buffer with default options.
pub fn decode(bytes: &[u8]) -> Result<Shape> {
	decode_with(bytes, &DecodeOptions::default())
}

/// Decode a shape from an in-memory buffer.
///
/// Reads the file header, walks the packed region in format order with a guard checkpoint
/// between tables, then reads the sequences and the optional material list from the
/// unpacked stream that follows. Any failure aborts the whole decode.
pub fn decode_with(bytes: &[u8], options: &DecodeOptions) -> Result<Shape> {
	let mut cursor = Cursor::new(bytes);
	let (header, rules) = FileHeader::parse(&mut cursor)?;
	let base = cursor.pos();
	let region = cursor.read_exact(header.layout.region_bytes())?;
	tracing::debug!(
		version = header.version,
		exporter = header.exporter_version,
		total_words = header.layout.total_words,
		start16 = header.layout.start16,
		start8 = header.layout.start8,
		"shape header"
	);

	let mut lanes = Lanes::split(region, base, header.layout)?;
	let packed = read_packed(&mut lanes, rules, options)?;

	let sequence_count = cursor.read_count("sequences", options)?;
	let sequences = read_sequences(&mut cursor, sequence_count, options)?;
	let materials = read_material_section(&mut cursor, rules, options)?;

	let rem = cursor.remaining();
	if rem > 0 {
		if options.strict_trailing {
			return Err(ShapeError::TrailingData { at: cursor.pos(), rem });
		}
		tracing::warn!(at = cursor.pos(), rem, "ignoring trailing bytes");
	}

	tracing::debug!(
		nodes = packed.nodes.len(),
		meshes = packed.meshes.len(),
		sequences = sequences.len(),
		materials = materials.as_ref().map_or(0, MaterialList::len),
		checkpoints = lanes.checkpoints(),
		"shape decoded"
	);

	Ok(Shape {
		version: header.version,
		exporter_version: header.exporter_version,
		layout: header.layout,
		counts: packed.counts,
		smallest_visible: packed.smallest_visible,
		radius: packed.bounds.radius,
		tube_radius: packed.bounds.tube_radius,
		center: packed.bounds.center,
		bounds: packed.bounds.bounds,
		nodes: packed.nodes,
		objects: packed.objects,
		decals: packed.decals,
		ifl_materials: packed.ifl_materials,
		subshapes: packed.subshapes,
		default_pose: packed.default_pose,
		keyframes: packed.keyframes,
		details: packed.details,
		meshes: packed.meshes,
		names: packed.names,
		sequences,
		materials,
	})
}

struct Packed {
	counts: ShapeCounts,
	smallest_visible: SmallestVisible,
	bounds: ShapeBounds,
	nodes: Vec<Node>,
	objects: Vec<Object>,
	decals: Vec<Decal>,
	ifl_materials: Vec<IflMaterial>,
	subshapes: Vec<SubShape>,
	default_pose: DefaultPose,
	keyframes: Keyframes,
	details: Vec<Detail>,
	meshes: Vec<Mesh>,
	names: Vec<String>,
}

fn read_packed(lanes: &mut Lanes<'_>, rules: FormatRules, options: &DecodeOptions) -> Result<Packed> {
	let counts = ShapeCounts::read(&mut lanes.l32, options)?;
	let smallest_visible = SmallestVisible::read(&mut lanes.l32)?;
	lanes.checkpoint()?;
	let bounds = ShapeBounds::read(&mut lanes.l32)?;
	lanes.checkpoint()?;
	tracing::debug!(
		nodes = counts.nodes,
		objects = counts.objects,
		subshapes = counts.subshapes,
		details = counts.details,
		meshes = counts.meshes,
		names = counts.names,
		"table counts"
	);

	let nodes = read_nodes(&mut lanes.l32, counts.nodes)?;
	lanes.checkpoint()?;
	let objects = read_objects(&mut lanes.l32, counts.objects)?;
	lanes.checkpoint()?;
	let decals = read_decals(&mut lanes.l32, counts.decals)?;
	lanes.checkpoint()?;
	let ifl_materials = read_ifl_materials(&mut lanes.l32, counts.ifl_materials)?;
	lanes.checkpoint()?;
	let mut subshapes = read_subshape_starts(&mut lanes.l32, counts.subshapes)?;
	lanes.checkpoint()?;
	read_subshape_counts(&mut lanes.l32, &mut subshapes)?;
	lanes.checkpoint()?;

	let (default_pose, node_keys) = read_node_section(lanes, &counts)?;
	lanes.checkpoint()?;
	let scales = read_scale_section(lanes, &counts)?;
	lanes.checkpoint()?;
	let ground = read_ground_section(lanes, counts.ground_frames)?;
	lanes.checkpoint()?;
	let object_states = read_object_states(&mut lanes.l32, counts.object_states)?;
	lanes.checkpoint()?;
	let decal_states = read_decal_states(&mut lanes.l32, counts.decal_states)?;
	lanes.checkpoint()?;
	let triggers = read_triggers(&mut lanes.l32, counts.triggers)?;
	lanes.checkpoint()?;

	let mut details = read_details(&mut lanes.l32, counts.details, rules)?;
	lanes.checkpoint()?;

	// Every mesh costs at least its type word.
	let mut meshes = Vec::with_capacity(counts.meshes.min(lanes.l32.remaining_words()));
	for index in 0..counts.meshes {
		meshes.push(read_mesh(lanes, index, rules, options)?);
	}
	lanes.checkpoint()?;

	let names = lanes.l8.read_records(counts.names, 1, |lane| lane.read_cstring())?;
	lanes.checkpoint()?;

	read_detail_alphas(&mut lanes.l32, &mut details)?;

	Ok(Packed {
		counts,
		smallest_visible,
		bounds,
		nodes,
		objects,
		decals,
		ifl_materials,
		subshapes,
		default_pose,
		keyframes: Keyframes {
			nodes: node_keys,
			scales,
			ground,
			object_states,
			decal_states,
			triggers,
		},
		details,
		meshes,
		names,
	})
}

fn read_material_section(cursor: &mut Cursor<'_>, rules: FormatRules, options: &DecodeOptions) -> Result<Option<MaterialList>> {
	match cursor.read_i8()? {
		MaterialList::STREAM_TYPE => Ok(Some(MaterialList::read(cursor, rules, options)?)),
		0 => Ok(None),
		other => {
			tracing::warn!(flag = other, "unexpected material stream type, no materials read");
			Ok(None)
		}
	}
}
