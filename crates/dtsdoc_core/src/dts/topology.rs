//! Node, object, decal, IFL, and subshape tables.
//!
//! Index fields are stored as read (`-1` is the format's "none"); the decoder does not
//! check that they point inside their tables. See [`crate::dts::NodeTree`] for that.

use serde::Serialize;

use crate::dts::{Lane, Result};

/// One node of the implicit skeleton tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Node {
	/// Index into the name table.
	pub name: i32,
	/// Parent node index, `-1` for roots.
	pub parent: i32,
	/// First object attached to this node.
	pub first_object: i32,
	/// First child node.
	pub first_child: i32,
	/// Next sibling node.
	pub next_sibling: i32,
}

impl Node {
	fn read(lane: &mut Lane<'_, u32>) -> Result<Self> {
		Ok(Self {
			name: lane.read_i32()?,
			parent: lane.read_i32()?,
			first_object: lane.read_i32()?,
			first_child: lane.read_i32()?,
			next_sibling: lane.read_i32()?,
		})
	}
}

/// A renderable object owning a run of meshes (one per detail level).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Object {
	/// Index into the name table.
	pub name: i32,
	/// Number of meshes owned by this object.
	pub num_meshes: i32,
	/// First mesh index.
	pub start_mesh: i32,
	/// Owning node index.
	pub node: i32,
	/// Next object on the same node.
	pub next_sibling: i32,
	/// First decal (deprecated).
	pub first_decal: i32,
}

impl Object {
	fn read(lane: &mut Lane<'_, u32>) -> Result<Self> {
		Ok(Self {
			name: lane.read_i32()?,
			num_meshes: lane.read_i32()?,
			start_mesh: lane.read_i32()?,
			node: lane.read_i32()?,
			next_sibling: lane.read_i32()?,
			first_decal: lane.read_i32()?,
		})
	}
}

/// Deprecated decal record, kept as its five raw words.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Decal {
	/// Raw record words.
	pub raw: [i32; 5],
}

/// Image-flip-list material.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct IflMaterial {
	/// Index into the name table.
	pub name: i32,
	/// Material slot animated by this IFL.
	pub material_slot: i32,
	/// First frame.
	pub first_frame: i32,
	/// Index of the first frame's off-time.
	pub first_frame_off_time: i32,
	/// Number of frames.
	pub num_frames: i32,
}

impl IflMaterial {
	fn read(lane: &mut Lane<'_, u32>) -> Result<Self> {
		Ok(Self {
			name: lane.read_i32()?,
			material_slot: lane.read_i32()?,
			first_frame: lane.read_i32()?,
			first_frame_off_time: lane.read_i32()?,
			num_frames: lane.read_i32()?,
		})
	}
}

/// A `{first, count}` range over one table.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct TableRange {
	/// First index in the table.
	pub first: i32,
	/// Number of entries.
	pub count: i32,
}

/// Partition of the node/object/decal tables.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct SubShape {
	/// Node range.
	pub nodes: TableRange,
	/// Object range.
	pub objects: TableRange,
	/// Decal range.
	pub decals: TableRange,
}

/// Read `count` nodes.
pub fn read_nodes(lane: &mut Lane<'_, u32>, count: usize) -> Result<Vec<Node>> {
	lane.read_records(count, 5, Node::read)
}

/// Read `count` objects.
pub fn read_objects(lane: &mut Lane<'_, u32>, count: usize) -> Result<Vec<Object>> {
	lane.read_records(count, 6, Object::read)
}

/// Read `count` deprecated decals.
pub fn read_decals(lane: &mut Lane<'_, u32>, count: usize) -> Result<Vec<Decal>> {
	lane.read_records(count, 5, |lane| {
		let mut raw = [0_i32; 5];
		for value in &mut raw {
			*value = lane.read_i32()?;
		}
		Ok(Decal { raw })
	})
}

/// Read `count` IFL materials.
pub fn read_ifl_materials(lane: &mut Lane<'_, u32>, count: usize) -> Result<Vec<IflMaterial>> {
	lane.read_records(count, 5, IflMaterial::read)
}

/// Read the three first-index arrays (nodes, objects, decals) into fresh subshapes.
pub fn read_subshape_starts(lane: &mut Lane<'_, u32>, count: usize) -> Result<Vec<SubShape>> {
	let nodes = lane.read_i32s(count)?;
	let objects = lane.read_i32s(count)?;
	let decals = lane.read_i32s(count)?;

	Ok(nodes
		.into_iter()
		.zip(objects)
		.zip(decals)
		.map(|((node, object), decal)| SubShape {
			nodes: TableRange { first: node, count: 0 },
			objects: TableRange { first: object, count: 0 },
			decals: TableRange { first: decal, count: 0 },
		})
		.collect())
}

/// Read the three count arrays into subshapes produced by [`read_subshape_starts`].
pub fn read_subshape_counts(lane: &mut Lane<'_, u32>, subshapes: &mut [SubShape]) -> Result<()> {
	let count = subshapes.len();
	let nodes = lane.read_i32s(count)?;
	let objects = lane.read_i32s(count)?;
	let decals = lane.read_i32s(count)?;

	for (((item, node), object), decal) in subshapes.iter_mut().zip(nodes).zip(objects).zip(decals) {
		item.nodes.count = node;
		item.objects.count = object;
		item.decals.count = decal;
	}
	Ok(())
}

#[cfg(test)]
mod tests {
	use crate::dts::topology::{read_nodes, read_objects, read_subshape_counts, read_subshape_starts};
	use crate::dts::{Lane, Node, ShapeError, TableRange};

	fn words(values: &[i32]) -> Vec<u8> {
		values.iter().flat_map(|value| value.to_le_bytes()).collect()
	}

	#[test]
	fn nodes_read_five_words_each() {
		let bytes = words(&[0, -1, 0, 1, -1, 1, 0, -1, -1, -1]);
		let mut lane = Lane::<u32>::new(&bytes, 0);
		let nodes = read_nodes(&mut lane, 2).expect("nodes parse");
		assert_eq!(
			nodes[1],
			Node {
				name: 1,
				parent: 0,
				first_object: -1,
				first_child: -1,
				next_sibling: -1
			}
		);
		assert_eq!(lane.remaining(), 0);
	}

	#[test]
	fn truncated_object_table_is_out_of_data() {
		let bytes = words(&[0, 1, 0, 0, -1]);
		let mut lane = Lane::<u32>::new(&bytes, 0);
		let err = read_objects(&mut lane, 1).expect_err("five words cannot hold an object");
		assert!(matches!(err, ShapeError::OutOfData { need: 4, rem: 0, .. }));
	}

	#[test]
	fn subshape_tables_are_column_major() {
		let starts = words(&[0, 3, 10, 11, 20, 21]);
		let counts = words(&[3, 2, 1, 1, 0, 0]);

		let mut lane = Lane::<u32>::new(&starts, 0);
		let mut subshapes = read_subshape_starts(&mut lane, 2).expect("starts parse");
		let mut lane = Lane::<u32>::new(&counts, 0);
		read_subshape_counts(&mut lane, &mut subshapes).expect("counts parse");

		assert_eq!(subshapes[1].nodes, TableRange { first: 3, count: 2 });
		assert_eq!(subshapes[1].objects, TableRange { first: 11, count: 1 });
		assert_eq!(subshapes[0].decals, TableRange { first: 20, count: 0 });
	}
}
