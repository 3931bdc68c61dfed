use glam::Vec3;
use serde::Serialize;

use crate::dts::{Decal, DefaultPose, Detail, IflMaterial, Keyframes, LaneLayout, MaterialList, Mesh, Node, Object, Sequence, ShapeCounts, SmallestVisible, SubShape};

/// Axis-aligned bounding box.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct Bounds {
	/// Minimum corner.
	pub min: Vec3,
	/// Maximum corner.
	pub max: Vec3,
}

impl Bounds {
	/// Box extent per axis.
	pub fn size(&self) -> Vec3 {
		self.max - self.min
	}
}

/// Fully decoded shape.
///
/// Table lengths always equal the counts declared in the packed-region header. Index
/// fields inside records are kept as stored.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Shape {
	/// Format revision.
	pub version: u16,
	/// Exporter revision.
	pub exporter_version: u16,
	/// Packed-region lane boundaries.
	pub layout: LaneLayout,
	/// Declared table sizes.
	pub counts: ShapeCounts,
	/// Smallest visible detail level.
	pub smallest_visible: SmallestVisible,
	/// Bounding sphere radius.
	pub radius: f32,
	/// Bounding cylinder radius.
	pub tube_radius: f32,
	/// Bounds center.
	pub center: Vec3,
	/// Bounding box.
	pub bounds: Bounds,
	/// Node table.
	pub nodes: Vec<Node>,
	/// Object table.
	pub objects: Vec<Object>,
	/// Deprecated decal table.
	pub decals: Vec<Decal>,
	/// IFL material table.
	pub ifl_materials: Vec<IflMaterial>,
	/// Subshape partitions.
	pub subshapes: Vec<SubShape>,
	/// Node rest pose.
	pub default_pose: DefaultPose,
	/// Shared keyframe arrays.
	pub keyframes: Keyframes,
	/// Detail levels, including their alpha-in/out values.
	pub details: Vec<Detail>,
	/// Meshes (all detail levels).
	pub meshes: Vec<Mesh>,
	/// Name table.
	pub names: Vec<String>,
	/// Animation sequences.
	pub sequences: Vec<Sequence>,
	/// Material list, when the material flag selected one.
	pub materials: Option<MaterialList>,
}

impl Shape {
	/// Resolve a name index, `None` for `-1` or out-of-range indices.
	pub fn name(&self, index: i32) -> Option<&str> {
		let index = usize::try_from(index).ok()?;
		self.names.get(index).map(String::as_str)
	}

	/// Name of node `index`.
	pub fn node_name(&self, index: usize) -> Option<&str> {
		self.nodes.get(index).and_then(|node| self.name(node.name))
	}

	/// Find the first node whose name equals `name`.
	pub fn find_node(&self, name: &str) -> Option<usize> {
		self.nodes.iter().position(|node| self.name(node.name) == Some(name))
	}

	/// Find the first sequence whose name equals `name`.
	pub fn find_sequence(&self, name: &str) -> Option<&Sequence> {
		self.sequences.iter().find(|sequence| self.name(sequence.name) == Some(name))
	}

	/// Meshes owned by `object`, clamped to the mesh table.
	pub fn object_meshes(&self, object: &Object) -> &[Mesh] {
		let start = usize::try_from(object.start_mesh).unwrap_or(0).min(self.meshes.len());
		let end = start.saturating_add(usize::try_from(object.num_meshes).unwrap_or(0)).min(self.meshes.len());
		&self.meshes[start..end]
	}

	/// Number of materials, zero when the list is absent.
	pub fn material_count(&self) -> usize {
		self.materials.as_ref().map_or(0, MaterialList::len)
	}
}
