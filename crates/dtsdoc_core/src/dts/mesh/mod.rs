//! Mesh records.
//!
//! A mesh starts with a type word on the 32-bit lane. Null meshes end there. Every other
//! kind runs a guard, reads the shared geometry block, runs another guard, and then
//! skin and sorted meshes read their own suffix followed by one more guard.

use glam::{Mat4, Vec2, Vec3};
use serde::Serialize;

use crate::dts::{Bounds, DecodeOptions, FormatRules, IndexWidth, Lanes, PrimitiveLayout, Result, ShapeError};

/// Mesh kind stored in the low bits of the type word.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum MeshKind {
	/// Rigid mesh.
	Standard,
	/// Skinned mesh with bone weights.
	Skin,
	/// Deprecated decal mesh.
	Decal,
	/// Translucent mesh with BSP-sorted clusters.
	Sorted,
	/// Placeholder with no geometry.
	Null,
}

impl MeshKind {
	/// Bits of the type word that carry flags rather than the kind.
	pub const FLAG_MASK: u32 = 0xF000_0000;

	/// Decode the kind from a raw type word, ignoring flag bits.
	pub fn from_raw(raw: u32) -> Option<Self> {
		match raw & !Self::FLAG_MASK {
			0 => Some(Self::Standard),
			1 => Some(Self::Skin),
			2 => Some(Self::Decal),
			3 => Some(Self::Sorted),
			4 => Some(Self::Null),
			_ => None,
		}
	}

	/// Stable lowercase label.
	pub fn as_str(self) -> &'static str {
		match self {
			Self::Standard => "standard",
			Self::Skin => "skin",
			Self::Decal => "decal",
			Self::Sorted => "sorted",
			Self::Null => "null",
		}
	}
}

/// Flag bits carried in the mesh type word.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct MeshTypeFlags(pub u32);

impl MeshTypeFlags {
	/// Normals are stored as indices into the encoded-normal table.
	pub const USE_ENCODED_NORMALS: u32 = 1 << 28;
	/// Billboard rotates around the Z axis only.
	pub const BILLBOARD_Z_AXIS: u32 = 1 << 29;
	/// Mesh has a detail texture.
	pub const HAS_DETAIL_TEXTURE: u32 = 1 << 30;
	/// Mesh always faces the camera.
	pub const BILLBOARD: u32 = 1 << 31;

	/// Whether every bit of `flag` is set.
	pub fn contains(self, flag: u32) -> bool {
		self.0 & flag == flag
	}

	/// Names of the set flags, in bit order.
	pub fn names(self) -> Vec<&'static str> {
		[
			(Self::USE_ENCODED_NORMALS, "encoded_normals"),
			(Self::BILLBOARD_Z_AXIS, "billboard_z_axis"),
			(Self::HAS_DETAIL_TEXTURE, "detail_texture"),
			(Self::BILLBOARD, "billboard"),
		]
		.into_iter()
		.filter(|(bit, _)| self.contains(*bit))
		.map(|(_, name)| name)
		.collect()
	}
}

/// Draw topology of a primitive, from the top bits of its material word.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PrimitiveType {
	/// Independent triangles.
	Triangles,
	/// Triangle strip.
	Strip,
	/// Triangle fan.
	Fan,
}

/// A run of indices drawn with one material.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Primitive {
	/// First index.
	pub start: i32,
	/// Number of indices.
	pub count: i32,
	/// Material word (packed 32-bit layout only).
	pub material: Option<u32>,
	/// Max-index word (split 16-bit layout only).
	pub max_index: Option<u32>,
}

impl Primitive {
	/// Primitive type bits of the material word.
	pub const TYPE_MASK: u32 = 0xC000_0000;
	/// Strip primitive.
	pub const STRIP: u32 = 0x4000_0000;
	/// Fan primitive.
	pub const FAN: u32 = 0x8000_0000;
	/// Indices are used rather than sequential vertices.
	pub const INDEXED: u32 = 0x2000_0000;
	/// No material assigned.
	pub const NO_MATERIAL: u32 = 0x1000_0000;
	/// Material index bits of the material word.
	pub const MATERIAL_MASK: u32 = 0x0FFF_FFFF;

	/// Draw topology, when the material word is present.
	pub fn kind(&self) -> Option<PrimitiveType> {
		let word = self.material?;
		Some(match word & Self::TYPE_MASK {
			Self::STRIP => PrimitiveType::Strip,
			Self::FAN => PrimitiveType::Fan,
			_ => PrimitiveType::Triangles,
		})
	}

	/// Material index, when present and not flagged as unassigned.
	pub fn material_index(&self) -> Option<u32> {
		let word = self.material?;
		if word & Self::NO_MATERIAL != 0 {
			return None;
		}
		Some(word & Self::MATERIAL_MASK)
	}
}

/// Geometry shared by every non-null mesh kind.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct MeshGeometry {
	/// Flag bits from the type word.
	pub type_flags: MeshTypeFlags,
	/// Number of vertex position keyframes.
	pub num_frames: i32,
	/// Number of UV keyframes.
	pub num_mat_frames: i32,
	/// Parent mesh index, `-1` for none.
	pub parent: i32,
	/// Mesh bounding box.
	pub bounds: Bounds,
	/// Bounds center.
	pub center: Vec3,
	/// Bounding sphere radius.
	pub radius: f32,
	/// Vertex positions (all keyframes).
	pub verts: Vec<Vec3>,
	/// UV coordinates (all keyframes).
	pub tverts: Vec<Vec2>,
	/// Second UV set (v26+).
	pub tverts2: Vec<Vec2>,
	/// Vertex colors as `[r, g, b, a]` (v26+).
	pub colors: Vec<[u8; 4]>,
	/// Vertex normals.
	pub normals: Vec<Vec3>,
	/// Encoded normal indices, one per vertex.
	pub encoded_normals: Vec<u8>,
	/// Draw primitives.
	pub primitives: Vec<Primitive>,
	/// Vertex indices, widened to `i32` regardless of stored width.
	pub indices: Vec<i32>,
	/// Merge indices (deprecated).
	pub merge_indices: Vec<i16>,
	/// Vertices per keyframe.
	pub verts_per_frame: i32,
	/// Mesh flags word.
	pub flags: u32,
}

/// Skin suffix: bind pose and bone weighting.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct SkinData {
	/// Bind-pose vertex positions.
	pub initial_verts: Vec<Vec3>,
	/// Bind-pose vertex normals.
	pub initial_normals: Vec<Vec3>,
	/// Encoded bind-pose normal indices.
	pub encoded_initial_normals: Vec<u8>,
	/// Inverse bind transforms, one per bone.
	pub initial_transforms: Vec<Mat4>,
	/// Vertex index per weight entry.
	pub vertex_indices: Vec<i32>,
	/// Bone index per weight entry.
	pub bone_indices: Vec<i32>,
	/// Weight per entry.
	pub weights: Vec<f32>,
	/// Node index per bone.
	pub node_indices: Vec<i32>,
}

/// One BSP visibility cluster of a sorted mesh.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Cluster {
	/// First primitive in the cluster.
	pub start_primitive: i32,
	/// One past the last primitive.
	pub end_primitive: i32,
	/// Split plane normal.
	pub normal: Vec3,
	/// Split plane constant.
	pub k: f32,
	/// Cluster drawn when the camera is in front of the plane.
	pub front_cluster: i32,
	/// Cluster drawn when the camera is behind the plane.
	pub back_cluster: i32,
}

/// Sorted-mesh suffix.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct SortedData {
	/// Visibility clusters.
	pub clusters: Vec<Cluster>,
	/// Start cluster per keyframe.
	pub start_clusters: Vec<i32>,
	/// First vertex per keyframe.
	pub first_verts: Vec<i32>,
	/// Vertex count per keyframe.
	pub num_verts: Vec<i32>,
	/// First UV per keyframe.
	pub first_tverts: Vec<i32>,
	/// Always write depth when drawing.
	pub always_write_depth: bool,
}

/// A decoded mesh.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Mesh {
	/// Placeholder with no geometry.
	Null,
	/// Rigid mesh.
	Standard(MeshGeometry),
	/// Skinned mesh.
	Skin {
		/// Shared geometry.
		geometry: MeshGeometry,
		/// Skin suffix.
		skin: SkinData,
	},
	/// Deprecated decal mesh.
	Decal(MeshGeometry),
	/// BSP-sorted translucent mesh.
	Sorted {
		/// Shared geometry.
		geometry: MeshGeometry,
		/// Sorted suffix.
		sorted: SortedData,
	},
}

impl Mesh {
	/// Kind of this mesh.
	pub fn kind(&self) -> MeshKind {
		match self {
			Self::Null => MeshKind::Null,
			Self::Standard(_) => MeshKind::Standard,
			Self::Skin { .. } => MeshKind::Skin,
			Self::Decal(_) => MeshKind::Decal,
			Self::Sorted { .. } => MeshKind::Sorted,
		}
	}

	/// Shared geometry, `None` for null meshes.
	pub fn geometry(&self) -> Option<&MeshGeometry> {
		match self {
			Self::Null => None,
			Self::Standard(geometry) | Self::Decal(geometry) => Some(geometry),
			Self::Skin { geometry, .. } | Self::Sorted { geometry, .. } => Some(geometry),
		}
	}
}

/// Read mesh `index` from the lanes.
pub fn read_mesh(lanes: &mut Lanes<'_>, index: usize, rules: FormatRules, options: &DecodeOptions) -> Result<Mesh> {
	let raw = lanes.l32.read()?;
	let kind = MeshKind::from_raw(raw).ok_or(ShapeError::UnknownMeshType { index, raw })?;
	if kind == MeshKind::Null {
		return Ok(Mesh::Null);
	}

	lanes.checkpoint()?;
	let geometry = read_geometry(lanes, MeshTypeFlags(raw & MeshKind::FLAG_MASK), rules, options)?;
	lanes.checkpoint()?;

	let mesh = match kind {
		MeshKind::Skin => {
			let skin = read_skin(lanes, options)?;
			lanes.checkpoint()?;
			Mesh::Skin { geometry, skin }
		}
		MeshKind::Sorted => {
			let sorted = read_sorted(lanes, options)?;
			lanes.checkpoint()?;
			Mesh::Sorted { geometry, sorted }
		}
		MeshKind::Decal => Mesh::Decal(geometry),
		MeshKind::Standard | MeshKind::Null => Mesh::Standard(geometry),
	};
	tracing::trace!(index, kind = kind.as_str(), "mesh decoded");
	Ok(mesh)
}

fn read_geometry(lanes: &mut Lanes<'_>, type_flags: MeshTypeFlags, rules: FormatRules, options: &DecodeOptions) -> Result<MeshGeometry> {
	let l32 = &mut lanes.l32;
	let num_frames = l32.read_i32()?;
	let num_mat_frames = l32.read_i32()?;
	let parent = l32.read_i32()?;
	let bounds = l32.read_bounds()?;
	let center = l32.read_vec3()?;
	let radius = l32.read_f32()?;

	let num_verts = l32.read_count("mesh verts", options)?;
	let verts = l32.read_vec3s(num_verts)?;
	let num_tverts = l32.read_count("mesh tverts", options)?;
	let tverts = l32.read_vec2s(num_tverts)?;

	let (tverts2, colors) = if rules.mesh_uv2_and_colors {
		let count = l32.read_count("mesh tverts2", options)?;
		let tverts2 = l32.read_vec2s(count)?;
		let count = l32.read_count("mesh colors", options)?;
		let colors = l32.read_records(count, 1, |lane| Ok(lane.read()?.to_le_bytes()))?;
		(tverts2, colors)
	} else {
		(Vec::new(), Vec::new())
	};

	let normals = lanes.l32.read_vec3s(num_verts)?;
	let encoded_normals = lanes.l8.read_bytes(num_verts)?;
	let primitives = read_primitives(lanes, rules, options)?;

	let num_indices = lanes.l32.read_count("mesh indices", options)?;
	let indices = match rules.indices {
		IndexWidth::W16 => lanes.l16.read_i16s(num_indices)?.into_iter().map(i32::from).collect(),
		IndexWidth::W32 => lanes.l32.read_i32s(num_indices)?,
	};

	let num_merge = lanes.l32.read_count("mesh merge indices", options)?;
	let merge_indices = lanes.l16.read_i16s(num_merge)?;

	let verts_per_frame = lanes.l32.read_i32()?;
	let flags = lanes.l32.read()?;

	Ok(MeshGeometry {
		type_flags,
		num_frames,
		num_mat_frames,
		parent,
		bounds,
		center,
		radius,
		verts,
		tverts,
		tverts2,
		colors,
		normals,
		encoded_normals,
		primitives,
		indices,
		merge_indices,
		verts_per_frame,
		flags,
	})
}

fn read_primitives(lanes: &mut Lanes<'_>, rules: FormatRules, options: &DecodeOptions) -> Result<Vec<Primitive>> {
	let count = lanes.l32.read_count("mesh primitives", options)?;
	match rules.primitives {
		PrimitiveLayout::Split16 => {
			let pairs = lanes.l16.read_records(count, 2, |lane| Ok((lane.read_i16()?, lane.read_i16()?)))?;
			let max_indices = lanes.l32.read_u32s(count)?;
			Ok(pairs
				.into_iter()
				.zip(max_indices)
				.map(|((start, len), max_index)| Primitive {
					start: i32::from(start),
					count: i32::from(len),
					material: None,
					max_index: Some(max_index),
				})
				.collect())
		}
		PrimitiveLayout::Packed32 => lanes.l32.read_records(count, 3, |lane| {
			Ok(Primitive {
				start: lane.read_i32()?,
				count: lane.read_i32()?,
				material: Some(lane.read()?),
				max_index: None,
			})
		}),
	}
}

fn read_skin(lanes: &mut Lanes<'_>, options: &DecodeOptions) -> Result<SkinData> {
	let count = lanes.l32.read_count("skin initial verts", options)?;
	let initial_verts = lanes.l32.read_vec3s(count)?;
	let initial_normals = lanes.l32.read_vec3s(count)?;
	let encoded_initial_normals = lanes.l8.read_bytes(count)?;

	let l32 = &mut lanes.l32;
	let count = l32.read_count("skin transforms", options)?;
	let initial_transforms = l32.read_records(count, 16, |lane| lane.read_mat4())?;
	let vertex_indices = l32.read_counted_i32s("skin vertex indices", options)?;
	let bone_indices = l32.read_counted_i32s("skin bone indices", options)?;
	let count = l32.read_count("skin weights", options)?;
	let weights = l32.read_f32s(count)?;
	let node_indices = l32.read_counted_i32s("skin node indices", options)?;

	Ok(SkinData {
		initial_verts,
		initial_normals,
		encoded_initial_normals,
		initial_transforms,
		vertex_indices,
		bone_indices,
		weights,
		node_indices,
	})
}

fn read_sorted(lanes: &mut Lanes<'_>, options: &DecodeOptions) -> Result<SortedData> {
	let l32 = &mut lanes.l32;
	let count = l32.read_count("sorted clusters", options)?;
	let clusters = l32.read_records(count, 9, |lane| {
		Ok(Cluster {
			start_primitive: lane.read_i32()?,
			end_primitive: lane.read_i32()?,
			normal: lane.read_vec3()?,
			k: lane.read_f32()?,
			front_cluster: lane.read_i32()?,
			back_cluster: lane.read_i32()?,
		})
	})?;

	Ok(SortedData {
		clusters,
		start_clusters: l32.read_counted_i32s("sorted start clusters", options)?,
		first_verts: l32.read_counted_i32s("sorted first verts", options)?,
		num_verts: l32.read_counted_i32s("sorted vert counts", options)?,
		first_tverts: l32.read_counted_i32s("sorted first tverts", options)?,
		always_write_depth: l32.read_bool()?,
	})
}

#[cfg(test)]
mod tests;
