use dtsdoc_testkit::LaneWriter;

use crate::dts::mesh::{Mesh, MeshKind, MeshTypeFlags, Primitive, PrimitiveType, read_mesh};
use crate::dts::{DecodeOptions, FormatRules, LaneLayout, Lanes, Result, ShapeError};

fn decode_one(lanes: &LaneWriter, version: u16) -> Result<(Mesh, u32, usize)> {
	let (region, [total_words, start16, start8]) = lanes.region();
	let layout = LaneLayout {
		total_words,
		start16,
		start8,
	};
	let mut split = Lanes::split(&region, 16, layout)?;
	let rules = FormatRules::for_version(version)?;
	let mesh = read_mesh(&mut split, 0, rules, &DecodeOptions::default())?;
	Ok((mesh, split.checkpoints(), split.l32.remaining_words()))
}

fn write_geometry(lanes: &mut LaneWriter, version: u16) {
	lanes.i32(1).i32(1).i32(-1);
	lanes.vec3([-1.0; 3]).vec3([1.0; 3]).vec3([0.0; 3]).f32(1.5);

	lanes.i32(3);
	for x in [0.0, 1.0, 2.0] {
		lanes.vec3([x, 0.0, 0.0]);
	}
	lanes.i32(3);
	for u in [0.0, 0.5, 1.0] {
		lanes.vec2([u, 0.0]);
	}
	if version >= 26 {
		lanes.i32(1).vec2([0.25, 0.75]);
		lanes.i32(1).u32(0x4433_2211);
	}
	for _ in 0..3 {
		lanes.vec3([0.0, 0.0, 1.0]);
	}
	for encoded in [7_u8, 8, 9] {
		lanes.u8(encoded);
	}

	lanes.i32(1);
	if version <= 24 {
		lanes.i16(0).i16(3).u32(2);
	} else {
		lanes.i32(0).i32(3).u32(Primitive::INDEXED | 5);
	}

	lanes.i32(3);
	for index in [0, 1, 2] {
		if version <= 25 {
			lanes.i16(index);
		} else {
			lanes.i32(i32::from(index));
		}
	}

	lanes.i32(0);
	lanes.i32(3).u32(0);
}

fn standard_mesh(version: u16) -> LaneWriter {
	let mut lanes = LaneWriter::new();
	lanes.u32(0).guard();
	write_geometry(&mut lanes, version);
	lanes.guard();
	lanes
}

#[test]
fn v24_reads_split_primitives_and_16bit_indices() {
	let (mesh, checkpoints, rem) = decode_one(&standard_mesh(24), 24).expect("mesh decodes");
	assert_eq!(checkpoints, 2);
	assert_eq!(rem, 0);

	let geometry = mesh.geometry().expect("standard mesh has geometry");
	assert_eq!(mesh.kind(), MeshKind::Standard);
	assert_eq!(geometry.verts.len(), 3);
	assert_eq!(geometry.encoded_normals, vec![7, 8, 9]);
	assert_eq!(
		geometry.primitives,
		vec![Primitive {
			start: 0,
			count: 3,
			material: None,
			max_index: Some(2),
		}]
	);
	assert_eq!(geometry.indices, vec![0, 1, 2]);
	assert!(geometry.tverts2.is_empty());
	assert!(geometry.colors.is_empty());
}

#[test]
fn v25_reads_packed_primitives_with_16bit_indices() {
	let (mesh, _, rem) = decode_one(&standard_mesh(25), 25).expect("mesh decodes");
	assert_eq!(rem, 0);

	let geometry = mesh.geometry().expect("standard mesh has geometry");
	let primitive = geometry.primitives[0];
	assert_eq!(primitive.max_index, None);
	assert_eq!(primitive.kind(), Some(PrimitiveType::Triangles));
	assert_eq!(primitive.material_index(), Some(5));
	assert_eq!(geometry.indices, vec![0, 1, 2]);
}

#[test]
fn v26_reads_second_uv_set_colors_and_32bit_indices() {
	let (mesh, checkpoints, rem) = decode_one(&standard_mesh(26), 26).expect("mesh decodes");
	assert_eq!(checkpoints, 2);
	assert_eq!(rem, 0);

	let geometry = mesh.geometry().expect("standard mesh has geometry");
	assert_eq!(geometry.tverts2.len(), 1);
	assert_eq!(geometry.tverts2[0].y, 0.75);
	assert_eq!(geometry.colors, vec![[0x11, 0x22, 0x33, 0x44]]);
	assert_eq!(geometry.indices, vec![0, 1, 2]);
}

#[test]
fn v26_layout_read_as_v25_fails() {
	assert!(decode_one(&standard_mesh(26), 25).is_err());
}

#[test]
fn null_mesh_consumes_type_word_only() {
	let mut lanes = LaneWriter::new();
	lanes.u32(4);
	let (mesh, checkpoints, rem) = decode_one(&lanes, 24).expect("null mesh decodes");
	assert_eq!(mesh, Mesh::Null);
	assert!(mesh.geometry().is_none());
	assert_eq!(checkpoints, 0);
	assert_eq!(rem, 0);
}

#[test]
fn type_word_flags_are_split_from_kind() {
	let mut lanes = LaneWriter::new();
	lanes.u32(MeshTypeFlags::BILLBOARD | MeshTypeFlags::USE_ENCODED_NORMALS).guard();
	write_geometry(&mut lanes, 24);
	lanes.guard();

	let (mesh, _, _) = decode_one(&lanes, 24).expect("flagged mesh decodes");
	let flags = mesh.geometry().expect("geometry").type_flags;
	assert_eq!(mesh.kind(), MeshKind::Standard);
	assert!(flags.contains(MeshTypeFlags::BILLBOARD));
	assert!(!flags.contains(MeshTypeFlags::BILLBOARD_Z_AXIS));
	assert_eq!(flags.names(), vec!["encoded_normals", "billboard"]);
}

#[test]
fn decal_mesh_keeps_geometry() {
	let mut lanes = LaneWriter::new();
	lanes.u32(2).guard();
	write_geometry(&mut lanes, 24);
	lanes.guard();

	let (mesh, checkpoints, _) = decode_one(&lanes, 24).expect("decal mesh decodes");
	assert!(matches!(mesh, Mesh::Decal(_)));
	assert_eq!(checkpoints, 2);
}

#[test]
fn skin_mesh_reads_suffix_and_extra_guard() {
	let mut lanes = LaneWriter::new();
	lanes.u32(1).guard();
	write_geometry(&mut lanes, 24);
	lanes.guard();

	lanes.i32(2).vec3([1.0, 2.0, 3.0]).vec3([4.0, 5.0, 6.0]);
	lanes.vec3([0.0, 0.0, 1.0]).vec3([0.0, 1.0, 0.0]);
	lanes.u8(1).u8(2);
	lanes.i32(1);
	for row in 0..4 {
		for col in 0..4 {
			lanes.f32(if row == col { 1.0 } else if row == 0 && col == 3 { 9.0 } else { 0.0 });
		}
	}
	lanes.i32(2).i32(0).i32(1);
	lanes.i32(2).i32(0).i32(0);
	lanes.i32(2).f32(1.0).f32(1.0);
	lanes.i32(1).i32(3);
	lanes.guard();

	let (mesh, checkpoints, rem) = decode_one(&lanes, 24).expect("skin mesh decodes");
	assert_eq!(checkpoints, 3);
	assert_eq!(rem, 0);

	let Mesh::Skin { skin, .. } = mesh else {
		panic!("expected skin mesh");
	};
	assert_eq!(skin.initial_verts[1].z, 6.0);
	assert_eq!(skin.encoded_initial_normals, vec![1, 2]);
	assert_eq!(skin.initial_transforms.len(), 1);
	assert_eq!(skin.initial_transforms[0].w_axis.x, 9.0);
	assert_eq!(skin.vertex_indices, vec![0, 1]);
	assert_eq!(skin.bone_indices, vec![0, 0]);
	assert_eq!(skin.weights, vec![1.0, 1.0]);
	assert_eq!(skin.node_indices, vec![3]);
}

#[test]
fn sorted_mesh_reads_clusters_and_depth_flag() {
	let mut lanes = LaneWriter::new();
	lanes.u32(3).guard();
	write_geometry(&mut lanes, 25);
	lanes.guard();

	lanes.i32(1).i32(0).i32(1).vec3([0.0, 0.0, 1.0]).f32(0.5).i32(-1).i32(-1);
	lanes.i32(1).i32(0);
	lanes.i32(1).i32(0);
	lanes.i32(1).i32(3);
	lanes.i32(1).i32(0);
	lanes.i32(1);
	lanes.guard();

	let (mesh, checkpoints, rem) = decode_one(&lanes, 25).expect("sorted mesh decodes");
	assert_eq!(checkpoints, 3);
	assert_eq!(rem, 0);

	let Mesh::Sorted { sorted, .. } = mesh else {
		panic!("expected sorted mesh");
	};
	assert_eq!(sorted.clusters.len(), 1);
	assert_eq!(sorted.clusters[0].k, 0.5);
	assert_eq!(sorted.clusters[0].back_cluster, -1);
	assert_eq!(sorted.num_verts, vec![3]);
	assert!(sorted.always_write_depth);
}

#[test]
fn unknown_mesh_type_is_rejected() {
	let mut lanes = LaneWriter::new();
	lanes.u32(7);
	let err = decode_one(&lanes, 24).expect_err("type 7 is unknown");
	assert!(matches!(err, ShapeError::UnknownMeshType { index: 0, raw: 7 }));
}

#[test]
fn wrong_guard_after_geometry_is_reported() {
	let mut lanes = LaneWriter::new();
	lanes.u32(0).guard();
	write_geometry(&mut lanes, 24);
	lanes.guard_with(9);

	let err = decode_one(&lanes, 24).expect_err("guard mismatch");
	assert!(matches!(err, ShapeError::GuardMismatch { expected: 1, got32: 9, .. }));
}
