use dtsdoc_testkit::StreamWriter;

use crate::dts::bytes::Cursor;
use crate::dts::{DecodeOptions, FormatRules, Material, MaterialList, ShapeError};

fn list_bytes(padding: bool) -> Vec<u8> {
	let mut stream = StreamWriter::new();
	stream.i32(2).pascal("base").pascal("bump");
	stream.u32(Material::S_WRAP | Material::T_WRAP).u32(Material::BUMP_MAP_ONLY);
	stream.i32(-1).i32(-1);
	stream.i32(1).i32(-1);
	stream.i32(-1).i32(-1);
	if padding {
		stream.i32(0).i32(0);
	}
	stream.f32(1.0).f32(2.0);
	stream.f32(0.0).f32(0.75);
	stream.bytes
}

fn read(bytes: &[u8], version: u16) -> (MaterialList, usize) {
	let rules = FormatRules::for_version(version).expect("known version");
	let mut cursor = Cursor::new(bytes);
	let list = MaterialList::read(&mut cursor, rules, &DecodeOptions::default()).expect("materials parse");
	(list, cursor.remaining())
}

#[test]
fn parallel_arrays_fold_into_entries() {
	let (list, rem) = read(&list_bytes(false), 24);
	assert_eq!(rem, 0);
	assert_eq!(list.len(), 2);

	let base = &list.materials[0];
	assert_eq!(base.name, "base");
	assert_eq!(base.flags, Material::S_WRAP | Material::T_WRAP);
	assert_eq!(base.bump_map, Some(1));
	assert_eq!(base.reflectance_map, None);
	assert_eq!(base.padding, None);
	assert_eq!(base.detail_scale, 1.0);

	let bump = list.find("bump").expect("bump material");
	assert_eq!(bump.flags, Material::BUMP_MAP_ONLY);
	assert_eq!(bump.bump_map, None);
	assert_eq!(bump.reflectance, 0.75);
}

#[test]
fn v25_reads_one_extra_word_per_material() {
	let plain = list_bytes(false);
	let padded = list_bytes(true);
	assert_eq!(padded.len() - plain.len(), 2 * 4);

	let (list, rem) = read(&padded, 25);
	assert_eq!(rem, 0);
	assert_eq!(list.materials[1].padding, Some(0));
	assert_eq!(list.materials[1].detail_scale, 2.0);

	let (_, rem) = read(&plain, 26);
	assert_eq!(rem, 0);
}

#[test]
fn name_longer_than_stream_is_out_of_data() {
	let mut stream = StreamWriter::new();
	stream.i32(1);
	stream.bytes.extend_from_slice(&[10, b'a', b'b']);
	let rules = FormatRules::for_version(24).expect("known version");
	let mut cursor = Cursor::new(&stream.bytes);
	let err = MaterialList::read(&mut cursor, rules, &DecodeOptions::default()).expect_err("short name");
	assert!(matches!(err, ShapeError::OutOfData { need: 10, rem: 2, .. }));
}
