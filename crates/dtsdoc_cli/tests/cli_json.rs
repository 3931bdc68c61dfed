#![allow(missing_docs)]

use std::path::{Path, PathBuf};
use std::process::{Command, Output};

use serde_json::Value;
use tempfile::TempDir;

#[test]
fn info_json_reports_header_and_counts() {
	let dir = TempDir::new().expect("tempdir");
	let path = write_shape(&dir, "sample.dts", &dtsdoc_testkit::sample_shape(24));
	let json = run_json(&["info", path_arg(&path), "--json"]);

	assert_eq!(json["version"], 24);
	assert_eq!(json["exporter_version"], 0);
	assert_eq!(json["compression"], "none");
	assert_eq!(json["counts"]["nodes"], 2);
	assert_eq!(json["counts"]["meshes"], 2);
	assert_eq!(json["sequences"], 1);
	assert_eq!(json["materials"], 2);
	assert!(json["lanes"]["lane32_bytes"].as_u64().is_some_and(|bytes| bytes > 0));
}

#[test]
fn info_detects_zstd_input() {
	let dir = TempDir::new().expect("tempdir");
	let packed = zstd::encode_all(dtsdoc_testkit::sample_shape(26).as_slice(), 3).expect("zstd encodes");
	let path = write_shape(&dir, "sample.dts.zst", &packed);
	let json = run_json(&["info", path_arg(&path), "--json"]);

	assert_eq!(json["compression"], "zstd");
	assert_eq!(json["version"], 26);
}

#[test]
fn nodes_json_walks_hierarchy_with_names() {
	let dir = TempDir::new().expect("tempdir");
	let path = write_shape(&dir, "sample.dts", &dtsdoc_testkit::sample_shape(25));
	let json = run_json(&["nodes", path_arg(&path), "--json"]);

	let nodes = json.as_array().expect("node array");
	assert_eq!(nodes.len(), 2);
	assert_eq!(nodes[0]["name"], "root");
	assert_eq!(nodes[0]["depth"], 0);
	assert_eq!(nodes[1]["name"], "child");
	assert_eq!(nodes[1]["depth"], 1);
	assert_eq!(nodes[1]["parent"], 0);
}

#[test]
fn nodes_text_indents_children() {
	let dir = TempDir::new().expect("tempdir");
	let path = write_shape(&dir, "sample.dts", &dtsdoc_testkit::sample_shape(24));
	let output = run(&["nodes", path_arg(&path)]);
	assert!(output.status.success());

	let stdout = String::from_utf8_lossy(&output.stdout);
	let lines: Vec<&str> = stdout.lines().collect();
	assert_eq!(lines, vec!["root [0]", "  child [1]"]);
}

#[test]
fn meshes_json_lists_kinds_and_sizes() {
	let dir = TempDir::new().expect("tempdir");
	let path = write_shape(&dir, "sample.dts", &dtsdoc_testkit::sample_shape(26));
	let json = run_json(&["meshes", path_arg(&path), "--json"]);

	let meshes = json.as_array().expect("mesh array");
	assert_eq!(meshes.len(), 2);
	assert_eq!(meshes[0]["kind"], "standard");
	assert_eq!(meshes[0]["verts"], 1);
	assert_eq!(meshes[0]["primitives"], 1);
	assert_eq!(meshes[0]["indices"], 1);
	assert_eq!(meshes[1]["kind"], "null");
	assert_eq!(meshes[1]["verts"], 0);
}

#[test]
fn sequences_json_resolves_names_and_flags() {
	let dir = TempDir::new().expect("tempdir");
	let path = write_shape(&dir, "sample.dts", &dtsdoc_testkit::sample_shape(24));
	let json = run_json(&["sequences", path_arg(&path), "--json"]);

	let sequence = &json[0];
	assert_eq!(sequence["name"], "child");
	assert_eq!(sequence["keyframes"], 4);
	assert_eq!(sequence["flags"], serde_json::json!(["uniform_scale", "cyclic"]));
	assert_eq!(sequence["matters"][0], serde_json::json!(["rotation", 1]));
	assert_eq!(sequence["matters"][2], serde_json::json!(["scale", 1]));
}

#[test]
fn materials_json_exposes_optional_maps() {
	let dir = TempDir::new().expect("tempdir");
	let path = write_shape(&dir, "sample.dts", &dtsdoc_testkit::sample_shape(25));
	let json = run_json(&["materials", path_arg(&path), "--json"]);

	assert_eq!(json[0]["name"], "skin");
	assert_eq!(json[0]["reflectance_map"], 1);
	assert_eq!(json[0]["padding"], 0);
	assert_eq!(json[1]["name"], "env");
	assert!(json[1]["reflectance_map"].is_null());
}

#[test]
fn dump_prints_full_descriptor() {
	let dir = TempDir::new().expect("tempdir");
	let path = write_shape(&dir, "sample.dts", &dtsdoc_testkit::sample_shape(24));
	let json = run_json(&["dump", path_arg(&path)]);

	assert_eq!(json["version"], 24);
	assert_eq!(json["names"], serde_json::json!(["root", "child", "body"]));
	assert!(json["meshes"].as_array().is_some_and(|meshes| meshes.len() == 2));
	assert!(json["materials"]["materials"].is_array());
}

#[test]
fn strict_flag_rejects_trailing_bytes() {
	let dir = TempDir::new().expect("tempdir");
	let mut bytes = dtsdoc_testkit::empty_shape(24);
	bytes.extend_from_slice(&[0; 4]);
	let path = write_shape(&dir, "trailing.dts", &bytes);

	assert!(run(&["info", path_arg(&path)]).status.success());

	let output = run(&["info", path_arg(&path), "--strict"]);
	assert_eq!(output.status.code(), Some(1));
	assert!(String::from_utf8_lossy(&output.stderr).contains("error: trailing data"));
}

#[test]
fn max_elements_caps_declared_counts() {
	let dir = TempDir::new().expect("tempdir");
	let path = write_shape(&dir, "sample.dts", &dtsdoc_testkit::sample_shape(24));
	let output = run(&["info", path_arg(&path), "--max-elements", "1"]);

	assert_eq!(output.status.code(), Some(1));
	assert!(String::from_utf8_lossy(&output.stderr).contains("count too large"));
}

#[test]
fn unsupported_version_exits_with_error() {
	let dir = TempDir::new().expect("tempdir");
	let path = write_shape(&dir, "future.dts", &dtsdoc_testkit::empty_shape(27));
	let output = run(&["dump", path_arg(&path)]);

	assert_eq!(output.status.code(), Some(1));
	assert!(String::from_utf8_lossy(&output.stderr).contains("error: unsupported shape version 27"));
	assert!(output.stdout.is_empty());
}

fn write_shape(dir: &TempDir, name: &str, bytes: &[u8]) -> PathBuf {
	let path = dir.path().join(name);
	std::fs::write(&path, bytes).expect("shape file writes");
	path
}

fn path_arg(path: &Path) -> &str {
	path.to_str().expect("tempdir path is utf-8")
}

fn run(args: &[&str]) -> Output {
	Command::new(env!("CARGO_BIN_EXE_dtsdoc")).args(args).env_remove("RUST_LOG").output().expect("dtsdoc command executes")
}

fn run_json(args: &[&str]) -> Value {
	let output = run(args);
	assert!(
		output.status.success(),
		"dtsdoc command failed with status={}: {}",
		output.status,
		String::from_utf8_lossy(&output.stderr)
	);
	serde_json::from_slice(&output.stdout).expect("stdout should be valid json")
}
