use dtsdoc::dts::Mesh;
use serde::Serialize;

use crate::cmd::util::{InputArgs, emit_json, flag_list};
use crate::error::Result;

#[derive(clap::Args)]
pub struct Args {
	#[command(flatten)]
	pub input: InputArgs,
	#[arg(long)]
	pub json: bool,
}

/// Print one summary row per mesh.
pub fn run(args: Args) -> Result<()> {
	let Args { input, json } = args;
	let file = input.open()?;
	let rows: Vec<MeshRow> = file.shape.meshes.iter().enumerate().map(|(index, mesh)| MeshRow::new(index, mesh)).collect();

	if json {
		return emit_json(&rows);
	}

	for row in &rows {
		println!(
			"{:>4} {:<8} verts={} primitives={} indices={} flags={}",
			row.index,
			row.kind,
			row.verts,
			row.primitives,
			row.indices,
			flag_list(&row.flags)
		);
	}
	Ok(())
}

#[derive(Serialize)]
struct MeshRow {
	index: usize,
	kind: &'static str,
	verts: usize,
	primitives: usize,
	indices: usize,
	flags: Vec<&'static str>,
}

impl MeshRow {
	fn new(index: usize, mesh: &Mesh) -> Self {
		let geometry = mesh.geometry();
		Self {
			index,
			kind: mesh.kind().as_str(),
			verts: geometry.map_or(0, |geometry| geometry.verts.len()),
			primitives: geometry.map_or(0, |geometry| geometry.primitives.len()),
			indices: geometry.map_or(0, |geometry| geometry.indices.len()),
			flags: geometry.map(|geometry| geometry.type_flags.names()).unwrap_or_default(),
		}
	}
}
