use dtsdoc::dts::{ShapeCounts, ShapeFile};
use serde::Serialize;

use crate::cmd::util::{InputArgs, emit_json};
use crate::error::Result;

#[derive(clap::Args)]
pub struct Args {
	#[command(flatten)]
	pub input: InputArgs,
	#[arg(long)]
	pub json: bool,
}

/// Print header, lane, and table-size information.
pub fn run(args: Args) -> Result<()> {
	let Args { input, json } = args;
	let file = input.open()?;
	let ShapeFile { compression, size, shape } = &file;
	let layout = shape.layout;

	if json {
		let payload = InfoJson {
			path: input.path.display().to_string(),
			compression: compression.as_str(),
			size: *size,
			version: shape.version,
			exporter_version: shape.exporter_version,
			lanes: LanesJson {
				lane32_bytes: layout.lane32_bytes(),
				lane16_bytes: layout.lane16_bytes().unwrap_or(0),
				lane8_bytes: layout.lane8_bytes().unwrap_or(0),
			},
			counts: shape.counts,
			radius: shape.radius,
			tube_radius: shape.tube_radius,
			center: shape.center.to_array(),
			bounds_min: shape.bounds.min.to_array(),
			bounds_max: shape.bounds.max.to_array(),
			sequences: shape.sequences.len(),
			materials: shape.material_count(),
		};
		return emit_json(&payload);
	}

	println!("path: {}", input.path.display());
	println!("compression: {}", compression.as_str());
	println!("size: {size}");
	println!("version: {}", shape.version);
	println!("exporter_version: {}", shape.exporter_version);
	println!("lane32_bytes: {}", layout.lane32_bytes());
	println!("lane16_bytes: {}", layout.lane16_bytes().unwrap_or(0));
	println!("lane8_bytes: {}", layout.lane8_bytes().unwrap_or(0));
	for (table, count) in count_rows(&shape.counts) {
		println!("{table}: {count}");
	}
	println!("radius: {}", shape.radius);
	println!("tube_radius: {}", shape.tube_radius);
	println!("center: {}", shape.center);
	println!("bounds: {} .. {}", shape.bounds.min, shape.bounds.max);
	println!("sequences: {}", shape.sequences.len());
	println!("materials: {}", shape.material_count());
	Ok(())
}

fn count_rows(counts: &ShapeCounts) -> [(&'static str, usize); 17] {
	[
		("nodes", counts.nodes),
		("objects", counts.objects),
		("decals", counts.decals),
		("subshapes", counts.subshapes),
		("ifl_materials", counts.ifl_materials),
		("node_rotations", counts.node_rotations),
		("node_translations", counts.node_translations),
		("node_uniform_scales", counts.node_uniform_scales),
		("node_aligned_scales", counts.node_aligned_scales),
		("node_arbitrary_scales", counts.node_arbitrary_scales),
		("ground_frames", counts.ground_frames),
		("object_states", counts.object_states),
		("decal_states", counts.decal_states),
		("triggers", counts.triggers),
		("details", counts.details),
		("meshes", counts.meshes),
		("names", counts.names),
	]
}

#[derive(Serialize)]
struct InfoJson {
	path: String,
	compression: &'static str,
	size: usize,
	version: u16,
	exporter_version: u16,
	lanes: LanesJson,
	counts: ShapeCounts,
	radius: f32,
	tube_radius: f32,
	center: [f32; 3],
	bounds_min: [f32; 3],
	bounds_max: [f32; 3],
	sequences: usize,
	materials: usize,
}

#[derive(Serialize)]
struct LanesJson {
	lane32_bytes: usize,
	lane16_bytes: usize,
	lane8_bytes: usize,
}
