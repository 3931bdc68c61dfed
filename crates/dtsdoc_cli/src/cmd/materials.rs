use dtsdoc::dts::Material;

use crate::cmd::util::{InputArgs, emit_json, opt_index};
use crate::error::Result;

#[derive(clap::Args)]
pub struct Args {
	#[command(flatten)]
	pub input: InputArgs,
	#[arg(long)]
	pub json: bool,
}

/// Print the material list, if the shape carries one.
pub fn run(args: Args) -> Result<()> {
	let Args { input, json } = args;
	let file = input.open()?;
	let materials: &[Material] = file.shape.materials.as_ref().map(|list| list.materials.as_slice()).unwrap_or_default();

	if json {
		return emit_json(&materials);
	}

	if materials.is_empty() {
		println!("no materials");
		return Ok(());
	}
	for (index, material) in materials.iter().enumerate() {
		println!(
			"{index:>4} {} flags={:#010x} reflectance_map={} bump_map={} detail_map={} detail_scale={} reflectance={}",
			material.name,
			material.flags,
			opt_index(material.reflectance_map),
			opt_index(material.bump_map),
			opt_index(material.detail_map),
			material.detail_scale,
			material.reflectance
		);
	}
	Ok(())
}
