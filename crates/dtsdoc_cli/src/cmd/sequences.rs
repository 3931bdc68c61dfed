use dtsdoc::dts::{Sequence, SequenceFlags, Shape};
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

/// Print animation sequences and how many entities each animates.
pub fn run(args: Args) -> Result<()> {
	let Args { input, json } = args;
	let file = input.open()?;
	let rows: Vec<SequenceRow<'_>> = file.shape.sequences.iter().map(|sequence| SequenceRow::new(&file.shape, sequence)).collect();

	if json {
		return emit_json(&rows);
	}

	for row in &rows {
		let matters: Vec<String> = row.matters.iter().map(|(set, bits)| format!("{set}={bits}")).collect();
		println!(
			"{} duration={} keyframes={} priority={} flags={} {}",
			row.name.unwrap_or("<unnamed>"),
			row.duration,
			row.keyframes,
			row.priority,
			flag_list(&row.flags),
			matters.join(" ")
		);
	}
	Ok(())
}

#[derive(Serialize)]
struct SequenceRow<'a> {
	name: Option<&'a str>,
	duration: f32,
	keyframes: i32,
	priority: i32,
	flags: Vec<&'static str>,
	matters: Vec<(&'static str, usize)>,
}

impl<'a> SequenceRow<'a> {
	fn new(shape: &'a Shape, sequence: &'a Sequence) -> Self {
		Self {
			name: shape.name(sequence.name),
			duration: sequence.duration,
			keyframes: sequence.num_keyframes,
			priority: sequence.priority,
			flags: SequenceFlags::names(sequence.flags),
			matters: sequence.matters().iter().map(|(set, bits)| (*set, bits.len())).collect(),
		}
	}
}
