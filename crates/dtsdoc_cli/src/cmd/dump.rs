use crate::cmd::util::{InputArgs, emit_json};
use crate::error::Result;

#[derive(clap::Args)]
pub struct Args {
	#[command(flatten)]
	pub input: InputArgs,
}

/// Print the complete decoded shape as JSON.
pub fn run(args: Args) -> Result<()> {
	let file = args.input.open()?;
	emit_json(&file.shape)
}
