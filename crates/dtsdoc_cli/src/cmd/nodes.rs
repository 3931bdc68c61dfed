use dtsdoc::dts::NodeTree;
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

/// Print the node hierarchy in depth-first order.
pub fn run(args: Args) -> Result<()> {
	let Args { input, json } = args;
	let file = input.open()?;
	let shape = &file.shape;
	let tree = NodeTree::build(shape)?;

	if json {
		let payload: Vec<NodeJson> = tree
			.walk()
			.map(|(depth, index)| NodeJson {
				index,
				depth,
				name: shape.node_name(index),
				parent: tree.parent(index),
				children: tree.children(index).len(),
			})
			.collect();
		return emit_json(&payload);
	}

	for (depth, index) in tree.walk() {
		println!("{}{} [{}]", "  ".repeat(depth), shape.node_name(index).unwrap_or("<unnamed>"), index);
	}
	Ok(())
}

#[derive(Serialize)]
struct NodeJson<'a> {
	index: usize,
	depth: usize,
	name: Option<&'a str>,
	parent: Option<usize>,
	children: usize,
}
