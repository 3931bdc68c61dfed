#![allow(missing_docs)]

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

mod cmd;
mod error;

use crate::error::Result;

#[derive(Parser)]
#[command(name = "dtsdoc", about = "DTS shape inspection tools")]
struct Cli {
	/// Raise log verbosity (-v debug, -vv trace).
	#[arg(short, long, global = true, action = clap::ArgAction::Count)]
	verbose: u8,
	#[command(subcommand)]
	command: Commands,
}

#[derive(Subcommand)]
enum Commands {
	Info(cmd::info::Args),
	Nodes(cmd::nodes::Args),
	Meshes(cmd::meshes::Args),
	Sequences(cmd::sequences::Args),
	Materials(cmd::materials::Args),
	Dump(cmd::dump::Args),
}

fn main() {
	if let Err(err) = run() {
		eprintln!("error: {err}");
		std::process::exit(1);
	}
}

fn run() -> Result<()> {
	let cli = Cli::parse();
	init_tracing(cli.verbose);

	match cli.command {
		Commands::Info(args) => cmd::info::run(args),
		Commands::Nodes(args) => cmd::nodes::run(args),
		Commands::Meshes(args) => cmd::meshes::run(args),
		Commands::Sequences(args) => cmd::sequences::run(args),
		Commands::Materials(args) => cmd::materials::run(args),
		Commands::Dump(args) => cmd::dump::run(args),
	}
}

fn init_tracing(verbose: u8) {
	let default = match verbose {
		0 => "warn",
		1 => "debug",
		_ => "trace",
	};
	let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
	tracing_subscriber::fmt().with_env_filter(filter).with_writer(std::io::stderr).with_target(false).init();
}
