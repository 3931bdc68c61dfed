use std::path::PathBuf;

use dtsdoc::dts::{DecodeOptions, ShapeFile};
use serde::Serialize;

use crate::error::Result;

/// Input file and decoder switches shared by every command.
#[derive(clap::Args)]
pub struct InputArgs {
	pub path: PathBuf,
	/// Fail when bytes remain after the material section.
	#[arg(long)]
	pub strict: bool,
	/// Upper bound on any declared table count.
	#[arg(long)]
	pub max_elements: Option<usize>,
}

impl InputArgs {
	pub(crate) fn options(&self) -> DecodeOptions {
		let mut options = DecodeOptions {
			strict_trailing: self.strict,
			..DecodeOptions::default()
		};
		if let Some(max) = self.max_elements {
			options.max_elements = max;
		}
		options
	}

	pub(crate) fn open(&self) -> Result<ShapeFile> {
		tracing::debug!(path = %self.path.display(), strict = self.strict, "opening shape");
		Ok(ShapeFile::open_with(&self.path, &self.options())?)
	}
}

/// Print `value` as pretty JSON on stdout.
pub(crate) fn emit_json<T: Serialize>(value: &T) -> Result<()> {
	println!("{}", serde_json::to_string_pretty(value)?);
	Ok(())
}

/// Render an optional index, `-` when absent.
pub(crate) fn opt_index(value: Option<u32>) -> String {
	value.map_or_else(|| "-".to_owned(), |index| index.to_string())
}

/// Join flag labels, `-` when none are set.
pub(crate) fn flag_list(names: &[&str]) -> String {
	if names.is_empty() { "-".to_owned() } else { names.join(",") }
}
