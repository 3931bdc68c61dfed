use dtsdoc::dts::{ShapeError, TreeError};
use thiserror::Error;

/// Failures surfaced by CLI commands.
#[derive(Debug, Error)]
pub enum CliError {
	#[error(transparent)]
	Shape(#[from] ShapeError),
	#[error("node tree: {0}")]
	Tree(#[from] TreeError),
	#[error("json: {0}")]
	Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, CliError>;
