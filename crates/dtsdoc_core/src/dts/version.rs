//! Per-revision layout rules.
//!
//! Every version-dependent width or presence decision in the decoder goes through
//! [`FormatRules`]; the table below is the only place the revision history lives.

use serde::Serialize;

use crate::dts::{Result, ShapeError};

/// Oldest revision with known layout rules.
pub const MIN_VERSION: u16 = 19;
/// Newest revision with known layout rules.
pub const MAX_VERSION: u16 = 26;

/// Storage of mesh primitive records.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PrimitiveLayout {
	/// 16-bit `{start, count}` pairs plus a separate 32-bit max-index array.
	Split16,
	/// 32-bit `{start, count, material}` records.
	Packed32,
}

/// Element width of mesh vertex indices.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum IndexWidth {
	/// `i16` values on the 16-bit lane.
	W16,
	/// `i32` values on the 32-bit lane.
	W32,
}

/// Field widths and optional sections selected by a format revision.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct FormatRules {
	/// Mesh primitive record layout.
	pub primitives: PrimitiveLayout,
	/// Mesh vertex index width.
	pub indices: IndexWidth,
	/// Meshes carry a second UV set and per-vertex colors.
	pub mesh_uv2_and_colors: bool,
	/// Detail records carry billboard tessellation fields.
	pub detail_billboard: bool,
	/// Material lists carry one padding word per material.
	pub material_padding: bool,
}

struct VersionRule {
	first: u16,
	last: u16,
	rules: FormatRules,
}

const RULES: [VersionRule; 3] = [
	VersionRule {
		first: 19,
		last: 24,
		rules: FormatRules {
			primitives: PrimitiveLayout::Split16,
			indices: IndexWidth::W16,
			mesh_uv2_and_colors: false,
			detail_billboard: false,
			material_padding: false,
		},
	},
	VersionRule {
		first: 25,
		last: 25,
		rules: FormatRules {
			primitives: PrimitiveLayout::Packed32,
			indices: IndexWidth::W16,
			mesh_uv2_and_colors: false,
			detail_billboard: false,
			material_padding: true,
		},
	},
	VersionRule {
		first: 26,
		last: 26,
		rules: FormatRules {
			primitives: PrimitiveLayout::Packed32,
			indices: IndexWidth::W32,
			mesh_uv2_and_colors: true,
			detail_billboard: true,
			material_padding: false,
		},
	},
];

impl FormatRules {
	/// Look up the rules for `version`, if it is a supported revision.
	pub fn lookup(version: u16) -> Option<Self> {
		RULES.iter().find(|rule| (rule.first..=rule.last).contains(&version)).map(|rule| rule.rules)
	}

	/// Look up the rules for `version`, failing with [`ShapeError::UnsupportedVersion`].
	pub fn for_version(version: u16) -> Result<Self> {
		Self::lookup(version).ok_or(ShapeError::UnsupportedVersion { version })
	}
}
