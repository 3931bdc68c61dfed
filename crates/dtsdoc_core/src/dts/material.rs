//! Optional material list trailing the sequences.

use serde::Serialize;

use crate::dts::bytes::Cursor;
use crate::dts::{DecodeOptions, FormatRules, Result};

/// One material entry, assembled from the parallel arrays.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Material {
	/// Material (texture) name.
	pub name: String,
	/// Material flag bits.
	pub flags: u32,
	/// Material used as reflectance map.
	pub reflectance_map: Option<u32>,
	/// Material used as bump map.
	pub bump_map: Option<u32>,
	/// Material used as detail map.
	pub detail_map: Option<u32>,
	/// Per-material padding word (v25 only).
	pub padding: Option<i32>,
	/// Detail texture scale.
	pub detail_scale: f32,
	/// Reflectance amount.
	pub reflectance: f32,
}

impl Material {
	/// Wrap U coordinates.
	pub const S_WRAP: u32 = 0x1;
	/// Wrap V coordinates.
	pub const T_WRAP: u32 = 0x2;
	/// Translucent.
	pub const TRANSLUCENT: u32 = 0x4;
	/// Additive blending.
	pub const ADDITIVE: u32 = 0x8;
	/// Subtractive blending.
	pub const SUBTRACTIVE: u32 = 0x10;
	/// Self-illuminating.
	pub const SELF_ILLUMINATING: u32 = 0x20;
	/// No environment mapping.
	pub const NEVER_ENV_MAP: u32 = 0x40;
	/// No mipmaps.
	pub const NO_MIP_MAP: u32 = 0x80;
	/// Mipmap with zero border.
	pub const MIP_MAP_ZERO_BORDER: u32 = 0x100;
	/// Image-flip-list material.
	pub const IFL_MATERIAL: u32 = 0x0800_0000;
	/// IFL frame material.
	pub const IFL_FRAME: u32 = 0x1000_0000;
	/// Detail map only, never drawn directly.
	pub const DETAIL_MAP_ONLY: u32 = 0x2000_0000;
	/// Bump map only.
	pub const BUMP_MAP_ONLY: u32 = 0x4000_0000;
	/// Reflectance map only.
	pub const REFLECTANCE_MAP_ONLY: u32 = 0x8000_0000;
}

/// Material section of the top-level stream.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct MaterialList {
	/// Entries in stored order.
	pub materials: Vec<Material>,
}

impl MaterialList {
	/// Stream-type flag value that selects a material list.
	pub const STREAM_TYPE: i8 = 1;

	/// Read the count, the names, and the parallel property arrays.
	pub(crate) fn read(cursor: &mut Cursor<'_>, rules: FormatRules, options: &DecodeOptions) -> Result<Self> {
		let count = cursor.read_count("materials", options)?;
		let names = cursor.read_vec(count, 1, Cursor::read_pascal_string)?;
		let flags = cursor.read_vec(count, 4, Cursor::read_u32)?;
		let reflectance_maps = cursor.read_vec(count, 4, Cursor::read_i32)?;
		let bump_maps = cursor.read_vec(count, 4, Cursor::read_i32)?;
		let detail_maps = cursor.read_vec(count, 4, Cursor::read_i32)?;
		let padding = if rules.material_padding {
			cursor.read_vec(count, 4, Cursor::read_i32)?.into_iter().map(Some).collect()
		} else {
			vec![None; count]
		};
		let detail_scales = cursor.read_vec(count, 4, Cursor::read_f32)?;
		let reflectance = cursor.read_vec(count, 4, Cursor::read_f32)?;

		let mut materials = Vec::with_capacity(count);
		for i in 0..count {
			materials.push(Material {
				name: names[i].clone(),
				flags: flags[i],
				reflectance_map: map_index(reflectance_maps[i]),
				bump_map: map_index(bump_maps[i]),
				detail_map: map_index(detail_maps[i]),
				padding: padding[i],
				detail_scale: detail_scales[i],
				reflectance: reflectance[i],
			});
		}
		Ok(Self { materials })
	}

	/// Number of materials.
	pub fn len(&self) -> usize {
		self.materials.len()
	}

	/// Whether the list is empty.
	pub fn is_empty(&self) -> bool {
		self.materials.is_empty()
	}

	/// Look up a material by name.
	pub fn find(&self, name: &str) -> Option<&Material> {
		self.materials.iter().find(|item| item.name == name)
	}
}

fn map_index(raw: i32) -> Option<u32> {
	u32::try_from(raw).ok()
}

#[cfg(test)]
mod tests;
