use std::io::Read;

use serde::Serialize;

use crate::dts::{Result, ShapeError};

/// Upper bound on decompressed output.
pub const MAX_DECOMPRESSED_BYTES: usize = 512 * 1024 * 1024;
/// zstd frame magic.
pub const ZSTD_MAGIC: [u8; 4] = [0x28, 0xB5, 0x2F, 0xFD];

/// Compression wrapping detected on a source file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Compression {
	/// Raw shape bytes.
	None,
	/// zstd frame around the shape bytes.
	Zstd,
}

impl Compression {
	/// Render compression mode as a stable lowercase label.
	pub fn as_str(self) -> &'static str {
		match self {
			Self::None => "none",
			Self::Zstd => "zstd",
		}
	}
}

/// Unwrap a zstd frame if present, returning `(mode, shape_bytes)`.
///
/// Shape files carry no magic of their own, so anything that is not zstd passes through.
pub fn decompress(raw: Vec<u8>) -> Result<(Compression, Vec<u8>)> {
	decompress_with_limit(raw, MAX_DECOMPRESSED_BYTES)
}

pub(crate) fn decompress_with_limit(raw: Vec<u8>, limit: usize) -> Result<(Compression, Vec<u8>)> {
	if !raw.starts_with(&ZSTD_MAGIC) {
		return Ok((Compression::None, raw));
	}

	let mut decoder = zstd::stream::read::Decoder::new(raw.as_slice())?;
	let mut out = Vec::new();
	let mut buf = [0_u8; 8192];
	loop {
		let read = decoder.read(&mut buf)?;
		if read == 0 {
			break;
		}
		if out.len() + read > limit {
			return Err(ShapeError::DecompressedTooLarge { limit });
		}
		out.extend_from_slice(&buf[..read]);
	}

	tracing::debug!(compressed = raw.len(), decompressed = out.len(), "zstd frame unpacked");
	Ok((Compression::Zstd, out))
}
