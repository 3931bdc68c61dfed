use std::fs;
use std::path::Path;

use crate::dts::compression::decompress;
use crate::dts::{Compression, DecodeOptions, Result, Shape, decode_with};

/// A shape loaded from disk.
pub struct ShapeFile {
	/// Compression wrapping found on the file.
	pub compression: Compression,
	/// Size of the shape bytes after decompression.
	pub size: usize,
	/// Decoded shape.
	pub shape: Shape,
}

impl ShapeFile {
	/// Read, unwrap, and decode the file at `path` with default options.
	pub fn open(path: impl AsRef<Path>) -> Result<Self> {
		Self::open_with(path, &DecodeOptions::default())
	}

	/// Read, unwrap, and decode the file at `path`.
	pub fn open_with(path: impl AsRef<Path>, options: &DecodeOptions) -> Result<Self> {
		let path = path.as_ref();
		let raw = fs::read(path)?;
		let (compression, bytes) = decompress(raw)?;
		tracing::debug!(path = %path.display(), compression = compression.as_str(), size = bytes.len(), "shape file read");

		let shape = decode_with(&bytes, options)?;
		Ok(Self {
			compression,
			size: bytes.len(),
			shape,
		})
	}
}

#[cfg(test)]
mod tests {
	use std::fs;

	use crate::dts::{Compression, ShapeError, ShapeFile};

	#[test]
	fn opens_raw_and_zstd_files() {
		let dir = tempfile::tempdir().expect("temp dir");
		let bytes = dtsdoc_testkit::empty_shape(25);

		let raw_path = dir.path().join("raw.dts");
		fs::write(&raw_path, &bytes).expect("write raw");
		let raw = ShapeFile::open(&raw_path).expect("raw opens");
		assert_eq!(raw.compression, Compression::None);
		assert_eq!(raw.size, bytes.len());
		assert_eq!(raw.shape.version, 25);

		let zst_path = dir.path().join("packed.dts.zst");
		fs::write(&zst_path, zstd::encode_all(bytes.as_slice(), 3).expect("zstd encodes")).expect("write zstd");
		let packed = ShapeFile::open(&zst_path).expect("zstd opens");
		assert_eq!(packed.compression, Compression::Zstd);
		assert_eq!(packed.shape, raw.shape);
	}

	#[test]
	fn missing_file_is_io_error() {
		let dir = tempfile::tempdir().expect("temp dir");
		let err = ShapeFile::open(dir.path().join("absent.dts")).err().expect("open fails");
		assert!(matches!(err, ShapeError::Io(_)));
	}
}
