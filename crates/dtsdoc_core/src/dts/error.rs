use std::fmt;

use thiserror::Error;

/// Crate-local result type.
pub type Result<T> = std::result::Result<T, ShapeError>;

/// Byte stream a read was issued against.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stream {
	/// 32-bit word lane of the packed region.
	Lane32,
	/// 16-bit word lane of the packed region.
	Lane16,
	/// 8-bit byte lane of the packed region.
	Lane8,
	/// Unpacked top-level stream (file header, sequences, materials).
	Top,
}

impl Stream {
	/// Stable lowercase label.
	pub fn as_str(self) -> &'static str {
		match self {
			Self::Lane32 => "lane32",
			Self::Lane16 => "lane16",
			Self::Lane8 => "lane8",
			Self::Top => "top",
		}
	}
}

impl fmt::Display for Stream {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.as_str())
	}
}

/// Errors produced while loading and decoding shape data.
#[derive(Debug, Error)]
pub enum ShapeError {
	/// Filesystem or stream IO failure.
	#[error("io: {0}")]
	Io(#[from] std::io::Error),
	/// Decompression output exceeded configured safety limit.
	#[error("decompressed output exceeded limit {limit} bytes")]
	DecompressedTooLarge {
		/// Maximum allowed output bytes.
		limit: usize,
	},
	/// Embedded format version has no layout rules.
	#[error("unsupported shape version {version} (expected 19..=26)")]
	UnsupportedVersion {
		/// Low 16 bits of the leading version word.
		version: u16,
	},
	/// Not enough data remained in a lane or the top-level stream.
	#[error("out of data in {stream} at offset {at}, need {need} bytes, remaining {rem}")]
	OutOfData {
		/// Stream the read was issued against.
		stream: Stream,
		/// Absolute byte offset in the input buffer.
		at: usize,
		/// Requested bytes.
		need: usize,
		/// Bytes still available in the stream.
		rem: usize,
	},
	/// Guard checkpoint values disagree with each other or the running counter.
	#[error("guard mismatch: expected {expected}, got lane32={got32} lane16={got16} lane8={got8}")]
	GuardMismatch {
		/// Counter value before increment.
		expected: u32,
		/// Value read from the 32-bit lane.
		got32: u32,
		/// Value read from the 16-bit lane.
		got16: u16,
		/// Value read from the 8-bit lane.
		got8: u8,
	},
	/// Lane word offsets in the file header are not monotonic or exceed the file.
	#[error("invalid lane layout: total_words={total_words}, start16={start16}, start8={start8}")]
	InvalidLaneLayout {
		/// Declared size of the packed region in 32-bit words.
		total_words: u32,
		/// Word offset of the 16-bit lane.
		start16: u32,
		/// Word offset of the 8-bit lane.
		start8: u32,
	},
	/// A declared element count was negative.
	#[error("negative count {count} for {table}")]
	NegativeCount {
		/// Logical table being sized.
		table: &'static str,
		/// Offending count.
		count: i32,
	},
	/// A declared element count exceeded the configured ceiling.
	#[error("count too large for {table}: count={count}, max={max}")]
	CountTooLarge {
		/// Logical table being sized.
		table: &'static str,
		/// Declared count.
		count: usize,
		/// Maximum permitted count.
		max: usize,
	},
	/// Mesh type tag (flags masked off) is not a known mesh kind.
	#[error("unknown mesh type {raw:#010x} for mesh {index}")]
	UnknownMeshType {
		/// Mesh table index.
		index: usize,
		/// Raw type word as stored.
		raw: u32,
	},
	/// Strict mode found bytes after the material section.
	#[error("trailing data at offset {at}: {rem} bytes")]
	TrailingData {
		/// Offset of the first unread byte.
		at: usize,
		/// Unread byte count.
		rem: usize,
	},
}
