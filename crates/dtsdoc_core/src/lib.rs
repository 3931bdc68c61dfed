//! Public library API for decoding legacy `.dts` shape containers (versions 19-26).

/// Shape container decoding, lane cursors, guard checks, and node-tree helpers.
pub mod dts;
