mod bytes;
mod compression;
mod decode;
mod detail;
mod error;
mod file;
mod guard;
mod header;
mod keyframe;
mod lane;
mod material;
mod mesh;
mod options;
mod prim;
mod sequence;
mod shape;
mod topology;
mod tree;
mod version;

/// Zstd detection and unwrapping.
pub use compression::{Compression, MAX_DECOMPRESSED_BYTES, ZSTD_MAGIC, decompress};
/// In-memory decode entry points.
pub use decode::{decode, decode_with};
/// Detail-level records.
pub use detail::{BillboardDetail, Detail};
/// Error and result aliases.
pub use error::{Result, ShapeError, Stream};
/// File loading.
pub use file::ShapeFile;
/// Guard checkpoint counter.
pub use guard::GuardTracker;
/// File header, lane layout, and packed-region header records.
pub use header::{FileHeader, LaneLayout, ShapeBounds, ShapeCounts, SmallestVisible};
/// Default pose and keyframe arrays.
pub use keyframe::{DefaultPose, GroundKeys, Keyframes, NodeKeys, ObjectState, ScaleKeys, Trigger};
/// Lane cursors.
pub use lane::{Lane, LaneWord, Lanes};
/// Material list.
pub use material::{Material, MaterialList};
/// Mesh variants and geometry.
pub use mesh::{Cluster, Mesh, MeshGeometry, MeshKind, MeshTypeFlags, Primitive, PrimitiveType, SkinData, SortedData};
/// Decoder limits and switches.
pub use options::DecodeOptions;
/// Quaternion decoding for 16-bit lane values.
pub use prim::quat_from_i16;
/// Animation sequences.
pub use sequence::{KeyRange, MattersSet, Sequence, SequenceFlags};
/// Decoded shape descriptor.
pub use shape::{Bounds, Shape};
/// Node, object, and subshape tables.
pub use topology::{Decal, IflMaterial, Node, Object, SubShape, TableRange};
/// Node hierarchy view.
pub use tree::{NodeTree, TreeError, Walk};
/// Per-revision layout rules.
pub use version::{FormatRules, IndexWidth, MAX_VERSION, MIN_VERSION, PrimitiveLayout};
