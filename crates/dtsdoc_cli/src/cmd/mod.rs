/// Serialized descriptor command.
pub mod dump;
/// File-level information command.
pub mod info;
/// Material list command.
pub mod materials;
/// Mesh table command.
pub mod meshes;
/// Node hierarchy command.
pub mod nodes;
/// Sequence table command.
pub mod sequences;
/// Shared argument and output helpers.
pub mod util;
