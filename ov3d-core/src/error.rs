/// Error surface for OBJ parsing
use thiserror::Error;

/// Errors produced while decoding an OBJ source into an [`IndexedMesh`].
///
/// A failed parse aborts mesh construction entirely: no partially populated
/// mesh is ever returned alongside one of these.
///
/// [`IndexedMesh`]: crate::geometry::IndexedMesh
#[derive(Debug, Error)]
pub enum ObjError {
    /// A numeric token could not be parsed as a float or integer literal.
    #[error("line {line}: invalid numeric data in '{record}' record")]
    Parse { line: usize, record: &'static str },

    /// A face referenced an attribute index with no prior declaration.
    ///
    /// Index 0 addresses the reserved placeholder slot and is always
    /// out of range.
    #[error("line {line}: face references {attribute} index {index}, but only {declared} are declared")]
    IndexOutOfRange {
        line: usize,
        attribute: &'static str,
        index: u32,
        declared: usize,
    },

    /// A face record did not contain exactly three vertex references.
    #[error("line {line}: face has {count} vertex references, expected exactly 3")]
    FaceArity { line: usize, count: usize },

    /// The underlying source could not be read.
    #[error("failed to read OBJ source: {0}")]
    Io(#[from] std::io::Error),
}
