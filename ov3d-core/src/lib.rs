/// OV3D Core Library - OBJ decoding and transformation math
///
/// This library provides the stateless core functionality for 3D rendering:
/// parsing a triangulated OBJ subset into compact indexed vertex buffers,
/// and the 4x4 matrix algebra (multiply, cofactor inverse-transpose,
/// perspective projection) used to place and project the result.

pub mod error;
pub mod geometry;
pub mod matrix;
pub mod obj;
pub mod projection;
pub mod transform;

// Re-export commonly used types
pub use error::ObjError;
pub use geometry::IndexedMesh;
pub use matrix::{Mat4, MatrixError};
pub use projection::{perspective, Camera, ProjectionError};
pub use transform::{RotationState, Transform};
