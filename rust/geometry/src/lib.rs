//! STL-Lite Geometry Processing
//!
//! Flat-shaded mesh buffers built from raw STL triangles, bounding boxes,
//! and the unit/up-axis normalization pass, using nalgebra for transforms.

pub mod bounds;
pub mod builder;
pub mod error;
pub mod mesh;
pub mod normalize;
pub mod transform;

// Re-export nalgebra types for convenience
pub use nalgebra::{Point3, UnitQuaternion, Vector3};

pub use bounds::BoundingBox;
pub use builder::MeshBuilder;
pub use error::{Error, Result};
pub use mesh::MeshBuffers;
pub use normalize::{z_up_to_y_up, MeshNormalizer, NormalizationResult, NormalizerConfig, ScaleInference};
