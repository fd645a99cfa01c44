use thiserror::Error;

/// Result type for geometry operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while turning STL data into mesh buffers
#[derive(Error, Debug)]
pub enum Error {
    #[error("Too many triangles: {count} exceeds the u32 index limit of {max}")]
    TooManyTriangles { count: usize, max: usize },

    #[error("Input too large: {size} bytes exceeds the {max}-byte limit")]
    InputTooLarge { size: usize, max: usize },

    #[error("Core decoder error: {0}")]
    CoreError(#[from] stl_lite_core::Error),
}
