// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use thiserror::Error;

/// Result type for STL decoding
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while decoding or encoding STL data
///
/// Every variant is terminal for the call that produced it: decoders never
/// hand back a partially decoded triangle list.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum Error {
    #[error("Empty input: STL buffer has zero bytes")]
    EmptyInput,

    #[error("Unrecognized format: neither a size-consistent binary STL nor an ASCII 'solid' document")]
    UnrecognizedFormat,

    #[error("Truncated or corrupt binary STL: {0}")]
    TruncatedOrCorrupt(String),

    #[error("Malformed number '{token}' at line {line}")]
    MalformedNumber { token: String, line: usize },

    #[error("Malformed triangle at line {line}: {message}")]
    MalformedTriangle { line: usize, message: String },

    #[error("Too many triangles for binary STL: {count} exceeds the u32 triangle count field")]
    TooManyTriangles { count: usize },
}

impl Error {
    /// Create a truncation error
    pub fn truncated(message: impl Into<String>) -> Self {
        Self::TruncatedOrCorrupt(message.into())
    }

    /// Create a malformed triangle error
    pub fn malformed_triangle(line: usize, message: impl Into<String>) -> Self {
        Self::MalformedTriangle {
            line,
            message: message.into(),
        }
    }

    /// Create a malformed number error from the offending token bytes
    pub fn malformed_number(token: &[u8], line: usize) -> Self {
        Self::MalformedNumber {
            token: String::from_utf8_lossy(token).into_owned(),
            line,
        }
    }
}
