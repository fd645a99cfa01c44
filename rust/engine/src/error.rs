// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use std::path::PathBuf;

use thiserror::Error;

pub type Result<T> = std::result::Result<T, EngineError>;

/// Errors raised by the engine facade
#[derive(Error, Debug)]
pub enum EngineError {
    #[error("Failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error(transparent)]
    Import(#[from] stl_lite_processing::Error),
}

impl EngineError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    /// Decode-level error, if the failure came from the STL bytes themselves.
    pub fn stl_error(&self) -> Option<&stl_lite_processing::StlError> {
        match self {
            Self::Import(stl_lite_processing::Error::CoreError(err)) => Some(err),
            _ => None,
        }
    }
}
