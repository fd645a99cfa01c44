// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Host-side STL engine
//!
//! Thin facade over [`stl_lite_processing`] for hosts that start from a file
//! path. Files are memory-mapped and handed to the pipeline as one byte slice;
//! everything after that is the shared, platform-independent import.

mod error;

use std::fs::File;
use std::path::Path;

use memmap2::Mmap;
use serde::{Deserialize, Serialize};
use stl_lite_processing::{import_stl, ImportConfig, NormalizerConfig};

pub use error::{EngineError, Result};
pub use stl_lite_processing::{
    BoundingBox, Format, ImportReport, ImportedMesh, MeshBuffers, NormalizationResult,
    ScaleInference, StlError,
};

/// Host-supplied overrides on top of [`ImportConfig::default`].
///
/// Every field is optional so hosts can pass a partial JSON object.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct EngineOptions {
    pub millimeter_threshold: Option<f32>,
    pub oversize_threshold: Option<f32>,
    pub millimeter_scale: Option<f32>,
    pub max_input_mb: Option<usize>,
    pub worker_threads: Option<usize>,
}

impl EngineOptions {
    pub fn into_config(self) -> ImportConfig {
        let defaults = ImportConfig::default();
        let normalizer = NormalizerConfig {
            millimeter_threshold: self
                .millimeter_threshold
                .unwrap_or(defaults.normalizer.millimeter_threshold),
            oversize_threshold: self
                .oversize_threshold
                .unwrap_or(defaults.normalizer.oversize_threshold),
            millimeter_scale: self
                .millimeter_scale
                .unwrap_or(defaults.normalizer.millimeter_scale),
        };
        ImportConfig {
            normalizer,
            max_input_mb: self.max_input_mb.unwrap_or(defaults.max_input_mb),
            worker_threads: self.worker_threads.or(defaults.worker_threads),
        }
    }
}

/// STL import engine
#[derive(Debug, Clone, Default)]
pub struct StlEngine {
    config: ImportConfig,
}

impl StlEngine {
    pub fn new(config: ImportConfig) -> Self {
        Self { config }
    }

    /// Engine configured from `STL_LITE_*` environment variables.
    pub fn from_env() -> Self {
        Self::new(ImportConfig::from_env())
    }

    pub fn with_options(options: EngineOptions) -> Self {
        Self::new(options.into_config())
    }

    pub fn config(&self) -> &ImportConfig {
        &self.config
    }

    /// Import an in-memory buffer.
    pub fn import_bytes(&self, bytes: &[u8]) -> Result<ImportedMesh> {
        Ok(import_stl(bytes, &self.config)?)
    }

    /// Memory-map `path` and import it.
    ///
    /// Empty files are never mapped (mapping zero bytes fails on some
    /// platforms); they go straight to the pipeline and surface `EmptyInput`.
    /// Files over the configured size limit are rejected before mapping.
    pub fn import_path(&self, path: impl AsRef<Path>) -> Result<ImportedMesh> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|err| EngineError::io(path, err))?;
        let len = file
            .metadata()
            .map_err(|err| EngineError::io(path, err))?
            .len();

        tracing::debug!(path = %path.display(), file_size = len, "Opening STL file");

        if len == 0 {
            return self.import_bytes(&[]);
        }

        let max = self.config.max_input_bytes();
        let size = usize::try_from(len).unwrap_or(usize::MAX);
        if size > max {
            tracing::warn!(path = %path.display(), file_size = len, max_input_bytes = max, "Rejecting oversized STL file");
            return Err(stl_lite_processing::Error::InputTooLarge { size, max }.into());
        }

        // SAFETY: the mapping is read-only and lives only for this call. A
        // concurrent truncation by another process is outside our control, as
        // with any mmap-based reader.
        let mmap = unsafe { Mmap::map(&file) }.map_err(|err| EngineError::io(path, err))?;

        let imported = self.import_bytes(&mmap)?;
        tracing::info!(
            path = %path.display(),
            format = %imported.format,
            triangles = imported.mesh.triangle_count(),
            "Imported STL file"
        );
        Ok(imported)
    }

    /// Import a file and return only its serializable summary.
    pub fn report_path(&self, path: impl AsRef<Path>) -> Result<ImportReport> {
        self.import_path(path).map(|imported| imported.report())
    }
}
