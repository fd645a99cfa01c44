// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Shared STL import pipeline used by hosts and the engine facade.
//!
//! bytes → format detection → binary/ASCII decoding → flat-shaded mesh
//! buffers → bounds → scale/axis normalization.

pub mod batch;
pub mod config;
pub mod pipeline;
pub mod report;

pub use batch::import_batch;
pub use config::ImportConfig;
pub use pipeline::{import_stl, ImportedMesh};
pub use report::{ImportReport, ImportStats};

pub use stl_lite_core::{Error as StlError, Format};
pub use stl_lite_geometry::{
    BoundingBox, Error, MeshBuffers, NormalizationResult, NormalizerConfig, Result, ScaleInference,
};
