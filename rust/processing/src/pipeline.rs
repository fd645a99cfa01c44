// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! End-to-end STL import: detect, decode, build, normalize.

use std::time::{Duration, Instant};

use stl_lite_core::{AsciiStlDecoder, BinaryStlDecoder, Format, StlFormatDetector};
use stl_lite_geometry::{
    BoundingBox, Error, MeshBuffers, MeshBuilder, MeshNormalizer, NormalizationResult, Result,
};

use crate::config::ImportConfig;
use crate::report::{ImportReport, ImportStats};

/// A fully imported STL model.
#[derive(Debug, Clone)]
pub struct ImportedMesh {
    /// Encoding of the source bytes.
    pub format: Format,
    /// Binary header text or ASCII solid name.
    pub name: Option<String>,
    /// Flat-shaded buffers in source coordinates.
    pub mesh: MeshBuffers,
    /// Bounds of `mesh` in source coordinates.
    pub bounds: BoundingBox,
    /// Recommended scale and orientation.
    pub normalization: NormalizationResult,
    /// Timing information.
    pub stats: ImportStats,
}

impl ImportedMesh {
    /// Mesh with the recommended transform applied.
    pub fn display_mesh(&self) -> MeshBuffers {
        self.mesh.transformed(&self.normalization)
    }

    /// Bounds derived from the transformed positions.
    pub fn display_bounds(&self) -> BoundingBox {
        self.display_mesh().bounds()
    }

    /// Serializable summary.
    pub fn report(&self) -> ImportReport {
        ImportReport::from_import(self)
    }
}

/// Import one STL buffer.
///
/// Pure and synchronous; run it off latency-sensitive threads for large
/// files. Every failure is terminal and no partial mesh is returned.
pub fn import_stl(bytes: &[u8], config: &ImportConfig) -> Result<ImportedMesh> {
    let total_start = Instant::now();

    tracing::info!(input_size = bytes.len(), "Starting STL import");

    let max = config.max_input_bytes();
    if bytes.len() > max {
        tracing::warn!(input_size = bytes.len(), max_input_bytes = max, "Rejecting oversized STL input");
        return Err(Error::InputTooLarge {
            size: bytes.len(),
            max,
        });
    }

    let DecodedMesh {
        format,
        name,
        mesh,
        decode_time,
        build_time,
    } = decode_mesh(bytes).map_err(|err| {
        tracing::debug!(error = %err, "STL decode failed");
        err
    })?;

    let zero_normals = mesh
        .normals()
        .iter()
        .step_by(3)
        .filter(|n| **n == [0.0, 0.0, 0.0])
        .count();
    tracing::debug!(
        format = %format,
        name = ?name,
        triangles = mesh.triangle_count(),
        zero_normals,
        decode_time_ms = decode_time.as_millis() as u64,
        build_time_ms = build_time.as_millis() as u64,
        "Decoded STL"
    );
    if mesh.is_empty() {
        tracing::warn!(format = %format, "STL contains no triangles");
    }

    let bounds = mesh.bounds();
    let normalization = MeshNormalizer::with_config(config.normalizer).normalize(&bounds);

    let stats = ImportStats {
        decode_time_ms: decode_time.as_millis() as u64,
        build_time_ms: build_time.as_millis() as u64,
        total_time_ms: total_start.elapsed().as_millis() as u64,
    };

    tracing::info!(
        format = %format,
        triangles = mesh.triangle_count(),
        vertices = mesh.vertex_count(),
        max_extent = bounds.max_extent(),
        uniform_scale = normalization.uniform_scale,
        scale_inference = normalization.inference.as_str(),
        total_time_ms = stats.total_time_ms,
        "STL import complete"
    );

    Ok(ImportedMesh {
        format,
        name,
        mesh,
        bounds,
        normalization,
        stats,
    })
}

struct DecodedMesh {
    format: Format,
    name: Option<String>,
    mesh: MeshBuffers,
    decode_time: Duration,
    build_time: Duration,
}

/// Detect once, then decode and build.
///
/// Binary records stream straight into the builder once the size equation
/// holds, so "decode" time covers detection and validation only. ASCII is
/// parsed into triangles first.
fn decode_mesh(bytes: &[u8]) -> Result<DecodedMesh> {
    let decode_start = Instant::now();
    let format = StlFormatDetector::detect(bytes)?;

    match format {
        Format::Binary => {
            let name = BinaryStlDecoder::header_name(bytes);
            let triangles = BinaryStlDecoder::triangles(bytes)?;
            let decode_time = decode_start.elapsed();

            let build_start = Instant::now();
            let mesh = MeshBuilder::try_build_stream(triangles)?;
            Ok(DecodedMesh {
                format,
                name,
                mesh,
                decode_time,
                build_time: build_start.elapsed(),
            })
        }
        Format::Ascii => {
            let (name, triangles) = AsciiStlDecoder::decode_named(bytes)?;
            let decode_time = decode_start.elapsed();

            let build_start = Instant::now();
            let mesh = MeshBuilder::try_build(&triangles)?;
            Ok(DecodedMesh {
                format,
                name,
                mesh,
                decode_time,
                build_time: build_start.elapsed(),
            })
        }
    }
}
