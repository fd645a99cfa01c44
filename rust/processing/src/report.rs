// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Serializable import summaries.

use serde::{Deserialize, Serialize};

use crate::pipeline::ImportedMesh;

/// Import timing statistics.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImportStats {
    /// Time spent detecting and decoding.
    pub decode_time_ms: u64,
    /// Time spent building mesh buffers.
    pub build_time_ms: u64,
    /// Total import time.
    pub total_time_ms: u64,
}

/// Summary of an imported model for hosts and logs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImportReport {
    /// "binary" or "ascii".
    pub format: String,
    pub name: Option<String>,
    pub triangle_count: usize,
    pub vertex_count: usize,
    /// Source-space bounds.
    pub bounds_min: [f32; 3],
    pub bounds_max: [f32; 3],
    pub max_extent: f32,
    pub uniform_scale: f32,
    /// "millimeters", "oversized" or "target_units".
    pub scale_inference: String,
    /// Axis correction quaternion as [x, y, z, w].
    pub axis_correction: [f32; 4],
    pub stats: ImportStats,
}

impl ImportReport {
    pub fn from_import(imported: &ImportedMesh) -> Self {
        let bounds = &imported.bounds;
        let q = &imported.normalization.axis_correction.quaternion().coords;
        Self {
            format: imported.format.as_str().to_string(),
            name: imported.name.clone(),
            triangle_count: imported.mesh.triangle_count(),
            vertex_count: imported.mesh.vertex_count(),
            bounds_min: [bounds.min.x, bounds.min.y, bounds.min.z],
            bounds_max: [bounds.max.x, bounds.max.y, bounds.max.z],
            max_extent: bounds.max_extent(),
            uniform_scale: imported.normalization.uniform_scale,
            scale_inference: imported.normalization.inference.as_str().to_string(),
            axis_correction: [q.x, q.y, q.z, q.w],
            stats: imported.stats,
        }
    }

    /// Render as JSON.
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }
}
