// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Applying a normalization result to mesh buffers
//!
//! The source mesh is never modified: transforming yields a new
//! [`MeshBuffers`] whose bounds are derived afresh.

use nalgebra::{Point3, Vector3};
#[cfg(not(target_arch = "wasm32"))]
use rayon::prelude::*;
use stl_lite_core::Vec3f;

use crate::mesh::MeshBuffers;
use crate::normalize::NormalizationResult;

/// Below this vertex count the thread pool costs more than it saves
const PARALLEL_VERTEX_THRESHOLD: usize = 64 * 1024;

#[inline]
fn transform_position(t: &NormalizationResult, p: &Vec3f) -> Vec3f {
    let out = t.apply_to_point(&Point3::new(p[0], p[1], p[2]));
    [out.x, out.y, out.z]
}

#[inline]
fn transform_normal(t: &NormalizationResult, n: &Vec3f) -> Vec3f {
    let out = t.apply_to_normal(&Vector3::new(n[0], n[1], n[2]));
    [out.x, out.y, out.z]
}

fn map_vertices(data: &[Vec3f], f: impl Fn(&Vec3f) -> Vec3f + Sync + Send) -> Vec<Vec3f> {
    // On WASM: sequential only (no threads available)
    #[cfg(not(target_arch = "wasm32"))]
    if data.len() >= PARALLEL_VERTEX_THRESHOLD {
        return data.par_iter().map(f).collect();
    }
    data.iter().map(f).collect()
}

impl MeshBuffers {
    /// New buffers with positions scaled then rotated and normals rotated
    ///
    /// Indices are copied unchanged, so winding and flat-shading duplication
    /// carry over.
    pub fn transformed(&self, transform: &NormalizationResult) -> MeshBuffers {
        let positions = map_vertices(self.positions(), |p| transform_position(transform, p));
        let normals = map_vertices(self.normals(), |n| transform_normal(transform, n));
        MeshBuffers::from_parts(positions, normals, self.indices().to_vec())
    }
}
