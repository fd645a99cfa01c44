// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Mesh data structures

use stl_lite_core::Vec3f;

use crate::bounds::BoundingBox;

/// Flat-shaded triangle mesh
///
/// `positions` and `normals` are parallel arrays; `indices` holds three
/// entries per triangle. Buffers are only ever produced by
/// [`MeshBuilder`](crate::MeshBuilder) or by transforming an existing mesh,
/// and are read-only afterwards.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct MeshBuffers {
    positions: Vec<Vec3f>,
    normals: Vec<Vec3f>,
    indices: Vec<u32>,
}

impl MeshBuffers {
    /// Create an empty mesh
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn from_parts(positions: Vec<Vec3f>, normals: Vec<Vec3f>, indices: Vec<u32>) -> Self {
        debug_assert_eq!(positions.len(), normals.len());
        debug_assert_eq!(indices.len() % 3, 0);
        Self {
            positions,
            normals,
            indices,
        }
    }

    /// Vertex positions (x, y, z)
    #[inline]
    pub fn positions(&self) -> &[Vec3f] {
        &self.positions
    }

    /// Vertex normals (nx, ny, nz), one per position
    #[inline]
    pub fn normals(&self) -> &[Vec3f] {
        &self.normals
    }

    /// Triangle indices (i0, i1, i2)
    #[inline]
    pub fn indices(&self) -> &[u32] {
        &self.indices
    }

    /// Get vertex count
    #[inline]
    pub fn vertex_count(&self) -> usize {
        self.positions.len()
    }

    /// Get triangle count
    #[inline]
    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    /// Check if mesh is empty
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    /// Positions flattened for GPU upload: [x0, y0, z0, x1, ...]
    pub fn positions_flat(&self) -> Vec<f32> {
        self.positions.iter().flatten().copied().collect()
    }

    /// Normals flattened for GPU upload: [nx0, ny0, nz0, nx1, ...]
    pub fn normals_flat(&self) -> Vec<f32> {
        self.normals.iter().flatten().copied().collect()
    }

    /// Derive a fresh bounding box from the current positions
    #[inline]
    pub fn bounds(&self) -> BoundingBox {
        BoundingBox::from_positions(&self.positions)
    }

    /// Take ownership of (positions, normals, indices)
    pub fn into_parts(self) -> (Vec<Vec3f>, Vec<Vec3f>, Vec<u32>) {
        (self.positions, self.normals, self.indices)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mesh_creation() {
        let mesh = MeshBuffers::new();
        assert!(mesh.is_empty());
        assert_eq!(mesh.vertex_count(), 0);
        assert_eq!(mesh.triangle_count(), 0);
    }

    #[test]
    fn test_flat_views() {
        let mesh = MeshBuffers::from_parts(
            vec![[1.0, 2.0, 3.0], [4.0, 5.0, 6.0], [7.0, 8.0, 9.0]],
            vec![[0.0, 0.0, 1.0]; 3],
            vec![0, 1, 2],
        );
        assert_eq!(
            mesh.positions_flat(),
            vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0, 8.0, 9.0]
        );
        assert_eq!(mesh.normals_flat().len(), 9);
        assert_eq!(mesh.triangle_count(), 1);
    }

    #[test]
    fn test_into_parts() {
        let mesh = MeshBuffers::from_parts(vec![[0.0; 3]; 3], vec![[0.0; 3]; 3], vec![0, 1, 2]);
        let (positions, normals, indices) = mesh.into_parts();
        assert_eq!(positions.len(), 3);
        assert_eq!(normals.len(), 3);
        assert_eq!(indices, vec![0, 1, 2]);
    }
}
