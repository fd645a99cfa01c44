// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Flat-shaded mesh construction from raw STL triangles
//!
//! Every triangle gets three fresh vertices carrying the source facet normal.
//! Coincident positions are never welded and normals are never recomputed,
//! so a zero normal in the file stays a zero normal here.

use stl_lite_core::{RawTriangle, Vec3f};

use crate::error::{Error, Result};
use crate::mesh::MeshBuffers;

/// Builds [`MeshBuffers`] from raw triangles
pub struct MeshBuilder;

impl MeshBuilder {
    /// Largest triangle count whose indices fit in u32
    pub const MAX_TRIANGLES: usize = (u32::MAX / 3) as usize;

    /// Build flat-shaded buffers; triangle `i` owns vertices `3i..3i+3`
    ///
    /// Callers handling untrusted counts should go through [`Self::try_build`].
    pub fn build<I>(triangles: I) -> MeshBuffers
    where
        I: IntoIterator<Item = RawTriangle>,
    {
        let triangles = triangles.into_iter();
        let (lower, _) = triangles.size_hint();

        let mut parts = Parts::with_capacity(lower);
        for tri in triangles {
            parts.push(&tri);
        }
        parts.finish()
    }

    /// Build straight from a decoder's triangle stream, such as
    /// `BinaryStlDecoder::triangles`, without collecting it first
    ///
    /// The count is checked up front; the first decode error aborts the build.
    pub fn try_build_stream<I>(triangles: I) -> Result<MeshBuffers>
    where
        I: ExactSizeIterator<Item = stl_lite_core::Result<RawTriangle>>,
    {
        Self::check_count(triangles.len())?;

        let mut parts = Parts::with_capacity(triangles.len());
        for tri in triangles {
            parts.push(&tri?);
        }
        Ok(parts.finish())
    }

    /// Build after checking that every index fits in u32
    pub fn try_build(triangles: &[RawTriangle]) -> Result<MeshBuffers> {
        Self::check_count(triangles.len())?;
        Ok(Self::build(triangles.iter().copied()))
    }

    /// Reject triangle counts whose vertex indices would overflow u32
    #[inline]
    pub fn check_count(count: usize) -> Result<()> {
        if count > Self::MAX_TRIANGLES {
            return Err(Error::TooManyTriangles {
                count,
                max: Self::MAX_TRIANGLES,
            });
        }
        Ok(())
    }
}

struct Parts {
    positions: Vec<Vec3f>,
    normals: Vec<Vec3f>,
    indices: Vec<u32>,
}

impl Parts {
    fn with_capacity(triangles: usize) -> Self {
        Self {
            positions: Vec::with_capacity(triangles * 3),
            normals: Vec::with_capacity(triangles * 3),
            indices: Vec::with_capacity(triangles * 3),
        }
    }

    #[inline]
    fn push(&mut self, tri: &RawTriangle) {
        let base = self.positions.len() as u32;
        self.positions.extend_from_slice(&tri.vertices());
        self.normals.extend_from_slice(&[tri.normal; 3]);
        self.indices.extend_from_slice(&[base, base + 1, base + 2]);
    }

    fn finish(self) -> MeshBuffers {
        MeshBuffers::from_parts(self.positions, self.normals, self.indices)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn triangle(offset: f32, normal: [f32; 3]) -> RawTriangle {
        RawTriangle::new(
            normal,
            [offset, 0.0, 0.0],
            [offset + 1.0, 0.0, 0.0],
            [offset, 1.0, 0.0],
        )
    }

    #[test]
    fn test_identity_indices() {
        let tris: Vec<_> = (0..4).map(|i| triangle(i as f32, [0.0, 0.0, 1.0])).collect();
        let mesh = MeshBuilder::build(tris.iter().copied());

        assert_eq!(mesh.vertex_count(), 12);
        assert_eq!(mesh.normals().len(), 12);
        assert_eq!(mesh.indices(), (0..12).collect::<Vec<u32>>().as_slice());
    }

    #[test]
    fn test_positions_keep_winding() {
        let tri = triangle(5.0, [0.0, 0.0, 1.0]);
        let mesh = MeshBuilder::build([tri]);
        assert_eq!(mesh.positions(), &tri.vertices());
    }

    #[test]
    fn test_normals_duplicated_including_zero() {
        let tris = vec![triangle(0.0, [0.0, 0.0, 0.0]), triangle(1.0, [0.0, 3.0, 0.0])];
        let mesh = MeshBuilder::build(tris.clone());

        for (i, tri) in tris.iter().enumerate() {
            for n in &mesh.normals()[i * 3..i * 3 + 3] {
                assert_eq!(*n, tri.normal);
            }
        }
    }

    #[test]
    fn test_coincident_vertices_not_welded() {
        let tri = triangle(0.0, [0.0, 0.0, 1.0]);
        let mesh = MeshBuilder::build([tri, tri]);
        assert_eq!(mesh.vertex_count(), 6);
        assert_eq!(mesh.indices(), &[0, 1, 2, 3, 4, 5]);
    }

    #[test]
    fn test_empty_input() {
        let mesh = MeshBuilder::try_build(&[]).unwrap();
        assert!(mesh.is_empty());
        assert!(mesh.indices().is_empty());
    }

    #[test]
    fn test_stream_matches_collected_build() {
        let tris: Vec<_> = (0..3).map(|i| triangle(i as f32, [0.0, 1.0, 0.0])).collect();
        let bytes = stl_lite_core::encode_binary(&tris, b"").unwrap();
        let stream = stl_lite_core::BinaryStlDecoder::triangles(&bytes).unwrap();

        let streamed = MeshBuilder::try_build_stream(stream).unwrap();
        assert_eq!(streamed, MeshBuilder::build(tris));
    }

    #[test]
    fn test_stream_error_aborts_build() {
        let items = vec![
            Ok(triangle(0.0, [0.0, 0.0, 1.0])),
            Err(stl_lite_core::Error::truncated("record 1")),
        ];
        assert!(matches!(
            MeshBuilder::try_build_stream(items.into_iter()),
            Err(Error::CoreError(stl_lite_core::Error::TruncatedOrCorrupt(_)))
        ));
    }

    #[test]
    fn test_check_count() {
        assert!(MeshBuilder::check_count(MeshBuilder::MAX_TRIANGLES).is_ok());
        assert!(matches!(
            MeshBuilder::check_count(MeshBuilder::MAX_TRIANGLES + 1),
            Err(Error::TooManyTriangles { .. })
        ));
    }
}
