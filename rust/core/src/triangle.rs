// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Raw triangle data as stored in STL files

/// Three f32 components (x, y, z)
pub type Vec3f = [f32; 3];

/// One triangle exactly as the source file describes it
///
/// The normal is carried through untouched. STL exporters routinely write a
/// zero or otherwise unreliable normal; that is a valid value here.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RawTriangle {
    /// Facet normal (nx, ny, nz)
    pub normal: Vec3f,
    /// First vertex
    pub v0: Vec3f,
    /// Second vertex
    pub v1: Vec3f,
    /// Third vertex
    pub v2: Vec3f,
}

impl RawTriangle {
    /// Create a triangle from a normal and three vertices
    #[inline]
    pub fn new(normal: Vec3f, v0: Vec3f, v1: Vec3f, v2: Vec3f) -> Self {
        Self { normal, v0, v1, v2 }
    }

    /// Vertices in file (winding) order
    #[inline]
    pub fn vertices(&self) -> [Vec3f; 3] {
        [self.v0, self.v1, self.v2]
    }

    /// Check if the stored normal is the zero vector
    #[inline]
    pub fn has_zero_normal(&self) -> bool {
        self.normal == [0.0, 0.0, 0.0]
    }
}
