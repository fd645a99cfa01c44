// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Axis-aligned bounding boxes derived from vertex positions

use nalgebra::{Point3, Vector3};
use stl_lite_core::Vec3f;

/// Axis-aligned bounding box
///
/// Always derived from a position set; to follow a transform, transform the
/// mesh and derive again.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundingBox {
    pub min: Point3<f32>,
    pub max: Point3<f32>,
}

impl BoundingBox {
    pub fn new(min: Point3<f32>, max: Point3<f32>) -> Self {
        Self { min, max }
    }

    /// Calculate bounds of a position set
    ///
    /// An empty set yields the degenerate box at the origin.
    pub fn from_positions(positions: &[Vec3f]) -> Self {
        if positions.is_empty() {
            return Self::new(Point3::origin(), Point3::origin());
        }

        let mut min = Point3::new(f32::MAX, f32::MAX, f32::MAX);
        let mut max = Point3::new(f32::MIN, f32::MIN, f32::MIN);

        positions.iter().for_each(|&[x, y, z]| {
            min.x = min.x.min(x);
            min.y = min.y.min(y);
            min.z = min.z.min(z);
            max.x = max.x.max(x);
            max.y = max.y.max(y);
            max.z = max.z.max(z);
        });

        Self { min, max }
    }

    /// Size along each axis
    #[inline]
    pub fn extents(&self) -> Vector3<f32> {
        self.max - self.min
    }

    /// Largest of the three axis sizes
    #[inline]
    pub fn max_extent(&self) -> f32 {
        let e = self.extents();
        e.x.max(e.y).max(e.z)
    }

    #[inline]
    pub fn center(&self) -> Point3<f32> {
        nalgebra::center(&self.min, &self.max)
    }
}
