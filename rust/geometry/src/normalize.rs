// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Unit-scale inference and up-axis correction
//!
//! STL carries no units. The largest bounding-box extent picks one of three
//! branches, first match wins, strict comparisons:
//!
//! | extent              | assumption                        | scale          |
//! |---------------------|-----------------------------------|----------------|
//! | `> 10.0`            | millimeters                       | `0.001`        |
//! | `> 2.0`, `<= 10.0`  | too large for a ~1 unit tabletop  | `1.0 / extent` |
//! | `<= 2.0`            | already in display units          | `1.0`          |
//!
//! This is a heuristic: a large object modeled directly in meters is still
//! treated as millimeters.
//!
//! STL conventionally treats Z as up while the display frame treats Y as up,
//! so the correction is always a -90° rotation about X, regardless of content.

use std::f32::consts::FRAC_PI_2;

use nalgebra::{Matrix4, Point3, UnitQuaternion, Vector3};

use crate::bounds::BoundingBox;

/// Which scale-inference branch produced the scale
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ScaleInference {
    /// Extent above the millimeter threshold
    Millimeters,
    /// Extent between the two thresholds, scaled down to unit size
    Oversized,
    /// Extent at or below the oversize threshold, left alone
    TargetUnits,
}

impl ScaleInference {
    pub fn as_str(&self) -> &'static str {
        match self {
            ScaleInference::Millimeters => "millimeters",
            ScaleInference::Oversized => "oversized",
            ScaleInference::TargetUnits => "target_units",
        }
    }
}

/// Thresholds for scale inference
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NormalizerConfig {
    /// Extents strictly above this are read as millimeters
    pub millimeter_threshold: f32,
    /// Extents strictly above this (and not millimeters) are scaled to unit size
    pub oversize_threshold: f32,
    /// Scale applied to millimeter models
    pub millimeter_scale: f32,
}

impl NormalizerConfig {
    pub const DEFAULT_MILLIMETER_THRESHOLD: f32 = 10.0;
    pub const DEFAULT_OVERSIZE_THRESHOLD: f32 = 2.0;
    pub const DEFAULT_MILLIMETER_SCALE: f32 = 0.001;
}

impl Default for NormalizerConfig {
    fn default() -> Self {
        Self {
            millimeter_threshold: Self::DEFAULT_MILLIMETER_THRESHOLD,
            oversize_threshold: Self::DEFAULT_OVERSIZE_THRESHOLD,
            millimeter_scale: Self::DEFAULT_MILLIMETER_SCALE,
        }
    }
}

/// Advisory transform for the presentation layer
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NormalizationResult {
    /// Uniform scale to apply to positions
    pub uniform_scale: f32,
    /// Rotation from the Z-up source frame to the Y-up display frame
    pub axis_correction: UnitQuaternion<f32>,
    /// Branch that chose `uniform_scale`
    pub inference: ScaleInference,
}

impl NormalizationResult {
    /// Scale then rotate a position
    #[inline]
    pub fn apply_to_point(&self, p: &Point3<f32>) -> Point3<f32> {
        self.axis_correction * (*p * self.uniform_scale)
    }

    /// Rotate a normal (uniform scale does not change direction)
    #[inline]
    pub fn apply_to_normal(&self, n: &Vector3<f32>) -> Vector3<f32> {
        self.axis_correction * *n
    }

    /// Combined transform as a 4x4 matrix (rotation * scale)
    pub fn to_matrix(&self) -> Matrix4<f32> {
        self.axis_correction.to_homogeneous() * Matrix4::new_scaling(self.uniform_scale)
    }
}

/// Rotation of -90° about the X axis (Z-up to Y-up)
#[inline]
pub fn z_up_to_y_up() -> UnitQuaternion<f32> {
    UnitQuaternion::from_axis_angle(&Vector3::x_axis(), -FRAC_PI_2)
}

/// Computes [`NormalizationResult`] from mesh bounds
#[derive(Debug, Clone, Default)]
pub struct MeshNormalizer {
    config: NormalizerConfig,
}

impl MeshNormalizer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: NormalizerConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &NormalizerConfig {
        &self.config
    }

    /// Pure function of the bounding-box extents
    pub fn normalize(&self, bounds: &BoundingBox) -> NormalizationResult {
        let (inference, uniform_scale) = self.infer_scale(bounds.max_extent());
        NormalizationResult {
            uniform_scale,
            axis_correction: z_up_to_y_up(),
            inference,
        }
    }

    /// Scale inference for a given largest extent
    pub fn infer_scale(&self, extent: f32) -> (ScaleInference, f32) {
        if extent > self.config.millimeter_threshold {
            (ScaleInference::Millimeters, self.config.millimeter_scale)
        } else if extent > self.config.oversize_threshold {
            (ScaleInference::Oversized, 1.0 / extent)
        } else {
            (ScaleInference::TargetUnits, 1.0)
        }
    }
}
