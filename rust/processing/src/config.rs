// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Import configuration, optionally loaded from environment variables.

use stl_lite_geometry::NormalizerConfig;

/// Import configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct ImportConfig {
    /// Scale-inference thresholds.
    pub normalizer: NormalizerConfig,
    /// Maximum input size in MB.
    pub max_input_mb: usize,
    /// Number of worker threads for batch imports (`None` uses rayon's global pool).
    pub worker_threads: Option<usize>,
}

impl ImportConfig {
    pub const DEFAULT_MAX_INPUT_MB: usize = 512;

    /// Maximum input size in bytes.
    pub fn max_input_bytes(&self) -> usize {
        self.max_input_mb.saturating_mul(1024 * 1024)
    }

    /// Load configuration from environment variables.
    ///
    /// Unset or unparsable variables keep their default.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration through an arbitrary key lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = NormalizerConfig::default();
        Self {
            normalizer: NormalizerConfig {
                millimeter_threshold: parse_or(
                    &lookup,
                    "STL_LITE_MM_THRESHOLD",
                    defaults.millimeter_threshold,
                ),
                oversize_threshold: parse_or(
                    &lookup,
                    "STL_LITE_OVERSIZE_THRESHOLD",
                    defaults.oversize_threshold,
                ),
                millimeter_scale: parse_or(&lookup, "STL_LITE_MM_SCALE", defaults.millimeter_scale),
            },
            max_input_mb: parse_or(&lookup, "STL_LITE_MAX_INPUT_MB", Self::DEFAULT_MAX_INPUT_MB),
            worker_threads: lookup("STL_LITE_WORKER_THREADS")
                .and_then(|v| v.trim().parse().ok())
                .filter(|&n: &usize| n > 0),
        }
    }
}

fn parse_or<T: std::str::FromStr>(
    lookup: &impl Fn(&str) -> Option<String>,
    key: &str,
    default: T,
) -> T {
    lookup(key)
        .and_then(|v| v.trim().parse().ok())
        .unwrap_or(default)
}

impl Default for ImportConfig {
    fn default() -> Self {
        Self {
            normalizer: NormalizerConfig::default(),
            max_input_mb: Self::DEFAULT_MAX_INPUT_MB,
            worker_threads: None,
        }
    }
}
