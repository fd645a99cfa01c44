// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Parallel import of independent STL buffers.

#[cfg(not(target_arch = "wasm32"))]
use rayon::prelude::*;
use stl_lite_geometry::Result;

use crate::config::ImportConfig;
use crate::pipeline::{import_stl, ImportedMesh};

/// Import several buffers, one result per input, in input order.
///
/// Imports share no state, so each buffer runs on its own rayon task. A
/// failing buffer does not affect the others.
pub fn import_batch<B>(inputs: &[B], config: &ImportConfig) -> Vec<Result<ImportedMesh>>
where
    B: AsRef<[u8]> + Sync,
{
    let batch_start = std::time::Instant::now();
    tracing::info!(count = inputs.len(), "Starting batch STL import");

    let results = run_imports(inputs, config);

    let failed = results.iter().filter(|r| r.is_err()).count();
    tracing::info!(
        count = inputs.len(),
        failed,
        total_time_ms = batch_start.elapsed().as_millis() as u64,
        "Batch STL import complete"
    );
    results
}

#[cfg(not(target_arch = "wasm32"))]
fn run_imports<B>(inputs: &[B], config: &ImportConfig) -> Vec<Result<ImportedMesh>>
where
    B: AsRef<[u8]> + Sync,
{
    let run = || -> Vec<Result<ImportedMesh>> {
        inputs
            .par_iter()
            .map(|bytes| import_stl(bytes.as_ref(), config))
            .collect()
    };

    match config.worker_threads {
        Some(threads) => match rayon::ThreadPoolBuilder::new().num_threads(threads).build() {
            Ok(pool) => pool.install(run),
            Err(err) => {
                tracing::warn!(error = %err, threads, "Failed to build import pool, using global pool");
                run()
            }
        },
        None => run(),
    }
}

// On WASM: sequential iteration (no threads available)
#[cfg(target_arch = "wasm32")]
fn run_imports<B>(inputs: &[B], config: &ImportConfig) -> Vec<Result<ImportedMesh>>
where
    B: AsRef<[u8]> + Sync,
{
    inputs
        .iter()
        .map(|bytes| import_stl(bytes.as_ref(), config))
        .collect()
}
