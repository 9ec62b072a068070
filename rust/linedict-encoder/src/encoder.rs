use linedict_common::{Result, error::Error};
use linedict_format::Artifact;
use linedict_io::LineSource;
use rayon::prelude::*;

use crate::{
    merge::MergeCoordinator, params::EncoderParams, partition::partition_lines,
    symbol_table::build_symbol_table,
};

/// Parallel dictionary encoder.
///
/// Owns a dedicated thread pool of `worker_count` threads. Each encode run splits the
/// source into one contiguous range per worker, builds local symbol tables in
/// parallel, waits for all of them, and merges them in range order on the calling
/// thread. A failing worker fails the whole run and no artifact is produced.
pub struct Encoder {
    params: EncoderParams,
    thread_pool: rayon::ThreadPool,
}

impl Encoder {
    /// Creates an encoder, failing with `InvalidConfig` if the parameters are out of
    /// range.
    pub fn new(params: EncoderParams) -> Result<Encoder> {
        params.validate()?;
        let thread_pool = rayon::ThreadPoolBuilder::new()
            .num_threads(params.worker_count)
            .thread_name(|i| format!("linedict_encode_{i}"))
            .build()
            .map_err(|e| Error::io("start encode workers", std::io::Error::other(e)))?;
        Ok(Encoder {
            params,
            thread_pool,
        })
    }

    pub fn params(&self) -> &EncoderParams {
        &self.params
    }

    /// Encodes every line of `source`.
    pub fn encode(&self, source: &dyn LineSource) -> Result<Artifact> {
        let total_lines = source.line_count();
        let ranges = partition_lines(total_lines, self.params.worker_count);
        log::debug!(
            "encoding {total_lines} lines with {} workers",
            self.params.worker_count
        );

        let batch_size = self.params.batch_size;
        let tables = self.thread_pool.install(|| {
            ranges
                .into_par_iter()
                .enumerate()
                .map(|(worker, range)| -> Result<_> {
                    let table = build_symbol_table(source, range, batch_size)?;
                    log::debug!(
                        "worker {worker} finished lines {:?}: {} distinct",
                        table.range(),
                        table.symbols().len()
                    );
                    Ok(table)
                })
                .collect::<Result<Vec<_>>>()
        })?;

        // All workers have joined; `tables` is in range order regardless of which
        // worker finished first.
        let mut coordinator = MergeCoordinator::with_line_capacity(total_lines);
        for table in tables {
            coordinator.merge_chunk(table)?;
        }
        let artifact = coordinator.finish()?;
        log::debug!(
            "encoded {} lines into {} symbols",
            artifact.line_count(),
            artifact.symbol_count()
        );
        Ok(artifact)
    }
}

/// Encodes `source` with `worker_count` parallel workers and default batching.
///
/// Fails with `InvalidConfig` if `worker_count` is zero, before any line is read.
pub fn encode(source: &dyn LineSource, worker_count: usize) -> Result<Artifact> {
    Encoder::new(EncoderParams::with_workers(worker_count))?.encode(source)
}
