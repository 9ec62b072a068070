//! Encode command implementation

use std::{path::Path, time::Instant};

use anyhow::{Context, Result};
use linedict::{Encoder, EncoderParams, FileLineSource, LineSource, save_artifact};

use crate::utils;

/// Outcome of a successful encode run.
pub struct EncodeSummary {
    pub line_count: usize,
    pub symbol_count: usize,
    pub artifact_size: u64,
}

/// Run the encode command
pub fn run(
    input: String,
    artifact: String,
    workers: Option<usize>,
    batch_size: Option<usize>,
    force: bool,
) -> Result<()> {
    let mut params = EncoderParams::default();
    if let Some(workers) = workers {
        params.worker_count = workers;
    }
    if let Some(batch_size) = batch_size {
        params.batch_size = batch_size;
    }
    println!(
        "Encoding {} into {} with {} workers",
        input, artifact, params.worker_count
    );

    let summary = encode_file(&input, &artifact, params, force)?;

    println!("Lines: {}", summary.line_count);
    println!("Distinct lines: {}", summary.symbol_count);
    println!("Artifact size: {}", utils::format_size(summary.artifact_size));
    Ok(())
}

/// Encodes `input` and writes the artifact to `artifact`.
///
/// Nothing is created unless the encode succeeds.
pub fn encode_file(
    input: &str,
    artifact: &str,
    params: EncoderParams,
    force: bool,
) -> Result<EncodeSummary> {
    utils::validate_file_exists(input)?;
    if !force && Path::new(artifact).exists() {
        anyhow::bail!(
            "Artifact already exists: {} (use --force to overwrite)",
            artifact
        );
    }

    let encoder = Encoder::new(params).with_context(|| "Invalid encoder parameters")?;

    let start = Instant::now();
    let source = FileLineSource::open(input)
        .with_context(|| format!("Failed to open input file: {input}"))?;
    log::info!(
        "Indexed {} lines of {} in {:.3?}",
        source.line_count(),
        input,
        start.elapsed()
    );

    let start = Instant::now();
    let encoded = encoder
        .encode(&source)
        .with_context(|| format!("Failed to encode {input}"))?;
    log::info!("Encoding completed in {:.3?}", start.elapsed());

    let start = Instant::now();
    let artifact_size = save_artifact(artifact, &encoded, force)
        .with_context(|| format!("Failed to write artifact: {artifact}"))?;
    log::info!("Artifact written in {:.3?}", start.elapsed());

    Ok(EncodeSummary {
        line_count: encoded.line_count(),
        symbol_count: encoded.symbol_count(),
        artifact_size,
    })
}
