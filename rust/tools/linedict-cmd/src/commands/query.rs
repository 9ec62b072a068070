//! Query command implementation

use std::time::Instant;

use anyhow::{Context, Result};
use linedict::{QueryEngine, QueryMode, QueryResult, load_artifact};

use crate::utils;

/// Run the query command
pub fn run(artifact: String, query: String, prefix: bool, use_fast_path: bool) -> Result<()> {
    utils::validate_file_exists(&artifact)?;

    let start = Instant::now();
    let loaded =
        load_artifact(&artifact).with_context(|| format!("Failed to load artifact: {artifact}"))?;
    log::info!(
        "Loaded {} symbols, {} lines in {:.3?}",
        loaded.symbol_count(),
        loaded.line_count(),
        start.elapsed()
    );

    let start = Instant::now();
    let mode = if prefix {
        QueryMode::Prefix
    } else {
        QueryMode::Exact
    };
    let engine = QueryEngine::from_owned(loaded);
    let result = engine.query(query.as_bytes(), mode, use_fast_path);
    for line in render(&query, mode, &result) {
        println!("{line}");
    }
    log::info!("Query completed in {:.3?}", start.elapsed());
    Ok(())
}

/// Output lines for a query result.
pub fn render(query: &str, mode: QueryMode, result: &QueryResult) -> Vec<String> {
    match mode {
        QueryMode::Exact => match result.matches().first() {
            Some(m) => vec![format!(
                "Found {} at indices: {}",
                query,
                utils::format_positions(m.positions())
            )],
            None => vec![format!("No entries found for \"{query}\".")],
        },
        QueryMode::Prefix => {
            if result.is_not_found() {
                return vec![format!("No entries found with prefix \"{query}\".")];
            }
            let mut lines = vec![format!("Prefix matches for \"{query}\":")];
            lines.extend(result.matches().iter().map(|m| {
                format!(
                    "Found prefix \"{}\" in {} at indices: {}",
                    query,
                    utils::display_content(m.content()),
                    utils::format_positions(m.positions())
                )
            }));
            lines
        }
    }
}
