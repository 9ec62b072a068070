//! Inspect command implementation

use anyhow::{Context, Result};
use linedict::{Artifact, QueryEngine, load_artifact};

use crate::utils;

/// Run the inspect command
pub fn run(verbose: u8, artifact: String) -> Result<()> {
    utils::validate_file_exists(&artifact)?;
    let file_size = std::fs::metadata(&artifact)
        .with_context(|| format!("Failed to read metadata: {artifact}"))?
        .len();
    let loaded =
        load_artifact(&artifact).with_context(|| format!("Failed to load artifact: {artifact}"))?;

    println!("Artifact: {artifact}");
    println!("Size: {}", utils::format_size(file_size));
    for line in summarize(&loaded, verbose > 0) {
        println!("{line}");
    }
    Ok(())
}

/// Summary lines for `artifact`, optionally listing every symbol.
pub fn summarize(artifact: &Artifact, list_symbols: bool) -> Vec<String> {
    let dictionary = artifact.dictionary();
    let mut lines = vec![
        format!("Lines: {}", artifact.line_count()),
        format!("Distinct lines: {}", artifact.symbol_count()),
        format!(
            "Dictionary content: {}",
            utils::format_size(dictionary.content_bytes() as u64)
        ),
    ];
    if list_symbols {
        let engine = QueryEngine::new(artifact);
        let occurrences = engine.occurrences();
        lines.push("Symbols (id, occurrences, content):".to_string());
        lines.extend(dictionary.iter().map(|symbol| {
            format!(
                "  {}\t{}\t{}",
                symbol.id(),
                occurrences.positions(symbol.id()).len(),
                utils::display_content(symbol.content())
            )
        }));
    }
    lines
}
