//! Search command implementation: a single linear scan over the text file,
//! used as a baseline for the encoded lookup.

use std::{
    fs::File,
    io::{BufRead, BufReader},
    time::Instant,
};

use anyhow::{Context, Result};

use crate::utils;

/// Run the search command
pub fn run(input: String, query: String) -> Result<()> {
    utils::validate_file_exists(&input)?;

    let start = Instant::now();
    match find_first(&input, query.as_bytes())? {
        Some(line_number) => println!("String found at line {line_number}: {query}"),
        None => println!("String not found in the file."),
    }
    log::info!("Search completed in {:.3?}", start.elapsed());
    Ok(())
}

/// Returns the 1-based number of the first line equal to `query`.
pub fn find_first(input: &str, query: &[u8]) -> Result<Option<usize>> {
    let file = File::open(input).with_context(|| format!("Failed to open file: {input}"))?;
    let reader = BufReader::new(file);
    for (i, line) in reader.split(b'\n').enumerate() {
        let line = line.with_context(|| format!("Failed to read line {} of {input}", i + 1))?;
        if line == query {
            return Ok(Some(i + 1));
        }
    }
    Ok(None)
}
