//! Deterministic merge of per-worker symbol tables.

use linedict_common::{Result, error::Error};
use linedict_format::{Artifact, DictionaryBuilder, EncodedSequence, SymbolId};

use crate::symbol_table::LocalSymbolTable;

/// Folds [`LocalSymbolTable`]s, supplied in ascending range order, into the global
/// dictionary and encoded sequence.
///
/// For every chunk, local symbols are resolved against the global dictionary in
/// their first-local-appearance order, so a symbol's global id is decided by the
/// first line (in input order) that contains it. The chunk's local sequence is then
/// rewritten through a per-chunk local → global remap table and appended.
///
/// Runs on a single thread after all workers have completed.
#[derive(Debug, Default)]
pub struct MergeCoordinator {
    dictionary: DictionaryBuilder,
    sequence: EncodedSequence,
    remap: Vec<SymbolId>,
}

impl MergeCoordinator {
    pub fn new() -> MergeCoordinator {
        Default::default()
    }

    pub fn with_line_capacity(line_count: usize) -> MergeCoordinator {
        MergeCoordinator {
            sequence: EncodedSequence::with_capacity(line_count),
            ..Default::default()
        }
    }

    /// Number of lines merged so far; also the first line expected from the next chunk.
    pub fn line_count(&self) -> usize {
        self.sequence.len()
    }

    /// Merges the next chunk. Its range must start where the previous chunk ended.
    pub fn merge_chunk(&mut self, chunk: LocalSymbolTable) -> Result<()> {
        let range = chunk.range();
        if range.start != self.line_count() {
            return Err(Error::invalid_operation(
                "merge_chunk",
                format!(
                    "chunks must be merged in line order: expected a chunk starting at line {}, got {range:?}",
                    self.line_count()
                ),
            ));
        }

        self.remap.clear();
        for content in chunk.symbols() {
            let global_id = self.dictionary.get_or_insert(content)?;
            self.remap.push(global_id);
        }

        let remap = &self.remap;
        self.sequence
            .extend(chunk.sequence().iter().map(|&local| remap[local as usize]));

        log::trace!(
            "merged lines {range:?}: {} local symbols, {} global symbols",
            chunk.symbols().len(),
            self.dictionary.len()
        );
        Ok(())
    }

    pub fn finish(self) -> Result<Artifact> {
        Artifact::try_new(self.dictionary.build(), self.sequence)
    }
}

/// Merges `chunks`, given in ascending range order, into an [`Artifact`].
pub fn merge_chunks(chunks: impl IntoIterator<Item = LocalSymbolTable>) -> Result<Artifact> {
    let mut coordinator = MergeCoordinator::new();
    for chunk in chunks {
        coordinator.merge_chunk(chunk)?;
    }
    coordinator.finish()
}
