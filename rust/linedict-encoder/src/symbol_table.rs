//! Per-worker symbol tables.

use std::{ops::Range, sync::Arc};

use ahash::AHashMap;
use linedict_common::{Result, error::Error};
use linedict_io::LineSource;

/// Worker-local symbol id. Only meaningful within one [`LocalSymbolTable`].
pub type LocalId = u32;

/// The symbols discovered in one contiguous line range, with the range encoded
/// in local ids.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LocalSymbolTable {
    range: Range<usize>,
    symbols: Vec<Arc<[u8]>>,
    sequence: Vec<LocalId>,
}

impl LocalSymbolTable {
    /// Line range covered by this table.
    pub fn range(&self) -> Range<usize> {
        self.range.clone()
    }

    /// Distinct contents, indexed by local id (first-appearance order within the range).
    pub fn symbols(&self) -> &[Arc<[u8]>] {
        &self.symbols
    }

    /// Local id of every line in the range, in line order.
    pub fn sequence(&self) -> &[LocalId] {
        &self.sequence
    }
}

/// Accumulates a [`LocalSymbolTable`] line by line.
pub struct SymbolTableBuilder {
    start: usize,
    ids: AHashMap<Arc<[u8]>, LocalId>,
    symbols: Vec<Arc<[u8]>>,
    sequence: Vec<LocalId>,
}

impl SymbolTableBuilder {
    /// Creates a builder for lines starting at `start`.
    pub fn new(start: usize) -> SymbolTableBuilder {
        SymbolTableBuilder {
            start,
            ids: AHashMap::new(),
            symbols: Vec::new(),
            sequence: Vec::new(),
        }
    }

    /// Appends the next line, returning its local id.
    pub fn push(&mut self, line: &[u8]) -> Result<LocalId> {
        let id = match self.ids.get(line) {
            Some(&id) => id,
            None => {
                let id = LocalId::try_from(self.symbols.len()).map_err(|_| {
                    Error::limit_exceeded(format!(
                        "more than {} distinct lines in range starting at {}",
                        LocalId::MAX,
                        self.start
                    ))
                })?;
                let content: Arc<[u8]> = Arc::from(line);
                self.ids.insert(content.clone(), id);
                self.symbols.push(content);
                id
            }
        };
        self.sequence.push(id);
        Ok(id)
    }

    pub fn line_count(&self) -> usize {
        self.sequence.len()
    }

    pub fn finish(self) -> LocalSymbolTable {
        LocalSymbolTable {
            range: self.start..self.start + self.sequence.len(),
            symbols: self.symbols,
            sequence: self.sequence,
        }
    }
}

/// Builds the local symbol table for `range`, reading at most `batch_size` lines
/// from `source` at a time.
///
/// Fails with `Io` if any part of the range cannot be read.
pub fn build_symbol_table(
    source: &dyn LineSource,
    range: Range<usize>,
    batch_size: usize,
) -> Result<LocalSymbolTable> {
    let batch_size = batch_size.max(1);
    let mut builder = SymbolTableBuilder::new(range.start);
    let mut pos = range.start;
    while pos < range.end {
        let end = pos + batch_size.min(range.end - pos);
        let lines = source
            .read_lines(pos..end)
            .map_err(|e| Error::io(format!("read lines {pos}..{end}"), e))?;
        if lines.len() != end - pos {
            return Err(Error::io(
                format!("read lines {pos}..{end}: got {} lines", lines.len()),
                std::io::ErrorKind::UnexpectedEof.into(),
            ));
        }
        for line in &lines {
            builder.push(line)?;
        }
        log::trace!("lines {pos}..{end}: {} distinct so far", builder.symbols.len());
        pos = end;
    }
    Ok(builder.finish())
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use linedict_io::MemoryLineSource;

    use super::{SymbolTableBuilder, build_symbol_table};

    fn contents(table: &super::LocalSymbolTable) -> Vec<&[u8]> {
        table.symbols().iter().map(|s| s.as_ref()).collect()
    }

    #[test]
    fn test_local_ids_follow_first_appearance() {
        let mut builder = SymbolTableBuilder::new(10);
        for line in ["b", "a", "b", "c", "a"] {
            builder.push(line.as_bytes()).unwrap();
        }
        assert_eq!(builder.line_count(), 5);
        let table = builder.finish();
        assert_eq!(table.range(), 10..15);
        assert_eq!(contents(&table), [&b"b"[..], b"a", b"c"]);
        assert_eq!(table.sequence(), [0, 1, 0, 2, 1]);
    }

    #[test]
    fn test_build_over_range_in_batches() {
        let source = MemoryLineSource::from_lines(["x", "apple", "banana", "apple", "cherry", "y"]);
        for batch_size in [1, 2, 3, 100, usize::MAX] {
            let table = build_symbol_table(&source, 1..5, batch_size).unwrap();
            assert_eq!(table.range(), 1..5);
            assert_eq!(contents(&table), [&b"apple"[..], b"banana", b"cherry"]);
            assert_eq!(table.sequence(), [0, 1, 0, 2]);
        }
    }

    #[test]
    fn test_empty_range() {
        let source = MemoryLineSource::from_lines(["a"]);
        let table = build_symbol_table(&source, 1..1, 16).unwrap();
        assert!(table.symbols().is_empty());
        assert!(table.sequence().is_empty());
        assert_eq!(table.range(), 1..1);
    }

    #[test]
    fn test_unreadable_range() {
        let source = MemoryLineSource::from_lines(["a", "b"]);
        let err = build_symbol_table(&source, 0..5, 16).unwrap_err();
        assert!(err.is_io());
        assert!(err.to_string().contains("read lines 0..5"), "{err}");
    }

    #[test]
    fn test_finish_releases_lookup_map() {
        let mut builder = SymbolTableBuilder::new(0);
        builder.push(b"same").unwrap();
        builder.push(b"same").unwrap();
        let table = builder.finish();
        assert_eq!(table.symbols().len(), 1);
        assert_eq!(Arc::strong_count(&table.symbols()[0]), 1);
    }
}
