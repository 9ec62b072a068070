use ahash::AHashMap;
use linedict_format::{EncodedSequence, SymbolId};

/// Maps each symbol id to the ascending line positions where it occurs.
///
/// Derived from an [`EncodedSequence`] with a single linear scan; never persisted.
#[derive(Debug, Clone, Default)]
pub struct OccurrenceIndex {
    positions: AHashMap<SymbolId, Vec<usize>>,
}

impl OccurrenceIndex {
    pub fn build(sequence: &EncodedSequence) -> OccurrenceIndex {
        let mut positions = AHashMap::<SymbolId, Vec<usize>>::new();
        for (line, id) in sequence.iter().enumerate() {
            positions.entry(id).or_default().push(line);
        }
        OccurrenceIndex { positions }
    }

    /// Line positions of `id`, in ascending order. Empty if the id never occurs.
    pub fn positions(&self, id: SymbolId) -> &[usize] {
        self.positions.get(&id).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Number of distinct ids that occur at least once.
    pub fn symbol_count(&self) -> usize {
        self.positions.len()
    }
}

#[cfg(test)]
mod tests {
    use linedict_format::EncodedSequence;

    use super::OccurrenceIndex;

    #[test]
    fn test_build() {
        let index = OccurrenceIndex::build(&EncodedSequence::from(vec![0, 1, 0, 2, 0]));
        assert_eq!(index.positions(0), [0, 2, 4]);
        assert_eq!(index.positions(1), [1]);
        assert_eq!(index.positions(2), [3]);
        assert!(index.positions(3).is_empty());
        assert_eq!(index.symbol_count(), 3);
    }

    #[test]
    fn test_empty_sequence() {
        let index = OccurrenceIndex::build(&EncodedSequence::new());
        assert_eq!(index.symbol_count(), 0);
        assert!(index.positions(0).is_empty());
    }
}
