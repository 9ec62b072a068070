use crate::dictionary::SymbolId;

/// Per-line symbol ids, in original line order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EncodedSequence(Vec<SymbolId>);

impl EncodedSequence {
    pub fn new() -> EncodedSequence {
        Default::default()
    }

    pub fn with_capacity(capacity: usize) -> EncodedSequence {
        EncodedSequence(Vec::with_capacity(capacity))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Id of the symbol at line `line_index`.
    pub fn get(&self, line_index: usize) -> Option<SymbolId> {
        self.0.get(line_index).copied()
    }

    pub fn as_slice(&self) -> &[SymbolId] {
        &self.0
    }

    pub fn iter(&self) -> impl ExactSizeIterator<Item = SymbolId> + '_ {
        self.0.iter().copied()
    }

    pub fn push(&mut self, id: SymbolId) {
        self.0.push(id);
    }

    pub fn into_inner(self) -> Vec<SymbolId> {
        self.0
    }
}

impl From<Vec<SymbolId>> for EncodedSequence {
    fn from(ids: Vec<SymbolId>) -> Self {
        EncodedSequence(ids)
    }
}

impl Extend<SymbolId> for EncodedSequence {
    fn extend<T: IntoIterator<Item = SymbolId>>(&mut self, iter: T) {
        self.0.extend(iter);
    }
}
