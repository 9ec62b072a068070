use std::sync::Arc;

use linedict_format::SymbolId;

/// One matching symbol with the lines where it occurs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SymbolMatch {
    content: Arc<[u8]>,
    id: SymbolId,
    positions: Vec<usize>,
}

impl SymbolMatch {
    pub fn new(content: Arc<[u8]>, id: SymbolId, positions: Vec<usize>) -> SymbolMatch {
        SymbolMatch {
            content,
            id,
            positions,
        }
    }

    /// The matched line content.
    pub fn content(&self) -> &[u8] {
        &self.content
    }

    pub fn id(&self) -> SymbolId {
        self.id
    }

    /// 0-based line positions, ascending.
    pub fn positions(&self) -> &[usize] {
        &self.positions
    }
}

/// Outcome of a query: every matching symbol, ordered by symbol id.
///
/// An empty result means "not found"; it is not an error.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryResult {
    matches: Vec<SymbolMatch>,
}

impl QueryResult {
    pub fn new(matches: Vec<SymbolMatch>) -> QueryResult {
        QueryResult { matches }
    }

    pub fn is_not_found(&self) -> bool {
        self.matches.is_empty()
    }

    pub fn matches(&self) -> &[SymbolMatch] {
        &self.matches
    }

    pub fn into_matches(self) -> Vec<SymbolMatch> {
        self.matches
    }

    /// Total number of matching lines across all symbols.
    pub fn line_count(&self) -> usize {
        self.matches.iter().map(|m| m.positions.len()).sum()
    }

    /// `(content, positions)` pairs, convenient for comparisons.
    pub fn to_pairs(&self) -> Vec<(Vec<u8>, Vec<usize>)> {
        self.matches
            .iter()
            .map(|m| (m.content.to_vec(), m.positions.clone()))
            .collect()
    }
}
