//! Query state machine: `Idle → Loaded → Resolved → Reported`.
//!
//! - [`QueryEngine::load`] decodes an artifact (`Idle → Loaded`); [`QueryEngine::new`]
//!   starts from an artifact already in memory.
//! - [`QueryEngine::resolve`] builds the occurrence index on first use and selects the
//!   matching symbols (`Loaded → Resolved`).
//! - [`Resolution::report`] produces the owned [`QueryResult`] (`Resolved → Reported`).
//!
//! Once an engine is loaded, queries cannot fail.

use std::{borrow::Cow, cell::OnceCell};

use linedict_common::Result;
use linedict_format::{Artifact, SymbolId, codec::read_artifact};
use linedict_io::ReadAt;
use linedict_prefix::FastPathKind;

use crate::{
    occurrence::OccurrenceIndex,
    result::{QueryResult, SymbolMatch},
};

/// How the query string is compared against dictionary entries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum QueryMode {
    /// The line must equal the query.
    #[default]
    Exact,
    /// The line must start with the query.
    Prefix,
}

pub struct QueryEngine<'a> {
    artifact: Cow<'a, Artifact>,
    occurrences: OnceCell<OccurrenceIndex>,
}

impl QueryEngine<'static> {
    /// Loads the artifact stored in `reader`.
    pub fn load(reader: &dyn ReadAt) -> Result<QueryEngine<'static>> {
        let artifact = read_artifact(reader)?;
        Ok(QueryEngine::from_owned(artifact))
    }

    pub fn from_owned(artifact: Artifact) -> QueryEngine<'static> {
        QueryEngine {
            artifact: Cow::Owned(artifact),
            occurrences: OnceCell::new(),
        }
    }
}

impl<'a> QueryEngine<'a> {
    pub fn new(artifact: &'a Artifact) -> QueryEngine<'a> {
        QueryEngine {
            artifact: Cow::Borrowed(artifact),
            occurrences: OnceCell::new(),
        }
    }

    pub fn artifact(&self) -> &Artifact {
        &self.artifact
    }

    /// The occurrence index, built by a single scan of the encoded sequence on
    /// first access.
    pub fn occurrences(&self) -> &OccurrenceIndex {
        self.occurrences.get_or_init(|| {
            let index = OccurrenceIndex::build(self.artifact.sequence());
            log::debug!(
                "built occurrence index: {} lines, {} symbols",
                self.artifact.line_count(),
                index.symbol_count()
            );
            index
        })
    }

    /// Selects the symbols matching `query`.
    ///
    /// Exact queries are a single dictionary lookup. Prefix queries scan every
    /// dictionary entry; `use_fast_path` picks the wide-register comparison over the
    /// byte-by-byte one (both give identical results).
    pub fn resolve(&self, query: &[u8], mode: QueryMode, use_fast_path: bool) -> Resolution<'_> {
        let dictionary = self.artifact.dictionary();
        let mut symbols = match mode {
            QueryMode::Exact => dictionary.get(query).into_iter().collect::<Vec<_>>(),
            QueryMode::Prefix => {
                let fast_path = use_fast_path.then(FastPathKind::detect);
                log::debug!(
                    "prefix scan over {} symbols, fast path {fast_path:?}",
                    dictionary.len()
                );
                dictionary
                    .iter()
                    .filter(|symbol| match fast_path {
                        Some(kind) => kind.matches(symbol.content(), query),
                        None => linedict_prefix::matches_bytewise(symbol.content(), query),
                    })
                    .map(|symbol| symbol.id())
                    .collect()
            }
        };
        symbols.sort_unstable();
        Resolution {
            artifact: self.artifact(),
            occurrences: self.occurrences(),
            symbols,
        }
    }

    /// Resolves and reports `query` in one step.
    pub fn query(&self, query: &[u8], mode: QueryMode, use_fast_path: bool) -> QueryResult {
        self.resolve(query, mode, use_fast_path).report()
    }
}

/// Symbols selected by a query, not yet materialized into a [`QueryResult`].
pub struct Resolution<'e> {
    artifact: &'e Artifact,
    occurrences: &'e OccurrenceIndex,
    symbols: Vec<SymbolId>,
}

impl Resolution<'_> {
    /// Ids of the matching symbols, ascending.
    pub fn symbols(&self) -> &[SymbolId] {
        &self.symbols
    }

    pub fn is_not_found(&self) -> bool {
        self.symbols.is_empty()
    }

    pub fn report(self) -> QueryResult {
        let dictionary = self.artifact.dictionary();
        let matches = self
            .symbols
            .iter()
            .filter_map(|&id| {
                let symbol = dictionary.symbol(id)?;
                Some(SymbolMatch::new(
                    symbol.shared_content().clone(),
                    id,
                    self.occurrences.positions(id).to_vec(),
                ))
            })
            .collect();
        QueryResult::new(matches)
    }
}

/// Runs a single query against `artifact`, building a fresh occurrence index.
pub fn query(
    artifact: &Artifact,
    query: &[u8],
    mode: QueryMode,
    use_fast_path: bool,
) -> QueryResult {
    QueryEngine::new(artifact).query(query, mode, use_fast_path)
}
