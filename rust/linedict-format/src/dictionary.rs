use std::sync::Arc;

use ahash::AHashMap;
use linedict_common::{Result, error::Error};

/// Identifier of a distinct line content within one artifact.
pub type SymbolId = u32;

/// Largest id representable in the persisted `int32` layout.
pub const MAX_SYMBOL_ID: SymbolId = i32::MAX as SymbolId;

/// A distinct line content together with its assigned id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Symbol {
    content: Arc<[u8]>,
    id: SymbolId,
}

impl Symbol {
    pub fn content(&self) -> &[u8] {
        &self.content
    }

    pub fn shared_content(&self) -> &Arc<[u8]> {
        &self.content
    }

    pub fn id(&self) -> SymbolId {
        self.id
    }
}

/// Bidirectional content ↔ id mapping.
///
/// Symbols are kept in insertion order, which for a freshly encoded dictionary is
/// the order of first appearance in the input (and therefore ascending id order).
/// Ids are unique but not required to be dense.
#[derive(Debug, Clone, Default)]
pub struct Dictionary {
    symbols: Vec<Symbol>,
    ids: AHashMap<Arc<[u8]>, SymbolId>,
    positions: AHashMap<SymbolId, usize>,
}

impl Dictionary {
    pub fn len(&self) -> usize {
        self.symbols.len()
    }

    pub fn is_empty(&self) -> bool {
        self.symbols.is_empty()
    }

    /// Resolves a content to its id.
    pub fn get(&self, content: &[u8]) -> Option<SymbolId> {
        self.ids.get(content).copied()
    }

    /// Resolves an id back to its content.
    pub fn content(&self, id: SymbolId) -> Option<&[u8]> {
        self.symbol(id).map(Symbol::content)
    }

    pub fn symbol(&self, id: SymbolId) -> Option<&Symbol> {
        self.positions.get(&id).map(|&pos| &self.symbols[pos])
    }

    pub fn contains_id(&self, id: SymbolId) -> bool {
        self.positions.contains_key(&id)
    }

    /// Symbols in insertion order.
    pub fn symbols(&self) -> &[Symbol] {
        &self.symbols
    }

    pub fn iter(&self) -> impl Iterator<Item = &Symbol> {
        self.symbols.iter()
    }

    /// Total size of all symbol contents, in bytes.
    pub fn content_bytes(&self) -> usize {
        self.symbols.iter().map(|s| s.content.len()).sum()
    }
}

/// Two dictionaries are equal when they hold the same content → id mapping,
/// regardless of insertion order.
impl PartialEq for Dictionary {
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len()
            && self
                .symbols
                .iter()
                .all(|s| other.get(s.content()) == Some(s.id))
    }
}

impl Eq for Dictionary {}

/// Reason a symbol could not be added by [`DictionaryBuilder::insert`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DuplicateSymbol {
    Content,
    Id,
}

/// Incrementally constructs a [`Dictionary`].
///
/// Either assigns ids itself ([`get_or_insert`](Self::get_or_insert), sequential from 0)
/// or accepts externally assigned ids ([`insert`](Self::insert), used when loading a
/// persisted artifact).
#[derive(Debug, Default)]
pub struct DictionaryBuilder {
    dictionary: Dictionary,
    next_id: SymbolId,
}

impl DictionaryBuilder {
    pub fn new() -> DictionaryBuilder {
        Default::default()
    }

    pub fn with_capacity(capacity: usize) -> DictionaryBuilder {
        DictionaryBuilder {
            dictionary: Dictionary {
                symbols: Vec::with_capacity(capacity),
                ids: AHashMap::with_capacity(capacity),
                positions: AHashMap::with_capacity(capacity),
            },
            next_id: 0,
        }
    }

    pub fn len(&self) -> usize {
        self.dictionary.len()
    }

    pub fn is_empty(&self) -> bool {
        self.dictionary.is_empty()
    }

    /// Returns the id of `content`, assigning the next sequential id if the content
    /// has not been seen yet.
    pub fn get_or_insert(&mut self, content: &Arc<[u8]>) -> Result<SymbolId> {
        if let Some(id) = self.dictionary.get(content) {
            return Ok(id);
        }
        let id = self.next_id;
        if id > MAX_SYMBOL_ID {
            return Err(Error::limit_exceeded(format!(
                "dictionary holds more than {} distinct symbols",
                MAX_SYMBOL_ID as u64 + 1
            )));
        }
        self.push(content.clone(), id);
        Ok(id)
    }

    /// Adds a symbol with an externally assigned id.
    pub fn insert(
        &mut self,
        content: Arc<[u8]>,
        id: SymbolId,
    ) -> std::result::Result<(), DuplicateSymbol> {
        if self.dictionary.ids.contains_key(&content) {
            return Err(DuplicateSymbol::Content);
        }
        if self.dictionary.positions.contains_key(&id) {
            return Err(DuplicateSymbol::Id);
        }
        self.push(content, id);
        Ok(())
    }

    pub fn build(self) -> Dictionary {
        self.dictionary
    }

    fn push(&mut self, content: Arc<[u8]>, id: SymbolId) {
        let dictionary = &mut self.dictionary;
        dictionary.positions.insert(id, dictionary.symbols.len());
        dictionary.ids.insert(content.clone(), id);
        dictionary.symbols.push(Symbol { content, id });
        self.next_id = self.next_id.max(id.saturating_add(1));
    }
}
