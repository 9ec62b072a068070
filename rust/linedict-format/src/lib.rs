//! Dictionary-encoded line artifacts: the symbol dictionary, the per-line encoded
//! sequence, and their persisted binary layout.
//!
//! ```text
//! [int32 dictionaryEntryCount]
//! repeated dictionaryEntryCount times:
//!   [int32 contentByteLength][contentBytes][int32 globalId]
//! repeated (one per original input line, in order):
//!   [int32 symbolId]
//! ```
//!
//! All integers are little-endian.

pub mod artifact;
pub mod codec;
pub mod dictionary;
pub mod sequence;

pub use artifact::Artifact;
pub use dictionary::{Dictionary, DictionaryBuilder, DuplicateSymbol, MAX_SYMBOL_ID, Symbol, SymbolId};
pub use sequence::EncodedSequence;
