//! Exact and prefix lookups against a loaded artifact, reporting the line positions
//! of every matching symbol.

pub mod engine;
pub mod occurrence;
pub mod result;

pub use engine::{QueryEngine, QueryMode, Resolution, query};
pub use occurrence::OccurrenceIndex;
pub use result::{QueryResult, SymbolMatch};
