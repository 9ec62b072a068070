//! Parallel dictionary encoding of line sources.
//!
//! Encoding runs in two phases:
//!
//! 1. **Local tables.** The input is split into contiguous line ranges, one per worker.
//!    Each worker builds a private [`LocalSymbolTable`](symbol_table::LocalSymbolTable)
//!    over its range, assigning worker-local ids. Workers share nothing mutable.
//! 2. **Merge.** After all workers have joined, the
//!    [`MergeCoordinator`](merge::MergeCoordinator) folds the local tables in range
//!    order into a single dictionary and encoded sequence.
//!
//! Because the merge walks ranges (and symbols within a range) in input order, the
//! resulting ids depend only on the input, never on the number of workers or on the
//! order in which they finish.

pub mod encoder;
pub mod merge;
pub mod params;
pub mod partition;
pub mod symbol_table;

pub use encoder::{Encoder, encode};
pub use params::EncoderParams;
