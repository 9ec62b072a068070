//! # linedict: parallel dictionary encoding of text lines
//!
//! linedict reads a text file as an ordered sequence of lines, assigns every distinct
//! line a compact integer id, and produces an artifact made of
//!
//! * a **dictionary** (line content ↔ id), and
//! * an **encoded sequence** holding one id per input line, in input order.
//!
//! Encoding is parallel: the input is split into contiguous ranges, each worker builds
//! a private symbol table, and the tables are merged in range order. The result does
//! not depend on the number of workers.
//!
//! Persisted artifacts can later be queried for exact or prefix matches; a query
//! reports every matching line content together with the 0-based positions of the
//! lines holding it.
//!
//! ## Module Organization
//!
//! * [`common`] - Error types shared by all components
//! * [`io`] - Positional readers, sealing writers and line sources
//! * [`format`] - Dictionary, encoded sequence and the persisted artifact layout
//! * [`encoder`] - Parallel encoder
//! * [`query`] - Query engine and occurrence index
//! * [`prefix`] - Wide-register prefix comparison
//!
//! ## Example
//!
//! ```
//! use linedict::{MemoryLineSource, QueryMode};
//!
//! let source = MemoryLineSource::from_lines(["apple", "banana", "apple", "cherry"]);
//! let artifact = linedict::encode(&source, 2).unwrap();
//! assert_eq!(artifact.sequence().as_slice(), [0, 1, 0, 2]);
//!
//! let result = linedict::query(&artifact, b"ap", QueryMode::Prefix, true);
//! assert_eq!(result.to_pairs(), [(b"apple".to_vec(), vec![0, 2])]);
//! ```

pub use linedict_common as common;
pub use linedict_encoder as encoder;
pub use linedict_format as format;
pub use linedict_io as io;
pub use linedict_prefix as prefix;
pub use linedict_query as query;

pub mod persist;

pub use linedict_common::{Result, error::Error, error::ErrorKind};
pub use linedict_encoder::{Encoder, EncoderParams, encode};
pub use linedict_format::{
    Artifact, Dictionary, EncodedSequence, Symbol, SymbolId,
    codec::{read_artifact, write_artifact},
};
pub use linedict_io::{FileLineSource, LineSource, MemoryLineSource, ReadAt, SealingWrite};
pub use linedict_query::{QueryEngine, QueryMode, QueryResult, SymbolMatch, query};
pub use persist::{load_artifact, save_artifact};
