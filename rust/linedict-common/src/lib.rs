//! Core definitions (error taxonomy and result type), relied upon by all linedict-* crates.

pub mod error;
pub mod result;

pub use result::Result;
