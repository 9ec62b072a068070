//! Byte-wise prefix comparison with a wide-register fast path.

pub mod prefix_match;

pub use prefix_match::{FastPathKind, matches, matches_bytewise, matches_with};
