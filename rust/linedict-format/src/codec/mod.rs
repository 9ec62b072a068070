//! Binary persistence of [`Artifact`](crate::Artifact)s.
//!
//! Dictionary entries are length-prefixed, so symbol contents may hold any byte
//! value, including `\0` and `\n`.

mod read;
mod write;

pub use read::{decode_artifact, read_artifact};
pub use write::{artifact_to_vec, encode_artifact, encoded_len, write_artifact};

/// Size of every integer field in the layout.
pub const INT_SIZE: usize = std::mem::size_of::<i32>();
