use linedict_common::{Result, error::Error};

use crate::{
    dictionary::{Dictionary, MAX_SYMBOL_ID},
    sequence::EncodedSequence,
};

/// The result of one encode run: the symbol dictionary and the per-line encoded
/// sequence. Immutable once constructed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Artifact {
    dictionary: Dictionary,
    sequence: EncodedSequence,
}

impl Artifact {
    /// Creates an artifact, checking that every id in `sequence` is defined by
    /// `dictionary` and that every symbol id fits the persisted `int32` layout.
    pub fn try_new(dictionary: Dictionary, sequence: EncodedSequence) -> Result<Artifact> {
        if let Some(symbol) = dictionary.iter().find(|s| s.id() > MAX_SYMBOL_ID) {
            return Err(Error::limit_exceeded(format!(
                "symbol id {} exceeds the maximum of {MAX_SYMBOL_ID}",
                symbol.id()
            )));
        }
        if let Some((line, id)) = sequence
            .iter()
            .enumerate()
            .find(|&(_, id)| !dictionary.contains_id(id))
        {
            return Err(Error::corrupt_artifact(
                "sequence",
                format!("line {line} refers to undefined symbol id {id}"),
            ));
        }
        Ok(Artifact {
            dictionary,
            sequence,
        })
    }

    pub fn dictionary(&self) -> &Dictionary {
        &self.dictionary
    }

    pub fn sequence(&self) -> &EncodedSequence {
        &self.sequence
    }

    pub fn line_count(&self) -> usize {
        self.sequence.len()
    }

    pub fn symbol_count(&self) -> usize {
        self.dictionary.len()
    }

    /// Content of the original line at `line_index`.
    pub fn line(&self, line_index: usize) -> Option<&[u8]> {
        self.sequence
            .get(line_index)
            .and_then(|id| self.dictionary.content(id))
    }

    /// Reconstructs the original lines, in order.
    pub fn lines(&self) -> impl Iterator<Item = &[u8]> + '_ {
        self.sequence
            .iter()
            .filter_map(|id| self.dictionary.content(id))
    }

    pub fn into_parts(self) -> (Dictionary, EncodedSequence) {
        (self.dictionary, self.sequence)
    }
}
