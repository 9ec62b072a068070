use std::sync::Arc;

use byteorder::{ByteOrder, LittleEndian};
use linedict_common::{Result, error::Error};
use linedict_io::ReadAt;

use crate::{
    Artifact, DictionaryBuilder, DuplicateSymbol, EncodedSequence, SymbolId, codec::INT_SIZE,
};

/// Loads and decodes a complete artifact from `reader`.
///
/// Either the whole artifact is returned or an error: `Io` when the data cannot be
/// read, `CorruptArtifact` when it is structurally invalid.
pub fn read_artifact(reader: &dyn ReadAt) -> Result<Artifact> {
    let size = reader
        .size()
        .map_err(|e| Error::io("artifact size", e))?;
    let buf = reader
        .read_at(0..size)
        .map_err(|e| Error::io(format!("read artifact 0..{size}"), e))?;
    if buf.len() as u64 != size {
        return Err(Error::io(
            format!("read artifact 0..{size}: got {} bytes", buf.len()),
            std::io::ErrorKind::UnexpectedEof.into(),
        ));
    }
    decode_artifact(&buf)
}

/// Decodes an artifact from its serialized form.
pub fn decode_artifact(buf: &[u8]) -> Result<Artifact> {
    let mut decoder = Decoder { buf, pos: 0 };

    let count = decoder.read_len("dictionary entry count")?;
    // Every entry takes at least a length and an id.
    if count > decoder.remaining() / (2 * INT_SIZE) {
        return Err(decoder.corrupt(
            "dictionary entry count",
            format!(
                "{count} entries cannot fit in the remaining {} bytes",
                decoder.remaining()
            ),
        ));
    }

    let mut builder = DictionaryBuilder::with_capacity(count);
    for _ in 0..count {
        let entry_pos = decoder.pos;
        let len = decoder.read_len("symbol content length")?;
        let content: Arc<[u8]> = Arc::from(decoder.read_bytes(len, "symbol content")?);
        let id = decoder.read_id("symbol id")?;
        builder.insert(content, id).map_err(|duplicate| {
            let what = match duplicate {
                DuplicateSymbol::Content => "duplicate symbol content",
                DuplicateSymbol::Id => "duplicate symbol id",
            };
            Error::corrupt_artifact(
                "dictionary",
                format!("{what} (id {id}) in entry at offset {entry_pos}"),
            )
        })?;
    }
    let dictionary = builder.build();

    if decoder.remaining() % INT_SIZE != 0 {
        return Err(decoder.corrupt(
            "sequence",
            format!(
                "{} trailing bytes do not form whole symbol ids",
                decoder.remaining()
            ),
        ));
    }

    let line_count = decoder.remaining() / INT_SIZE;
    let mut sequence = EncodedSequence::with_capacity(line_count);
    for _ in 0..line_count {
        sequence.push(decoder.read_id("sequence symbol id")?);
    }

    log::debug!(
        "decoded artifact: {} symbols, {line_count} lines, {} bytes",
        dictionary.len(),
        buf.len()
    );
    Artifact::try_new(dictionary, sequence)
}

struct Decoder<'a> {
    buf: &'a [u8],
    pos: usize,
}

impl<'a> Decoder<'a> {
    fn remaining(&self) -> usize {
        self.buf.len() - self.pos
    }

    fn corrupt(&self, element: &str, message: String) -> Error {
        Error::corrupt_artifact(element, format!("{message} (offset {})", self.pos))
    }

    fn read_bytes(&mut self, len: usize, element: &str) -> Result<&'a [u8]> {
        if len > self.remaining() {
            return Err(self.corrupt(
                element,
                format!(
                    "truncated: need {len} bytes, {} remaining",
                    self.remaining()
                ),
            ));
        }
        let bytes = &self.buf[self.pos..self.pos + len];
        self.pos += len;
        Ok(bytes)
    }

    fn read_i32(&mut self, element: &str) -> Result<i32> {
        let bytes = self.read_bytes(INT_SIZE, element)?;
        Ok(LittleEndian::read_i32(bytes))
    }

    fn read_len(&mut self, element: &str) -> Result<usize> {
        let value = self.read_i32(element)?;
        usize::try_from(value).map_err(|_| self.negative(element, value))
    }

    fn read_id(&mut self, element: &str) -> Result<SymbolId> {
        let value = self.read_i32(element)?;
        SymbolId::try_from(value).map_err(|_| self.negative(element, value))
    }

    fn negative(&self, element: &str, value: i32) -> Error {
        Error::corrupt_artifact(
            element,
            format!("negative value {value} at offset {}", self.pos - INT_SIZE),
        )
    }
}
