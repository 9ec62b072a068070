use std::io::{BufWriter, Write};

use byteorder::{LittleEndian, WriteBytesExt};
use linedict_common::{Result, error::Error};
use linedict_io::{SealingWrite, WriteAdapter};

use crate::{Artifact, codec::INT_SIZE};

const WRITE_BUFFER_SIZE: usize = 256 * 1024;

/// Writes `artifact` to `writer` and seals it.
///
/// Returns the number of bytes written.
pub fn write_artifact(artifact: &Artifact, writer: &mut dyn SealingWrite) -> Result<u64> {
    let buffer_size = writer.storage_profile().clamp_io_size(WRITE_BUFFER_SIZE);
    let written = {
        let mut out = BufWriter::with_capacity(buffer_size, WriteAdapter::new(&mut *writer));
        encode_artifact(artifact, &mut out)?;
        let adapter = out
            .into_inner()
            .map_err(|e| Error::io("write artifact", e.into_error()))?;
        adapter.written()
    };
    writer
        .seal()
        .map_err(|e| Error::io("seal artifact", e))?;
    log::debug!(
        "wrote artifact: {} symbols, {} lines, {written} bytes",
        artifact.symbol_count(),
        artifact.line_count()
    );
    Ok(written)
}

/// Serializes `artifact` into `out`.
pub fn encode_artifact(artifact: &Artifact, out: &mut impl Write) -> Result<()> {
    let dictionary = artifact.dictionary();
    write_int(out, dictionary.len(), "dictionary entry count")?;
    for symbol in dictionary.iter() {
        let content = symbol.content();
        write_int(out, content.len(), "symbol content length")?;
        out.write_all(content)
            .map_err(|e| Error::io("write symbol content", e))?;
        write_int(out, symbol.id() as usize, "symbol id")?;
    }
    for id in artifact.sequence().iter() {
        write_int(out, id as usize, "sequence symbol id")?;
    }
    Ok(())
}

/// Serializes `artifact` into a freshly allocated buffer.
pub fn artifact_to_vec(artifact: &Artifact) -> Result<Vec<u8>> {
    let mut buf = Vec::with_capacity(encoded_len(artifact));
    encode_artifact(artifact, &mut buf)?;
    Ok(buf)
}

/// Exact size in bytes of the serialized `artifact`.
pub fn encoded_len(artifact: &Artifact) -> usize {
    let dictionary = artifact.dictionary();
    INT_SIZE
        + dictionary.len() * 2 * INT_SIZE
        + dictionary.content_bytes()
        + artifact.line_count() * INT_SIZE
}

fn write_int(out: &mut impl Write, value: usize, what: &str) -> Result<()> {
    let value = i32::try_from(value)
        .map_err(|_| Error::limit_exceeded(format!("{what} {value} does not fit in int32")))?;
    out.write_i32::<LittleEndian>(value)
        .map_err(|e| Error::io(format!("write {what}"), e))
}
