//! Line sources: ordered sequences of text lines with random access by line range.
//!
//! Lines are delimited by `\n`. The delimiter is not part of the line content, a trailing
//! delimiter at the end of the input does not start another line, and `\r` is kept as
//! regular content.

use std::{ops::Range, path::Path, sync::Arc};

use crate::{ReadAt, file::FileReader, utils::verify_range};

/// Ordered sequence of input lines, shared read-only between encode workers.
pub trait LineSource: Send + Sync {
    /// Total number of lines in the source.
    fn line_count(&self) -> usize;

    /// Reads the lines in `range`, in order.
    ///
    /// Fails with `InvalidInput` if the range is reversed or extends past
    /// [`line_count`](LineSource::line_count).
    fn read_lines(&self, range: Range<usize>) -> std::io::Result<Vec<Vec<u8>>>;
}

impl<T> LineSource for Arc<T>
where
    T: LineSource + ?Sized,
{
    fn line_count(&self) -> usize {
        self.as_ref().line_count()
    }

    fn read_lines(&self, range: Range<usize>) -> std::io::Result<Vec<Vec<u8>>> {
        self.as_ref().read_lines(range)
    }
}

/// In-memory line source.
#[derive(Debug, Clone, Default)]
pub struct MemoryLineSource {
    lines: Vec<Vec<u8>>,
}

impl MemoryLineSource {
    pub fn new(lines: Vec<Vec<u8>>) -> MemoryLineSource {
        MemoryLineSource { lines }
    }

    pub fn from_lines<I, L>(lines: I) -> MemoryLineSource
    where
        I: IntoIterator<Item = L>,
        L: AsRef<[u8]>,
    {
        MemoryLineSource::new(lines.into_iter().map(|l| l.as_ref().to_vec()).collect())
    }

    /// Splits `text` into lines.
    pub fn from_text(text: &[u8]) -> MemoryLineSource {
        let offsets = LineOffsets::scan(text);
        let lines = (0..offsets.len())
            .map(|i| offsets.line(text, 0, i).to_vec())
            .collect();
        MemoryLineSource { lines }
    }
}

impl LineSource for MemoryLineSource {
    fn line_count(&self) -> usize {
        self.lines.len()
    }

    fn read_lines(&self, range: Range<usize>) -> std::io::Result<Vec<Vec<u8>>> {
        verify_range(&range, Some(self.lines.len()))?;
        Ok(self.lines[range].to_vec())
    }
}

/// Line source over any positional reader.
///
/// Opening the source performs a single pass over the data to record the byte offset
/// of every line start; afterwards each `read_lines` call issues one positional read
/// covering exactly the requested lines, so concurrent readers never share a cursor.
pub struct ReadAtLineSource<R> {
    reader: R,
    offsets: LineOffsets,
}

/// Line source backed by a file on the local file system.
pub type FileLineSource = ReadAtLineSource<FileReader>;

impl FileLineSource {
    pub fn open<P: AsRef<Path>>(path: P) -> std::io::Result<FileLineSource> {
        ReadAtLineSource::new(FileReader::open(path)?)
    }
}

impl<R: ReadAt> ReadAtLineSource<R> {
    pub fn new(reader: R) -> std::io::Result<ReadAtLineSource<R>> {
        let size = reader.size()?;
        let chunk_size = reader.storage_profile().max_io_size.max(1) as u64;
        let mut offsets = LineOffsets::default();
        let mut pos = 0u64;
        while pos < size {
            let end = std::cmp::min(pos + chunk_size, size);
            let chunk = reader.read_at(pos..end)?;
            if chunk.is_empty() {
                return Err(std::io::ErrorKind::UnexpectedEof.into());
            }
            offsets.push_delimiters(pos, &chunk);
            pos += chunk.len() as u64;
        }
        offsets.finish(size);
        log::debug!("indexed {} lines over {size} bytes", offsets.len());
        Ok(ReadAtLineSource { reader, offsets })
    }

    /// Size in bytes of the underlying data.
    pub fn byte_len(&self) -> u64 {
        self.offsets.end()
    }
}

impl<R: ReadAt> LineSource for ReadAtLineSource<R> {
    fn line_count(&self) -> usize {
        self.offsets.len()
    }

    fn read_lines(&self, range: Range<usize>) -> std::io::Result<Vec<Vec<u8>>> {
        verify_range(&range, Some(self.offsets.len()))?;
        if range.is_empty() {
            return Ok(Vec::new());
        }
        let base = self.offsets.start(range.start);
        let end = self.offsets.start(range.end);
        let buf = self.reader.read_at(base..end)?;
        if buf.len() as u64 != end - base {
            return Err(std::io::ErrorKind::UnexpectedEof.into());
        }
        Ok(range
            .map(|i| self.offsets.line(&buf, base, i).to_vec())
            .collect())
    }
}

/// Byte offsets of line starts, plus the end of the data as a final sentinel.
#[derive(Debug, Clone)]
struct LineOffsets {
    starts: Vec<u64>,
}

impl Default for LineOffsets {
    fn default() -> Self {
        LineOffsets { starts: vec![0] }
    }
}

impl LineOffsets {
    fn scan(text: &[u8]) -> LineOffsets {
        let mut offsets = LineOffsets::default();
        offsets.push_delimiters(0, text);
        offsets.finish(text.len() as u64);
        offsets
    }

    fn push_delimiters(&mut self, base: u64, chunk: &[u8]) {
        self.starts.extend(
            chunk
                .iter()
                .enumerate()
                .filter(|&(_, &b)| b == b'\n')
                .map(|(i, _)| base + i as u64 + 1),
        );
    }

    /// Closes an unterminated last line, if any.
    fn finish(&mut self, size: u64) {
        if self.end() < size {
            self.starts.push(size);
        }
    }

    fn len(&self) -> usize {
        self.starts.len() - 1
    }

    fn start(&self, line: usize) -> u64 {
        self.starts[line]
    }

    fn end(&self) -> u64 {
        self.starts[self.starts.len() - 1]
    }

    /// Content of line `line` within `buf`, where `buf` starts at byte offset `base`.
    fn line<'a>(&self, buf: &'a [u8], base: u64, line: usize) -> &'a [u8] {
        let start = (self.starts[line] - base) as usize;
        let end = (self.starts[line + 1] - base) as usize;
        let content = &buf[start..end];
        content.strip_suffix(b"\n").unwrap_or(content)
    }
}
