//! Storage access used by the encoder and the artifact codec.
//!
//! - [`ReadAt`]: random access to the bytes of an immutable file or buffer.
//! - [`SealingWrite`]: append-only output that is committed by an explicit `seal()`.
//! - [`LineSource`]: input lines addressed by line range.
//!
//! In-memory and local-file implementations are provided.

use std::{ops::Range, sync::Arc};

pub mod file;
pub mod lines;
pub mod memory;
pub mod utils;

pub use lines::{FileLineSource, LineSource, MemoryLineSource, ReadAtLineSource};

/// Immutable byte container readable at arbitrary offsets, safe to share between
/// threads.
pub trait ReadAt: Send + Sync + 'static {
    /// Length of the data in bytes.
    fn size(&self) -> std::io::Result<u64>;

    /// Returns the bytes in `range`.
    ///
    /// The part of the range past the end of the data is ignored, so the result is
    /// shorter than requested only at the end. A reversed range is an `InvalidInput`
    /// error.
    fn read_at(&self, range: Range<u64>) -> std::io::Result<Vec<u8>>;

    fn storage_profile(&self) -> StorageProfile;
}

/// Append-only output stream.
///
/// Bytes passed to [`write_all`](SealingWrite::write_all) are not guaranteed to be
/// stored until [`seal`](SealingWrite::seal) returns successfully. A sealed writer
/// accepts no more data.
pub trait SealingWrite: Send {
    fn write_all(&mut self, buf: &[u8]) -> std::io::Result<()>;

    fn seal(&mut self) -> std::io::Result<()>;

    fn storage_profile(&self) -> StorageProfile;
}

/// Describes the preferred I/O granularity of a storage medium.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StorageProfile {
    /// Minimal I/O size worth issuing against this storage.
    pub min_io_size: usize,
    /// Maximal I/O size worth issuing in a single request.
    pub max_io_size: usize,
}

impl StorageProfile {
    /// Clamps the requested I/O size to the bounds of this profile,
    /// returning at least 1.
    pub fn clamp_io_size(&self, size: usize) -> usize {
        let min = self.min_io_size.max(1).min(self.max_io_size);
        let max = self.max_io_size.max(1).max(min);
        size.clamp(min, max)
    }
}

impl Default for StorageProfile {
    fn default() -> StorageProfile {
        Self {
            min_io_size: 4 * 1024,
            max_io_size: 4 * 1024 * 1024,
        }
    }
}

impl<T> ReadAt for Arc<T>
where
    T: ReadAt + ?Sized,
{
    fn size(&self) -> std::io::Result<u64> {
        self.as_ref().size()
    }

    fn read_at(&self, range: Range<u64>) -> std::io::Result<Vec<u8>> {
        self.as_ref().read_at(range)
    }

    fn storage_profile(&self) -> StorageProfile {
        self.as_ref().storage_profile()
    }
}

impl<T> SealingWrite for Box<T>
where
    T: SealingWrite + ?Sized,
{
    fn write_all(&mut self, buf: &[u8]) -> std::io::Result<()> {
        self.as_mut().write_all(buf)
    }

    fn seal(&mut self) -> std::io::Result<()> {
        self.as_mut().seal()
    }

    fn storage_profile(&self) -> StorageProfile {
        self.as_ref().storage_profile()
    }
}

/// Adapts a [`SealingWrite`] to [`std::io::Write`], so that it can be wrapped in
/// a `BufWriter` or driven by `byteorder`'s extension traits.
///
/// `flush` is a no-op: data is committed only by sealing the inner writer.
pub struct WriteAdapter<'a, W: SealingWrite + ?Sized> {
    inner: &'a mut W,
    written: u64,
}

impl<'a, W: SealingWrite + ?Sized> WriteAdapter<'a, W> {
    pub fn new(inner: &'a mut W) -> Self {
        WriteAdapter { inner, written: 0 }
    }

    /// Total number of bytes passed through this adapter.
    pub fn written(&self) -> u64 {
        self.written
    }
}

impl<W: SealingWrite + ?Sized> std::io::Write for WriteAdapter<'_, W> {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        self.inner.write_all(buf)?;
        self.written += buf.len() as u64;
        Ok(buf.len())
    }

    fn write_all(&mut self, buf: &[u8]) -> std::io::Result<()> {
        self.inner.write_all(buf)?;
        self.written += buf.len() as u64;
        Ok(())
    }

    fn flush(&mut self) -> std::io::Result<()> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::{StorageProfile, WriteAdapter};

    #[test]
    fn test_clamp_io_size() {
        let profile = StorageProfile {
            min_io_size: 16,
            max_io_size: 1024,
        };
        assert_eq!(profile.clamp_io_size(0), 16);
        assert_eq!(profile.clamp_io_size(100), 100);
        assert_eq!(profile.clamp_io_size(1 << 20), 1024);

        let degenerate = StorageProfile {
            min_io_size: 0,
            max_io_size: 0,
        };
        assert_eq!(degenerate.clamp_io_size(0), 1);
    }

    #[test]
    fn test_write_adapter() {
        let mut sink = Vec::<u8>::new();
        let mut adapter = WriteAdapter::new(&mut sink);
        adapter.write_all(b"abc").unwrap();
        assert_eq!(adapter.write(b"de").unwrap(), 2);
        adapter.flush().unwrap();
        assert_eq!(adapter.written(), 5);
        assert_eq!(sink, b"abcde");
    }
}
