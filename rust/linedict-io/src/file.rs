use std::{fs::File, io::Write, ops::Range, path::Path, sync::Arc};

use crate::{ReadAt, SealingWrite, StorageProfile, utils::verify_range};

/// Positional reader over a file that does not change while it is open.
///
/// The file length is taken once, when the reader is created; reads past it are
/// clipped.
pub struct FileReader {
    file: Arc<File>,
    len: u64,
}

impl FileReader {
    pub fn new(file: impl Into<Arc<File>>) -> std::io::Result<FileReader> {
        let file = file.into();
        let len = file.metadata()?.len();
        Ok(FileReader { file, len })
    }

    pub fn open<P: AsRef<Path>>(path: P) -> std::io::Result<FileReader> {
        FileReader::new(File::open(path)?)
    }
}

impl ReadAt for FileReader {
    fn size(&self) -> std::io::Result<u64> {
        Ok(self.len)
    }

    fn read_at(&self, range: Range<u64>) -> std::io::Result<Vec<u8>> {
        verify_range(&range, None)?;
        let end = range.end.min(self.len);
        if range.start >= end {
            return Ok(Vec::new());
        }
        let mut buf = vec![0u8; (end - range.start) as usize];
        read_exact_at(&self.file, &mut buf, range.start)?;
        Ok(buf)
    }

    fn storage_profile(&self) -> StorageProfile {
        StorageProfile {
            min_io_size: 16 * 1024,
            max_io_size: 1024 * 1024,
        }
    }
}

/// Sequential file writer. Data becomes durable on [`SealingWrite::seal`], after
/// which the writer is closed and rejects further calls.
pub struct FileWriter {
    file: Option<File>,
}

impl FileWriter {
    pub fn new(file: File) -> FileWriter {
        FileWriter { file: Some(file) }
    }

    /// Creates a new file, failing if it already exists.
    pub fn create<P: AsRef<Path>>(path: P) -> std::io::Result<FileWriter> {
        Ok(FileWriter::new(File::create_new(path)?))
    }

    /// Creates a file, truncating any existing one.
    pub fn create_or_truncate<P: AsRef<Path>>(path: P) -> std::io::Result<FileWriter> {
        Ok(FileWriter::new(File::create(path)?))
    }

    fn open_file(&mut self) -> std::io::Result<&mut File> {
        self.file.as_mut().ok_or_else(sealed_error)
    }
}

fn sealed_error() -> std::io::Error {
    std::io::Error::other("file writer is already sealed")
}

impl SealingWrite for FileWriter {
    fn write_all(&mut self, buf: &[u8]) -> std::io::Result<()> {
        self.open_file()?.write_all(buf)
    }

    fn seal(&mut self) -> std::io::Result<()> {
        let mut file = self.file.take().ok_or_else(sealed_error)?;
        file.flush()?;
        file.sync_all()
    }

    fn storage_profile(&self) -> StorageProfile {
        StorageProfile::default()
    }
}

#[cfg(unix)]
fn read_exact_at(file: &File, buf: &mut [u8], offset: u64) -> std::io::Result<()> {
    std::os::unix::fs::FileExt::read_exact_at(file, buf, offset)
}

#[cfg(windows)]
fn read_exact_at(file: &File, buf: &mut [u8], offset: u64) -> std::io::Result<()> {
    use std::os::windows::fs::FileExt;

    let mut filled = 0;
    while filled < buf.len() {
        let n = file.seek_read(&mut buf[filled..], offset + filled as u64)?;
        if n == 0 {
            return Err(std::io::ErrorKind::UnexpectedEof.into());
        }
        filled += n;
    }
    Ok(())
}
