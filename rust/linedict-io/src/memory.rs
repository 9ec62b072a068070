use std::ops::Range;

use crate::{ReadAt, SealingWrite, StorageProfile, utils::verify_range};

impl<T> ReadAt for T
where
    T: details::SliceBytes + Send + Sync + 'static,
{
    fn size(&self) -> std::io::Result<u64> {
        Ok(self.bytes().len() as u64)
    }

    fn read_at(&self, range: Range<u64>) -> std::io::Result<Vec<u8>> {
        verify_range(&range, None)?;
        let content = self.bytes();
        let pos = range.start as usize;
        if pos > content.len() {
            return Ok(Vec::new());
        }
        let len = std::cmp::min((range.end - range.start) as usize, content.len() - pos);
        Ok(content[pos..pos + len].to_vec())
    }

    fn storage_profile(&self) -> StorageProfile {
        StorageProfile {
            min_io_size: 1,
            max_io_size: self
                .bytes()
                .len()
                .clamp(1, StorageProfile::default().max_io_size),
        }
    }
}

impl SealingWrite for Vec<u8> {
    fn write_all(&mut self, buf: &[u8]) -> std::io::Result<()> {
        self.extend_from_slice(buf);
        Ok(())
    }

    fn seal(&mut self) -> std::io::Result<()> {
        Ok(())
    }

    fn storage_profile(&self) -> StorageProfile {
        StorageProfile {
            min_io_size: 1,
            ..Default::default()
        }
    }
}

mod details {
    pub trait SliceBytes {
        fn bytes(&self) -> &[u8];
    }

    impl SliceBytes for Vec<u8> {
        fn bytes(&self) -> &[u8] {
            self.as_slice()
        }
    }

    impl SliceBytes for &'static [u8] {
        fn bytes(&self) -> &[u8] {
            self
        }
    }
}
