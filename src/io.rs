//! Random-access reading for archive sources.

use std::path::Path;

use anyhow::Result;
use async_trait::async_trait;

/// Trait for random access reading from a data source
#[async_trait]
pub trait ReadAt: Send + Sync {
    /// Fill `buf` with data starting at `offset`
    async fn read_at(&self, offset: u64, buf: &mut [u8]) -> Result<()>;

    /// Get the total size of the data source
    fn size(&self) -> u64;
}

/// Local file reader with random access support
pub struct LocalFileReader {
    file: std::fs::File,
    size: u64,
}

impl LocalFileReader {
    pub fn new(path: &Path) -> Result<Self> {
        let file = std::fs::File::open(path)?;
        let size = file.metadata()?.len();
        Ok(Self { file, size })
    }
}

#[async_trait]
impl ReadAt for LocalFileReader {
    async fn read_at(&self, offset: u64, buf: &mut [u8]) -> Result<()> {
        #[cfg(unix)]
        {
            use std::os::unix::fs::FileExt;
            Ok(self.file.read_exact_at(buf, offset)?)
        }

        #[cfg(not(unix))]
        {
            use std::io::{Read, Seek, SeekFrom};
            // No pread outside unix. Each reader is owned by a single
            // archive's extraction, so seeking the shared handle is safe.
            let mut file = &self.file;
            file.seek(SeekFrom::Start(offset))?;
            Ok(file.read_exact(buf)?)
        }
    }

    fn size(&self) -> u64 {
        self.size
    }
}
