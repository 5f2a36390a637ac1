use std::io::Read;
use std::path::{Component, Path, PathBuf};

use flate2::read::DeflateDecoder;
use tokio::fs;
use tokio::io::AsyncWriteExt;
use tracing::debug;

use crate::io::ReadAt;
use anyhow::{Context, Result, bail};

use super::parser::ZipParser;
use super::structures::{CompressionMethod, ZipFileEntry};

/// ZIP file extractor
pub struct ZipExtractor<R: ReadAt> {
    parser: ZipParser<R>,
}

impl<R: ReadAt> ZipExtractor<R> {
    pub fn new(reader: R) -> Self {
        Self {
            parser: ZipParser::new(reader),
        }
    }

    /// List all entries in the archive
    pub async fn entries(&self) -> Result<Vec<ZipFileEntry>> {
        self.parser.entries().await
    }

    /// Materialize every entry of the archive under `dest`.
    ///
    /// Directory entries are created with any missing intermediates; file
    /// entries are decompressed and written byte-for-byte, with their parent
    /// directory created first. Stops at the first entry that fails, naming
    /// it in the error; output already written is not rolled back.
    pub async fn extract_to_dir(&self, dest: &Path) -> Result<()> {
        let entries = self.entries().await?;

        for entry in &entries {
            self.extract_entry(entry, dest)
                .await
                .with_context(|| format!("error extracting entry {:?}", entry.file_name))?;
        }

        Ok(())
    }

    async fn extract_entry(&self, entry: &ZipFileEntry, dest: &Path) -> Result<()> {
        let target = entry_destination(dest, &entry.file_name)?;

        if entry.is_directory {
            fs::create_dir_all(&target).await?;
            return Ok(());
        }

        if let Some(parent) = target.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent).await?;
            }
        }

        let data = self.read_entry(entry).await?;

        let mut file = fs::File::create(&target).await?;
        file.write_all(&data).await?;
        file.flush().await?;

        debug!(entry = %entry.file_name, target = %target.display(), "extracted file");
        Ok(())
    }

    /// Read one entry's decompressed payload into memory.
    pub async fn read_entry(&self, entry: &ZipFileEntry) -> Result<Vec<u8>> {
        let data_offset = self.parser.data_offset(entry).await?;

        let mut compressed = vec![0u8; entry.compressed_size as usize];
        self.parser
            .reader()
            .read_at(data_offset, &mut compressed)
            .await?;

        match entry.compression_method {
            CompressionMethod::Stored => Ok(compressed),
            CompressionMethod::Deflate => {
                let mut data = Vec::with_capacity(entry.uncompressed_size as usize);
                DeflateDecoder::new(compressed.as_slice())
                    .read_to_end(&mut data)
                    .context("error inflating entry data")?;
                Ok(data)
            }
            CompressionMethod::Unknown(method) => {
                bail!("unsupported compression method {method}")
            }
        }
    }
}

/// Resolve an entry name against the destination root.
///
/// Absolute names and names with parent-directory components are rejected,
/// so no entry can place output outside `dest`.
fn entry_destination(dest: &Path, name: &str) -> Result<PathBuf> {
    let mut target = dest.to_path_buf();

    for component in Path::new(name).components() {
        match component {
            Component::Normal(part) => target.push(part),
            Component::CurDir => {}
            Component::ParentDir | Component::RootDir | Component::Prefix(_) => {
                bail!("entry name {name:?} escapes the destination directory")
            }
        }
    }

    Ok(target)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn entry_destination_joins_relative_names() {
        let dest = Path::new("/data/expanded/bundle");
        assert_eq!(
            entry_destination(dest, "a/b.txt").unwrap(),
            Path::new("/data/expanded/bundle/a/b.txt")
        );
        assert_eq!(
            entry_destination(dest, "a/").unwrap(),
            Path::new("/data/expanded/bundle/a")
        );
    }

    #[test]
    fn entry_destination_ignores_curdir_components() {
        let dest = Path::new("/data/expanded/bundle");
        assert_eq!(
            entry_destination(dest, "./a/./b.txt").unwrap(),
            Path::new("/data/expanded/bundle/a/b.txt")
        );
    }

    #[test]
    fn entry_destination_rejects_parent_components() {
        let dest = Path::new("/data/expanded/bundle");
        assert!(entry_destination(dest, "../evil.txt").is_err());
        assert!(entry_destination(dest, "a/../../evil.txt").is_err());
    }

    #[test]
    fn entry_destination_rejects_absolute_names() {
        let dest = Path::new("/data/expanded/bundle");
        assert!(entry_destination(dest, "/etc/passwd").is_err());
    }
}
