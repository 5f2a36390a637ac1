//! Archive discovery, destination derivation, and expansion orchestration.
//!
//! One run scans the data directory once, then walks the candidate list
//! applying a per-archive lifecycle: derive the destination, skip it if it
//! already exists, otherwise create it and extract into it. Per-archive
//! failures are logged and counted; only a scan failure aborts the run.

use std::path::{Path, PathBuf};

use anyhow::Result;
use tokio::task::JoinSet;
use tracing::{error, info};

use crate::cli::Cli;
use crate::io::LocalFileReader;
use crate::scan;
use crate::zip::ZipExtractor;

/// Sentinel subdirectory that receives expanded archives.
const EXPANDED_DIR: &str = "expanded";

/// Terminal state of one archive's processing.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Outcome {
    /// All entries materialized under a freshly created destination.
    Extracted,
    /// The destination already existed; nothing was written.
    SkippedExisting,
    /// Destination creation or extraction failed; the destination may hold
    /// partial output.
    Failed,
}

/// Aggregated results of one run.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Summary {
    pub found: usize,
    pub extracted: usize,
    pub skipped: usize,
    pub failed: usize,
}

impl Summary {
    fn record(&mut self, outcome: Outcome) {
        match outcome {
            Outcome::Extracted => self.extracted += 1,
            Outcome::SkippedExisting => self.skipped += 1,
            Outcome::Failed => self.failed += 1,
        }
    }
}

/// Derive the destination directory for an archive path.
///
/// The destination is the archive's parent directory joined with
/// `expanded` and the archive's base name with a trailing `.zip` removed.
/// The suffix check is case-sensitive; a base name without the suffix is
/// used whole.
pub fn expanded_path(archive: &Path) -> PathBuf {
    let base_dir = archive.parent().unwrap_or_else(|| Path::new(""));
    let name = archive
        .file_name()
        .map(|n| n.to_string_lossy())
        .unwrap_or_default();
    let stem = name.strip_suffix(".zip").unwrap_or(&name);
    base_dir.join(EXPANDED_DIR).join(stem)
}

/// Process one discovered archive through its skip/extract lifecycle.
///
/// Never returns an error: every failure is logged with the archive and
/// destination paths and folded into the returned [`Outcome`].
pub async fn process_archive(archive: PathBuf) -> Outcome {
    let dest = expanded_path(&archive);

    if dest.exists() {
        info!(zip = %archive.display(), dest = %dest.display(), "skipping expanding since target exists");
        return Outcome::SkippedExisting;
    }

    if let Err(err) = tokio::fs::create_dir_all(&dest).await {
        error!(dest = %dest.display(), error = %err, "error creating directory");
        return Outcome::Failed;
    }

    match extract_archive(&archive, &dest).await {
        Ok(()) => {
            info!(zip = %archive.display(), dest = %dest.display(), "expanded archive");
            Outcome::Extracted
        }
        Err(err) => {
            error!(zip = %archive.display(), dest = %dest.display(), error = %format!("{err:#}"), "error extracting");
            Outcome::Failed
        }
    }
}

async fn extract_archive(archive: &Path, dest: &Path) -> Result<()> {
    let reader = LocalFileReader::new(archive)?;
    let extractor = ZipExtractor::new(reader);
    extractor.extract_to_dir(dest).await
}

/// Scan the data directory and expand every discovered archive.
///
/// A scan failure fails the run before any extraction is attempted.
/// Otherwise every archive is processed regardless of sibling failures, and
/// the returned [`Summary`] reports the per-archive outcomes. With
/// `--jobs N` greater than one, up to N archives are expanded concurrently;
/// entries within an archive are always written sequentially.
pub async fn run(cli: &Cli) -> Result<Summary> {
    let archives = scan::find_archives(&cli.data_dir)?;
    info!(count = archives.len(), "found zip files");

    let mut summary = Summary {
        found: archives.len(),
        ..Summary::default()
    };

    let jobs = cli.jobs.max(1);
    if jobs > 1 {
        let mut tasks = JoinSet::new();
        let mut pending = archives.into_iter();

        loop {
            while tasks.len() < jobs {
                match pending.next() {
                    Some(archive) => {
                        tasks.spawn(process_archive(archive));
                    }
                    None => break,
                }
            }

            match tasks.join_next().await {
                Some(Ok(outcome)) => summary.record(outcome),
                Some(Err(err)) => {
                    error!(error = %err, "archive task failed");
                    summary.record(Outcome::Failed);
                }
                None => break,
            }
        }
    } else {
        for archive in archives {
            summary.record(process_archive(archive).await);
        }
    }

    Ok(summary)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn expanded_path_strips_zip_suffix() {
        assert_eq!(
            expanded_path(Path::new("foo/bar.zip")),
            Path::new("foo/expanded/bar")
        );
    }

    #[test]
    fn expanded_path_keeps_nested_parent() {
        assert_eq!(
            expanded_path(Path::new("/data/nested/deep/archive.zip")),
            Path::new("/data/nested/deep/expanded/archive")
        );
    }

    #[test]
    fn expanded_path_without_suffix_uses_whole_name() {
        assert_eq!(
            expanded_path(Path::new("foo/data.bin")),
            Path::new("foo/expanded/data.bin")
        );
    }

    #[test]
    fn expanded_path_suffix_check_is_case_sensitive() {
        assert_eq!(
            expanded_path(Path::new("foo/BAR.ZIP")),
            Path::new("foo/expanded/BAR.ZIP")
        );
    }
}
