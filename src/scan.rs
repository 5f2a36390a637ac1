//! Directory tree scanning.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use tracing::{debug, error};
use walkdir::WalkDir;

use crate::sniff;

/// Recursively collect every file under `root` whose content is a ZIP
/// archive.
///
/// Each regular file is sniffed; only files classifying as
/// [`sniff::ZIP_MIME`] are collected, in lexical per-directory walk order,
/// so the result is deterministic for a given tree. Symbolic links are never
/// followed: a symlinked directory is not descended and a symlinked file is
/// not classified.
///
/// A file that cannot be read is logged and excluded while the walk
/// continues; a directory that cannot be enumerated fails the whole scan.
pub fn find_archives(root: &Path) -> Result<Vec<PathBuf>> {
    let mut archives = Vec::new();

    for entry in WalkDir::new(root).follow_links(false).sort_by_file_name() {
        let entry = entry.with_context(|| format!("error walking {}", root.display()))?;

        if !entry.file_type().is_file() {
            continue;
        }

        match sniff::sniff_path(entry.path()) {
            Ok(mime) if mime == sniff::ZIP_MIME => {
                debug!(path = %entry.path().display(), "found zip content");
                archives.push(entry.into_path());
            }
            Ok(_) => {}
            Err(err) => {
                error!(path = %entry.path().display(), error = %err, "error getting content type");
            }
        }
    }

    Ok(archives)
}
