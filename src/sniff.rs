//! Content-based file classification.
//!
//! Files are classified by matching their leading bytes against a fixed
//! table of format signatures; names and extensions are never consulted.
//! Samples that match no signature fall back to a generic text or binary
//! classification.

use std::fs::File;
use std::io::{self, Read, Seek};
use std::path::Path;

/// Canonical MIME type reported for ZIP content.
pub const ZIP_MIME: &str = "application/zip";

/// Number of leading bytes consulted for classification.
const SNIFF_LEN: u64 = 512;

/// Classify a leading-byte sample against known format signatures.
///
/// Unmatched samples classify as `text/plain` when they contain no binary
/// control bytes, otherwise `application/octet-stream`. An empty sample is
/// `text/plain`.
pub fn classify(sample: &[u8]) -> &'static str {
    match sample {
        [0x50, 0x4B, 0x03, 0x04, ..] => ZIP_MIME,
        [0x1F, 0x8B, ..] => "application/x-gzip",
        [0x28, 0xB5, 0x2F, 0xFD, ..] => "application/zstd",
        [0xFD, 0x37, 0x7A, 0x58, 0x5A, 0x00, ..] => "application/x-xz",
        [0x25, 0x50, 0x44, 0x46, 0x2D, ..] => "application/pdf",
        [0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A, 0x1A, 0x0A, ..] => "image/png",
        [0xFF, 0xD8, 0xFF, ..] => "image/jpeg",
        [0x47, 0x49, 0x46, 0x38, ..] => "image/gif",
        [0x7F, 0x45, 0x4C, 0x46, ..] => "application/octet-stream",
        _ => {
            if is_ustar_header(sample) {
                "application/x-tar"
            } else if is_textual(sample) {
                "text/plain"
            } else {
                "application/octet-stream"
            }
        }
    }
}

// Tar has no leading magic; the ustar marker sits at offset 257.
fn is_ustar_header(sample: &[u8]) -> bool {
    sample.len() >= 512 && sample[257..262] == *b"ustar"
}

// Binary control bytes that never appear in plain text.
fn is_textual(sample: &[u8]) -> bool {
    !sample
        .iter()
        .any(|&b| matches!(b, 0x00..=0x08 | 0x0B | 0x0E..=0x1A | 0x1C..=0x1F))
}

/// Classify a file through an open handle.
///
/// Reads at most the first 512 bytes and rewinds the handle so the caller
/// can reuse it from the start.
pub fn sniff_reader<R: Read + Seek>(reader: &mut R) -> io::Result<&'static str> {
    let mut sample = Vec::with_capacity(SNIFF_LEN as usize);
    reader.take(SNIFF_LEN).read_to_end(&mut sample)?;
    reader.rewind()?;
    Ok(classify(&sample))
}

/// Open a file and classify its content.
pub fn sniff_path(path: &Path) -> io::Result<&'static str> {
    let mut file = File::open(path)?;
    sniff_reader(&mut file)
}
