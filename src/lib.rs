//! # zipsweep
//!
//! Recursively scan a directory tree for files whose *content* is a ZIP
//! archive and expand each one into a sibling `expanded/<name>` directory.
//!
//! Detection sniffs a file's leading bytes against known format signatures,
//! so a ZIP renamed to `data.bin` is found and a text file named
//! `archive.zip` is not. An archive whose destination directory already
//! exists is skipped, which makes repeated runs expand only what is new.
//! Extraction reads the archive's central directory through a random-access
//! reader and materializes every entry under the destination.
//!
//! ## Example
//!
//! ```no_run
//! use zipsweep::{LocalFileReader, ZipExtractor};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     // Find every ZIP-content file under ./data
//!     let archives = zipsweep::scan::find_archives("data".as_ref())?;
//!
//!     for archive in archives {
//!         let dest = zipsweep::expand::expanded_path(&archive);
//!         let extractor = ZipExtractor::new(LocalFileReader::new(&archive)?);
//!         extractor.extract_to_dir(&dest).await?;
//!     }
//!
//!     Ok(())
//! }
//! ```

pub mod cli;
pub mod expand;
pub mod io;
pub mod scan;
pub mod sniff;
pub mod zip;

pub use cli::Cli;
pub use expand::{Outcome, Summary};
pub use io::{LocalFileReader, ReadAt};
pub use zip::{ZipExtractor, ZipFileEntry};
