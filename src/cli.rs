use std::path::PathBuf;

use clap::{ArgAction, Parser, ValueEnum};

/// Log output format.
#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum LogFormat {
    Text,
    Json,
}

#[derive(Parser, Debug)]
#[command(name = "zipsweep")]
#[command(version)]
#[command(about = "Recursively find ZIP archives by content and expand them in place", long_about = None)]
#[command(after_help = "Examples:\n  \
  zipsweep -d ./downloads              expand every archive found under ./downloads\n  \
  zipsweep -d ./downloads -vv          same, with per-entry trace output\n  \
  zipsweep -d ./downloads --jobs 4     expand up to four archives at once")]
pub struct Cli {
    /// Directory to recursively search for zip files
    #[arg(short = 'd', long = "data-dir", value_name = "DIR")]
    pub data_dir: PathBuf,

    /// Log format
    #[arg(long = "log-format", value_enum, default_value_t = LogFormat::Text)]
    pub log_format: LogFormat,

    /// Show verbose debug information, each -v bumps log level
    #[arg(short = 'v', long = "verbose", action = ArgAction::Count)]
    pub verbose: u8,

    /// Maximum number of archives expanded concurrently
    #[arg(long = "jobs", value_name = "N", default_value_t = 1)]
    pub jobs: usize,
}

impl Cli {
    /// Default log filter directive derived from `-v` occurrences.
    pub fn log_directive(&self) -> &'static str {
        match self.verbose {
            0 => "info",
            1 => "debug",
            _ => "trace",
        }
    }

    pub fn is_json(&self) -> bool {
        self.log_format == LogFormat::Json
    }
}
