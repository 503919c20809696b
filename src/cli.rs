//! CLI argument parsing for pdfsplice.
//!
//! This module defines the command-line interface structure using `clap`.
//! Every subcommand maps onto one host command; the global flags become a
//! [`Config`].
//!
//! # Examples
//!
//! ```no_run
//! use pdfsplice::cli::Cli;
//! use clap::Parser;
//!
//! let cli = Cli::parse();
//! let config = cli.to_config().expect("Invalid configuration");
//! println!("State lives in {}", config.state_file.display());
//! ```

use clap::{Parser, Subcommand};
use std::path::PathBuf;

use crate::config::{Config, DEFAULT_STATE_FILE, SizeThresholds};
use crate::error::{PdfSpliceError, Result};

/// Merge PDF files and split them by page ranges.
///
/// pdfsplice keeps a list of tracked PDF files per workspace. Merging
/// concatenates documents page by page into `<first>_merged.pdf`; splitting
/// writes one `<name>_<start>-<end>.pdf` per page range.
#[derive(Parser, Debug)]
#[command(name = "pdfsplice")]
#[command(version)]
#[command(about = "Merge PDF files and split them by page ranges", long_about = None)]
#[command(author)]
#[command(arg_required_else_help = true)]
pub struct Cli {
    /// Command to run
    #[command(subcommand)]
    pub command: Command,

    /// Workspace state file
    ///
    /// Holds the list of tracked PDF files between runs. Created on the
    /// first change.
    #[arg(
        long,
        global = true,
        env = "PDFSPLICE_STATE",
        value_name = "FILE",
        default_value = DEFAULT_STATE_FILE
    )]
    pub state: PathBuf,

    /// Verbose output - show timings, sizes and progress
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Quiet mode - only show warnings and errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Write outputs without compressing their streams
    #[arg(long, global = true)]
    pub no_compress: bool,

    /// Warn when a source file is larger than this many bytes
    #[arg(
        long,
        global = true,
        value_name = "BYTES",
        default_value_t = SizeThresholds::default().file_bytes
    )]
    pub large_file_bytes: u64,

    /// Warn when a source document has more than this many pages
    #[arg(
        long,
        global = true,
        value_name = "PAGES",
        default_value_t = SizeThresholds::default().pages
    )]
    pub many_pages: u32,
}

/// Subcommands.
#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Merge PDF files in order
    ///
    /// Without arguments the tracked files are merged; when fewer than two
    /// are tracked you are asked for files. Glob patterns are expanded.
    ///
    /// Examples:
    ///   pdfsplice merge intro.pdf body.pdf
    ///   pdfsplice merge 'chapter*.pdf'
    Merge {
        /// Input PDF files or glob patterns
        #[arg(value_name = "FILE")]
        inputs: Vec<String>,
    },

    /// Split a PDF file into page ranges
    ///
    /// Without a file you choose one of the tracked files. Without ranges
    /// you are asked for them.
    ///
    /// Examples:
    ///   pdfsplice split book.pdf "1-3, 4-6"
    ///   pdfsplice split book.pdf
    Split {
        /// PDF file to split
        #[arg(value_name = "FILE")]
        path: Option<PathBuf>,

        /// Page ranges, e.g. "1-3, 4-6"
        #[arg(value_name = "RANGES", requires = "path")]
        ranges: Option<String>,
    },

    /// Manage the tracked PDF files
    Files {
        /// What to do with the tracked files
        #[command(subcommand)]
        action: FilesAction,
    },

    /// Show a PDF file one page at a time
    ///
    /// Reads navigation from stdin: `n` next, `p` previous, a number to
    /// jump, `q` to quit. Without a file the first tracked file is shown.
    Preview {
        /// PDF file to show
        #[arg(value_name = "FILE")]
        path: Option<PathBuf>,
    },

    /// Handle panel messages read from stdin, one JSON object per line
    ///
    /// Example:
    ///   {"command":"split","pdfPath":"/docs/a.pdf","pageRanges":[{"start":1,"end":2}]}
    Serve,
}

/// Actions on the tracked file list.
#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum FilesAction {
    /// Print the tracked files
    List,

    /// Track more files; asks for them when none are given
    Add {
        /// PDF files or glob patterns
        #[arg(value_name = "FILE")]
        paths: Vec<String>,
    },

    /// Stop tracking a file
    Remove {
        /// Tracked PDF file
        #[arg(value_name = "FILE")]
        path: PathBuf,
    },
}

impl Cli {
    /// Convert CLI arguments into a validated Config.
    ///
    /// # Errors
    ///
    /// Returns an error if the resulting configuration fails validation,
    /// e.g. a zero size threshold.
    pub fn to_config(&self) -> Result<Config> {
        let config = Config {
            state_file: self.state.clone(),
            thresholds: SizeThresholds {
                file_bytes: self.large_file_bytes,
                pages: self.many_pages,
            },
            compress: !self.no_compress,
            verbose: self.verbose,
            quiet: self.quiet,
        };

        config.validate().map_err(|e| {
            PdfSpliceError::invalid_config(format!("Configuration validation failed: {e}"))
        })?;

        Ok(config)
    }
}
