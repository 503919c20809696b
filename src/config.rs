//! Configuration for pdfsplice.
//!
//! The binary turns its command-line arguments into a [`Config`], validates
//! it, and hands the relevant pieces to the host: where workspace state
//! lives, when to warn about large documents, and how outputs are written.

use std::path::PathBuf;

use crate::error::{PdfSpliceError, Result};
use crate::io::WriteOptions;

/// Default location of the workspace state document, relative to the
/// workspace root.
pub const DEFAULT_STATE_FILE: &str = ".pdfsplice/state.json";

/// Thresholds above which an operation emits an informational warning.
///
/// Nothing is ever refused for being large; the warnings only tell the user
/// that an operation may take a while.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SizeThresholds {
    /// Source file size in bytes.
    pub file_bytes: u64,
    /// Source page count.
    pub pages: u32,
}

impl Default for SizeThresholds {
    fn default() -> Self {
        Self {
            file_bytes: 100 * 1024 * 1024,
            pages: 5000,
        }
    }
}

/// Complete configuration for a pdfsplice session.
#[derive(Debug, Clone)]
pub struct Config {
    /// Workspace state document holding the tracked file list.
    pub state_file: PathBuf,

    /// Size warning thresholds.
    pub thresholds: SizeThresholds,

    /// Compress outputs before writing.
    pub compress: bool,

    /// Verbose output mode.
    pub verbose: bool,

    /// Quiet mode - suppress non-error output.
    pub quiet: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            state_file: PathBuf::from(DEFAULT_STATE_FILE),
            thresholds: SizeThresholds::default(),
            compress: true,
            verbose: false,
            quiet: false,
        }
    }
}

impl Config {
    /// Validate the configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - Verbose and quiet modes are both enabled
    /// - A warning threshold is zero
    /// - The state file path is empty
    pub fn validate(&self) -> Result<()> {
        if self.verbose && self.quiet {
            return Err(PdfSpliceError::invalid_config(
                "Cannot use both --verbose and --quiet",
            ));
        }

        if self.thresholds.file_bytes == 0 || self.thresholds.pages == 0 {
            return Err(PdfSpliceError::invalid_config(
                "Warning thresholds must be at least 1",
            ));
        }

        if self.state_file.as_os_str().is_empty() {
            return Err(PdfSpliceError::invalid_config(
                "State file path cannot be empty",
            ));
        }

        Ok(())
    }

    /// Writer options derived from this configuration.
    pub fn write_options(&self) -> WriteOptions {
        WriteOptions {
            compress: self.compress,
            ..WriteOptions::default()
        }
    }
}
