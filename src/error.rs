//! Error types for pdfsplice.
//!
//! Every failure the tool can produce is a variant of [`PdfSpliceError`].
//! Errors are designed to be shown to a person: each one renders as a short,
//! actionable message, and [`PdfSpliceError::user_message`] prefixes it with
//! the name of the operation that failed.
//!
//! # Error Categories
//!
//! - **Range Errors**: page-range text that fails the grammar, exceeds the
//!   document, or runs backwards
//! - **Document Errors**: sources that cannot be read, outputs that cannot be
//!   written
//! - **Host Errors**: workspace state and panel messages

use std::io;
use std::path::PathBuf;

use thiserror::Error;

use crate::range::{FORMAT_EXAMPLE, PageRange};

/// Result type alias for pdfsplice operations.
pub type Result<T> = std::result::Result<T, PdfSpliceError>;

/// Main error type for pdfsplice operations.
#[derive(Debug, Error)]
pub enum PdfSpliceError {
    /// Range text does not match `1-3, 4-6` style grammar.
    #[error("Please use the format \"{}\"", FORMAT_EXAMPLE)]
    Format {
        /// The offending input text.
        input: String,
    },

    /// A range reaches outside the pages of a document with a known page count.
    #[error("Page range {range} is invalid. PDF has pages 1-{page_count}")]
    RangeBounds {
        /// The offending range.
        range: PageRange,
        /// Number of pages in the document.
        page_count: u32,
    },

    /// A range starts after it ends.
    #[error("Invalid range: {range}. Start page must be less than or equal to end page")]
    RangeOrder {
        /// The offending range.
        range: PageRange,
    },

    /// A source document could not be read or parsed.
    #[error("Failed to load PDF: {}\n  Reason: {reason}", path.display())]
    Read {
        /// Path to the source document.
        path: PathBuf,
        /// Reason for the failure.
        reason: String,
    },

    /// An output document could not be written.
    #[error("Failed to write PDF: {}\n  Reason: {source}", path.display())]
    Write {
        /// Path being written to.
        path: PathBuf,
        /// Underlying I/O error.
        source: io::Error,
    },

    /// No files were provided for merging.
    #[error("No input files specified for merging")]
    NoFilesToMerge,

    /// Workspace state could not be read or persisted.
    #[error("Failed to access workspace state: {}\n  Reason: {reason}", path.display())]
    Store {
        /// Location of the state document.
        path: PathBuf,
        /// Reason for the failure.
        reason: String,
    },

    /// A panel message could not be understood.
    #[error("Unsupported panel message: {reason}")]
    Protocol {
        /// Details about what was wrong with the message.
        reason: String,
    },

    /// Invalid configuration.
    #[error("Invalid configuration: {message}")]
    InvalidConfig {
        /// Description of what's wrong with the configuration.
        message: String,
    },

    /// Generic I/O error.
    #[error("I/O error: {source}")]
    Io {
        /// Underlying I/O error.
        #[from]
        source: io::Error,
    },

    /// Generic error with a custom message.
    #[error("{message}")]
    Other {
        /// Error message.
        message: String,
    },
}

impl PdfSpliceError {
    /// Create a Format error.
    pub fn format(input: impl Into<String>) -> Self {
        Self::Format {
            input: input.into(),
        }
    }

    /// Create a Read error.
    pub fn read(path: impl Into<PathBuf>, reason: impl Into<String>) -> Self {
        Self::Read {
            path: path.into(),
            reason: reason.into(),
        }
    }

    /// Create a Write error.
    pub fn write(path: impl Into<PathBuf>, source: io::Error) -> Self {
        Self::Write {
            path: path.into(),
            source,
        }
    }

    /// Create a Protocol error.
    pub fn protocol(reason: impl Into<String>) -> Self {
        Self::Protocol {
            reason: reason.into(),
        }
    }

    /// Create an InvalidConfig error.
    pub fn invalid_config(message: impl Into<String>) -> Self {
        Self::InvalidConfig {
            message: message.into(),
        }
    }

    /// Create an Other error with a custom message.
    pub fn other(message: impl Into<String>) -> Self {
        Self::Other {
            message: message.into(),
        }
    }

    /// Render the error for a notification, e.g. `Error merging PDFs: ...`.
    pub fn user_message(&self, prefix: &str) -> String {
        format!("{prefix}: {self}")
    }

    /// Get the process exit code for this error.
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::Format { .. } | Self::RangeBounds { .. } | Self::RangeOrder { .. } => 1,
            Self::NoFilesToMerge => 1,
            Self::InvalidConfig { .. } => 1,
            Self::Protocol { .. } => 1,
            Self::Read { .. } => 3,
            Self::Write { .. } => 5,
            Self::Store { .. } => 5,
            Self::Io { .. } => 5,
            Self::Other { .. } => 1,
        }
    }
}
