//! PDF reading and loading operations.
//!
//! Documents are read whole: the file is pulled into memory in one read and
//! parsed from the buffer on a blocking worker, so the async caller never
//! stalls on the parser.
//!
//! # Examples
//!
//! ```no_run
//! use pdfsplice::io::PdfReader;
//! use std::path::Path;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let reader = PdfReader::new();
//! let loaded = reader.load(Path::new("report.pdf")).await?;
//! println!("{} has {} pages", loaded.path.display(), loaded.page_count);
//! # Ok(())
//! # }
//! ```

use lopdf::Document;
use std::fmt;
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};
use tokio::task;

use crate::config::SizeThresholds;
use crate::error::{PdfSpliceError, Result};

/// A loaded PDF document with metadata.
#[derive(Debug)]
pub struct LoadedPdf {
    /// The PDF document.
    pub document: Document,

    /// Path to the source file.
    pub path: PathBuf,

    /// Number of pages in the document.
    pub page_count: u32,

    /// Time taken to read and parse the document.
    pub load_time: Duration,

    /// File size in bytes.
    pub file_size: u64,
}

impl LoadedPdf {
    /// Warnings this document triggers against `thresholds`.
    pub fn size_warnings(&self, thresholds: &SizeThresholds) -> Vec<SizeWarning> {
        let mut warnings = Vec::new();
        if self.file_size > thresholds.file_bytes {
            warnings.push(SizeWarning::LargeFile);
        }
        if self.page_count > thresholds.pages {
            warnings.push(SizeWarning::ManyPages);
        }
        warnings
    }
}

/// Informational warning about a document that may be slow to process.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SizeWarning {
    /// The file is larger than the configured byte threshold.
    LargeFile,
    /// The document has more pages than the configured threshold.
    ManyPages,
}

impl fmt::Display for SizeWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::LargeFile => write!(f, "Processing large PDF file. This may take some time."),
            Self::ManyPages => write!(f, "Processing PDFs with many pages may be slow"),
        }
    }
}

/// PDF reader with configurable loading behavior.
#[derive(Debug, Clone, Default)]
pub struct PdfReader {
    /// Reject documents without pages.
    require_pages: bool,
}

impl PdfReader {
    /// Create a reader that accepts any parseable document.
    pub fn new() -> Self {
        Self {
            require_pages: false,
        }
    }

    /// Create a reader that rejects documents with no pages.
    ///
    /// Used by the preview, which has nothing to show for an empty document.
    pub fn requiring_pages() -> Self {
        Self {
            require_pages: true,
        }
    }

    /// Load a single PDF document.
    ///
    /// # Errors
    ///
    /// Returns [`PdfSpliceError::Read`] if:
    /// - The file cannot be read
    /// - The file is not a valid PDF
    /// - The reader requires pages and the document has none
    pub async fn load(&self, path: &Path) -> Result<LoadedPdf> {
        let path_buf = path.to_path_buf();
        let start = Instant::now();

        let bytes = tokio::fs::read(&path_buf)
            .await
            .map_err(|e| PdfSpliceError::read(path_buf.clone(), e.to_string()))?;
        let file_size = bytes.len() as u64;

        // Parse on a blocking worker; lopdf is synchronous.
        let document = task::spawn_blocking(move || Document::load_mem(&bytes))
            .await
            .map_err(|e| PdfSpliceError::other(format!("Load task failed: {e}")))?
            .map_err(|e| PdfSpliceError::read(path_buf.clone(), e.to_string()))?;

        let page_count = document.get_pages().len() as u32;
        if self.require_pages && page_count == 0 {
            return Err(PdfSpliceError::read(path_buf, "PDF has no pages"));
        }

        let load_time = start.elapsed();
        tracing::debug!(
            path = %path_buf.display(),
            page_count,
            file_size,
            ?load_time,
            "loaded document"
        );

        Ok(LoadedPdf {
            document,
            path: path_buf,
            page_count,
            load_time,
            file_size,
        })
    }

    /// Load multiple PDF documents one at a time, in the order provided.
    ///
    /// Stops at the first document that fails to load.
    pub async fn load_sequential(&self, paths: &[PathBuf]) -> Result<Vec<LoadedPdf>> {
        let mut loaded = Vec::with_capacity(paths.len());

        for path in paths {
            loaded.push(self.load(path).await?);
        }

        Ok(loaded)
    }
}

/// Format file size as human-readable string.
pub fn format_file_size(size: u64) -> String {
    const KB: u64 = 1024;
    const MB: u64 = KB * 1024;
    const GB: u64 = MB * 1024;

    if size >= GB {
        format!("{:.2} GB", size as f64 / GB as f64)
    } else if size >= MB {
        format!("{:.2} MB", size as f64 / MB as f64)
    } else if size >= KB {
        format!("{:.2} KB", size as f64 / KB as f64)
    } else {
        format!("{size} bytes")
    }
}
