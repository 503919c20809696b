//! PDF writing and saving operations.
//!
//! Outputs are written on a blocking worker. With atomic writes enabled the
//! document goes to `<name>.tmp` next to the destination first and is then
//! renamed over it, so a failed write never leaves a half-written output
//! under the final name.
//!
//! # Examples
//!
//! ```no_run
//! use pdfsplice::io::PdfWriter;
//! use lopdf::Document;
//! use std::path::Path;
//!
//! # async fn example(doc: Document) -> Result<(), Box<dyn std::error::Error>> {
//! let writer = PdfWriter::new();
//! writer.save(doc, Path::new("output.pdf")).await?;
//! # Ok(())
//! # }
//! ```

use lopdf::Document;
use std::ffi::OsString;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};
use tokio::task;

use crate::error::{PdfSpliceError, Result};
use crate::io::format_file_size;

/// Options for writing PDF files.
#[derive(Debug, Clone)]
pub struct WriteOptions {
    /// Use atomic writes (write to temp file, then rename).
    pub atomic: bool,

    /// Compress the PDF before writing.
    pub compress: bool,

    /// Drop unreachable objects and renumber before writing.
    pub optimize: bool,

    /// Buffer size for writing (in bytes).
    pub buffer_size: usize,
}

impl Default for WriteOptions {
    fn default() -> Self {
        Self {
            atomic: true,
            compress: true,
            optimize: true,
            buffer_size: 8192,
        }
    }
}

/// Statistics about a write operation.
#[derive(Debug, Clone)]
pub struct WriteStatistics {
    /// Time taken to write the file.
    pub write_time: Duration,

    /// Size of the written file in bytes.
    pub file_size: u64,

    /// Path where the file was written.
    pub output_path: PathBuf,

    /// Whether compression was applied.
    pub compressed: bool,
}

impl WriteStatistics {
    /// Format file size as human-readable string.
    pub fn format_file_size(&self) -> String {
        format_file_size(self.file_size)
    }
}

/// PDF writer with configurable behavior.
#[derive(Debug, Clone, Default)]
pub struct PdfWriter {
    options: WriteOptions,
}

impl PdfWriter {
    /// Create a new PDF writer with default options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a writer with custom options.
    pub fn with_options(options: WriteOptions) -> Self {
        Self { options }
    }

    /// Save a PDF document to a file, replacing any existing file.
    ///
    /// # Errors
    ///
    /// Returns [`PdfSpliceError::Write`] if the file cannot be created,
    /// written, or moved into place.
    pub async fn save(&self, doc: Document, path: &Path) -> Result<WriteStatistics> {
        let path_buf = path.to_path_buf();
        let options = self.options.clone();

        let stats = task::spawn_blocking(move || write_document(doc, path_buf, &options))
            .await
            .map_err(|e| PdfSpliceError::other(format!("Write task failed: {e}")))??;

        tracing::debug!(
            path = %stats.output_path.display(),
            size = %stats.format_file_size(),
            write_time = ?stats.write_time,
            "wrote document"
        );

        Ok(stats)
    }
}

fn write_document(
    mut doc: Document,
    path: PathBuf,
    options: &WriteOptions,
) -> Result<WriteStatistics> {
    let start = Instant::now();

    if options.optimize {
        doc.prune_objects();
        doc.renumber_objects();
    }

    if options.compress {
        doc.compress();
    }

    let write_path = if options.atomic {
        temp_path_for(&path)
    } else {
        path.clone()
    };

    let result = write_to(&mut doc, &write_path, options.buffer_size).and_then(|()| {
        if options.atomic {
            std::fs::rename(&write_path, &path).map_err(|e| PdfSpliceError::write(&path, e))
        } else {
            Ok(())
        }
    });

    if let Err(err) = result {
        if options.atomic {
            let _ = std::fs::remove_file(&write_path);
        }
        return Err(err);
    }

    let file_size = std::fs::metadata(&path).map(|m| m.len()).unwrap_or(0);

    Ok(WriteStatistics {
        write_time: start.elapsed(),
        file_size,
        output_path: path,
        compressed: options.compress,
    })
}

fn write_to(doc: &mut Document, path: &Path, buffer_size: usize) -> Result<()> {
    let file = std::fs::File::create(path).map_err(|e| PdfSpliceError::write(path, e))?;
    let mut writer = std::io::BufWriter::with_capacity(buffer_size, file);

    doc.save_to(&mut writer)
        .map_err(|e| PdfSpliceError::write(path, std::io::Error::other(e)))?;

    writer.flush().map_err(|e| PdfSpliceError::write(path, e))
}

/// `report.pdf` -> `report.pdf.tmp`, in the same directory.
fn temp_path_for(path: &Path) -> PathBuf {
    let mut name = path
        .file_name()
        .map(|n| n.to_os_string())
        .unwrap_or_else(|| OsString::from("output"));
    name.push(".tmp");
    path.with_file_name(name)
}
