//! Merging several documents into one.
//!
//! Inputs are read in list order and every page of every input is appended,
//! in order, to a new document. The result is written next to the first
//! input as `<stem>_merged.<ext>`. Nothing is written unless every input
//! could be read.

use std::path::PathBuf;
use std::time::{Duration, Instant};

use lopdf::ObjectId;

use crate::error::{PdfSpliceError, Result};
use crate::io::{LoadedPdf, PdfReader, PdfWriter, format_file_size};
use crate::transform::naming::merged_output_path;
use crate::transform::pages::PageAssembler;

/// Statistics about a merge operation.
#[derive(Debug, Clone)]
pub struct MergeStatistics {
    /// Number of input documents merged, counting repeats.
    pub files_merged: usize,

    /// Total number of pages in merged document.
    pub total_pages: usize,

    /// Total time taken for merge.
    pub merge_time: Duration,

    /// Time taken to load all PDFs.
    pub load_time: Duration,

    /// Total size of input files.
    pub input_size: u64,

    /// Size of the written output.
    pub output_size: u64,
}

impl MergeStatistics {
    /// Format input size as human-readable string.
    pub fn format_input_size(&self) -> String {
        format_file_size(self.input_size)
    }
}

/// Result of a merge operation.
#[derive(Debug, Clone)]
pub struct MergeResult {
    /// Where the merged document was written.
    pub output_path: PathBuf,

    /// Statistics about the merge.
    pub statistics: MergeStatistics,
}

/// PDF merger that combines multiple documents.
#[derive(Debug, Clone, Default)]
pub struct Merger {
    reader: PdfReader,
    writer: PdfWriter,
}

impl Merger {
    /// Create a new merger with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a merger that writes with `writer`.
    pub fn with_writer(writer: PdfWriter) -> Self {
        Self {
            reader: PdfReader::new(),
            writer,
        }
    }

    /// Merge `paths`, in order, into `<dir>/<stem>_merged.<ext>` of the
    /// first path.
    ///
    /// A path listed twice is read twice and contributes its pages twice.
    ///
    /// # Errors
    ///
    /// - [`PdfSpliceError::NoFilesToMerge`] if `paths` is empty
    /// - [`PdfSpliceError::Read`] if any input cannot be read; no output is
    ///   written in that case
    /// - [`PdfSpliceError::Write`] if the output cannot be written
    pub async fn merge(&self, paths: &[PathBuf]) -> Result<MergeResult> {
        let first = paths.first().ok_or(PdfSpliceError::NoFilesToMerge)?;
        let merge_start = Instant::now();

        let load_start = Instant::now();
        let loaded = self.reader.load_sequential(paths).await?;
        let load_time = load_start.elapsed();

        let input_size: u64 = loaded.iter().map(|pdf| pdf.file_size).sum();
        let files_merged = loaded.len();

        let (document, total_pages) = merge_documents(loaded)?;

        let output_path = merged_output_path(first);
        let written = self.writer.save(document, &output_path).await?;

        let statistics = MergeStatistics {
            files_merged,
            total_pages,
            merge_time: merge_start.elapsed(),
            load_time,
            input_size,
            output_size: written.file_size,
        };

        tracing::info!(
            output = %output_path.display(),
            files = files_merged,
            pages = total_pages,
            "merged documents"
        );

        Ok(MergeResult {
            output_path,
            statistics,
        })
    }
}

/// Concatenate the pages of `loaded`, in order, into a new document.
fn merge_documents(loaded: Vec<LoadedPdf>) -> Result<(lopdf::Document, usize)> {
    let version = loaded
        .iter()
        .map(|pdf| pdf.document.version.as_str())
        .max()
        .unwrap_or("1.5")
        .to_string();

    let mut assembler = PageAssembler::new(&version);

    for mut pdf in loaded {
        // Move this source's ids past everything appended so far.
        pdf.document.renumber_objects_with(assembler.next_id());

        let page_ids: Vec<ObjectId> = pdf.document.get_pages().into_values().collect();
        tracing::debug!(
            path = %pdf.path.display(),
            pages = page_ids.len(),
            "appending document"
        );
        assembler.append(&pdf.document, &page_ids)?;
    }

    let total_pages = assembler.page_count();
    Ok((assembler.finish(), total_pages))
}

/// Merge `paths` with default settings.
///
/// See [`Merger::merge`].
pub async fn merge_pdfs(paths: &[PathBuf]) -> Result<MergeResult> {
    Merger::new().merge(paths).await
}
