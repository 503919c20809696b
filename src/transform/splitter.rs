//! Splitting one document into several.
//!
//! Each range produces one output, in the order the ranges were given.
//! Ranges are clamped to the document: pages that do not exist are dropped,
//! and a range with no surviving pages still produces an (empty) output.
//! Ranges may overlap or come in any order.
//!
//! Outputs are written one after another. If writing one fails, the outputs
//! already written stay on disk and the remaining ranges are not attempted.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

use lopdf::ObjectId;

use crate::error::Result;
use crate::io::{LoadedPdf, PdfReader, PdfWriter};
use crate::range::PageRange;
use crate::transform::naming::split_output_path;
use crate::transform::pages::PageAssembler;

/// One written part of a split.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SplitOutput {
    /// The range as requested.
    pub range: PageRange,

    /// Where the part was written.
    pub output_path: PathBuf,

    /// Pages the part contains after clamping.
    pub page_count: u32,
}

/// Statistics about a split operation.
#[derive(Debug, Clone)]
pub struct SplitStatistics {
    /// Pages in the source document.
    pub source_pages: u32,

    /// Pages written across all parts.
    pub pages_written: u32,

    /// Total time taken for the split, excluding loading the source.
    pub split_time: Duration,
}

/// Result of a split operation.
#[derive(Debug, Clone)]
pub struct SplitResult {
    /// Written parts, in range order.
    pub outputs: Vec<SplitOutput>,

    /// Statistics about the split.
    pub statistics: SplitStatistics,
}

impl SplitResult {
    /// Output paths, in range order.
    pub fn paths(&self) -> Vec<PathBuf> {
        self.outputs
            .iter()
            .map(|output| output.output_path.clone())
            .collect()
    }
}

/// PDF splitter that cuts a document into ranges.
#[derive(Debug, Clone, Default)]
pub struct Splitter {
    reader: PdfReader,
    writer: PdfWriter,
}

impl Splitter {
    /// Create a new splitter with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a splitter that writes with `writer`.
    pub fn with_writer(writer: PdfWriter) -> Self {
        Self {
            reader: PdfReader::new(),
            writer,
        }
    }

    /// Load `path` and split it by `ranges`.
    ///
    /// # Errors
    ///
    /// - [`PdfSpliceError::Read`](crate::PdfSpliceError::Read) if the source
    ///   cannot be read
    /// - [`PdfSpliceError::Write`](crate::PdfSpliceError::Write) if an output
    ///   cannot be written
    pub async fn split(&self, path: &Path, ranges: &[PageRange]) -> Result<SplitResult> {
        let source = self.reader.load(path).await?;
        self.split_loaded(&source, ranges).await
    }

    /// Split an already loaded document by `ranges`.
    pub async fn split_loaded(
        &self,
        source: &LoadedPdf,
        ranges: &[PageRange],
    ) -> Result<SplitResult> {
        let split_start = Instant::now();
        let pages = source.document.get_pages();
        let mut outputs = Vec::with_capacity(ranges.len());

        for range in ranges {
            let page_ids = select_pages(&pages, range, source.page_count);
            if page_ids.is_empty() {
                tracing::warn!(
                    path = %source.path.display(),
                    %range,
                    page_count = source.page_count,
                    "range selects no pages"
                );
            }

            let mut assembler = PageAssembler::new(&source.document.version);
            assembler.append(&source.document, &page_ids)?;
            let document = assembler.finish();

            let output_path = split_output_path(&source.path, range);
            self.writer.save(document, &output_path).await?;

            tracing::debug!(
                output = %output_path.display(),
                %range,
                pages = page_ids.len(),
                "wrote part"
            );
            outputs.push(SplitOutput {
                range: *range,
                output_path,
                page_count: page_ids.len() as u32,
            });
        }

        let statistics = SplitStatistics {
            source_pages: source.page_count,
            pages_written: outputs.iter().map(|output| output.page_count).sum(),
            split_time: split_start.elapsed(),
        };

        tracing::info!(
            path = %source.path.display(),
            parts = outputs.len(),
            "split document"
        );

        Ok(SplitResult {
            outputs,
            statistics,
        })
    }
}

/// Object ids of the pages `range` covers, clamped, in ascending order.
fn select_pages(
    pages: &BTreeMap<u32, ObjectId>,
    range: &PageRange,
    page_count: u32,
) -> Vec<ObjectId> {
    range
        .pages(page_count)
        .filter_map(|number| pages.get(&number).copied())
        .collect()
}

/// Split `path` by `ranges` with default settings.
///
/// See [`Splitter::split`].
pub async fn split_pdf(path: &Path, ranges: &[PageRange]) -> Result<SplitResult> {
    Splitter::new().split(path, ranges).await
}
