//! Document transform engine: merging and splitting.
//!
//! Both operations read their sources whole, build brand-new output
//! documents, and never modify a source on disk.

pub mod naming;
pub mod pages;

mod merger;
mod splitter;

pub use merger::{MergeResult, MergeStatistics, Merger, merge_pdfs};
pub use splitter::{SplitOutput, SplitResult, SplitStatistics, Splitter, split_pdf};
