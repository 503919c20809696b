//! Capabilities the surrounding editor (or terminal) lends to the host.

use futures::future::BoxFuture;
use std::path::PathBuf;

use crate::error::Result;

/// What to ask the user for when picking files.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PickRequest {
    /// Dialog title, e.g. `Select PDFs to Merge`.
    pub title: String,
    /// Whether more than one file may be chosen.
    pub many: bool,
}

impl PickRequest {
    /// Ask for any number of files.
    pub fn many(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            many: true,
        }
    }

    /// Ask for a single file.
    pub fn one(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            many: false,
        }
    }
}

/// Interactive choices: picking files, choosing from a list, typing ranges.
///
/// Every method resolves to an empty or `None` answer when the user backs
/// out, which the host treats as a quiet cancellation.
pub trait FilePicker: Send + Sync {
    /// Let the user choose PDF files. Paths are absolute.
    fn pick_files<'a>(&'a self, request: &'a PickRequest) -> BoxFuture<'a, Result<Vec<PathBuf>>>;

    /// Let the user choose one of `choices`; resolves to its index.
    fn pick_one<'a>(
        &'a self,
        placeholder: &'a str,
        choices: &'a [String],
    ) -> BoxFuture<'a, Result<Option<usize>>>;

    /// Ask for page-range text for a document of `page_count` pages.
    ///
    /// Implementations should re-ask while
    /// [`validation_message`](crate::range::validation_message) reports a
    /// problem; the host validates the answer again either way.
    fn input_ranges<'a>(
        &'a self,
        prompt: &'a str,
        page_count: u32,
    ) -> BoxFuture<'a, Result<Option<String>>>;
}

/// Where user-facing messages go.
pub trait Notifier: Send + Sync {
    /// Informational message.
    fn info(&self, message: &str);

    /// Warning that does not stop the operation.
    fn warning(&self, message: &str);

    /// Failure of the operation.
    fn error(&self, message: &str);

    /// Progress of a long operation, `increment` in percent.
    fn progress(&self, title: &str, increment: u8);
}
