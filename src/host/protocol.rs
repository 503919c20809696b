//! Messages the panel sends to the host.
//!
//! ```json
//! {"command": "merge", "pdfPaths": ["/docs/a.pdf", "/docs/b.pdf"]}
//! {"command": "split", "pdfPath": "/docs/a.pdf", "pageRanges": [{"start": 1, "end": 3}]}
//! ```

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::error::{PdfSpliceError, Result};
use crate::range::PageRange;

/// A typed panel message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "command", rename_all = "camelCase")]
pub enum PanelCommand {
    /// Merge the listed documents in order.
    #[serde(rename_all = "camelCase")]
    Merge {
        /// Documents to merge.
        pdf_paths: Vec<PathBuf>,
    },

    /// Split one document by ranges.
    #[serde(rename_all = "camelCase")]
    Split {
        /// Document to split.
        pdf_path: PathBuf,
        /// Ranges, one output each.
        page_ranges: Vec<PageRange>,
    },
}

impl PanelCommand {
    /// Decode a raw panel message.
    ///
    /// # Errors
    ///
    /// Returns [`PdfSpliceError::Protocol`] for malformed JSON, unknown
    /// commands, or missing fields.
    pub fn parse(raw: &str) -> Result<Self> {
        serde_json::from_str(raw).map_err(|e| PdfSpliceError::protocol(e.to_string()))
    }
}
