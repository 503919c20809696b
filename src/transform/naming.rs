//! Output file names.
//!
//! Outputs land next to their source: `report.pdf` merges into
//! `report_merged.pdf` and splits into `report_1-3.pdf`, `report_4-6.pdf`
//! and so on. The range in a split name is the range as entered, before
//! clamping.

use std::ffi::{OsStr, OsString};
use std::path::{Path, PathBuf};

use crate::range::PageRange;

const DEFAULT_EXTENSION: &str = "pdf";

/// Output path for a merge whose first input is `first`.
pub fn merged_output_path(first: &Path) -> PathBuf {
    sibling_with_suffix(first, "merged")
}

/// Output path for the part of `source` covered by `range`.
pub fn split_output_path(source: &Path, range: &PageRange) -> PathBuf {
    sibling_with_suffix(source, &range.to_string())
}

fn sibling_with_suffix(source: &Path, suffix: &str) -> PathBuf {
    let stem = source.file_stem().unwrap_or_default();
    let extension = source
        .extension()
        .unwrap_or(OsStr::new(DEFAULT_EXTENSION));

    let mut name = OsString::from(stem);
    name.push("_");
    name.push(suffix);
    name.push(".");
    name.push(extension);

    source.with_file_name(name)
}
