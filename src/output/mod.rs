//! Output formatting and display for pdfsplice.
//!
//! All user-facing terminal output goes through [`OutputFormatter`], which
//! honours quiet and verbose modes and doubles as the command-line
//! [`Notifier`](crate::host::Notifier).

pub mod formatter;

pub use formatter::{MessageLevel, OutputFormatter};

use crate::transform::{MergeResult, SplitResult};

/// Show the details of a finished merge in verbose mode.
pub fn display_merge_details(formatter: &OutputFormatter, result: &MergeResult) {
    let stats = &result.statistics;
    formatter.detail("Output", &result.output_path.display().to_string());
    formatter.detail("Files merged", &stats.files_merged.to_string());
    formatter.detail("Pages", &stats.total_pages.to_string());
    formatter.detail("Input size", &stats.format_input_size());
    formatter.detail(
        "Time",
        &format!(
            "{:.2}s (loading {:.2}s)",
            stats.merge_time.as_secs_f64(),
            stats.load_time.as_secs_f64()
        ),
    );
}

/// List the parts of a finished split.
pub fn display_split_outputs(formatter: &OutputFormatter, result: &SplitResult) {
    for (index, output) in result.outputs.iter().enumerate() {
        formatter.list_item(
            index + 1,
            &format!(
                "{} ({} page(s))",
                output.output_path.display(),
                output.page_count
            ),
        );
    }
    formatter.detail(
        "Time",
        &format!("{:.2}s", result.statistics.split_time.as_secs_f64()),
    );
}
