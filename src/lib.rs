//! pdfsplice - Merge and split PDF documents.
//!
//! This library provides the engine behind the `pdfsplice` tool:
//!
//! - Merging documents page by page into a new document
//! - Splitting a document by user-entered page ranges
//! - A page-range grammar with user-facing validation messages
//! - A page-at-a-time preview state machine with render coalescing
//! - A host that dispatches commands and panel messages to the engine
//! - Terminal collaborators and a command-line interface for the host
//!
//! # Examples
//!
//! ## Merge
//!
//! ```no_run
//! use pdfsplice::transform::merge_pdfs;
//! use std::path::PathBuf;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let result = merge_pdfs(&[PathBuf::from("a.pdf"), PathBuf::from("b.pdf")]).await?;
//! println!("Wrote {}", result.output_path.display()); // a_merged.pdf
//! # Ok(())
//! # }
//! ```
//!
//! ## Split
//!
//! ```no_run
//! use pdfsplice::range::parse_ranges;
//! use pdfsplice::transform::split_pdf;
//! use std::path::Path;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let ranges = parse_ranges("1-3, 4-6")?;
//! let result = split_pdf(Path::new("book.pdf"), &ranges).await?;
//! for path in result.paths() {
//!     println!("{}", path.display()); // book_1-3.pdf, book_4-6.pdf
//! }
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod cli;
pub mod config;
pub mod error;
pub mod host;
pub mod io;
pub mod output;
pub mod preview;
pub mod range;
pub mod store;
pub mod terminal;
pub mod transform;
pub mod utils;

#[cfg(test)]
mod testing;

// Re-export commonly used types
pub use config::Config;
pub use error::{PdfSpliceError, Result};

/// Library version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Library name.
pub const NAME: &str = env!("CARGO_PKG_NAME");
