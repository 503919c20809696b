//! Reading source documents and writing outputs.

mod reader;
mod writer;

pub use reader::{LoadedPdf, PdfReader, SizeWarning, format_file_size};
pub use writer::{PdfWriter, WriteOptions, WriteStatistics};
