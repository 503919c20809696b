//! Integration tests for splitting documents by page ranges.

use pdfsplice::PdfSpliceError;
use pdfsplice::range::{PageRange, parse_ranges, validate_ranges, validation_message};
use pdfsplice::transform::split_pdf;
use rstest::rstest;
use tempfile::TempDir;

use crate::common::{page_tags, sample_pdf, tags};

#[tokio::test]
async fn test_split_writes_one_file_per_range() {
    let dir = TempDir::new().unwrap();
    let book = sample_pdf(dir.path(), "book.pdf", "book", 10);
    let ranges = validate_ranges("1-3, 4-6, 7-10", Some(10)).unwrap();

    let result = split_pdf(&book, &ranges).await.unwrap();

    assert_eq!(
        result.paths(),
        vec![
            dir.path().join("book_1-3.pdf"),
            dir.path().join("book_4-6.pdf"),
            dir.path().join("book_7-10.pdf"),
        ]
    );
    assert_eq!(page_tags(&result.outputs[0].output_path), tags("book", 1..=3));
    assert_eq!(page_tags(&result.outputs[1].output_path), tags("book", 4..=6));
    assert_eq!(page_tags(&result.outputs[2].output_path), tags("book", 7..=10));
    assert_eq!(result.statistics.pages_written, 10);

    // The source is left alone.
    assert_eq!(page_tags(&book).len(), 10);
}

#[tokio::test]
async fn test_split_overlapping_ranges_in_given_order() {
    let dir = TempDir::new().unwrap();
    let doc = sample_pdf(dir.path(), "doc.pdf", "doc", 5);
    let ranges = parse_ranges("4-5, 1-4, 2-2").unwrap();

    let result = split_pdf(&doc, &ranges).await.unwrap();

    let counts: Vec<u32> = result.outputs.iter().map(|output| output.page_count).collect();
    assert_eq!(counts, vec![2, 4, 1]);
    assert_eq!(page_tags(&result.outputs[2].output_path), vec!["doc-2"]);
}

#[tokio::test]
async fn test_split_range_past_end_is_clamped() {
    let dir = TempDir::new().unwrap();
    let doc = sample_pdf(dir.path(), "doc.pdf", "doc", 5);

    let result = split_pdf(&doc, &[PageRange::new(4, 10)]).await.unwrap();

    // The name keeps the requested range.
    assert_eq!(result.outputs[0].output_path, dir.path().join("doc_4-10.pdf"));
    assert_eq!(page_tags(&result.outputs[0].output_path), tags("doc", 4..=5));
}

#[tokio::test]
async fn test_split_missing_source() {
    let dir = TempDir::new().unwrap();
    let err = split_pdf(&dir.path().join("gone.pdf"), &[PageRange::new(1, 1)])
        .await
        .unwrap_err();
    assert!(matches!(err, PdfSpliceError::Read { .. }));
}

#[rstest]
#[case("1-3, 4-6", None)]
#[case("1-3,4-6", None)]
#[case("5", Some("Please use the format \"1-3, 4-6, 7-10\""))]
#[case("1-3;4-6", Some("Please use the format \"1-3, 4-6, 7-10\""))]
#[case("", Some("Please use the format \"1-3, 4-6, 7-10\""))]
#[case("3-1", Some("Invalid range: 3-1. Start page must be less than or equal to end page"))]
#[case("0-2", Some("Page range 0-2 is invalid. PDF has pages 1-10"))]
#[case("8-11", Some("Page range 8-11 is invalid. PDF has pages 1-10"))]
fn test_validation_messages(#[case] input: &str, #[case] expected: Option<&str>) {
    assert_eq!(validation_message(input, Some(10)).as_deref(), expected);
}
