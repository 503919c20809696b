//! Integration tests for merging documents.

use lopdf::Document;
use pdfsplice::PdfSpliceError;
use pdfsplice::transform::merge_pdfs;
use std::path::PathBuf;
use tempfile::TempDir;

use crate::common::{page_tags, sample_pdf, tags};

#[tokio::test]
async fn test_merge_concatenates_in_order() {
    let dir = TempDir::new().unwrap();
    let a = sample_pdf(dir.path(), "a.pdf", "a", 2);
    let b = sample_pdf(dir.path(), "b.pdf", "b", 3);

    let result = merge_pdfs(&[a.clone(), b]).await.unwrap();

    assert_eq!(result.output_path, dir.path().join("a_merged.pdf"));
    assert_eq!(result.statistics.files_merged, 2);
    assert_eq!(result.statistics.total_pages, 5);

    let mut expected = tags("a", 1..=2);
    expected.extend(tags("b", 1..=3));
    assert_eq!(page_tags(&result.output_path), expected);

    // Sources are never modified.
    assert_eq!(page_tags(&a), tags("a", 1..=2));
}

#[tokio::test]
async fn test_merge_keeps_inherited_page_attributes() {
    let dir = TempDir::new().unwrap();
    let a = sample_pdf(dir.path(), "a.pdf", "a", 1);
    let b = sample_pdf(dir.path(), "b.pdf", "b", 1);

    let result = merge_pdfs(&[a, b]).await.unwrap();

    let doc = Document::load(&result.output_path).unwrap();
    for page_id in doc.get_pages().into_values() {
        let page = doc.get_dictionary(page_id).unwrap();
        let media_box = page.get(b"MediaBox").and_then(|obj| obj.as_array()).unwrap();
        assert_eq!(media_box.len(), 4);
        assert!(page.has(b"Resources"));
    }
}

#[tokio::test]
async fn test_merge_same_file_twice() {
    let dir = TempDir::new().unwrap();
    let a = sample_pdf(dir.path(), "a.pdf", "a", 2);

    let result = merge_pdfs(&[a.clone(), a]).await.unwrap();

    let mut expected = tags("a", 1..=2);
    expected.extend(tags("a", 1..=2));
    assert_eq!(page_tags(&result.output_path), expected);
}

#[tokio::test]
async fn test_merge_output_replaces_previous_output() {
    let dir = TempDir::new().unwrap();
    let a = sample_pdf(dir.path(), "a.pdf", "a", 1);
    let b = sample_pdf(dir.path(), "b.pdf", "b", 1);
    let c = sample_pdf(dir.path(), "c.pdf", "c", 1);

    merge_pdfs(&[a.clone(), b]).await.unwrap();
    let result = merge_pdfs(&[a, c]).await.unwrap();

    assert_eq!(page_tags(&result.output_path), vec!["a-1", "c-1"]);
}

#[tokio::test]
async fn test_merge_empty_list() {
    let err = merge_pdfs(&[]).await.unwrap_err();
    assert!(matches!(err, PdfSpliceError::NoFilesToMerge));
}

#[tokio::test]
async fn test_merge_unreadable_input_writes_nothing() {
    let dir = TempDir::new().unwrap();
    let a = sample_pdf(dir.path(), "a.pdf", "a", 1);
    let broken = dir.path().join("broken.pdf");
    std::fs::write(&broken, b"not a pdf").unwrap();

    let err = merge_pdfs(&[a, broken.clone()]).await.unwrap_err();

    match err {
        PdfSpliceError::Read { path, .. } => assert_eq!(path, broken),
        other => panic!("expected read error, got {other:?}"),
    }
    assert!(!dir.path().join("a_merged.pdf").exists());
}

#[tokio::test]
async fn test_merge_missing_input() {
    let dir = TempDir::new().unwrap();
    let a = sample_pdf(dir.path(), "a.pdf", "a", 1);

    let err = merge_pdfs(&[a, PathBuf::from("/nonexistent/file.pdf")])
        .await
        .unwrap_err();
    assert!(matches!(err, PdfSpliceError::Read { .. }));
    assert_eq!(err.exit_code(), 3);
}
