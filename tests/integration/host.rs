//! Integration tests for the host: panel messages and tracked files.

use pdfsplice::Config;
use pdfsplice::PdfSpliceError;
use pdfsplice::host::{CommandOutcome, Host};
use pdfsplice::store::{FileStore, JsonFileStore, MemoryStore, TrackedFiles};
use tempfile::TempDir;

use crate::common::{DismissingPicker, RecordingNotifier, page_tags, sample_pdf, tags};

type TestHost = Host<TrackedFiles<MemoryStore>, DismissingPicker, RecordingNotifier>;

fn host(notifier: &RecordingNotifier) -> TestHost {
    Host::new(
        TrackedFiles::new(MemoryStore::new()),
        DismissingPicker,
        notifier.clone(),
        &Config::default(),
    )
}

#[tokio::test]
async fn test_panel_split_message() {
    let dir = TempDir::new().unwrap();
    let doc = sample_pdf(dir.path(), "doc.pdf", "doc", 6);
    let notifier = RecordingNotifier::default();
    let mut host = host(&notifier);

    let message = serde_json::json!({
        "command": "split",
        "pdfPath": doc,
        "pageRanges": [{"start": 1, "end": 2}, {"start": 5, "end": 9}],
    })
    .to_string();
    let outcome = host.handle_message(&message).await;

    let CommandOutcome::Split(result) = outcome else {
        panic!("expected split, got {outcome:?}");
    };
    assert_eq!(page_tags(&result.outputs[0].output_path), tags("doc", 1..=2));
    assert_eq!(page_tags(&result.outputs[1].output_path), tags("doc", 5..=6));

    // Outputs join the workspace.
    assert_eq!(host.files().list(), result.paths().as_slice());
    assert_eq!(
        notifier.infos(),
        vec!["PDF split successfully into 2 files!".to_string()]
    );
    assert_eq!(
        notifier.progress(),
        vec![
            ("Splitting PDF".to_string(), 0),
            ("Splitting PDF".to_string(), 100)
        ]
    );
}

#[tokio::test]
async fn test_panel_split_backwards_range_is_rejected() {
    let dir = TempDir::new().unwrap();
    let doc = sample_pdf(dir.path(), "doc.pdf", "doc", 6);
    let notifier = RecordingNotifier::default();
    let mut host = host(&notifier);

    let message = serde_json::json!({
        "command": "split",
        "pdfPath": doc,
        "pageRanges": [{"start": 4, "end": 2}],
    })
    .to_string();
    let outcome = host.handle_message(&message).await;

    assert!(matches!(
        outcome.error(),
        Some(PdfSpliceError::RangeOrder { .. })
    ));
    assert!(!dir.path().join("doc_4-2.pdf").exists());
    assert_eq!(notifier.errors().len(), 1);
    assert!(notifier.errors()[0].starts_with("Error splitting PDF: "));
}

#[tokio::test]
async fn test_panel_merge_message() {
    let dir = TempDir::new().unwrap();
    let a = sample_pdf(dir.path(), "a.pdf", "a", 1);
    let b = sample_pdf(dir.path(), "b.pdf", "b", 2);
    let notifier = RecordingNotifier::default();
    let mut host = host(&notifier);

    let message = serde_json::json!({"command": "merge", "pdfPaths": [b, a]}).to_string();
    let outcome = host.handle_message(&message).await;

    let CommandOutcome::Merged(result) = outcome else {
        panic!("expected merge, got {outcome:?}");
    };
    assert_eq!(result.output_path, dir.path().join("b_merged.pdf"));
    assert_eq!(page_tags(&result.output_path), vec!["b-1", "b-2", "a-1"]);
    assert_eq!(
        notifier.infos(),
        vec!["PDFs merged successfully! Output saved to: b_merged.pdf".to_string()]
    );
    assert!(host.files().list().is_empty());
}

#[tokio::test]
async fn test_panel_merge_needs_two_files() {
    let dir = TempDir::new().unwrap();
    let a = sample_pdf(dir.path(), "a.pdf", "a", 1);
    let notifier = RecordingNotifier::default();
    let mut host = host(&notifier);

    let message = serde_json::json!({"command": "merge", "pdfPaths": [a]}).to_string();
    let outcome = host.handle_message(&message).await;

    assert!(matches!(outcome, CommandOutcome::Cancelled));
    assert_eq!(
        notifier.infos(),
        vec!["Please select at least two PDF files to merge.".to_string()]
    );
    assert!(!dir.path().join("a_merged.pdf").exists());
}

#[tokio::test]
async fn test_unknown_panel_message() {
    let notifier = RecordingNotifier::default();
    let mut host = host(&notifier);

    let outcome = host.handle_message(r#"{"command":"rotate"}"#).await;

    assert!(matches!(
        outcome.error(),
        Some(PdfSpliceError::Protocol { .. })
    ));
    assert_eq!(notifier.errors().len(), 1);
}

#[tokio::test]
async fn test_merge_failure_is_reported_once() {
    let dir = TempDir::new().unwrap();
    let a = sample_pdf(dir.path(), "a.pdf", "a", 1);
    let notifier = RecordingNotifier::default();
    let mut host = host(&notifier);

    let outcome = host
        .merge_paths(vec![a, dir.path().join("missing.pdf")])
        .await;

    assert!(matches!(outcome.error(), Some(PdfSpliceError::Read { .. })));
    assert_eq!(notifier.errors().len(), 1);
    assert!(notifier.errors()[0].starts_with("Error merging PDFs: "));
    assert!(!dir.path().join("a_merged.pdf").exists());
}

#[tokio::test]
async fn test_tracked_files_survive_a_restart() {
    let dir = TempDir::new().unwrap();
    let state = dir.path().join(".pdfsplice").join("state.json");
    let a = sample_pdf(dir.path(), "a.pdf", "a", 1);
    let b = sample_pdf(dir.path(), "b.pdf", "b", 1);

    {
        let mut files = TrackedFiles::new(JsonFileStore::open(&state).unwrap());
        files.load().unwrap();
        let mut host = Host::new(
            files,
            DismissingPicker,
            RecordingNotifier::default(),
            &Config::default(),
        );
        host.add_paths(vec![a.clone(), b.clone(), a.clone()]);
    }

    std::fs::remove_file(&b).unwrap();

    let mut files = TrackedFiles::new(JsonFileStore::open(&state).unwrap());
    files.load().unwrap();
    assert_eq!(files.list(), [a].as_slice());
}
