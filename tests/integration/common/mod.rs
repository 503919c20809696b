//! Shared helpers for the integration tests.
//!
//! Documents are synthesized with `lopdf` instead of read from fixtures.
//! Page `n` of a sample document carries a `PageTag` string `"{tag}-{n}"`
//! so tests can tell which source page ended up where.

#![allow(dead_code)]

use futures::future::BoxFuture;
use lopdf::{Document, Object, Stream, dictionary};
use pdfsplice::Result;
use pdfsplice::host::{FilePicker, Notifier, PickRequest};
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

/// Write a `pages`-page sample document to `dir/name`.
///
/// Resources and media box live on the page tree root and are inherited by
/// the pages.
pub fn sample_pdf(dir: &Path, name: &str, tag: &str, pages: u32) -> PathBuf {
    let mut doc = Document::with_version("1.5");
    let pages_id = doc.new_object_id();

    let font_id = doc.add_object(dictionary! {
        "Type" => "Font",
        "Subtype" => "Type1",
        "BaseFont" => "Courier",
    });
    let resources_id = doc.add_object(dictionary! {
        "Font" => dictionary! { "F1" => font_id },
    });

    let mut kids: Vec<Object> = Vec::new();
    for n in 1..=pages {
        let label = format!("{tag}-{n}");
        let content = format!("BT /F1 18 Tf 72 720 Td ({label}) Tj ET");
        let content_id = doc.add_object(Stream::new(dictionary! {}, content.into_bytes()));
        let page_id = doc.add_object(dictionary! {
            "Type" => "Page",
            "Parent" => pages_id,
            "Contents" => content_id,
            "PageTag" => Object::string_literal(label),
        });
        kids.push(page_id.into());
    }

    doc.objects.insert(
        pages_id,
        Object::Dictionary(dictionary! {
            "Type" => "Pages",
            "Kids" => kids,
            "Count" => i64::from(pages),
            "Resources" => resources_id,
            "MediaBox" => vec![0.into(), 0.into(), 595.into(), 842.into()],
        }),
    );

    let catalog_id = doc.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => pages_id,
    });
    doc.trailer.set("Root", catalog_id);

    let path = dir.join(name);
    doc.save(&path).expect("Failed to write sample PDF");
    path
}

/// Page tags of the document at `path`, in page order.
pub fn page_tags(path: &Path) -> Vec<String> {
    let doc = Document::load(path).expect("Failed to load output PDF");
    doc.get_pages()
        .values()
        .map(|&id| {
            let page = doc.get_dictionary(id).unwrap();
            let tag = page.get(b"PageTag").unwrap().as_str().unwrap();
            String::from_utf8_lossy(tag).into_owned()
        })
        .collect()
}

/// Expected tags for pages `pages` of a sample tagged `tag`.
pub fn tags(tag: &str, pages: impl IntoIterator<Item = u32>) -> Vec<String> {
    pages.into_iter().map(|n| format!("{tag}-{n}")).collect()
}

/// Notifier that records what it was told.
#[derive(Debug, Clone, Default)]
pub struct RecordingNotifier {
    infos: Arc<Mutex<Vec<String>>>,
    warnings: Arc<Mutex<Vec<String>>>,
    errors: Arc<Mutex<Vec<String>>>,
    progress: Arc<Mutex<Vec<(String, u8)>>>,
}

impl RecordingNotifier {
    pub fn infos(&self) -> Vec<String> {
        self.infos.lock().unwrap().clone()
    }

    pub fn warnings(&self) -> Vec<String> {
        self.warnings.lock().unwrap().clone()
    }

    pub fn errors(&self) -> Vec<String> {
        self.errors.lock().unwrap().clone()
    }

    pub fn progress(&self) -> Vec<(String, u8)> {
        self.progress.lock().unwrap().clone()
    }
}

impl Notifier for RecordingNotifier {
    fn info(&self, message: &str) {
        self.infos.lock().unwrap().push(message.to_string());
    }

    fn warning(&self, message: &str) {
        self.warnings.lock().unwrap().push(message.to_string());
    }

    fn error(&self, message: &str) {
        self.errors.lock().unwrap().push(message.to_string());
    }

    fn progress(&self, title: &str, increment: u8) {
        self.progress
            .lock()
            .unwrap()
            .push((title.to_string(), increment));
    }
}

/// Picker for flows that never ask: every question is dismissed.
#[derive(Debug, Default)]
pub struct DismissingPicker;

impl FilePicker for DismissingPicker {
    fn pick_files<'a>(&'a self, _request: &'a PickRequest) -> BoxFuture<'a, Result<Vec<PathBuf>>> {
        Box::pin(async { Ok(Vec::new()) })
    }

    fn pick_one<'a>(
        &'a self,
        _placeholder: &'a str,
        _choices: &'a [String],
    ) -> BoxFuture<'a, Result<Option<usize>>> {
        Box::pin(async { Ok(None) })
    }

    fn input_ranges<'a>(
        &'a self,
        _prompt: &'a str,
        _page_count: u32,
    ) -> BoxFuture<'a, Result<Option<String>>> {
        Box::pin(async { Ok(None) })
    }
}
