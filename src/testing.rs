//! Synthetic documents and collaborator doubles shared by unit tests.

use futures::future::BoxFuture;
use lopdf::{Document, Object, ObjectId, Stream, dictionary};
use std::collections::VecDeque;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use crate::error::Result;
use crate::host::{FilePicker, Notifier, PickRequest};

/// Build a document of `pages` pages. Page `n` carries a `PageTag` string
/// `"{tag}-{n}"`; resources and media box are inherited from the page tree
/// root, as many producers write them.
pub(crate) fn sample_pdf(tag: &str, pages: u32) -> Document {
    let mut doc = Document::with_version("1.5");
    let pages_id = doc.new_object_id();

    let font_id = doc.add_object(dictionary! {
        "Type" => "Font",
        "Subtype" => "Type1",
        "BaseFont" => "Helvetica",
    });
    let resources_id = doc.add_object(dictionary! {
        "Font" => dictionary! { "F1" => font_id },
    });

    let mut kids: Vec<Object> = Vec::new();
    for n in 1..=pages {
        let label = format!("{tag}-{n}");
        let content = format!("BT /F1 24 Tf 72 720 Td ({label}) Tj ET");
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
            "MediaBox" => vec![0.into(), 0.into(), 612.into(), 792.into()],
        }),
    );

    let catalog_id = doc.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => pages_id,
    });
    doc.trailer.set("Root", catalog_id);

    doc
}

/// Give the first page a link annotation whose destination is the last page.
pub(crate) fn link_first_page_to_last(doc: &mut Document) {
    let pages: Vec<ObjectId> = doc.get_pages().into_values().collect();
    let (Some(&first), Some(&last)) = (pages.first(), pages.last()) else {
        return;
    };
    let annot_id = doc.add_object(dictionary! {
        "Type" => "Annot",
        "Subtype" => "Link",
        "Rect" => vec![0.into(), 0.into(), 100.into(), 20.into()],
        "Dest" => vec![Object::Reference(last), "Fit".into()],
    });
    doc.get_dictionary_mut(first)
        .unwrap()
        .set("Annots", vec![Object::Reference(annot_id)]);
}

/// Number of `/Type /Page` dictionaries in `doc`, reachable or not.
pub(crate) fn page_object_count(doc: &Document) -> usize {
    doc.objects
        .values()
        .filter(|obj| {
            obj.as_dict()
                .and_then(|d| d.get(b"Type"))
                .and_then(Object::as_name)
                .is_ok_and(|name| name == b"Page")
        })
        .count()
}

/// Save `doc` as `dir/name` and return the path.
pub(crate) fn write_pdf(dir: &Path, name: &str, doc: &mut Document) -> PathBuf {
    let path = dir.join(name);
    doc.save(&path).unwrap();
    path
}

/// Page tags of the document at `path`, in page order.
pub(crate) fn page_tags(path: &Path) -> Vec<String> {
    let doc = Document::load(path).unwrap();
    tags_of(&doc)
}

/// Page tags of an in-memory document, in page order.
pub(crate) fn tags_of(doc: &Document) -> Vec<String> {
    doc.get_pages()
        .values()
        .map(|&id| {
            let page = doc.get_dictionary(id).unwrap();
            let tag = page.get(b"PageTag").unwrap().as_str().unwrap();
            String::from_utf8_lossy(tag).into_owned()
        })
        .collect()
}

/// A notification captured by [`RecordingNotifier`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Notice {
    Info(String),
    Warning(String),
    Error(String),
    Progress(String, u8),
}

/// Notifier that keeps everything it is told.
#[derive(Debug, Clone, Default)]
pub(crate) struct RecordingNotifier {
    notices: Arc<Mutex<Vec<Notice>>>,
}

impl RecordingNotifier {
    pub(crate) fn notices(&self) -> Vec<Notice> {
        self.notices.lock().unwrap().clone()
    }

    pub(crate) fn infos(&self) -> Vec<String> {
        self.filter(|notice| match notice {
            Notice::Info(message) => Some(message.clone()),
            _ => None,
        })
    }

    pub(crate) fn warnings(&self) -> Vec<String> {
        self.filter(|notice| match notice {
            Notice::Warning(message) => Some(message.clone()),
            _ => None,
        })
    }

    pub(crate) fn errors(&self) -> Vec<String> {
        self.filter(|notice| match notice {
            Notice::Error(message) => Some(message.clone()),
            _ => None,
        })
    }

    fn filter(&self, pick: impl Fn(&Notice) -> Option<String>) -> Vec<String> {
        self.notices.lock().unwrap().iter().filter_map(pick).collect()
    }

    fn push(&self, notice: Notice) {
        self.notices.lock().unwrap().push(notice);
    }
}

impl Notifier for RecordingNotifier {
    fn info(&self, message: &str) {
        self.push(Notice::Info(message.to_string()));
    }

    fn warning(&self, message: &str) {
        self.push(Notice::Warning(message.to_string()));
    }

    fn error(&self, message: &str) {
        self.push(Notice::Error(message.to_string()));
    }

    fn progress(&self, title: &str, increment: u8) {
        self.push(Notice::Progress(title.to_string(), increment));
    }
}

/// Picker that replays canned answers; an exhausted script answers as if
/// the user dismissed the dialog.
#[derive(Debug, Default)]
pub(crate) struct ScriptedPicker {
    files: Mutex<VecDeque<Vec<PathBuf>>>,
    choices: Mutex<VecDeque<Option<usize>>>,
    ranges: Mutex<VecDeque<Option<String>>>,
    prompts: Arc<Mutex<Vec<String>>>,
}

impl ScriptedPicker {
    pub(crate) fn with_files(self, files: Vec<PathBuf>) -> Self {
        self.files.lock().unwrap().push_back(files);
        self
    }

    pub(crate) fn with_choice(self, choice: Option<usize>) -> Self {
        self.choices.lock().unwrap().push_back(choice);
        self
    }

    pub(crate) fn with_ranges(self, ranges: Option<String>) -> Self {
        self.ranges.lock().unwrap().push_back(ranges);
        self
    }

    /// Range prompts shown so far.
    pub(crate) fn prompts(&self) -> Arc<Mutex<Vec<String>>> {
        self.prompts.clone()
    }
}

impl FilePicker for ScriptedPicker {
    fn pick_files<'a>(&'a self, _request: &'a PickRequest) -> BoxFuture<'a, Result<Vec<PathBuf>>> {
        let files = self.files.lock().unwrap().pop_front().unwrap_or_default();
        Box::pin(async move { Ok(files) })
    }

    fn pick_one<'a>(
        &'a self,
        _placeholder: &'a str,
        _choices: &'a [String],
    ) -> BoxFuture<'a, Result<Option<usize>>> {
        let choice = self.choices.lock().unwrap().pop_front().flatten();
        Box::pin(async move { Ok(choice) })
    }

    fn input_ranges<'a>(
        &'a self,
        prompt: &'a str,
        _page_count: u32,
    ) -> BoxFuture<'a, Result<Option<String>>> {
        self.prompts.lock().unwrap().push(prompt.to_string());
        let answer = self.ranges.lock().unwrap().pop_front().flatten();
        Box::pin(async move { Ok(answer) })
    }
}
