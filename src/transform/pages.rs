//! Building new documents out of pages of existing ones.
//!
//! A [`PageAssembler`] starts from an empty document and pulls in only the
//! selected pages plus whatever they reference. Attributes a page inherits
//! from its ancestors in the page tree are copied onto the page itself, so
//! nothing from the source tree above the page is needed afterwards.

use lopdf::{Dictionary, Document, Object, ObjectId, dictionary};
use std::collections::BTreeSet;

use crate::error::{PdfSpliceError, Result};
use crate::utils::{copy_references, detach_references};

/// Page attributes that may be inherited from an ancestor `Pages` node.
const INHERITABLE: [&[u8]; 4] = [b"Resources", b"MediaBox", b"CropBox", b"Rotate"];

/// Collects pages from one or more source documents into a new document.
///
/// Object ids are copied unchanged, so pages appended from different
/// sources must not share ids. Callers merging several documents renumber
/// each source past the ids already used (see [`PageAssembler::next_id`]).
#[derive(Debug)]
pub struct PageAssembler {
    document: Document,
    kids: Vec<ObjectId>,
}

impl PageAssembler {
    /// Start an empty document with the given PDF version.
    pub fn new(version: &str) -> Self {
        Self {
            document: Document::with_version(version),
            kids: Vec::new(),
        }
    }

    /// First object id not yet used by anything appended so far.
    pub fn next_id(&self) -> u32 {
        self.document.max_id + 1
    }

    /// Number of pages appended so far.
    pub fn page_count(&self) -> usize {
        self.kids.len()
    }

    /// Append the pages `page_ids` of `source`, in the order given.
    ///
    /// # Errors
    ///
    /// Returns an error if an id does not name a page dictionary in
    /// `source`.
    pub fn append(&mut self, source: &Document, page_ids: &[ObjectId]) -> Result<()> {
        let left_behind = unselected_tree_nodes(source, page_ids);

        for &page_id in page_ids {
            let mut page = source.get_dictionary(page_id).cloned().map_err(|e| {
                PdfSpliceError::other(format!("Page object {page_id:?} is unusable: {e}"))
            })?;

            for key in INHERITABLE {
                if !page.has(key)
                    && let Some(value) = inherited_attribute(source, &page, key)
                {
                    page.set(key, value);
                }
            }
            page.remove(b"Parent");

            // Register the page before walking it, so annotations pointing
            // back at it resolve to this copy.
            let page = Object::Dictionary(page);
            self.document.objects.insert(page_id, page.clone());
            copy_references(&mut self.document, source, &page, &left_behind);
            self.kids.push(page_id);
        }

        // Links to pages that were not copied point nowhere in the output.
        for object in self.document.objects.values_mut() {
            detach_references(object, &left_behind);
        }

        self.document.max_id = self.document.max_id.max(source.max_id);
        Ok(())
    }

    /// Close the page tree and return the finished document.
    pub fn finish(mut self) -> Document {
        let pages_id = self.document.new_object_id();
        let catalog_id = self.document.new_object_id();

        for kid in &self.kids {
            if let Ok(page) = self.document.get_dictionary_mut(*kid) {
                page.set("Parent", pages_id);
            }
        }

        let kids: Vec<Object> = self.kids.iter().map(|&id| Object::Reference(id)).collect();
        let count = kids.len() as i64;
        self.document.objects.insert(
            pages_id,
            Object::Dictionary(dictionary! {
                "Type" => "Pages",
                "Kids" => kids,
                "Count" => count,
            }),
        );
        self.document.objects.insert(
            catalog_id,
            Object::Dictionary(dictionary! {
                "Type" => "Catalog",
                "Pages" => pages_id,
            }),
        );
        self.document.trailer.set("Root", catalog_id);

        self.document.renumber_objects();
        self.document
    }
}

/// Page tree nodes of `source` that must not be copied: every `Pages` node
/// and every page outside `selected`.
fn unselected_tree_nodes(source: &Document, selected: &[ObjectId]) -> BTreeSet<ObjectId> {
    let selected: BTreeSet<ObjectId> = selected.iter().copied().collect();
    source
        .objects
        .iter()
        .filter(|(id, object)| !selected.contains(id) && is_tree_node(object))
        .map(|(id, _)| *id)
        .collect()
}

fn is_tree_node(object: &Object) -> bool {
    object
        .as_dict()
        .and_then(|dict| dict.get(b"Type"))
        .and_then(Object::as_name)
        .is_ok_and(|name| name == b"Page" || name == b"Pages")
}

/// Look `key` up on the ancestors of `page`, nearest first.
fn inherited_attribute(source: &Document, page: &Dictionary, key: &[u8]) -> Option<Object> {
    let mut seen = BTreeSet::new();
    let mut parent = page.get(b"Parent").and_then(Object::as_reference).ok();

    while let Some(id) = parent {
        if !seen.insert(id) {
            break;
        }
        let node = source.get_dictionary(id).ok()?;
        if let Ok(value) = node.get(key) {
            return Some(value.clone());
        }
        parent = node.get(b"Parent").and_then(Object::as_reference).ok();
    }

    None
}
