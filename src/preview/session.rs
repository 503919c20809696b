//! Single-document, single-page preview session.
//!
//! The session decides which page is shown and when a page should be
//! rendered. At most one render is in flight at a time. Navigation that
//! happens while a render is running only records the newest target page;
//! when the running render finishes, that page is rendered next and every
//! page requested in between is skipped.
//!
//! The session does no I/O. Each transition returns the [`RenderRequest`]
//! to start, if any, and the caller reports back with
//! [`PreviewSession::render_finished`].

use std::path::{Path, PathBuf};

/// A page that should be rendered now.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderRequest {
    /// Document being previewed.
    pub document: PathBuf,
    /// Page to render (1-based).
    pub page: u32,
    /// Total pages in the document.
    pub page_count: u32,
}

/// Observable state of a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PreviewState {
    /// No document is open.
    Empty,
    /// A document is open at the given page.
    Loaded {
        /// Current page (1-based).
        page: u32,
        /// Total pages in the document.
        page_count: u32,
    },
}

#[derive(Debug)]
struct OpenDocument {
    path: PathBuf,
    page_count: u32,
    current_page: u32,
}

/// Preview navigation state for one panel.
#[derive(Debug, Default)]
pub struct PreviewSession {
    open: Option<OpenDocument>,
    render_in_flight: bool,
    pending: Option<u32>,
}

impl PreviewSession {
    /// Create an empty session.
    pub fn new() -> Self {
        Self::default()
    }

    /// Current state.
    pub fn state(&self) -> PreviewState {
        match &self.open {
            Some(doc) => PreviewState::Loaded {
                page: doc.current_page,
                page_count: doc.page_count,
            },
            None => PreviewState::Empty,
        }
    }

    /// Document currently open, if any.
    pub fn document(&self) -> Option<&Path> {
        self.open.as_ref().map(|doc| doc.path.as_path())
    }

    /// Current page, or 0 when no document is open.
    pub fn current_page(&self) -> u32 {
        self.open.as_ref().map_or(0, |doc| doc.current_page)
    }

    /// Page count of the open document, or 0 when none is open.
    pub fn page_count(&self) -> u32 {
        self.open.as_ref().map_or(0, |doc| doc.page_count)
    }

    /// Whether a render has been started and not yet reported finished.
    pub fn render_in_flight(&self) -> bool {
        self.render_in_flight
    }

    /// Page waiting for the in-flight render to finish.
    pub fn pending(&self) -> Option<u32> {
        self.pending
    }

    /// Open `document` at page 1, replacing whatever was open.
    ///
    /// A document without pages leaves the session empty.
    pub fn open(&mut self, document: impl Into<PathBuf>, page_count: u32) -> Option<RenderRequest> {
        let document = document.into();
        self.pending = None;

        if page_count == 0 {
            tracing::debug!(path = %document.display(), "document has no pages to preview");
            self.open = None;
            return None;
        }

        self.open = Some(OpenDocument {
            path: document,
            page_count,
            current_page: 1,
        });
        self.request(1)
    }

    /// Move one page forward. No-op on the last page.
    pub fn next(&mut self) -> Option<RenderRequest> {
        let doc = self.open.as_ref()?;
        if doc.current_page >= doc.page_count {
            return None;
        }
        self.navigate(doc.current_page + 1)
    }

    /// Move one page back. No-op on the first page.
    pub fn previous(&mut self) -> Option<RenderRequest> {
        let doc = self.open.as_ref()?;
        if doc.current_page <= 1 {
            return None;
        }
        self.navigate(doc.current_page - 1)
    }

    /// Jump to `page`. No-op when the page does not exist or is current.
    pub fn go_to(&mut self, page: u32) -> Option<RenderRequest> {
        let doc = self.open.as_ref()?;
        if page < 1 || page > doc.page_count || page == doc.current_page {
            return None;
        }
        self.navigate(page)
    }

    /// Report that the in-flight render finished, successfully or not.
    ///
    /// Returns the pending request, if one was waiting.
    pub fn render_finished(&mut self) -> Option<RenderRequest> {
        self.render_in_flight = false;
        let page = self.pending.take()?;
        self.request(page)
    }

    /// Close the document. A render already running is still reported
    /// through [`PreviewSession::render_finished`].
    pub fn close(&mut self) {
        self.open = None;
        self.pending = None;
    }

    fn navigate(&mut self, page: u32) -> Option<RenderRequest> {
        if let Some(doc) = self.open.as_mut() {
            doc.current_page = page;
        }
        self.request(page)
    }

    /// Start rendering `page` now, or park it if a render is running.
    fn request(&mut self, page: u32) -> Option<RenderRequest> {
        if self.render_in_flight {
            self.pending = Some(page);
            return None;
        }

        let doc = self.open.as_ref()?;
        self.render_in_flight = true;
        Some(RenderRequest {
            document: doc.path.clone(),
            page,
            page_count: doc.page_count,
        })
    }
}
