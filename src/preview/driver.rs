//! Runs a [`PreviewSession`] against an asynchronous renderer.
//!
//! The driver owns the session and consumes [`PreviewEvent`]s from a channel
//! on a single task. Events are always handled before the running render is
//! polled, so navigation that arrives while a page is being drawn collapses
//! into one pending page instead of queueing renders.

use futures::future::BoxFuture;
use std::path::PathBuf;
use tokio::sync::mpsc;

use crate::error::Result;
use crate::preview::session::{PreviewSession, RenderRequest};

/// Input to a running preview.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PreviewEvent {
    /// Show `document` from its first page.
    Open {
        /// Document to show.
        document: PathBuf,
        /// Pages in the document.
        page_count: u32,
    },
    /// Next page.
    Next,
    /// Previous page.
    Previous,
    /// Jump to a page.
    GoTo(u32),
    /// Close the document.
    Close,
}

/// Draws one page of a document somewhere.
///
/// A failed render is logged and treated as finished; the session moves on
/// to any pending page.
pub trait PageRenderer: Send + Sync {
    /// Render `request.page` of `request.document`.
    fn render(&self, request: RenderRequest) -> BoxFuture<'_, Result<()>>;
}

/// Event loop tying a [`PreviewSession`] to a [`PageRenderer`].
pub struct PreviewDriver<R> {
    session: PreviewSession,
    renderer: R,
}

impl<R: PageRenderer> PreviewDriver<R> {
    /// Create a driver with an empty session.
    pub fn new(renderer: R) -> Self {
        Self {
            session: PreviewSession::new(),
            renderer,
        }
    }

    /// Process events until the sending side closes.
    ///
    /// Renders still running or pending when the channel closes are
    /// completed before returning. Returns the final session.
    pub async fn run(self, mut events: mpsc::Receiver<PreviewEvent>) -> PreviewSession {
        let Self {
            mut session,
            renderer,
        } = self;
        let mut in_flight: Option<BoxFuture<'_, Result<()>>> = None;

        loop {
            tokio::select! {
                biased;

                event = events.recv() => {
                    let Some(event) = event else { break };
                    tracing::trace!(?event, "preview event");
                    if let Some(request) = apply(&mut session, event) {
                        in_flight = Some(renderer.render(request));
                    }
                }

                result = wait_for(&mut in_flight) => {
                    in_flight = None;
                    log_render_result(result);
                    if let Some(request) = session.render_finished() {
                        in_flight = Some(renderer.render(request));
                    }
                }
            }
        }

        while let Some(render) = in_flight.take() {
            log_render_result(render.await);
            if let Some(request) = session.render_finished() {
                in_flight = Some(renderer.render(request));
            }
        }

        session
    }
}

fn apply(session: &mut PreviewSession, event: PreviewEvent) -> Option<RenderRequest> {
    match event {
        PreviewEvent::Open {
            document,
            page_count,
        } => session.open(document, page_count),
        PreviewEvent::Next => session.next(),
        PreviewEvent::Previous => session.previous(),
        PreviewEvent::GoTo(page) => session.go_to(page),
        PreviewEvent::Close => {
            session.close();
            None
        }
    }
}

/// Resolve with the running render, or never when nothing is running.
async fn wait_for(in_flight: &mut Option<BoxFuture<'_, Result<()>>>) -> Result<()> {
    match in_flight {
        Some(render) => render.await,
        None => std::future::pending().await,
    }
}

fn log_render_result(result: Result<()>) {
    if let Err(err) = result {
        tracing::warn!(error = %err, "page render failed");
    }
}
