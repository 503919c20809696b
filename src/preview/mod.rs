//! Page-at-a-time document preview.
//!
//! [`PreviewSession`] is the navigation state machine, [`PreviewDriver`]
//! runs it against a [`PageRenderer`], and [`on_selection_changed`] decides
//! what a file selection does to the preview.

mod driver;
mod selection;
mod session;

pub use driver::{PageRenderer, PreviewDriver, PreviewEvent};
pub use selection::{SelectionEffect, on_selection_changed};
pub use session::{PreviewSession, PreviewState, RenderRequest};
