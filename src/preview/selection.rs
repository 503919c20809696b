//! How the current file selection affects the preview and the actions.

use std::path::{Path, PathBuf};

/// What a selection change means for the UI.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectionEffect {
    /// Document to show in the preview. `None` leaves the preview as it is.
    pub display: Option<PathBuf>,
    /// Whether merging the selection makes sense.
    pub merge_enabled: bool,
    /// Whether splitting the selection makes sense.
    pub split_enabled: bool,
}

/// Work out the effect of selecting `selected`.
///
/// Exactly one selected document is previewed; selecting none or several
/// keeps whatever is currently shown.
pub fn on_selection_changed<P: AsRef<Path>>(selected: &[P]) -> SelectionEffect {
    let display = match selected {
        [only] => Some(only.as_ref().to_path_buf()),
        _ => None,
    };

    SelectionEffect {
        display,
        merge_enabled: selected.len() >= 2,
        split_enabled: selected.len() == 1,
    }
}
