//! Workspace-scoped persistence of the tracked PDF list.
//!
//! Two layers: a [`WorkspaceState`] is a plain key-value document (a JSON
//! file on disk, or memory in tests), and [`TrackedFiles`] keeps the list of
//! added PDFs under the `pdfFiles` key of such a document.

use serde_json::{Map, Value};
use std::path::{Path, PathBuf};

use crate::error::{PdfSpliceError, Result};

/// Key the tracked file list is stored under.
pub const TRACKED_FILES_KEY: &str = "pdfFiles";

/// Key-value persistence scoped to one workspace.
pub trait WorkspaceState: Send {
    /// Value stored under `key`.
    fn get(&self, key: &str) -> Result<Option<Value>>;

    /// Store `value` under `key`, persisting it immediately.
    fn update(&mut self, key: &str, value: Value) -> Result<()>;
}

/// Workspace state kept as a JSON object in a file.
///
/// The whole file is rewritten on every update. A missing file reads as an
/// empty state; its directory is created on the first update.
#[derive(Debug)]
pub struct JsonFileStore {
    path: PathBuf,
    values: Map<String, Value>,
}

impl JsonFileStore {
    /// Open the state file at `path`.
    ///
    /// # Errors
    ///
    /// Returns [`PdfSpliceError::Store`] if the file exists but cannot be
    /// read or does not hold a JSON object.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();

        let values = match std::fs::read_to_string(&path) {
            Ok(text) if text.trim().is_empty() => Map::new(),
            Ok(text) => serde_json::from_str(&text).map_err(|e| store_error(&path, e))?,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Map::new(),
            Err(e) => return Err(store_error(&path, e)),
        };

        tracing::debug!(path = %path.display(), keys = values.len(), "opened workspace state");
        Ok(Self { path, values })
    }

    /// Location of the state file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn persist(&self) -> Result<()> {
        if let Some(parent) = self.path.parent()
            && !parent.as_os_str().is_empty()
        {
            std::fs::create_dir_all(parent).map_err(|e| store_error(&self.path, e))?;
        }

        let text =
            serde_json::to_string_pretty(&self.values).map_err(|e| store_error(&self.path, e))?;
        std::fs::write(&self.path, text).map_err(|e| store_error(&self.path, e))
    }
}

impl WorkspaceState for JsonFileStore {
    fn get(&self, key: &str) -> Result<Option<Value>> {
        Ok(self.values.get(key).cloned())
    }

    fn update(&mut self, key: &str, value: Value) -> Result<()> {
        self.values.insert(key.to_string(), value);
        self.persist()
    }
}

/// Workspace state that lives only in memory.
#[derive(Debug, Default, Clone)]
pub struct MemoryStore {
    values: Map<String, Value>,
}

impl MemoryStore {
    /// Create an empty state.
    pub fn new() -> Self {
        Self::default()
    }
}

impl WorkspaceState for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<Value>> {
        Ok(self.values.get(key).cloned())
    }

    fn update(&mut self, key: &str, value: Value) -> Result<()> {
        self.values.insert(key.to_string(), value);
        Ok(())
    }
}

fn store_error(path: &Path, err: impl std::fmt::Display) -> PdfSpliceError {
    PdfSpliceError::Store {
        path: path.to_path_buf(),
        reason: err.to_string(),
    }
}

/// The list of PDFs added to the workspace.
pub trait FileStore {
    /// Read the persisted list, dropping entries whose files are gone.
    fn load(&mut self) -> Result<()>;

    /// Track `path`. Returns `false` if it was already tracked.
    fn add(&mut self, path: PathBuf) -> Result<bool>;

    /// Stop tracking `path`. Returns `false` if it was not tracked.
    fn remove(&mut self, path: &Path) -> Result<bool>;

    /// Tracked paths in the order they were added.
    fn list(&self) -> &[PathBuf];
}

/// [`FileStore`] persisted under [`TRACKED_FILES_KEY`] of a
/// [`WorkspaceState`].
#[derive(Debug)]
pub struct TrackedFiles<S> {
    state: S,
    files: Vec<PathBuf>,
}

impl<S: WorkspaceState> TrackedFiles<S> {
    /// Create a store over `state`. Call [`FileStore::load`] to read the
    /// persisted list.
    pub fn new(state: S) -> Self {
        Self {
            state,
            files: Vec::new(),
        }
    }

    /// Underlying workspace state.
    pub fn state(&self) -> &S {
        &self.state
    }

    fn save(&mut self) -> Result<()> {
        let value = Value::Array(
            self.files
                .iter()
                .map(|path| Value::String(path.to_string_lossy().into_owned()))
                .collect(),
        );
        self.state.update(TRACKED_FILES_KEY, value)
    }
}

impl<S: WorkspaceState> FileStore for TrackedFiles<S> {
    fn load(&mut self) -> Result<()> {
        let saved = match self.state.get(TRACKED_FILES_KEY)? {
            Some(Value::Array(entries)) => entries,
            Some(other) => {
                tracing::warn!(value = %other, "ignoring malformed tracked file list");
                Vec::new()
            }
            None => Vec::new(),
        };

        self.files.clear();
        for entry in saved {
            let Value::String(path) = entry else { continue };
            let path = PathBuf::from(path);
            if !path.exists() {
                tracing::debug!(path = %path.display(), "dropping missing tracked file");
                continue;
            }
            if !self.files.contains(&path) {
                self.files.push(path);
            }
        }

        Ok(())
    }

    fn add(&mut self, path: PathBuf) -> Result<bool> {
        if self.files.contains(&path) {
            return Ok(false);
        }
        self.files.push(path);
        self.save()?;
        Ok(true)
    }

    fn remove(&mut self, path: &Path) -> Result<bool> {
        let before = self.files.len();
        self.files.retain(|tracked| tracked != path);
        if self.files.len() == before {
            return Ok(false);
        }
        self.save()?;
        Ok(true)
    }

    fn list(&self) -> &[PathBuf] {
        &self.files
    }
}
