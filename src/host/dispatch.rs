//! The host: one place where commands and panel messages are handled.
//!
//! Each command runs to completion and reports its result to the user
//! through the [`Notifier`]. Failures are shown as `<prefix>: <cause>` and
//! also returned as [`CommandOutcome::Failed`] so a caller can pick an exit
//! status. Backing out of a dialog is a quiet [`CommandOutcome::Cancelled`].

use std::path::{Path, PathBuf};
use tokio::sync::mpsc;

use crate::config::{Config, SizeThresholds};
use crate::error::{PdfSpliceError, Result};
use crate::host::collaborators::{FilePicker, Notifier, PickRequest};
use crate::host::protocol::PanelCommand;
use crate::io::{LoadedPdf, PdfReader, PdfWriter};
use crate::preview::{PreviewEvent, SelectionEffect, on_selection_changed};
use crate::range::{PageRange, prompt_for, validate_ranges};
use crate::store::FileStore;
use crate::transform::{MergeResult, Merger, SplitResult, Splitter};

const ADD_ERROR: &str = "Error adding PDF files";
const REMOVE_ERROR: &str = "Error removing PDF file";
const MERGE_ERROR: &str = "Error merging PDFs";
const SPLIT_ERROR: &str = "Error splitting PDF";
const PROCESS_ERROR: &str = "Error processing PDF";
const PREVIEW_ERROR: &str = "Error opening PDF files";

const MERGE_PROGRESS: &str = "Merging PDFs";
const SPLIT_PROGRESS: &str = "Splitting PDF";

/// What a command ended up doing.
#[derive(Debug)]
pub enum CommandOutcome {
    /// The user backed out, or there was nothing to do.
    Cancelled,
    /// Files were added to the workspace.
    Added(usize),
    /// A file was removed; `false` if it was not tracked.
    Removed(bool),
    /// Documents were merged.
    Merged(MergeResult),
    /// A document was split.
    Split(SplitResult),
    /// A document is now shown in the preview.
    Previewing {
        /// The document.
        document: PathBuf,
        /// Its page count.
        page_count: u32,
    },
    /// The command failed; the user has already been told.
    Failed(PdfSpliceError),
}

impl CommandOutcome {
    /// The error, if the command failed.
    pub fn error(&self) -> Option<&PdfSpliceError> {
        match self {
            Self::Failed(err) => Some(err),
            _ => None,
        }
    }
}

/// Wires the collaborators to the transform engine and the preview.
pub struct Host<F, P, N> {
    files: F,
    picker: P,
    notifier: N,
    reader: PdfReader,
    preview_reader: PdfReader,
    merger: Merger,
    splitter: Splitter,
    thresholds: SizeThresholds,
    preview: Option<mpsc::Sender<PreviewEvent>>,
}

impl<F, P, N> Host<F, P, N>
where
    F: FileStore,
    P: FilePicker,
    N: Notifier,
{
    /// Create a host. `files` should already be loaded.
    pub fn new(files: F, picker: P, notifier: N, config: &Config) -> Self {
        let writer = PdfWriter::with_options(config.write_options());
        Self {
            files,
            picker,
            notifier,
            reader: PdfReader::new(),
            preview_reader: PdfReader::requiring_pages(),
            merger: Merger::with_writer(writer.clone()),
            splitter: Splitter::with_writer(writer),
            thresholds: config.thresholds,
            preview: None,
        }
    }

    /// Send preview requests to a running preview driver.
    pub fn with_preview(mut self, events: mpsc::Sender<PreviewEvent>) -> Self {
        self.preview = Some(events);
        self
    }

    /// The tracked files.
    pub fn files(&self) -> &F {
        &self.files
    }

    /// The notifier.
    pub fn notifier(&self) -> &N {
        &self.notifier
    }

    /// Handle a raw panel message.
    pub async fn handle_message(&mut self, raw: &str) -> CommandOutcome {
        match PanelCommand::parse(raw) {
            Ok(command) => self.dispatch(command).await,
            Err(err) => {
                tracing::warn!(error = %err, "rejected panel message");
                self.notifier.error(&err.to_string());
                CommandOutcome::Failed(err)
            }
        }
    }

    /// Run a decoded panel command.
    pub async fn dispatch(&mut self, command: PanelCommand) -> CommandOutcome {
        tracing::debug!(?command, "dispatching panel command");
        match command {
            PanelCommand::Merge { pdf_paths } => self.merge_paths(pdf_paths).await,
            PanelCommand::Split {
                pdf_path,
                page_ranges,
            } => self.split_ranges(&pdf_path, page_ranges).await,
        }
    }

    /// Ask for PDFs and add them to the workspace.
    pub async fn add_files(&mut self) -> CommandOutcome {
        let result = self.try_add_files().await;
        self.finish(result, ADD_ERROR)
    }

    async fn try_add_files(&mut self) -> Result<CommandOutcome> {
        let picked = self
            .picker
            .pick_files(&PickRequest::many("Select PDFs to Add"))
            .await?;
        self.try_add_paths(picked)
    }

    /// Add `paths` to the workspace without asking.
    pub fn add_paths(&mut self, paths: Vec<PathBuf>) -> CommandOutcome {
        let result = self.try_add_paths(paths);
        self.finish(result, ADD_ERROR)
    }

    fn try_add_paths(&mut self, paths: Vec<PathBuf>) -> Result<CommandOutcome> {
        if paths.is_empty() {
            return Ok(CommandOutcome::Cancelled);
        }

        let count = paths.len();
        for path in paths {
            self.files.add(path)?;
        }

        self.notifier
            .info(&format!("Added {count} PDF file(s) to the workspace."));
        Ok(CommandOutcome::Added(count))
    }

    /// Stop tracking `path`.
    pub fn remove_file(&mut self, path: &Path) -> CommandOutcome {
        match self.files.remove(path) {
            Ok(removed) => {
                if removed {
                    self.notifier
                        .info(&format!("Removed PDF file: {}", display_name(path)));
                }
                CommandOutcome::Removed(removed)
            }
            Err(err) => self.fail(REMOVE_ERROR, err),
        }
    }

    /// Merge the tracked files, or files the user picks when fewer than two
    /// are tracked.
    pub async fn merge_files(&mut self) -> CommandOutcome {
        let result = self.try_merge_files().await;
        self.finish(result, MERGE_ERROR)
    }

    async fn try_merge_files(&mut self) -> Result<CommandOutcome> {
        let mut paths = self.files.list().to_vec();
        if paths.len() < 2 {
            paths = self
                .picker
                .pick_files(&PickRequest::many("Select PDFs to Merge"))
                .await?;
        }
        self.try_merge_paths(paths).await
    }

    /// Merge `paths` in order.
    pub async fn merge_paths(&mut self, paths: Vec<PathBuf>) -> CommandOutcome {
        let result = self.try_merge_paths(paths).await;
        self.finish(result, MERGE_ERROR)
    }

    async fn try_merge_paths(&mut self, paths: Vec<PathBuf>) -> Result<CommandOutcome> {
        if paths.len() < 2 {
            self.notifier
                .info("Please select at least two PDF files to merge.");
            return Ok(CommandOutcome::Cancelled);
        }

        self.notifier.progress(MERGE_PROGRESS, 0);
        let result = self.merger.merge(&paths).await?;
        self.notifier.progress(MERGE_PROGRESS, 100);

        self.notifier.info(&format!(
            "PDFs merged successfully! Output saved to: {}",
            display_name(&result.output_path)
        ));
        Ok(CommandOutcome::Merged(result))
    }

    /// Choose a document, ask for ranges, and split it.
    pub async fn split_file(&mut self) -> CommandOutcome {
        let path = match self.choose_split_source().await {
            Ok(Some(path)) => path,
            Ok(None) => return CommandOutcome::Cancelled,
            Err(err) => return self.fail(SPLIT_ERROR, err),
        };

        self.split_path(&path).await
    }

    /// Ask for ranges for `path` and split it.
    pub async fn split_path(&mut self, path: &Path) -> CommandOutcome {
        let result = self.try_split_interactive(path).await;
        self.finish(result, PROCESS_ERROR)
    }

    async fn choose_split_source(&self) -> Result<Option<PathBuf>> {
        let tracked = self.files.list();
        match tracked {
            [] => {
                let picked = self
                    .picker
                    .pick_files(&PickRequest::one("Select PDF to Split"))
                    .await?;
                Ok(picked.into_iter().next())
            }
            [only] => Ok(Some(only.clone())),
            _ => {
                let names: Vec<String> = tracked.iter().map(|path| display_name(path)).collect();
                let choice = self
                    .picker
                    .pick_one("Select a PDF file to split", &names)
                    .await?;
                Ok(choice.and_then(|index| tracked.get(index).cloned()))
            }
        }
    }

    async fn try_split_interactive(&mut self, path: &Path) -> Result<CommandOutcome> {
        let source = self.load_for_split(path).await?;

        let prompt = prompt_for(source.page_count);
        let answer = self.picker.input_ranges(&prompt, source.page_count).await?;
        let Some(text) = answer.filter(|text| !text.trim().is_empty()) else {
            return Ok(CommandOutcome::Cancelled);
        };

        let ranges = validate_ranges(&text, Some(source.page_count))?;
        self.run_split(&source, &ranges).await
    }

    /// Split `path` by range text, checked against its page count.
    pub async fn split_with_ranges(&mut self, path: &Path, text: &str) -> CommandOutcome {
        let result = self.try_split_with_ranges(path, text).await;
        self.finish(result, SPLIT_ERROR)
    }

    async fn try_split_with_ranges(&mut self, path: &Path, text: &str) -> Result<CommandOutcome> {
        let source = self.load_for_split(path).await?;
        let ranges = validate_ranges(text, Some(source.page_count))?;
        self.run_split(&source, &ranges).await
    }

    /// Split `path` by ranges that arrived already parsed.
    ///
    /// Ranges must not run backwards; pages past the end of the document
    /// are dropped.
    pub async fn split_ranges(&mut self, path: &Path, ranges: Vec<PageRange>) -> CommandOutcome {
        let result = self.try_split_ranges(path, ranges).await;
        self.finish(result, SPLIT_ERROR)
    }

    async fn try_split_ranges(
        &mut self,
        path: &Path,
        ranges: Vec<PageRange>,
    ) -> Result<CommandOutcome> {
        if ranges.is_empty() {
            return Err(PdfSpliceError::format(""));
        }
        for range in &ranges {
            range.check_order()?;
        }

        let source = self.load_for_split(path).await?;
        self.run_split(&source, &ranges).await
    }

    async fn load_for_split(&self, path: &Path) -> Result<LoadedPdf> {
        let source = self.reader.load(path).await?;
        for warning in source.size_warnings(&self.thresholds) {
            self.notifier.warning(&warning.to_string());
        }
        Ok(source)
    }

    async fn run_split(
        &mut self,
        source: &LoadedPdf,
        ranges: &[PageRange],
    ) -> Result<CommandOutcome> {
        self.notifier.progress(SPLIT_PROGRESS, 0);
        let result = self.splitter.split_loaded(source, ranges).await?;
        self.notifier.progress(SPLIT_PROGRESS, 100);

        for path in result.paths() {
            self.files.add(path)?;
        }

        self.notifier.info(&format!(
            "PDF split successfully into {} files!",
            result.outputs.len()
        ));
        Ok(CommandOutcome::Split(result))
    }

    /// Show `path` in the preview.
    pub async fn preview_file(&mut self, path: &Path) -> CommandOutcome {
        if !path.exists() {
            self.notifier
                .error(&format!("File not found: {}", path.display()));
            return CommandOutcome::Failed(PdfSpliceError::read(path, "File not found"));
        }

        let result = self.try_preview(path).await;
        self.finish(result, PREVIEW_ERROR)
    }

    /// Preview the first tracked file, asking for files when none are
    /// tracked. Picked files are added to the workspace.
    pub async fn open_preview(&mut self) -> CommandOutcome {
        let result = self.try_open_preview().await;
        self.finish(result, PREVIEW_ERROR)
    }

    async fn try_open_preview(&mut self) -> Result<CommandOutcome> {
        if self.files.list().is_empty() {
            let picked = self
                .picker
                .pick_files(&PickRequest::many("Select PDFs to Preview"))
                .await?;
            for path in picked {
                self.files.add(path)?;
            }
        }

        match self.files.list().first().cloned() {
            Some(first) => self.try_preview(&first).await,
            None => Ok(CommandOutcome::Cancelled),
        }
    }

    async fn try_preview(&self, path: &Path) -> Result<CommandOutcome> {
        let loaded = self.preview_reader.load(path).await?;
        let page_count = loaded.page_count;

        if let Some(events) = &self.preview {
            events
                .send(PreviewEvent::Open {
                    document: path.to_path_buf(),
                    page_count,
                })
                .await
                .map_err(|_| PdfSpliceError::other("Preview is no longer running"))?;
        }

        Ok(CommandOutcome::Previewing {
            document: path.to_path_buf(),
            page_count,
        })
    }

    /// React to a change of the file selection.
    pub async fn select(&mut self, selected: &[PathBuf]) -> SelectionEffect {
        let effect = on_selection_changed(selected);
        if let Some(document) = &effect.display {
            self.preview_file(document).await;
        }
        effect
    }

    fn finish(&self, result: Result<CommandOutcome>, prefix: &str) -> CommandOutcome {
        match result {
            Ok(outcome) => outcome,
            Err(err) => self.fail(prefix, err),
        }
    }

    fn fail(&self, prefix: &str, err: PdfSpliceError) -> CommandOutcome {
        tracing::warn!(error = %err, "{prefix}");
        self.notifier.error(&err.user_message(prefix));
        CommandOutcome::Failed(err)
    }
}

/// File name for messages, falling back to the whole path.
fn display_name(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}
