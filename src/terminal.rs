//! Terminal stand-ins for the dialogs and preview pane of an editor.
//!
//! [`TerminalPicker`] asks its questions on stdout and reads answers from
//! stdin; [`ConsoleRenderer`] "renders" a page by printing its text. Both
//! read through one shared [`TerminalInput`] so no line is lost between
//! two buffered readers.

use futures::future::BoxFuture;
use lopdf::Document;
use std::io::Write;
use std::path::PathBuf;
use std::sync::Arc;
use tokio::io::{AsyncBufReadExt, BufReader, Lines, Stdin};
use tokio::sync::Mutex;

use crate::error::Result;
use crate::host::{FilePicker, PickRequest};
use crate::io::PdfReader;
use crate::preview::{PageRenderer, RenderRequest};
use crate::range::validation_message;
use crate::utils::{absolute_paths, collect_paths_for_patterns};

/// Line-oriented stdin shared by everything that asks the user.
#[derive(Clone)]
pub struct TerminalInput {
    lines: Arc<Mutex<Lines<BufReader<Stdin>>>>,
}

impl TerminalInput {
    /// Wrap the process's stdin.
    pub fn new() -> Self {
        Self {
            lines: Arc::new(Mutex::new(BufReader::new(tokio::io::stdin()).lines())),
        }
    }

    /// Next line with surrounding whitespace removed; `None` at end of input.
    pub async fn read_line(&self) -> Result<Option<String>> {
        let line = self.lines.lock().await.next_line().await?;
        Ok(line.map(|line| line.trim().to_string()))
    }

    /// Print `prompt` and read the answer.
    pub async fn ask(&self, prompt: &str) -> Result<Option<String>> {
        print!("{prompt} ");
        std::io::stdout().flush()?;
        self.read_line().await
    }
}

impl Default for TerminalInput {
    fn default() -> Self {
        Self::new()
    }
}

/// Answers the host's questions on the terminal.
///
/// An empty answer or end of input backs out of the question.
#[derive(Clone)]
pub struct TerminalPicker {
    input: TerminalInput,
}

impl TerminalPicker {
    /// Create a picker reading from `input`.
    pub fn new(input: TerminalInput) -> Self {
        Self { input }
    }

    async fn read_files(&self, request: &PickRequest) -> Result<Vec<PathBuf>> {
        let hint = if request.many {
            "(files or patterns, separated by spaces)"
        } else {
            "(one file)"
        };
        let Some(answer) = self.input.ask(&format!("{} {hint}:", request.title)).await? else {
            return Ok(Vec::new());
        };

        let mut paths = collect_paths_for_patterns(answer.split_whitespace())?;
        paths.retain(|path| {
            let is_pdf = path
                .extension()
                .is_some_and(|ext| ext.eq_ignore_ascii_case("pdf"));
            if !is_pdf {
                tracing::warn!(path = %path.display(), "ignoring non-PDF file");
            }
            is_pdf
        });
        if !request.many {
            paths.truncate(1);
        }

        absolute_paths(paths)
    }

    async fn read_choice(&self, placeholder: &str, choices: &[String]) -> Result<Option<usize>> {
        println!("{placeholder}");
        for (index, choice) in choices.iter().enumerate() {
            println!("  {}. {choice}", index + 1);
        }

        let Some(answer) = self.input.ask("Number:").await? else {
            return Ok(None);
        };
        let choice = answer
            .parse::<usize>()
            .ok()
            .filter(|number| (1..=choices.len()).contains(number))
            .map(|number| number - 1);
        Ok(choice)
    }

    async fn read_ranges(&self, prompt: &str, page_count: u32) -> Result<Option<String>> {
        loop {
            let Some(answer) = self.input.ask(&format!("{prompt}:")).await? else {
                return Ok(None);
            };
            if answer.is_empty() {
                return Ok(None);
            }
            match validation_message(&answer, Some(page_count)) {
                None => return Ok(Some(answer)),
                Some(message) => eprintln!("{message}"),
            }
        }
    }
}

impl FilePicker for TerminalPicker {
    fn pick_files<'a>(&'a self, request: &'a PickRequest) -> BoxFuture<'a, Result<Vec<PathBuf>>> {
        Box::pin(self.read_files(request))
    }

    fn pick_one<'a>(
        &'a self,
        placeholder: &'a str,
        choices: &'a [String],
    ) -> BoxFuture<'a, Result<Option<usize>>> {
        Box::pin(self.read_choice(placeholder, choices))
    }

    fn input_ranges<'a>(
        &'a self,
        prompt: &'a str,
        page_count: u32,
    ) -> BoxFuture<'a, Result<Option<String>>> {
        Box::pin(self.read_ranges(prompt, page_count))
    }
}

/// Prints the text of the previewed page.
pub struct ConsoleRenderer {
    reader: PdfReader,
    max_lines: usize,
    current: Mutex<Option<(PathBuf, Document)>>,
}

impl ConsoleRenderer {
    /// Lines of page text shown per page.
    pub const DEFAULT_MAX_LINES: usize = 20;

    /// Create a renderer showing up to [`Self::DEFAULT_MAX_LINES`] lines.
    pub fn new() -> Self {
        Self {
            reader: PdfReader::new(),
            max_lines: Self::DEFAULT_MAX_LINES,
            current: Mutex::new(None),
        }
    }

    async fn show(&self, request: RenderRequest) -> Result<()> {
        let mut current = self.current.lock().await;
        let stale = current
            .as_ref()
            .is_none_or(|(path, _)| *path != request.document);
        if stale {
            let loaded = self.reader.load(&request.document).await?;
            *current = Some((request.document.clone(), loaded.document));
        }
        let Some((_, document)) = current.as_ref() else {
            return Ok(());
        };

        let text = document.extract_text(&[request.page]).unwrap_or_else(|err| {
            tracing::debug!(error = %err, page = request.page, "no extractable text");
            String::new()
        });

        let name = request
            .document
            .file_name()
            .map_or_else(
                || request.document.display().to_string(),
                |name| name.to_string_lossy().into_owned(),
            );
        println!("Page {} of {}: {name}", request.page, request.page_count);
        for line in text
            .lines()
            .filter(|line| !line.trim().is_empty())
            .take(self.max_lines)
        {
            println!("  {line}");
        }
        Ok(())
    }
}

impl Default for ConsoleRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl PageRenderer for ConsoleRenderer {
    fn render(&self, request: RenderRequest) -> BoxFuture<'_, Result<()>> {
        Box::pin(self.show(request))
    }
}
