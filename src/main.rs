//! pdfsplice - Merge PDF files and split them by page ranges.

use anyhow::{Context, Result};
use clap::Parser;
use std::path::PathBuf;
use std::process;
use tokio::sync::mpsc;
use tracing_subscriber::EnvFilter;

use pdfsplice::PdfSpliceError;
use pdfsplice::cli::{Cli, Command, FilesAction};
use pdfsplice::host::{CommandOutcome, Host};
use pdfsplice::output::{OutputFormatter, display_merge_details, display_split_outputs};
use pdfsplice::preview::{PreviewDriver, PreviewEvent};
use pdfsplice::store::{FileStore, JsonFileStore, TrackedFiles};
use pdfsplice::terminal::{ConsoleRenderer, TerminalInput, TerminalPicker};
use pdfsplice::utils::{absolute_paths, collect_paths_for_patterns};

type CliHost = Host<TrackedFiles<JsonFileStore>, TerminalPicker, OutputFormatter>;

/// Navigation events buffered ahead of the preview driver.
const PREVIEW_QUEUE: usize = 32;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match run(cli).await {
        Ok(0) => {}
        Ok(code) => process::exit(code),
        Err(err) => {
            eprintln!("Error: {err:#}");
            let code = err
                .downcast_ref::<PdfSpliceError>()
                .map_or(1, PdfSpliceError::exit_code);
            process::exit(code);
        }
    }
}

fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

/// Run one command; resolves to the process exit code.
///
/// Failures inside a command have already been shown by the host, so they
/// only pick the exit code here.
async fn run(cli: Cli) -> Result<i32> {
    let config = cli.to_config()?;
    let formatter = OutputFormatter::from_config(&config);

    let mut files = TrackedFiles::new(JsonFileStore::open(&config.state_file)?);
    files.load()?;
    tracing::debug!(
        state = %config.state_file.display(),
        tracked = files.list().len(),
        "workspace loaded"
    );

    let input = TerminalInput::new();
    let mut host = Host::new(
        files,
        TerminalPicker::new(input.clone()),
        formatter.clone(),
        &config,
    );

    let outcome = match cli.command {
        Command::Merge { inputs } if inputs.is_empty() => host.merge_files().await,
        Command::Merge { inputs } => host.merge_paths(resolve(&inputs)?).await,
        Command::Split {
            path: Some(path),
            ranges: Some(ranges),
        } => host.split_with_ranges(&path, &ranges).await,
        Command::Split {
            path: Some(path),
            ranges: None,
        } => host.split_path(&path).await,
        Command::Split { path: None, .. } => host.split_file().await,
        Command::Files { action } => match action {
            FilesAction::List => {
                list_files(&host, &formatter);
                return Ok(0);
            }
            FilesAction::Add { paths } if paths.is_empty() => host.add_files().await,
            FilesAction::Add { paths } => host.add_paths(resolve(&paths)?),
            FilesAction::Remove { path } => {
                let path = std::path::absolute(&path)?;
                let outcome = host.remove_file(&path);
                if let CommandOutcome::Removed(false) = outcome {
                    formatter.warning(&format!("Not a tracked file: {}", path.display()));
                }
                outcome
            }
        },
        Command::Preview { path } => preview(host, input, path).await?,
        Command::Serve => {
            serve(&mut host, &input).await?;
            return Ok(0);
        }
    };

    report(&formatter, &outcome);
    Ok(outcome.error().map_or(0, PdfSpliceError::exit_code))
}

fn resolve(patterns: &[String]) -> Result<Vec<PathBuf>> {
    let paths = collect_paths_for_patterns(patterns)?;
    Ok(absolute_paths(paths)?)
}

fn list_files(host: &CliHost, formatter: &OutputFormatter) {
    let tracked = host.files().list();
    if tracked.is_empty() {
        formatter.info("No PDF files are tracked.");
        return;
    }
    for path in tracked {
        formatter.plain(&path.display().to_string());
    }
}

fn report(formatter: &OutputFormatter, outcome: &CommandOutcome) {
    match outcome {
        CommandOutcome::Merged(result) => display_merge_details(formatter, result),
        CommandOutcome::Split(result) => display_split_outputs(formatter, result),
        _ => {}
    }
}

/// Handle panel messages until stdin closes. A failed message does not
/// stop the loop.
async fn serve(host: &mut CliHost, input: &TerminalInput) -> Result<()> {
    while let Some(line) = input.read_line().await? {
        if line.is_empty() {
            continue;
        }
        let outcome = host.handle_message(&line).await;
        report(host.notifier(), &outcome);
    }
    Ok(())
}

async fn preview(
    host: CliHost,
    input: TerminalInput,
    path: Option<PathBuf>,
) -> Result<CommandOutcome> {
    let formatter = host.notifier().clone();
    let (events, receiver) = mpsc::channel(PREVIEW_QUEUE);
    let driver = tokio::spawn(PreviewDriver::new(ConsoleRenderer::new()).run(receiver));

    let mut host = host.with_preview(events.clone());
    let outcome = match path {
        Some(path) => host.preview_file(&std::path::absolute(&path)?).await,
        None => host.open_preview().await,
    };
    drop(host);

    if let CommandOutcome::Previewing { .. } = outcome {
        formatter.info("n: next page, p: previous page, <number>: go to page, q: quit");
        while let Some(line) = input.read_line().await? {
            let event = match line.as_str() {
                "" => continue,
                "q" | "quit" => break,
                "n" | "next" => PreviewEvent::Next,
                "p" | "prev" | "previous" => PreviewEvent::Previous,
                other => match other.parse::<u32>() {
                    Ok(page) => PreviewEvent::GoTo(page),
                    Err(_) => {
                        formatter.warning(&format!("Unknown preview command: {other}"));
                        continue;
                    }
                },
            };
            if events.send(event).await.is_err() {
                break;
            }
        }
        events.send(PreviewEvent::Close).await.ok();
    }
    drop(events);

    let session = driver.await.context("preview task failed")?;
    tracing::debug!(state = ?session.state(), "preview closed");
    Ok(outcome)
}
