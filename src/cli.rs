//! Command-line interface module for fileprune.
//!
//! This module handles all CLI-related functionality including:
//! - Argument parsing with `clap`
//! - Merging flags with configuration defaults
//! - Preview and move orchestration on top of [`PruneSession`]
//! - Confirmation prompts and progress display

use crate::config::{ConfigError, PruneConfig};
use crate::errors::{SessionError, ValidationError};
use crate::mover::{SystemTrash, Trasher};
use crate::output::{OutputFormatter, ProgressBarSink};
use crate::report::BatchReport;
use crate::session::{AssumeYes, Confirm, MoveMode, MoveResult, PruneSession};
use clap::{Args, Parser, Subcommand};
use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};

/// Filter a folder by name and format, and move non-matching files to the trash.
#[derive(Parser, Debug)]
#[command(name = "fileprune", version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Read settings from this TOML file instead of the default locations
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,
}

/// Represents a CLI command to execute.
#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// List the files that do not match the filter
    Preview(FilterArgs),
    /// Move non-matching files to the trash
    Move(MoveArgs),
}

/// Inputs shared by every command.
#[derive(Args, Debug, Clone, Default)]
pub struct FilterArgs {
    /// Folder to scan
    pub folder: PathBuf,

    /// Keep files whose name contains this text (case-insensitive)
    #[arg(short, long, value_name = "TEXT")]
    pub name: Option<String>,

    /// Only consider these formats, comma separated (e.g. "txt, jpg, docx")
    #[arg(short, long, value_name = "LIST")]
    pub formats: Option<String>,

    /// Include subfolders
    #[arg(short, long, conflicts_with = "no_recursive")]
    pub recursive: bool,

    /// Only scan the folder itself
    #[arg(long)]
    pub no_recursive: bool,
}

#[derive(Args, Debug, Clone, Default)]
pub struct MoveArgs {
    #[command(flatten)]
    pub filter: FilterArgs,

    /// Move only these entries of the preview list (1-based, comma separated)
    #[arg(short, long, value_delimiter = ',', value_name = "N,...")]
    pub select: Vec<usize>,

    /// Do not ask for confirmation
    #[arg(short, long)]
    pub yes: bool,

    /// Write a JSON report of the batch to this file
    #[arg(long, value_name = "PATH")]
    pub report: Option<PathBuf>,
}

/// Why a command did not finish cleanly.
#[derive(thiserror::Error, Debug)]
pub enum CliError {
    /// A precondition or input problem; nothing was changed.
    #[error("{0}")]
    Warning(String),

    /// A failure reading configuration or the folder.
    #[error("{0}")]
    Failure(String),

    /// The batch ran, but some files could not be moved.
    #[error("{0} file(s) could not be moved to the trash")]
    PartialFailure(usize),
}

impl From<ValidationError> for CliError {
    fn from(e: ValidationError) -> Self {
        CliError::Warning(e.to_string())
    }
}

impl From<SessionError> for CliError {
    fn from(e: SessionError) -> Self {
        match e {
            SessionError::Validation(v) => v.into(),
            SessionError::Enumeration(e) => {
                CliError::Failure(format!("Error reading files: {}", error_chain(&e)))
            }
        }
    }
}

impl From<ConfigError> for CliError {
    fn from(e: ConfigError) -> Self {
        CliError::Failure(format!("Error loading configuration: {}", e))
    }
}

/// Asks on stderr and reads a `y`/`yes` answer from stdin.
#[derive(Debug, Default, Clone, Copy)]
pub struct StdinConfirm;

impl Confirm for StdinConfirm {
    fn confirm(&mut self, prompt: &str) -> bool {
        eprint!("{} [y/N] ", prompt);
        io::stderr().flush().ok();

        let mut line = String::new();
        if io::stdin().lock().read_line(&mut line).is_err() {
            return false;
        }

        matches!(line.trim().to_lowercase().as_str(), "y" | "yes")
    }
}

/// Runs the parsed command against the real trash, prompting on the terminal.
pub fn run_cli(cli: &Cli) -> Result<(), CliError> {
    run_cli_with(
        &cli.command,
        cli.config.as_deref(),
        &SystemTrash,
        &mut StdinConfirm,
    )
}

/// Runs a command with an explicit trash backend and confirmation source.
///
/// # Arguments
///
/// * `command` - The command to execute (Preview or Move)
/// * `config_path` - Optional path to configuration file
/// * `trasher` - Where files are sent
/// * `confirm` - Answers the yes/no prompt unless `--yes` or `assume_yes` is set
pub fn run_cli_with(
    command: &Command,
    config_path: Option<&Path>,
    trasher: &dyn Trasher,
    confirm: &mut dyn Confirm,
) -> Result<(), CliError> {
    let config = PruneConfig::load(config_path)?;

    match command {
        Command::Preview(args) => {
            preview(args, &config)?;
            Ok(())
        }
        Command::Move(args) => move_files(args, &config, trasher, confirm),
    }
}

/// The filter values in effect once flags and configuration are merged.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedFilters {
    pub name: String,
    pub formats: String,
    pub recursive: bool,
}

/// Merges command-line flags over configuration defaults.
pub fn resolve_filters(args: &FilterArgs, config: &PruneConfig) -> ResolvedFilters {
    let recursive = if args.no_recursive {
        false
    } else if args.recursive {
        true
    } else {
        config.defaults.recursive
    };

    ResolvedFilters {
        name: args
            .name
            .clone()
            .unwrap_or_else(|| config.defaults.name_contains.clone()),
        formats: args
            .formats
            .clone()
            .unwrap_or_else(|| config.defaults.formats.clone()),
        recursive,
    }
}

/// Runs a preview and prints the non-matching files.
///
/// Nothing is printed until the inputs have been validated and the folder
/// has been read.
fn preview(args: &FilterArgs, config: &PruneConfig) -> Result<PruneSession, CliError> {
    let filters = resolve_filters(args, config);
    let mut session = PruneSession::new(config.scan.into());
    if !args.folder.as_os_str().is_empty() {
        session.set_folder(&args.folder);
    }

    session.preview(&filters.name, &filters.formats, filters.recursive)?;

    OutputFormatter::info(&scan_banner(&args.folder, filters.recursive));
    OutputFormatter::unmatched_table(session.unmatched());
    OutputFormatter::plain("");
    OutputFormatter::plain(session.status());

    Ok(session)
}

/// The line announcing which folder was scanned.
pub fn scan_banner(folder: &Path, recursive: bool) -> String {
    format!(
        "Scanned {}{}",
        folder.display(),
        if recursive {
            " (including subfolders)"
        } else {
            ""
        }
    )
}

/// Converts 1-based `--select` numbers into list indices.
///
/// Numbers past the end of the list are left for
/// [`PruneSession::select`] to reject.
///
/// # Errors
///
/// Returns [`ValidationError::SelectionOutOfRange`] for the number 0.
pub fn selection_indices(select: &[usize], len: usize) -> Result<Vec<usize>, ValidationError> {
    select
        .iter()
        .map(|&n| {
            n.checked_sub(1)
                .ok_or(ValidationError::SelectionOutOfRange { position: n, len })
        })
        .collect()
}

/// Runs a preview, then moves the selected or all non-matching files.
fn move_files(
    args: &MoveArgs,
    config: &PruneConfig,
    trasher: &dyn Trasher,
    confirm: &mut dyn Confirm,
) -> Result<(), CliError> {
    let mut session = preview(&args.filter, config)?;

    let mode = if args.select.is_empty() {
        MoveMode::All
    } else {
        let indices = selection_indices(&args.select, session.unmatched().len())?;
        session.select(indices)?;
        MoveMode::Selected
    };

    let batch_size = match mode {
        MoveMode::Selected => session.selection().len(),
        MoveMode::All => session.unmatched().len(),
    };

    let mut auto_confirm = AssumeYes;
    let confirm: &mut dyn Confirm = if args.yes || config.confirm.assume_yes {
        &mut auto_confirm
    } else {
        confirm
    };

    let mut sink = ProgressBarSink::new(batch_size);
    let result = match mode {
        MoveMode::Selected => session.move_selected(trasher, confirm, &mut sink),
        MoveMode::All => session.move_all_unmatched(trasher, confirm, &mut sink),
    };
    sink.finish();

    let outcome = match result? {
        MoveResult::Declined => {
            OutputFormatter::info("Cancelled. No files were moved.");
            return Ok(());
        }
        MoveResult::Completed(outcome) => outcome,
    };

    OutputFormatter::move_summary(&outcome);

    if let Some(report_path) = &args.report {
        match BatchReport::new(&args.filter.folder, mode, &outcome).save(report_path) {
            Ok(()) => OutputFormatter::info(&format!("Report saved to {}", report_path.display())),
            Err(e) => OutputFormatter::warning(&format!("Could not save report: {}", e)),
        }
    }

    if mode == MoveMode::Selected {
        OutputFormatter::unmatched_table(session.unmatched());
    }

    if outcome.is_complete_success() {
        Ok(())
    } else {
        Err(CliError::PartialFailure(outcome.error_count()))
    }
}

/// Joins an error with its sources, e.g. `cannot read folder /x: permission denied`.
fn error_chain(error: &dyn std::error::Error) -> String {
    let mut message = error.to_string();
    let mut source = error.source();
    while let Some(cause) = source {
        message.push_str(": ");
        message.push_str(&cause.to_string());
        source = cause.source();
    }
    message
}
