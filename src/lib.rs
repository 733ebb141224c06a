//! fileprune - Keep only the files you want in a folder
//!
//! This library lists the files of a folder (optionally with its subfolders),
//! narrows them down by file format, splits them by whether their name
//! contains a given text, and moves the files that do not match to the
//! operating system's trash with per-file error isolation.

pub mod cli;
pub mod config;
pub mod enumerator;
pub mod errors;
pub mod filter;
pub mod format_spec;
pub mod mover;
pub mod output;
pub mod report;
pub mod session;

pub use config::{ConfigError, PruneConfig};
pub use enumerator::{FileRecord, ScanOptions, enumerate};
pub use errors::{EnumerationError, SessionError, TrashError, ValidationError};
pub use filter::{Classification, FilterCriteria, classify};
pub use format_spec::FormatSpec;
pub use mover::{MoveOutcome, NoProgress, ProgressSink, SystemTrash, Trasher, move_batch};
pub use session::{AssumeYes, Confirm, MoveMode, MoveResult, PruneSession};

pub use cli::{Cli, Command, run_cli, run_cli_with};
