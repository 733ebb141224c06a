//! Error types shared by the preview and trash workflows.
//!
//! Errors fall into three families:
//! - [`ValidationError`]: bad input or an unmet precondition, reported before any work starts
//! - [`EnumerationError`]: the selected folder could not be listed
//! - [`TrashError`]: a single file could not be moved to the trash (never fatal for a batch)

use std::io;
use std::path::PathBuf;

/// Input or precondition problems detected before any filesystem work.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// No folder has been chosen yet.
    #[error("please choose a folder first")]
    MissingFolder,

    /// The format list contains an empty entry (e.g. `"txt,,jpg"` or `"txt,"`).
    #[error("format list '{raw}' contains an empty entry")]
    EmptyFormatToken { raw: String },

    /// A selected-move was requested with nothing selected.
    #[error("please select the files to move first")]
    NoSelection,

    /// A move-all was requested while the unmatched list is empty.
    #[error("there are no files to move")]
    NothingToMove,

    /// A selected entry does not exist in the unmatched list.
    ///
    /// `position` is 1-based, matching the numbering shown to the user.
    #[error("selection {position} is out of range (the list has {len} entries)")]
    SelectionOutOfRange { position: usize, len: usize },
}

/// The folder given to a preview could not be enumerated.
#[derive(thiserror::Error, Debug)]
pub enum EnumerationError {
    #[error("folder does not exist: {0}")]
    NotFound(PathBuf),

    #[error("not a folder: {0}")]
    NotADirectory(PathBuf),

    #[error("cannot read folder {path}")]
    Unreadable {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// A single file could not be moved to the trash.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[error("failed to move {path} to the trash: {reason}")]
pub struct TrashError {
    pub path: PathBuf,
    pub reason: String,
}

impl TrashError {
    /// Creates a failure record for `path`.
    pub fn new(path: impl Into<PathBuf>, reason: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            reason: reason.into(),
        }
    }
}

/// Errors surfaced by the view-model operations in [`crate::session`].
#[derive(thiserror::Error, Debug)]
pub enum SessionError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Enumeration(#[from] EnumerationError),
}

impl SessionError {
    /// Returns true when the error is a precondition/validation warning
    /// rather than a filesystem failure.
    pub fn is_warning(&self) -> bool {
        matches!(self, Self::Validation(_))
    }
}
