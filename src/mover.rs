//! Batch move of files to the platform trash.
//!
//! Each path is handled on its own: a failure is logged and counted, and the
//! batch carries on with the next path. Progress is reported after every
//! item through a [`ProgressSink`].

use crate::errors::TrashError;
use std::path::{Path, PathBuf};

/// The capability of moving a single path to the trash.
pub trait Trasher {
    /// Moves `path` to the trash.
    ///
    /// # Errors
    ///
    /// Returns a [`TrashError`] if the path is inaccessible, already gone, or
    /// the platform has no usable trash.
    fn send_to_trash(&self, path: &Path) -> Result<(), TrashError>;
}

/// The operating system's trash or recycle bin, via the `trash` crate.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemTrash;

impl Trasher for SystemTrash {
    fn send_to_trash(&self, path: &Path) -> Result<(), TrashError> {
        trash::delete(path).map_err(|e| TrashError::new(path, e.to_string()))
    }
}

/// Receives per-item notifications while a batch runs.
///
/// Both methods default to doing nothing.
pub trait ProgressSink {
    /// The item at `index` in the batch was moved to the trash.
    fn item_moved(&mut self, index: usize, path: &Path) {
        let _ = (index, path);
    }

    /// `processed` of `total` items have been attempted so far.
    fn progress(&mut self, processed: usize, total: usize) {
        let _ = (processed, total);
    }
}

/// A sink that ignores every notification.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoProgress;

impl ProgressSink for NoProgress {}

/// The result of one batch: which paths were moved and which failed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MoveOutcome {
    /// Paths moved to the trash, in batch order.
    pub moved: Vec<PathBuf>,
    /// Per-item failures, in batch order.
    pub failures: Vec<TrashError>,
}

impl MoveOutcome {
    /// Number of files that reached the trash.
    pub fn moved_count(&self) -> usize {
        self.moved.len()
    }

    /// Number of files that failed to move.
    pub fn error_count(&self) -> usize {
        self.failures.len()
    }

    /// Number of items attempted.
    pub fn total(&self) -> usize {
        self.moved_count() + self.error_count()
    }

    /// Returns true if no item failed.
    pub fn is_complete_success(&self) -> bool {
        self.failures.is_empty()
    }

    /// The completion summary, e.g. `"moved 3, failed 1"`.
    pub fn summary(&self) -> String {
        format!(
            "moved {}, failed {}",
            self.moved_count(),
            self.error_count()
        )
    }
}

/// Moves every path in `paths` to the trash, strictly in order.
///
/// A failure never aborts the batch. After each item, successful or not,
/// `sink.progress` is called with the running count; successful items are
/// also announced through `sink.item_moved`.
///
/// # Examples
///
/// ```no_run
/// use fileprune::mover::{move_batch, NoProgress, SystemTrash};
/// use std::path::PathBuf;
///
/// let paths = vec![PathBuf::from("/tmp/old.log")];
/// let outcome = move_batch(&paths, &SystemTrash, &mut NoProgress);
/// println!("{}", outcome.summary());
/// ```
pub fn move_batch(
    paths: &[PathBuf],
    trasher: &dyn Trasher,
    sink: &mut dyn ProgressSink,
) -> MoveOutcome {
    let total = paths.len();
    let mut outcome = MoveOutcome::default();

    for (index, path) in paths.iter().enumerate() {
        match trasher.send_to_trash(path) {
            Ok(()) => {
                log::info!("Moved {} to the trash", path.display());
                sink.item_moved(index, path);
                outcome.moved.push(path.clone());
            }
            Err(e) => {
                log::warn!("Could not move {} to the trash: {}", path.display(), e.reason);
                outcome.failures.push(e);
            }
        }

        sink.progress(index + 1, total);
    }

    outcome
}
