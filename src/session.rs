//! The view model behind the preview and trash actions.
//!
//! A [`PruneSession`] owns the chosen folder, the criteria of the last
//! preview, the displayed list of unmatched files, and the current
//! selection. Each action validates its preconditions, does the work through
//! the pure functions in [`crate::enumerator`], [`crate::filter`] and
//! [`crate::mover`], and then applies the result to the view.

use crate::enumerator::{self, FileRecord, ScanOptions};
use crate::errors::{EnumerationError, SessionError, ValidationError};
use crate::filter::{self, Classification, FilterCriteria};
use crate::mover::{self, MoveOutcome, ProgressSink, Trasher};
use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

/// Asks the user a yes/no question before a destructive action.
pub trait Confirm {
    /// Returns true if the user agreed.
    fn confirm(&mut self, prompt: &str) -> bool;
}

impl<F> Confirm for F
where
    F: FnMut(&str) -> bool,
{
    fn confirm(&mut self, prompt: &str) -> bool {
        self(prompt)
    }
}

/// Agrees to every prompt without asking.
#[derive(Debug, Default, Clone, Copy)]
pub struct AssumeYes;

impl Confirm for AssumeYes {
    fn confirm(&mut self, prompt: &str) -> bool {
        log::debug!("Auto-confirmed: {}", prompt);
        true
    }
}

/// Which part of the unmatched list a move acts on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveMode {
    /// Only the selected entries.
    Selected,
    /// Every entry in the list.
    All,
}

impl MoveMode {
    /// The lower-case name used in reports.
    pub fn as_str(&self) -> &'static str {
        match self {
            MoveMode::Selected => "selected",
            MoveMode::All => "all",
        }
    }
}

/// What happened when a move was requested.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MoveResult {
    /// The user declined the confirmation; nothing was touched.
    Declined,
    /// The batch ran to completion.
    Completed(MoveOutcome),
}

/// Runs a preview without touching any view state.
///
/// # Errors
///
/// Returns an [`EnumerationError`] if `folder` cannot be listed.
pub fn run_preview(
    folder: &Path,
    criteria: &FilterCriteria,
    scan: ScanOptions,
) -> Result<Classification, EnumerationError> {
    let records = enumerator::enumerate(folder, criteria.recursive, &criteria.formats, scan)?;
    Ok(filter::classify(records, criteria))
}

/// Prompt for a selected-move of `count` files.
pub fn selected_prompt(count: usize) -> String {
    format!("Move the {} selected files to the trash?", count)
}

/// Prompt for a move-all of `count` files.
pub fn all_prompt(count: usize) -> String {
    format!("Move all {} non-matching files to the trash?", count)
}

/// State shared by the preview and move actions.
#[derive(Debug, Default)]
pub struct PruneSession {
    folder: Option<PathBuf>,
    scan: ScanOptions,
    criteria: Option<FilterCriteria>,
    unmatched: Vec<FileRecord>,
    selection: BTreeSet<usize>,
    status: String,
}

impl PruneSession {
    /// Creates an empty session with no folder and a `"Ready"` status.
    ///
    /// # Arguments
    ///
    /// * `scan` - Options applied to every preview of this session
    pub fn new(scan: ScanOptions) -> Self {
        Self {
            scan,
            status: "Ready".to_string(),
            ..Default::default()
        }
    }

    /// Chooses the folder that previews and moves act on.
    pub fn set_folder(&mut self, folder: impl Into<PathBuf>) {
        self.folder = Some(folder.into());
    }

    /// The chosen folder, if any.
    pub fn folder(&self) -> Option<&Path> {
        self.folder.as_deref()
    }

    /// The criteria snapshot of the last successful preview.
    pub fn criteria(&self) -> Option<&FilterCriteria> {
        self.criteria.as_ref()
    }

    /// The displayed list of non-matching files.
    pub fn unmatched(&self) -> &[FileRecord] {
        &self.unmatched
    }

    /// Indices into [`Self::unmatched`] that are currently selected.
    pub fn selection(&self) -> &BTreeSet<usize> {
        &self.selection
    }

    /// The status line of the last preview or move.
    pub fn status(&self) -> &str {
        &self.status
    }

    /// Previews the chosen folder against the given raw filter inputs.
    ///
    /// Inputs are validated first; a validation failure leaves the view
    /// unchanged. Otherwise the list is cleared before enumeration, so an
    /// enumeration failure leaves it empty. On success the list holds the
    /// unmatched files and the status line reports both counts.
    ///
    /// # Errors
    ///
    /// - [`ValidationError::MissingFolder`] if no folder is set
    /// - [`ValidationError::EmptyFormatToken`] for a malformed format list
    /// - [`SessionError::Enumeration`] if the folder cannot be listed
    pub fn preview(
        &mut self,
        name_substring: &str,
        raw_formats: &str,
        recursive: bool,
    ) -> Result<Classification, SessionError> {
        let folder = self.folder.clone().ok_or(ValidationError::MissingFolder)?;
        let criteria = FilterCriteria::new(name_substring, raw_formats, recursive)?;

        self.unmatched.clear();
        self.selection.clear();

        let classification = run_preview(&folder, &criteria, self.scan)?;

        self.status = classification.status_line();
        self.unmatched = classification.unmatched.clone();
        self.criteria = Some(criteria);

        Ok(classification)
    }

    /// Replaces the selection with the given list indices.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::SelectionOutOfRange`], with the 1-based
    /// position of the offending entry, if any index is past
    /// the end of the list; the selection is left unchanged in that case.
    pub fn select(
        &mut self,
        indices: impl IntoIterator<Item = usize>,
    ) -> Result<(), ValidationError> {
        let len = self.unmatched.len();
        let selection = indices
            .into_iter()
            .map(|index| {
                if index < len {
                    Ok(index)
                } else {
                    Err(ValidationError::SelectionOutOfRange {
                        position: index + 1,
                        len,
                    })
                }
            })
            .collect::<Result<BTreeSet<_>, _>>()?;

        self.selection = selection;
        Ok(())
    }

    /// Deselects every entry.
    pub fn clear_selection(&mut self) {
        self.selection.clear();
    }

    /// Moves the selected files to the trash.
    ///
    /// Each moved file is removed from the list; files that failed to move
    /// stay listed and selected.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::MissingFolder`] or
    /// [`ValidationError::NoSelection`] when the preconditions do not hold.
    pub fn move_selected(
        &mut self,
        trasher: &dyn Trasher,
        confirm: &mut dyn Confirm,
        sink: &mut dyn ProgressSink,
    ) -> Result<MoveResult, ValidationError> {
        if self.folder.is_none() {
            return Err(ValidationError::MissingFolder);
        }
        if self.selection.is_empty() {
            return Err(ValidationError::NoSelection);
        }

        if !confirm.confirm(&selected_prompt(self.selection.len())) {
            log::info!("Selected move declined");
            return Ok(MoveResult::Declined);
        }

        let list_indices: Vec<usize> = self.selection.iter().copied().collect();
        let paths: Vec<PathBuf> = list_indices
            .iter()
            .map(|&i| self.unmatched[i].path.clone())
            .collect();

        let mut view_sink = ViewSink::new(sink);
        let outcome = mover::move_batch(&paths, trasher, &mut view_sink);

        let removed: BTreeSet<usize> = view_sink
            .moved_batch_indices
            .iter()
            .map(|&batch_index| list_indices[batch_index])
            .collect();
        self.remove_entries(&removed);

        self.status = outcome.summary();
        Ok(MoveResult::Completed(outcome))
    }

    /// Moves every listed file to the trash, then clears the list.
    ///
    /// The list is cleared even when some files failed to move; those files
    /// remain on disk and reappear on the next preview.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::MissingFolder`] or
    /// [`ValidationError::NothingToMove`] when the preconditions do not hold.
    pub fn move_all_unmatched(
        &mut self,
        trasher: &dyn Trasher,
        confirm: &mut dyn Confirm,
        sink: &mut dyn ProgressSink,
    ) -> Result<MoveResult, ValidationError> {
        if self.folder.is_none() {
            return Err(ValidationError::MissingFolder);
        }
        if self.unmatched.is_empty() {
            return Err(ValidationError::NothingToMove);
        }

        if !confirm.confirm(&all_prompt(self.unmatched.len())) {
            log::info!("Move of all non-matching files declined");
            return Ok(MoveResult::Declined);
        }

        let paths: Vec<PathBuf> = self.unmatched.iter().map(|r| r.path.clone()).collect();
        let outcome = mover::move_batch(&paths, trasher, sink);

        self.unmatched.clear();
        self.selection.clear();

        self.status = outcome.summary();
        Ok(MoveResult::Completed(outcome))
    }

    /// Drops the given list indices and re-indexes the remaining selection.
    fn remove_entries(&mut self, removed: &BTreeSet<usize>) {
        let old = std::mem::take(&mut self.unmatched);
        let old_selection = std::mem::take(&mut self.selection);

        for (index, record) in old.into_iter().enumerate() {
            if removed.contains(&index) {
                continue;
            }
            if old_selection.contains(&index) {
                self.selection.insert(self.unmatched.len());
            }
            self.unmatched.push(record);
        }
    }
}

/// Forwards progress to the caller's sink and records which batch items moved.
struct ViewSink<'a, S: ProgressSink + ?Sized> {
    inner: &'a mut S,
    moved_batch_indices: Vec<usize>,
}

impl<'a, S: ProgressSink + ?Sized> ViewSink<'a, S> {
    fn new(inner: &'a mut S) -> Self {
        Self {
            inner,
            moved_batch_indices: Vec::new(),
        }
    }
}

impl<S: ProgressSink + ?Sized> ProgressSink for ViewSink<'_, S> {
    fn item_moved(&mut self, index: usize, path: &Path) {
        self.moved_batch_indices.push(index);
        self.inner.item_moved(index, path);
    }

    fn progress(&mut self, processed: usize, total: usize) {
        self.inner.progress(processed, total);
    }
}
