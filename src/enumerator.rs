//! Discovery of candidate files inside a folder.
//!
//! Lists the direct children of a folder, or walks the whole subtree, and
//! keeps the regular files whose extension passes a [`FormatSpec`].
//! Symlinks pointing at regular files are kept; symlinked directories are
//! only descended when [`ScanOptions::follow_symlinks`] is set.

use crate::errors::EnumerationError;
use crate::format_spec::FormatSpec;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use walkdir::{DirEntry, WalkDir};

/// A file found during enumeration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileRecord {
    /// The final path component.
    pub name: String,
    /// The full path, rooted at the enumerated folder.
    pub path: PathBuf,
}

impl FileRecord {
    /// Builds a record from a path, taking the name from its last component.
    pub fn from_path(path: PathBuf) -> Self {
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_default();
        Self { name, path }
    }
}

/// Tuning knobs for a scan, usually coming from the configuration file.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ScanOptions {
    /// Skip dot-files, and do not descend into dot-directories.
    pub skip_hidden: bool,
    /// Descend into symlinked directories during recursive walks.
    pub follow_symlinks: bool,
}

/// Enumerates the files of `folder` that pass `spec`.
///
/// In non-recursive mode only the direct children of `folder` are listed.
/// In recursive mode the subtree is walked depth-first. Entries are sorted
/// by file name within each directory so the order is stable for a given
/// snapshot of the filesystem. Directories are never returned.
///
/// Subdirectories that cannot be read during a recursive walk are skipped
/// with a warning.
///
/// # Errors
///
/// Returns an [`EnumerationError`] if `folder` does not exist, is not a
/// directory, or cannot be listed.
pub fn enumerate(
    folder: &Path,
    recursive: bool,
    spec: &FormatSpec,
    options: ScanOptions,
) -> Result<Vec<FileRecord>, EnumerationError> {
    check_folder(folder)?;

    let records = if recursive {
        walk_recursive(folder, spec, options)
    } else {
        list_direct(folder, spec, options)?
    };

    log::debug!(
        "Enumerated {} candidate files in {} (recursive: {})",
        records.len(),
        folder.display(),
        recursive
    );

    Ok(records)
}

/// Verifies that `folder` exists, is a directory, and can be listed.
fn check_folder(folder: &Path) -> Result<(), EnumerationError> {
    let metadata = fs::metadata(folder).map_err(|e| match e.kind() {
        io::ErrorKind::NotFound => EnumerationError::NotFound(folder.to_path_buf()),
        _ => EnumerationError::Unreadable {
            path: folder.to_path_buf(),
            source: e,
        },
    })?;

    if !metadata.is_dir() {
        return Err(EnumerationError::NotADirectory(folder.to_path_buf()));
    }

    fs::read_dir(folder).map_err(|e| EnumerationError::Unreadable {
        path: folder.to_path_buf(),
        source: e,
    })?;

    Ok(())
}

fn list_direct(
    folder: &Path,
    spec: &FormatSpec,
    options: ScanOptions,
) -> Result<Vec<FileRecord>, EnumerationError> {
    let entries = fs::read_dir(folder).map_err(|e| EnumerationError::Unreadable {
        path: folder.to_path_buf(),
        source: e,
    })?;

    let mut paths: Vec<PathBuf> = entries
        .filter_map(|entry| match entry {
            Ok(entry) => Some(entry.path()),
            Err(e) => {
                log::warn!("Skipping unreadable entry in {}: {}", folder.display(), e);
                None
            }
        })
        .collect();
    paths.sort();

    let records = paths
        .into_iter()
        // `is_file` follows symlinks, so links to regular files are kept.
        .filter(|path| path.is_file())
        .map(FileRecord::from_path)
        .filter(|record| !(options.skip_hidden && is_hidden_name(&record.name)))
        .filter(|record| accept(record, spec))
        .collect();

    Ok(records)
}

fn walk_recursive(folder: &Path, spec: &FormatSpec, options: ScanOptions) -> Vec<FileRecord> {
    let walker = WalkDir::new(folder)
        .follow_links(options.follow_symlinks)
        .sort_by_file_name()
        .into_iter()
        .filter_entry(|entry| entry.depth() == 0 || !(options.skip_hidden && is_hidden(entry)));

    let mut records = Vec::new();
    for entry in walker {
        let entry = match entry {
            Ok(entry) => entry,
            Err(e) => {
                log::warn!("Skipping unreadable path during walk: {}", e);
                continue;
            }
        };

        if !is_regular_file(&entry) {
            continue;
        }

        let record = FileRecord::from_path(entry.into_path());
        if accept(&record, spec) {
            records.push(record);
        }
    }

    records
}

fn is_regular_file(entry: &DirEntry) -> bool {
    let file_type = entry.file_type();
    file_type.is_file() || (file_type.is_symlink() && entry.path().is_file())
}

fn is_hidden(entry: &DirEntry) -> bool {
    is_hidden_name(&entry.file_name().to_string_lossy())
}

fn is_hidden_name(name: &str) -> bool {
    name.starts_with('.')
}

fn accept(record: &FileRecord, spec: &FormatSpec) -> bool {
    let keep = spec.matches(&record.name);
    log::trace!(
        "{} {}",
        if keep { "Keeping" } else { "Skipping" },
        record.path.display()
    );
    keep
}
