/// JSON reports of trash batches.
///
/// A report records which files were moved and which failed, with the
/// failure reason, so a run can be audited after the terminal is gone.
use crate::mover::MoveOutcome;
use crate::session::MoveMode;
use serde_json::{Value, json};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// Errors that can occur while writing a report.
#[derive(thiserror::Error, Debug)]
pub enum ReportError {
    #[error("Failed to serialize report: {0}")]
    Serialize(#[from] serde_json::Error),

    #[error("Failed to write report {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// A finished batch, ready to be written to disk.
#[derive(Debug, Clone)]
pub struct BatchReport<'a> {
    /// RFC 3339 timestamp of when the batch finished.
    pub timestamp: String,
    pub folder: &'a Path,
    pub mode: MoveMode,
    pub outcome: &'a MoveOutcome,
}

impl<'a> BatchReport<'a> {
    /// Creates a report stamped with the current UTC time.
    ///
    /// # Arguments
    ///
    /// * `folder` - The folder the batch ran in
    /// * `mode` - Whether the selection or the whole list was moved
    /// * `outcome` - The result of the batch
    pub fn new(folder: &'a Path, mode: MoveMode, outcome: &'a MoveOutcome) -> Self {
        Self {
            timestamp: chrono::Utc::now().to_rfc3339(),
            folder,
            mode,
            outcome,
        }
    }

    /// Renders the report as a JSON object.
    pub fn to_json(&self) -> Value {
        json!({
            "timestamp": self.timestamp,
            "folder": self.folder.to_string_lossy().to_string(),
            "mode": self.mode.as_str(),
            "moved_count": self.outcome.moved_count(),
            "error_count": self.outcome.error_count(),
            "moved": self.outcome.moved.iter()
                .map(|p| p.to_string_lossy().to_string())
                .collect::<Vec<_>>(),
            "failed": self.outcome.failures.iter().map(|f| {
                json!({
                    "path": f.path.to_string_lossy().to_string(),
                    "reason": f.reason,
                })
            }).collect::<Vec<_>>(),
        })
    }

    /// Writes the report as pretty-printed JSON.
    pub fn save(&self, path: &Path) -> Result<(), ReportError> {
        let json_string = serde_json::to_string_pretty(&self.to_json())?;
        fs::write(path, json_string).map_err(|e| ReportError::Write {
            path: path.to_path_buf(),
            source: e,
        })?;
        log::info!("Wrote batch report to {}", path.display());
        Ok(())
    }
}
