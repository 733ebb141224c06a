//! Output formatting and styling module.
//!
//! Provides a centralized interface for all CLI output: colored status
//! messages, the progress bar shown while files are moved, and the table of
//! non-matching files.

use crate::enumerator::FileRecord;
use crate::mover::{MoveOutcome, ProgressSink};
use colored::*;
use indicatif::{ProgressBar, ProgressStyle};
use std::path::Path;

/// Manages all CLI output with consistent styling and formatting.
pub struct OutputFormatter;

impl OutputFormatter {
    /// Prints a success message in green with a checkmark.
    pub fn success(message: &str) {
        println!("{} {}", "✓".green(), message);
    }

    /// Prints an error message in red with an X mark.
    pub fn error(message: &str) {
        eprintln!("{} {}", "✗".red(), message);
    }

    /// Prints a warning message in yellow with a warning symbol.
    pub fn warning(message: &str) {
        eprintln!("{} {}", "⚠".yellow(), message);
    }

    /// Prints an info message in cyan.
    pub fn info(message: &str) {
        println!("{}", message.cyan());
    }

    /// Prints a message without styling.
    pub fn plain(message: &str) {
        println!("{}", message);
    }

    /// Prints a section header.
    pub fn header(header: &str) {
        println!("\n{}", header.bold());
    }

    /// Creates a progress bar for a batch of `total` files.
    ///
    /// # Example
    ///
    /// ```no_run
    /// use fileprune::output::OutputFormatter;
    /// let pb = OutputFormatter::create_progress_bar(100);
    /// pb.inc(1);
    /// pb.finish_and_clear();
    /// ```
    pub fn create_progress_bar(total: u64) -> ProgressBar {
        let pb = ProgressBar::new(total);
        if let Ok(style) =
            ProgressStyle::default_bar().template("{spinner:.cyan} [{bar:40.cyan/blue}] {pos}/{len} {msg}")
        {
            pb.set_style(style.progress_chars("█▓░"));
        }
        pb
    }

    /// Prints the non-matching files as a numbered table.
    ///
    /// Indices are 1-based so they can be passed back to `--select`.
    pub fn unmatched_table(records: &[FileRecord]) {
        Self::header("NON-MATCHING FILES (will be moved to trash)");

        if records.is_empty() {
            println!("{}", "(none)".dimmed());
            return;
        }

        let index_width = records.len().to_string().len().max(1);
        let name_width = records
            .iter()
            .map(|r| r.name.chars().count())
            .max()
            .unwrap_or(0)
            .max(4); // At least "Name" width

        println!(
            "{:>iw$}  {:<nw$}  {}",
            "#".bold(),
            "Name".bold(),
            "Path".bold(),
            iw = index_width,
            nw = name_width
        );
        println!("{}", "-".repeat(index_width + name_width + 10));

        for (i, record) in records.iter().enumerate() {
            println!(
                "{:>iw$}  {:<nw$}  {}",
                i + 1,
                record.name,
                record.path.display().to_string().dimmed(),
                iw = index_width,
                nw = name_width
            );
        }
    }

    /// Prints the completion summary of a batch, listing each failure.
    pub fn move_summary(outcome: &MoveOutcome) {
        let summary = outcome.summary();
        if outcome.is_complete_success() {
            Self::success(&summary);
        } else {
            Self::warning(&summary);
            for failure in &outcome.failures {
                eprintln!("    - {}: {}", failure.path.display(), failure.reason);
            }
        }
    }
}

/// Drives an `indicatif` progress bar from batch notifications.
pub struct ProgressBarSink {
    bar: ProgressBar,
}

impl ProgressBarSink {
    /// Creates a sink whose bar expects `total` items.
    pub fn new(total: usize) -> Self {
        Self {
            bar: OutputFormatter::create_progress_bar(total as u64),
        }
    }

    /// Removes the bar from the terminal once the batch is done.
    pub fn finish(self) {
        self.bar.finish_and_clear();
    }
}

impl ProgressSink for ProgressBarSink {
    fn item_moved(&mut self, _index: usize, path: &Path) {
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_default();
        self.bar.set_message(name);
    }

    fn progress(&mut self, processed: usize, _total: usize) {
        self.bar.set_position(processed as u64);
    }
}
