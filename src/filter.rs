//! Classification of enumerated files by a name substring.
//!
//! Files whose name contains the configured substring (case-insensitively)
//! are "matched" and kept; the rest are "unmatched" and become candidates
//! for the trash.

use crate::enumerator::FileRecord;
use crate::errors::ValidationError;
use crate::format_spec::FormatSpec;

/// An immutable snapshot of the filter inputs for one preview.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterCriteria {
    name_substring: String,
    pub formats: FormatSpec,
    pub recursive: bool,
}

impl FilterCriteria {
    /// Builds criteria from raw user input.
    ///
    /// The name substring is trimmed. The format list is validated with
    /// [`FormatSpec::parse`].
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::EmptyFormatToken`] for a malformed format list.
    pub fn new(
        name_substring: &str,
        raw_formats: &str,
        recursive: bool,
    ) -> Result<Self, ValidationError> {
        Ok(Self {
            name_substring: name_substring.trim().to_string(),
            formats: FormatSpec::parse(raw_formats)?,
            recursive,
        })
    }

    /// The trimmed substring as entered.
    pub fn name_substring(&self) -> &str {
        &self.name_substring
    }

    /// Returns true if `name` contains the substring, ignoring case.
    ///
    /// An empty substring matches every name.
    pub fn matches_name(&self, name: &str) -> bool {
        name.to_lowercase()
            .contains(&self.name_substring.to_lowercase())
    }
}

/// The partition of an enumeration into kept and trash-candidate files.
///
/// Both lists preserve enumeration order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Classification {
    pub matched: Vec<FileRecord>,
    pub unmatched: Vec<FileRecord>,
}

impl Classification {
    /// The status line shown after a preview.
    pub fn status_line(&self) -> String {
        status_line(self.matched.len(), self.unmatched.len())
    }

    /// Number of files classified.
    pub fn total(&self) -> usize {
        self.matched.len() + self.unmatched.len()
    }
}

/// Splits `records` into matched and unmatched by the criteria's name substring.
pub fn classify(records: Vec<FileRecord>, criteria: &FilterCriteria) -> Classification {
    let (matched, unmatched): (Vec<_>, Vec<_>) = records
        .into_iter()
        .partition(|record| criteria.matches_name(&record.name));

    log::debug!(
        "Classified {} matching and {} non-matching files for '{}'",
        matched.len(),
        unmatched.len(),
        criteria.name_substring()
    );

    Classification { matched, unmatched }
}

/// Formats the preview status line for the given counts.
pub fn status_line(matched: usize, unmatched: usize) -> String {
    format!(
        "found {} matching files, {} non-matching files (will be moved to trash)",
        matched, unmatched
    )
}
