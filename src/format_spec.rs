//! Parsing and matching of comma-separated file format lists.
//!
//! A format list such as `"txt, JPG , .docx"` is normalized into a set of
//! lower-cased extensions without their leading dot. An empty list matches
//! every file.

use crate::errors::ValidationError;
use std::collections::BTreeSet;
use std::fmt;
use std::path::Path;
use std::str::FromStr;

/// A normalized set of file extensions used as an inclusion filter.
///
/// Never contains empty strings. An empty set means "any format".
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormatSpec {
    extensions: BTreeSet<String>,
}

impl FormatSpec {
    /// Creates a spec that matches every file.
    pub fn any() -> Self {
        Self::default()
    }

    /// Parses a raw, comma-separated format list.
    ///
    /// Each entry is trimmed, lower-cased and stripped of a single leading dot.
    /// A blank input yields the match-all spec.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::EmptyFormatToken`] if any entry is empty,
    /// such as a trailing comma, a doubled comma, or a lone `.`.
    ///
    /// # Examples
    ///
    /// ```
    /// use fileprune::format_spec::FormatSpec;
    ///
    /// let spec = FormatSpec::parse("txt, JPG , .docx").unwrap();
    /// assert!(spec.matches("photo.jpg"));
    /// assert!(!spec.matches("notes.md"));
    /// assert!(FormatSpec::parse("txt,,jpg").is_err());
    /// ```
    pub fn parse(raw: &str) -> Result<Self, ValidationError> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Ok(Self::any());
        }

        let mut extensions = BTreeSet::new();
        for token in trimmed.split(',') {
            let token = token.trim().to_lowercase();
            let ext = token.strip_prefix('.').unwrap_or(token.as_str());
            if ext.is_empty() {
                return Err(ValidationError::EmptyFormatToken {
                    raw: raw.to_string(),
                });
            }
            extensions.insert(ext.to_string());
        }

        Ok(Self { extensions })
    }

    /// Returns true if this spec places no restriction on formats.
    pub fn is_empty(&self) -> bool {
        self.extensions.is_empty()
    }

    /// Returns the number of distinct extensions.
    pub fn len(&self) -> usize {
        self.extensions.len()
    }

    /// Returns true if `ext` (lower-case, without a leading dot) is listed.
    pub fn contains(&self, ext: &str) -> bool {
        self.extensions.contains(ext)
    }

    /// Iterates the extensions in sorted order.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.extensions.iter().map(String::as_str)
    }

    /// Checks whether a file name passes this format filter.
    ///
    /// The extension is compared case-insensitively. Leading dots are not
    /// extension separators, so dot-files such as `.bashrc` or `..txt` have
    /// the empty extension, which only the match-all spec accepts.
    pub fn matches(&self, file_name: &str) -> bool {
        if self.is_empty() {
            return true;
        }

        let ext = Path::new(file_name.trim_start_matches('.'))
            .extension()
            .map(|e| e.to_string_lossy().to_lowercase())
            .unwrap_or_default();

        self.extensions.contains(&ext)
    }
}

/// Renders the canonical form: sorted extensions joined by `", "`.
impl fmt::Display for FormatSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let joined: Vec<&str> = self.iter().collect();
        write!(f, "{}", joined.join(", "))
    }
}

impl FromStr for FormatSpec {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}
