//! Table name filter.
//!
//! Patterns are matched from the start of the table name (a prefix match, not
//! a search anywhere in the name). Patterns written with surrounding slashes,
//! e.g. `/^user_.*/`, have the delimiters stripped before compilation.

use crate::error::{ExportError, Result};
use regex::Regex;

/// Pattern that keeps every table
pub const MATCH_ALL: &str = ".*";

/// Compiled, start-anchored table name filter.
#[derive(Debug, Clone)]
pub struct TableFilter {
    pattern: String,
    regex: Regex,
}

impl TableFilter {
    /// Compiles a table filter.
    ///
    /// # Errors
    /// Returns [`ExportError::InvalidFilter`] when the pattern is not a valid
    /// regular expression.
    ///
    /// # Example
    /// ```rust
    /// use schema_export_core::filter::TableFilter;
    ///
    /// let filter = TableFilter::new("/user_.*/").unwrap();
    /// assert_eq!(filter.pattern(), "user_.*");
    /// assert!(filter.matches("user_roles"));
    /// assert!(!filter.matches("app_user_roles"));
    /// ```
    pub fn new(raw: &str) -> Result<Self> {
        let pattern = strip_delimiters(raw).to_string();
        let regex = Regex::new(&format!("^(?:{})", pattern)).map_err(|source| {
            ExportError::InvalidFilter {
                pattern: pattern.clone(),
                source,
            }
        })?;
        Ok(Self { pattern, regex })
    }

    /// The pattern as compiled, without delimiters or anchoring.
    pub fn pattern(&self) -> &str {
        &self.pattern
    }

    /// Whether the table name matches from its first character.
    pub fn matches(&self, table_name: &str) -> bool {
        self.regex.is_match(table_name)
    }

    /// Keeps the matching names, preserving their order.
    pub fn apply(&self, table_names: Vec<String>) -> Vec<String> {
        table_names
            .into_iter()
            .filter(|name| self.matches(name))
            .collect()
    }
}

/// Strips one pair of `/` delimiters wrapping the whole pattern.
///
/// A lone `/` both starts and ends with the delimiter, so it strips to the
/// empty pattern, which keeps every table.
fn strip_delimiters(raw: &str) -> &str {
    if raw.ends_with('/') {
        if let Some(rest) = raw.strip_prefix('/') {
            return rest.strip_suffix('/').unwrap_or(rest);
        }
    }
    raw
}
