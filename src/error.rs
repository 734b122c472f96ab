//! Typed errors for the scoring core.
//!
//! Validation happens at the catalog boundary: records missing required
//! fields fail with [`SegueError::Schema`], out-of-range values fail with
//! [`SegueError::Domain`]. The scorers never silently clamp or coerce, since
//! clamping would distort similarity semantics. The CLI layer wraps these in
//! `anyhow` for user-facing context.

use thiserror::Error;

/// Main error type for the scoring and sequencing core
#[derive(Debug, Error)]
pub enum SegueError {
    /// A catalog record is missing one or more required fields
    #[error("record '{track}' is missing required fields: {fields:?}")]
    Schema {
        /// Track title, or "<unknown>" when the title itself is missing
        track: String,
        /// Names of every missing field, not just the first
        fields: Vec<String>,
    },

    /// A field value lies outside its documented domain
    #[error("record '{track}': {field} = {value} is out of domain (expected {expected})")]
    Domain {
        track: String,
        field: &'static str,
        value: f64,
        expected: &'static str,
    },

    /// Catalog file could not be read
    #[error("failed to read catalog: {0}")]
    Io(#[from] std::io::Error),

    /// Catalog file could not be parsed
    #[error("failed to parse catalog: {0}")]
    Parse(#[from] serde_json::Error),
}
