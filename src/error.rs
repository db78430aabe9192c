//! Error types for the check

use std::path::PathBuf;

use thiserror::Error;

/// Main error type for the check
///
/// Every variant ends up as a single UNKNOWN status line; the `Display`
/// output is what the monitoring system sees.
#[derive(Error, Debug)]
pub enum Error {
    /// Threshold range could not be parsed
    #[error("invalid range: {0}")]
    Parse(#[from] RangeError),

    /// Resource failed to produce metrics
    #[error("{0}")]
    Probe(#[from] ProbeError),

    /// Metric could not be bound to a context
    #[error("configuration error: {0}")]
    Configuration(String),
}

/// Range syntax errors
#[derive(Error, Debug, Clone, PartialEq)]
pub enum RangeError {
    /// A bound is not a number
    #[error("'{0}' is not a number")]
    InvalidNumber(String),

    /// More than one `:` separator
    #[error("'{0}' contains more than one ':'")]
    TooManySeparators(String),

    /// A bound parsed to NaN or infinity
    #[error("bound '{0}' must be finite")]
    NonFiniteBound(String),

    /// Start bound lies above end bound
    #[error("start {start} must not be greater than end {end}")]
    StartGreaterThanEnd { start: f64, end: f64 },
}

/// Probe errors
#[derive(Error, Debug)]
pub enum ProbeError {
    /// Glob pattern is malformed
    #[error("invalid pattern '{pattern}': {reason}")]
    InvalidPattern { pattern: String, reason: String },

    /// Nothing matched the glob pattern
    #[error("no journal file matches {pattern}")]
    NoMatch { pattern: String },

    /// A directory on the way to the journal could not be read
    #[error("cannot read {}: {source}", path.display())]
    Unreadable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Reading file metadata failed
    #[error("cannot stat {}: {source}", path.display())]
    Metadata {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Result type alias
pub type Result<T> = std::result::Result<T, Error>;
