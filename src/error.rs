use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// A raw field was present but could not be converted to its declared type.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("field `{field}` expected {expected}, found {found}")]
pub struct ConversionError {
    /// Source key in the raw record (e.g. `vote_average`).
    pub field: &'static str,
    pub expected: &'static str,
    /// JSON kind or offending literal that was rejected.
    pub found: String,
}

/// Errors surfaced while materializing the movie dataset.
///
/// Any of these aborts the whole load; no partial dataset is ever produced.
#[derive(Debug, Error)]
pub enum DatasetLoadError {
    /// The dataset file is missing or unreadable.
    #[error("failed to open dataset {}: {source}", .path.display())]
    Open {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    /// The file is not a valid gzip stream.
    #[error("failed to decompress dataset {}: {source}", .path.display())]
    Decompress {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    /// The decompressed payload is not valid JSON.
    #[error("failed to parse dataset {}: {source}", .path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("dataset {} must be a JSON array, found {found}", .path.display())]
    NotAnArray { path: PathBuf, found: &'static str },
    #[error("dataset {} entry {index} must be a JSON object, found {found}", .path.display())]
    NotAnObject {
        path: PathBuf,
        index: usize,
        found: &'static str,
    },
    /// A record field could not be converted.
    #[error("dataset {} entry {index}: {source}", .path.display())]
    Conversion {
        path: PathBuf,
        index: usize,
        #[source]
        source: ConversionError,
    },
}

/// Invalid library configuration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("validation error: {0}")]
    Validation(String),
}
