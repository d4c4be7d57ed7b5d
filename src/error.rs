//! Error types for schema linting.
//!
//! These are hard failures only. Anything the linter finds *inside* a schema
//! is reported as an [`Issue`](crate::Issue), never as an error.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that abort a lint run before a result is produced.
#[derive(Debug, Error)]
pub enum LintError {
    // IO errors (exit code 4)
    #[error("file not found: {path}")]
    FileNotFound { path: PathBuf },

    #[error("cannot read {path}: {source}")]
    ReadError {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[cfg(feature = "remote")]
    #[error("failed to fetch {url}: {source}")]
    NetworkError {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    // Decode errors (exit code 3)
    #[error("failed to parse JSON Schema: {source}")]
    InvalidJson {
        #[source]
        source: serde_json::Error,
    },

    #[error("invalid schema at {path}: {message}")]
    InvalidSchema { path: String, message: String },

    // Configuration errors (exit code 3)
    #[error("unknown profile: {value} (use 'default' or 'scale')")]
    UnknownProfile { value: String },

    #[error("unknown property case: {value} (use none, camelCase, snake_case, kebab-case, or PascalCase)")]
    UnknownPropertyCase { value: String },

    #[error("invalid config file {path}: {source}")]
    ConfigParse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}

impl LintError {
    /// Returns the exit code for this error type.
    ///
    /// Codes 0-2 belong to lint outcomes, so hard failures start at 3.
    pub fn exit_code(&self) -> i32 {
        match self {
            LintError::FileNotFound { .. } | LintError::ReadError { .. } => 4,
            #[cfg(feature = "remote")]
            LintError::NetworkError { .. } => 4,
            _ => 3,
        }
    }
}
