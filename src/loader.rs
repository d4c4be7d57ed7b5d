//! Schema loading from files, strings, and HTTP URLs.

use std::path::{Path, PathBuf};

use serde_json::Value;

use crate::error::LintError;

#[cfg(feature = "remote")]
use std::time::Duration;

/// Default timeout for HTTP requests (10 seconds).
#[cfg(feature = "remote")]
const HTTP_TIMEOUT: Duration = Duration::from_secs(10);

/// Load a schema from a file path.
///
/// # Errors
///
/// Returns `LintError::FileNotFound` if the file doesn't exist,
/// or `LintError::InvalidJson` if the file isn't valid JSON.
pub fn load_schema(path: &Path) -> Result<Value, LintError> {
    if !path.exists() {
        return Err(LintError::FileNotFound {
            path: path.to_path_buf(),
        });
    }

    let content = std::fs::read(path).map_err(|source| LintError::ReadError {
        path: path.to_path_buf(),
        source,
    })?;

    serde_json::from_slice(&content).map_err(|source| LintError::InvalidJson { source })
}

/// Load a schema from a JSON string.
///
/// # Errors
///
/// Returns `LintError::InvalidJson` if the string isn't valid JSON.
pub fn load_schema_str(content: &str) -> Result<Value, LintError> {
    serde_json::from_str(content).map_err(|source| LintError::InvalidJson { source })
}

/// Load a schema from an HTTP/HTTPS URL.
///
/// Requires the `remote` feature (enabled by default).
///
/// # Errors
///
/// Returns `LintError::NetworkError` if the request fails or returns an
/// error status, or `LintError::InvalidJson` if the body isn't valid JSON.
#[cfg(feature = "remote")]
pub fn load_schema_url(url: &str) -> Result<Value, LintError> {
    let network_error = |source| LintError::NetworkError {
        url: url.to_string(),
        source,
    };

    let client = reqwest::blocking::Client::builder()
        .timeout(HTTP_TIMEOUT)
        .build()
        .map_err(network_error)?;

    let body = client
        .get(url)
        .send()
        .and_then(|response| response.error_for_status())
        .and_then(|response| response.bytes())
        .map_err(network_error)?;

    serde_json::from_slice(&body).map_err(|source| LintError::InvalidJson { source })
}

/// Check if a string looks like a URL (starts with http:// or https://).
pub fn is_url(s: &str) -> bool {
    s.starts_with("http://") || s.starts_with("https://")
}

/// Load a schema from a file path or, with the `remote` feature, a URL.
///
/// # Errors
///
/// Returns the errors of [`load_schema`] or `load_schema_url`.
pub fn load_schema_auto(source: &str) -> Result<Value, LintError> {
    #[cfg(feature = "remote")]
    if is_url(source) {
        return load_schema_url(source);
    }

    load_schema(Path::new(source))
}

/// Collect the schema files named by `path`.
///
/// A file is returned as-is whatever its extension; a directory yields every
/// `.json` file below it, sorted. Unreadable directories are skipped.
pub fn collect_schema_files(path: &Path) -> Vec<PathBuf> {
    if !path.is_dir() {
        return vec![path.to_path_buf()];
    }

    let mut files = Vec::new();
    collect_files_recursive(path, &mut files);
    files.sort();
    files
}

fn collect_files_recursive(dir: &Path, files: &mut Vec<PathBuf>) {
    let Ok(entries) = std::fs::read_dir(dir) else {
        tracing::debug!(dir = %dir.display(), "skipping unreadable directory");
        return;
    };

    for entry in entries.flatten() {
        let path = entry.path();
        if path.is_dir() {
            collect_files_recursive(&path, files);
        } else if path.extension().is_some_and(|e| e == "json") {
            files.push(path);
        }
    }
}
