//! Error types for music-checker
//!
//! Two severities: fatal errors surface before any file is dispatched
//! (missing folder, unusable report path), per-file errors are caught at the
//! task boundary and recorded as `Failed` outcomes without aborting the scan.

use std::path::PathBuf;
use thiserror::Error;

/// Result type for scan operations
pub type Result<T> = std::result::Result<T, ScanError>;

/// Scan error taxonomy
#[derive(Debug, Error)]
pub enum ScanError {
    /// Scanned folder does not exist (fatal, pre-dispatch)
    #[error("Folder not found: {0}")]
    FolderNotFound(PathBuf),

    /// Scanned path exists but is not a directory (fatal, pre-dispatch)
    #[error("Not a directory: {0}")]
    NotADirectory(PathBuf),

    /// Invalid configuration value (fatal, pre-dispatch)
    #[error("Configuration error: {0}")]
    Config(String),

    /// Audio file could not be decoded (per-file, recovered)
    #[error("Decode error for {path}: {cause}")]
    Decode { path: PathBuf, cause: String },

    /// Move/create failure during quarantine (per-file, recovered; the file
    /// stays in its original location)
    #[error("Filesystem error for {path}: {source}")]
    Filesystem {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Report file could not be created or written
    #[error("Report error: {0}")]
    Report(#[source] std::io::Error),

    /// General I/O error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl ScanError {
    /// One-line description used in `Failed` report entries and logs.
    pub fn brief(&self) -> String {
        match self {
            ScanError::Decode { cause, .. } => cause.clone(),
            ScanError::Filesystem { source, .. } => source.to_string(),
            other => other.to_string(),
        }
    }
}
