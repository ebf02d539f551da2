//! Quarantine directory management
//!
//! Quarantine is a holding directory inside the scanned folder, distinct
//! from deletion and reversible by hand. Creation is lazy and idempotent;
//! two workers racing to create it both succeed.

use std::path::{Path, PathBuf};

use crate::error::{Result, ScanError};

/// Conventional quarantine directory name inside the scanned folder
pub const QUARANTINE_DIR_NAME: &str = "Quarantine_Silent";

/// Quarantine directory path for a scanned folder
pub fn quarantine_dir_for(folder: &Path) -> PathBuf {
    folder.join(QUARANTINE_DIR_NAME)
}

/// Create the quarantine directory if absent
///
/// `create_dir_all` succeeds when the directory already exists, so
/// concurrent first-creators cannot fail each other.
pub fn ensure_quarantine_dir(dir: &Path) -> Result<()> {
    std::fs::create_dir_all(dir).map_err(|e| ScanError::Filesystem {
        path: dir.to_path_buf(),
        source: e,
    })
}

/// Move a classified-silent file into the quarantine directory
///
/// Tries an atomic rename first and falls back to copy-then-delete when the
/// quarantine directory sits on a different filesystem. On any failure the
/// source file is left in place. Returns the destination path.
pub fn quarantine_file(src: &Path, quarantine_dir: &Path) -> Result<PathBuf> {
    let file_name = src
        .file_name()
        .ok_or_else(|| ScanError::Filesystem {
            path: src.to_path_buf(),
            source: std::io::Error::new(std::io::ErrorKind::InvalidInput, "No file name"),
        })?;
    let dest = quarantine_dir.join(file_name);

    if dest.exists() {
        tracing::warn!(
            file = %dest.display(),
            "Quarantine destination already exists, overwriting"
        );
    }

    match std::fs::rename(src, &dest) {
        Ok(()) => Ok(dest),
        Err(rename_err) => {
            // Cross-device rename fails with EXDEV; retry as copy + delete
            tracing::debug!(
                file = %src.display(),
                error = %rename_err,
                "Rename failed, falling back to copy + delete"
            );

            std::fs::copy(src, &dest).map_err(|e| ScanError::Filesystem {
                path: src.to_path_buf(),
                source: e,
            })?;
            std::fs::remove_file(src).map_err(|e| {
                // Keep exactly one copy: the move failed, so drop the copy
                let _ = std::fs::remove_file(&dest);
                ScanError::Filesystem {
                    path: src.to_path_buf(),
                    source: e,
                }
            })?;

            Ok(dest)
        }
    }
}
