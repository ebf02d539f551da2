//! Audio file enumeration
//!
//! Lists the direct children of the scanned folder whose extension matches
//! the audio allow-list. Non-recursive: the quarantine directory created
//! inside the folder is never descended into, so a second scan only sees
//! files still awaiting evaluation.

use std::path::{Path, PathBuf};

use walkdir::WalkDir;

use crate::error::{Result, ScanError};

/// Extensions accepted for classification (case-insensitive)
const AUDIO_EXTENSIONS: &[&str] = &["mp3", "wav", "flac", "ogg"];

/// Enumerate candidate audio files in a folder
///
/// Fatal errors (folder missing or not a directory) surface here, before
/// any worker is dispatched. The returned list is sorted for reproducible
/// enumeration; completion order is still up to the workers.
pub fn list_audio_files(folder: &Path) -> Result<Vec<PathBuf>> {
    if !folder.exists() {
        return Err(ScanError::FolderNotFound(folder.to_path_buf()));
    }

    if !folder.is_dir() {
        return Err(ScanError::NotADirectory(folder.to_path_buf()));
    }

    let mut files = Vec::new();

    // min_depth(1) skips the root itself, max_depth(1) keeps this
    // non-recursive
    for entry in WalkDir::new(folder)
        .min_depth(1)
        .max_depth(1)
        .follow_links(false)
    {
        match entry {
            Ok(entry) => {
                if entry.file_type().is_file() && is_audio_file(entry.path()) {
                    files.push(entry.path().to_path_buf());
                }
            }
            Err(e) => {
                // Unreadable entries are skipped, not fatal
                tracing::warn!("Error accessing entry: {}", e);
            }
        }
    }

    files.sort();

    tracing::debug!(
        folder = %folder.display(),
        count = files.len(),
        "Audio file enumeration complete"
    );

    Ok(files)
}

/// Check whether a path carries an allow-listed audio extension
fn is_audio_file(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .map(|ext| is_audio_extension(&ext.to_lowercase()))
        .unwrap_or(false)
}

fn is_audio_extension(ext: &str) -> bool {
    AUDIO_EXTENSIONS.contains(&ext)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn test_audio_extension_detection() {
        assert!(is_audio_extension("mp3"));
        assert!(is_audio_extension("wav"));
        assert!(is_audio_extension("flac"));
        assert!(is_audio_extension("ogg"));
        assert!(!is_audio_extension("txt"));
        assert!(!is_audio_extension("m4a"));
    }

    #[test]
    fn test_case_insensitive_extensions() {
        assert!(is_audio_file(Path::new("/music/TRACK.MP3")));
        assert!(is_audio_file(Path::new("/music/song.Flac")));
        assert!(!is_audio_file(Path::new("/music/cover.JPG")));
        assert!(!is_audio_file(Path::new("/music/no_extension")));
    }

    #[test]
    fn test_list_nonexistent_folder() {
        let result = list_audio_files(Path::new("/nonexistent/path"));
        assert!(matches!(result, Err(ScanError::FolderNotFound(_))));
    }

    #[test]
    fn test_list_file_as_folder() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("notes.txt");
        fs::write(&file, "hi").unwrap();

        let result = list_audio_files(&file);
        assert!(matches!(result, Err(ScanError::NotADirectory(_))));
    }

    #[test]
    fn test_list_is_non_recursive_and_filtered() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("a.mp3"), b"x").unwrap();
        fs::write(dir.path().join("b.WAV"), b"x").unwrap();
        fs::write(dir.path().join("notes.txt"), b"x").unwrap();

        let sub = dir.path().join("Quarantine_Silent");
        fs::create_dir(&sub).unwrap();
        fs::write(sub.join("nested.mp3"), b"x").unwrap();

        let files = list_audio_files(dir.path()).unwrap();
        let names: Vec<_> = files
            .iter()
            .map(|p| p.file_name().unwrap().to_string_lossy().to_string())
            .collect();

        assert_eq!(names, vec!["a.mp3", "b.WAV"]);
    }

    #[test]
    fn test_list_empty_folder() {
        let dir = tempfile::tempdir().unwrap();
        let files = list_audio_files(dir.path()).unwrap();
        assert!(files.is_empty());
    }
}
