//! Configuration loading and music folder resolution
//!
//! Settings resolve with priority: command-line argument, then environment
//! variable, then TOML config file, then compiled default.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{Result, ScanError};
use crate::models::ClassificationThresholds;

/// Environment variable naming the folder to scan
pub const FOLDER_ENV_VAR: &str = "MUSIC_CHECKER_FOLDER";

/// TOML configuration file contents
///
/// Every field is optional; absent fields fall through to the next
/// resolution tier.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TomlConfig {
    /// Folder to scan when neither CLI argument nor env var is given
    pub music_folder: Option<PathBuf>,

    /// Maximum files in flight simultaneously
    pub worker_count: Option<usize>,

    /// Silence boundary overrides
    pub thresholds: Option<ClassificationThresholds>,
}

/// Load the TOML config from an explicit path, or the platform default
/// location when `path` is `None`
///
/// A missing file is not an error and yields the empty config; a present
/// but unparseable file is a configuration error.
pub fn load_toml_config(path: Option<&Path>) -> Result<TomlConfig> {
    let config_path = match path {
        Some(p) => p.to_path_buf(),
        None => match default_config_path() {
            Some(p) => p,
            None => return Ok(TomlConfig::default()),
        },
    };

    if !config_path.exists() {
        if path.is_some() {
            return Err(ScanError::Config(format!(
                "Config file not found: {}",
                config_path.display()
            )));
        }
        return Ok(TomlConfig::default());
    }

    let content = std::fs::read_to_string(&config_path).map_err(|e| {
        ScanError::Config(format!("Read {} failed: {}", config_path.display(), e))
    })?;
    let config = toml::from_str(&content).map_err(|e| {
        ScanError::Config(format!("Parse {} failed: {}", config_path.display(), e))
    })?;

    tracing::debug!(config = %config_path.display(), "Loaded TOML config");
    Ok(config)
}

/// Platform config file path: `<config dir>/music-checker/config.toml`
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join("music-checker").join("config.toml"))
}

/// Resolve the folder to scan
///
/// Priority: CLI argument, `MUSIC_CHECKER_FOLDER`, TOML `music_folder`,
/// then the platform music directory (the original tool's default target).
pub fn resolve_music_folder(cli_arg: Option<&Path>, toml_config: &TomlConfig) -> PathBuf {
    if let Some(path) = cli_arg {
        return path.to_path_buf();
    }

    if let Ok(path) = std::env::var(FOLDER_ENV_VAR) {
        return PathBuf::from(path);
    }

    if let Some(path) = &toml_config.music_folder {
        return path.clone();
    }

    dirs::audio_dir()
        .or_else(|| dirs::home_dir().map(|h| h.join("Music")))
        .unwrap_or_else(|| PathBuf::from("."))
}

/// Default worker count: CPU count clamped to single digits
///
/// Decode is the bottleneck and is I/O-heavy enough that running far past
/// the CPU count buys nothing.
pub fn default_worker_count() -> usize {
    num_cpus::get().clamp(2, 8)
}
