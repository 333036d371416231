//! Per-user directories for CloudFS configuration and logs.

use std::path::PathBuf;

use crate::constants::APP_NAME;
use crate::error::{CfsError, CfsResult};

/// Lookup of the OS-specific per-user directories.
pub struct Platform;

impl Platform {
    /// Application data directory, home of the log files.
    ///
    /// - Windows: `%APPDATA%/CloudFS`
    /// - macOS: `~/Library/Application Support/CloudFS`
    /// - Linux: `~/.local/share/CloudFS`
    pub fn data_dir() -> CfsResult<PathBuf> {
        dirs::data_dir()
            .map(|base| base.join(APP_NAME))
            .ok_or_else(|| CfsError::Config("could not determine data directory".into()))
    }

    /// Configuration directory, home of `config.toml`.
    ///
    /// - Windows: `%APPDATA%/CloudFS`
    /// - macOS: `~/Library/Application Support/CloudFS`
    /// - Linux: `~/.config/CloudFS`
    pub fn config_dir() -> CfsResult<PathBuf> {
        dirs::config_dir()
            .map(|base| base.join(APP_NAME))
            .ok_or_else(|| CfsError::Config("could not determine config directory".into()))
    }
}
