//! Path management for empenho-report
//!
//! ## Path Resolution Order
//!
//! 1. `EMPENHO_REPORT_DIR` environment variable (if set)
//! 2. The platform configuration directory for `empenho-report`
//!    (`~/.config/empenho-report` on Linux)

use std::path::{Path, PathBuf};

use directories::ProjectDirs;

use crate::error::EmpenhoError;

/// Environment variable overriding the base directory
pub const DIR_ENV_VAR: &str = "EMPENHO_REPORT_DIR";

/// Manages all paths used by empenho-report
#[derive(Debug, Clone)]
pub struct ReportPaths {
    base_dir: PathBuf,
}

impl ReportPaths {
    /// Resolve the base directory
    ///
    /// # Errors
    ///
    /// Returns an error if no home directory can be determined and the
    /// override variable is not set.
    pub fn new() -> Result<Self, EmpenhoError> {
        let base_dir = match std::env::var_os(DIR_ENV_VAR) {
            Some(custom) => PathBuf::from(custom),
            None => ProjectDirs::from("br", "empenho", "empenho-report")
                .map(|dirs| dirs.config_dir().to_path_buf())
                .ok_or_else(|| {
                    EmpenhoError::Config("Could not determine a configuration directory".into())
                })?,
        };

        Ok(Self { base_dir })
    }

    /// Create ReportPaths with a custom base directory (useful for testing)
    pub fn with_base_dir(base_dir: PathBuf) -> Self {
        Self { base_dir }
    }

    pub fn base_dir(&self) -> &Path {
        &self.base_dir
    }

    /// Get the path to the settings file
    pub fn settings_file(&self) -> PathBuf {
        self.base_dir.join("config.json")
    }

    /// Ensure the base directory exists
    pub fn ensure_directories(&self) -> Result<(), EmpenhoError> {
        std::fs::create_dir_all(&self.base_dir)
            .map_err(|e| EmpenhoError::Io(format!("Failed to create base directory: {}", e)))
    }

    /// Check if settings have been written
    pub fn is_initialized(&self) -> bool {
        self.settings_file().exists()
    }
}
