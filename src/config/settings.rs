//! User settings for empenho-report
//!
//! Column schema, CSV dialect, date formats, ranking size and export file
//! name. Stored as JSON in the settings file; every field has a default so
//! partial files load.

use serde::{Deserialize, Serialize};

use super::paths::ReportPaths;
use super::schema::ColumnSchema;
use crate::error::EmpenhoError;

/// User settings for empenho-report
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    /// Schema version for migration support
    #[serde(default = "default_schema_version")]
    pub schema_version: u32,

    /// Source header names
    #[serde(default)]
    pub schema: ColumnSchema,

    /// Field delimiter of input files
    #[serde(default = "default_delimiter")]
    pub delimiter: char,

    /// Date formats tried first when parsing issue dates (strftime)
    #[serde(default = "default_date_formats")]
    pub date_formats: Vec<String>,

    /// Number of groups kept by the beneficiary and organ rankings
    #[serde(default = "default_top_n")]
    pub top_n: usize,

    /// Default name of the ID/value export
    #[serde(default = "default_export_file_name")]
    pub export_file_name: String,
}

fn default_schema_version() -> u32 {
    1
}

fn default_delimiter() -> char {
    ','
}

fn default_date_formats() -> Vec<String> {
    vec!["%Y-%m-%d".to_string(), "%d/%m/%Y".to_string()]
}

fn default_top_n() -> usize {
    10
}

fn default_export_file_name() -> String {
    "id_empenho_valores.csv".to_string()
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            schema_version: default_schema_version(),
            schema: ColumnSchema::default(),
            delimiter: default_delimiter(),
            date_formats: default_date_formats(),
            top_n: default_top_n(),
            export_file_name: default_export_file_name(),
        }
    }
}

impl Settings {
    /// Load settings from disk, or fall back to defaults if none are saved
    pub fn load_or_create(paths: &ReportPaths) -> Result<Self, EmpenhoError> {
        let settings_path = paths.settings_file();

        if !settings_path.exists() {
            // Don't save yet - let caller decide when to persist
            return Ok(Settings::default());
        }

        let contents = std::fs::read_to_string(&settings_path)
            .map_err(|e| EmpenhoError::Io(format!("Failed to read settings file: {}", e)))?;

        let settings: Settings = serde_json::from_str(&contents)
            .map_err(|e| EmpenhoError::Config(format!("Failed to parse settings file: {}", e)))?;

        settings.validate()?;
        Ok(settings)
    }

    /// Save settings to disk
    pub fn save(&self, paths: &ReportPaths) -> Result<(), EmpenhoError> {
        paths.ensure_directories()?;

        let contents = serde_json::to_string_pretty(self)
            .map_err(|e| EmpenhoError::Config(format!("Failed to serialize settings: {}", e)))?;

        std::fs::write(paths.settings_file(), contents)
            .map_err(|e| EmpenhoError::Io(format!("Failed to write settings file: {}", e)))?;

        Ok(())
    }

    /// Reject settings the pipeline cannot run with
    pub fn validate(&self) -> Result<(), EmpenhoError> {
        if !self.delimiter.is_ascii() {
            return Err(EmpenhoError::Config(format!(
                "Delimiter must be a single ASCII character, got '{}'",
                self.delimiter
            )));
        }
        if self.top_n == 0 {
            return Err(EmpenhoError::Config("top_n must be at least 1".into()));
        }
        Ok(())
    }
}
