//! Configuration module for empenho-report
//!
//! - Path resolution for the settings file
//! - User settings persistence
//! - The versioned column schema of source files

pub mod paths;
pub mod schema;
pub mod settings;

pub use paths::ReportPaths;
pub use schema::ColumnSchema;
pub use settings::Settings;
