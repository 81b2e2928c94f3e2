//! CLI command handlers
//!
//! This module contains the implementation of CLI commands,
//! bridging the clap argument parsing with the report pipeline.

pub mod categories;
pub mod export;
pub mod filter;
pub mod report;

pub use categories::{handle_categories_command, CategoriesArgs};
pub use export::{handle_export_command, ExportArgs};
pub use filter::FilterArgs;
pub use report::{handle_report_command, ReportArgs, ReportFormat};
