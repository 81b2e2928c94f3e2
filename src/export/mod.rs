//! Export module for empenho-report
//!
//! - CSV: record subsets with formatted values (the ID/value download)
//! - JSON: machine-readable report
//! - YAML: human-readable report

pub mod csv;
pub mod json;
pub mod yaml;

pub use csv::{export_id_values, export_subset, export_subset_to_string, ID_VALUE_COLUMNS};
pub use json::{export_report_json, ReportExport, EXPORT_SCHEMA_VERSION};
pub use yaml::export_report_yaml;
