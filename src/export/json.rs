//! JSON Export functionality
//!
//! Wraps a rendered report in a versioned envelope so downstream tools can
//! tell which layout they are reading.

use chrono::{DateTime, Utc};
use serde::Serialize;
use std::io::Write;

use crate::error::{EmpenhoError, EmpenhoResult};
use crate::reports::EmpenhoReport;

/// Current export schema version
pub const EXPORT_SCHEMA_VERSION: &str = "1.0.0";

/// Report export structure
#[derive(Debug, Clone, Serialize)]
pub struct ReportExport<'a> {
    /// Schema version for compatibility checking
    pub schema_version: &'static str,

    /// Export timestamp
    pub exported_at: DateTime<Utc>,

    /// Application version that created the export
    pub app_version: &'static str,

    /// Source the records were loaded from
    pub source: &'a str,

    pub report: &'a EmpenhoReport,
}

impl<'a> ReportExport<'a> {
    pub fn new(source: &'a str, report: &'a EmpenhoReport) -> Self {
        Self {
            schema_version: EXPORT_SCHEMA_VERSION,
            exported_at: Utc::now(),
            app_version: env!("CARGO_PKG_VERSION"),
            source,
            report,
        }
    }
}

/// Export a report to JSON
pub fn export_report_json<W: Write>(
    source: &str,
    report: &EmpenhoReport,
    writer: &mut W,
    pretty: bool,
) -> EmpenhoResult<()> {
    let export = ReportExport::new(source, report);

    let written = if pretty {
        serde_json::to_writer_pretty(&mut *writer, &export)
    } else {
        serde_json::to_writer(&mut *writer, &export)
    };
    written.map_err(|e| EmpenhoError::Export(e.to_string()))?;

    writeln!(writer).map_err(|e| EmpenhoError::Export(e.to_string()))?;
    Ok(())
}
