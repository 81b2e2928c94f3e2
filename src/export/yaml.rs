//! YAML Export functionality
//!
//! Same envelope as the JSON export, for human reading.

use crate::error::{EmpenhoError, EmpenhoResult};
use crate::export::json::ReportExport;
use crate::reports::EmpenhoReport;
use std::io::Write;

/// Export a report to YAML
pub fn export_report_yaml<W: Write>(
    source: &str,
    report: &EmpenhoReport,
    writer: &mut W,
) -> EmpenhoResult<()> {
    let export = ReportExport::new(source, report);

    writeln!(writer, "# Empenho report export")
        .map_err(|e| EmpenhoError::Export(e.to_string()))?;
    writeln!(writer, "# Generated: {}", export.exported_at)
        .map_err(|e| EmpenhoError::Export(e.to_string()))?;
    writeln!(writer).map_err(|e| EmpenhoError::Export(e.to_string()))?;

    serde_yaml::to_writer(writer, &export).map_err(|e| EmpenhoError::Export(e.to_string()))?;

    Ok(())
}
