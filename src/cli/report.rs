//! CLI command for the empenho report
//!
//! Loads the table, applies the filter arguments and prints the report as a
//! terminal table, or writes it as JSON/YAML.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::PathBuf;

use clap::{Args, ValueEnum};

use super::filter::FilterArgs;
use crate::display::{format_report, DisplayOptions};
use crate::error::{EmpenhoError, EmpenhoResult};
use crate::export::{export_report_json, export_report_yaml};
use crate::reports::{render, EmpenhoReport, ReportOptions};
use crate::services::Session;

/// Report output format
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ReportFormat {
    /// Terminal tables
    Table,
    /// Machine-readable JSON
    Json,
    /// Human-readable YAML
    Yaml,
}

/// Arguments of `empenho report`
#[derive(Args, Debug, Clone)]
pub struct ReportArgs {
    #[command(flatten)]
    pub filter: FilterArgs,

    /// Output format
    #[arg(short, long, value_enum, default_value = "table")]
    pub format: ReportFormat,

    /// Write to a file instead of stdout
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Pretty-print JSON output
    #[arg(long)]
    pub pretty: bool,

    /// Ranking size for beneficiaries and organs (overrides settings)
    #[arg(long)]
    pub top: Option<usize>,

    /// Leave the record listing out of the table output
    #[arg(long)]
    pub no_listing: bool,

    /// Print the grand total without the "(milhões)"/"(bilhões)" suffix
    #[arg(long)]
    pub no_magnitude: bool,
}

/// Handle `empenho report`
pub fn handle_report_command(session: &mut Session, args: ReportArgs) -> EmpenhoResult<()> {
    if args.top == Some(0) {
        return Err(EmpenhoError::Validation("--top must be at least 1".into()));
    }

    let records = session.load_path(&args.filter.file)?;
    let criteria = args.filter.to_criteria(&records)?;

    let options = ReportOptions {
        top_n: args.top.unwrap_or(session.settings().top_n),
    };
    let report = render(&records, &criteria, options);

    let source = args.filter.file.display().to_string();
    match &args.output {
        Some(path) => {
            let file = File::create(path).map_err(|e| {
                EmpenhoError::Export(format!("Failed to create file {}: {}", path.display(), e))
            })?;
            let mut writer = BufWriter::new(file);
            write_report(&mut writer, &args, &source, &report)?;
            writer.flush()?;
            println!("Report written to: {}", path.display());
        }
        None => {
            let stdout = std::io::stdout();
            let mut writer = stdout.lock();
            write_report(&mut writer, &args, &source, &report)?;
        }
    }

    Ok(())
}

fn write_report<W: Write>(
    writer: &mut W,
    args: &ReportArgs,
    source: &str,
    report: &EmpenhoReport,
) -> EmpenhoResult<()> {
    match args.format {
        ReportFormat::Table => {
            let options = DisplayOptions {
                listing: !args.no_listing,
                magnitude: !args.no_magnitude,
            };
            write!(writer, "{}", format_report(report, options))?;
        }
        ReportFormat::Json => export_report_json(source, report, writer, args.pretty)?,
        ReportFormat::Yaml => export_report_yaml(source, report, writer)?,
    }
    Ok(())
}
