//! CLI command for the ID/value download
//!
//! Writes `Id Empenho` and the formatted value of every filtered record.

use std::fs::File;
use std::io::BufWriter;
use std::path::PathBuf;

use clap::Args;
use tracing::info;

use super::filter::FilterArgs;
use crate::error::{EmpenhoError, EmpenhoResult};
use crate::export::export_id_values;
use crate::services::{filter, Session};

/// Arguments of `empenho export`
#[derive(Args, Debug, Clone)]
pub struct ExportArgs {
    #[command(flatten)]
    pub filter: FilterArgs,

    /// Output file path (default from settings: id_empenho_valores.csv)
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

/// Handle `empenho export`
pub fn handle_export_command(session: &mut Session, args: ExportArgs) -> EmpenhoResult<()> {
    let records = session.load_path(&args.filter.file)?;
    let criteria = args.filter.to_criteria(&records)?;
    let selected = filter(&records, &criteria);

    let output = args
        .output
        .unwrap_or_else(|| PathBuf::from(&session.settings().export_file_name));

    let file = File::create(&output).map_err(|e| {
        EmpenhoError::Export(format!("Failed to create file {}: {}", output.display(), e))
    })?;
    let writer = BufWriter::new(file);
    export_id_values(&selected, &session.settings().schema, writer)?;

    info!(rows = selected.len(), path = %output.display(), "wrote id/value export");
    println!(
        "Exported {} record(s) to: {}",
        selected.len(),
        output.display()
    );
    Ok(())
}
