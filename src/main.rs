use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing::debug;

use empenho_report::cli::{
    handle_categories_command, handle_export_command, handle_report_command, CategoriesArgs,
    ExportArgs, ReportArgs,
};
use empenho_report::config::{ReportPaths, Settings};
use empenho_report::logging::init_tracing;
use empenho_report::services::Session;

#[derive(Parser)]
#[command(
    name = "empenho",
    version,
    about = "Budget commitment (empenho) report pipeline",
    long_about = "Loads a table of federal budget commitments, filters it by issue \
                  date and expense category, and reports values over time, top \
                  beneficiaries, totals by organ and the category distribution."
)]
struct Cli {
    /// Enable debug logging on stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the filtered report
    Report(ReportArgs),

    /// Write the ID/value download of the filtered records
    Export(ExportArgs),

    /// List the expense categories present in a period
    #[command(alias = "cats")]
    Categories(CategoriesArgs),

    /// Write the default settings file
    Init,

    /// Show current configuration and paths
    Config,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    // Initialize paths and settings
    let paths = ReportPaths::new()?;
    let settings = Settings::load_or_create(&paths)?;

    let mut session = Session::new(settings);

    match cli.command {
        Some(Commands::Report(args)) => {
            handle_report_command(&mut session, args)?;
        }
        Some(Commands::Export(args)) => {
            handle_export_command(&mut session, args)?;
        }
        Some(Commands::Categories(args)) => {
            handle_categories_command(&mut session, args)?;
        }
        Some(Commands::Init) => {
            println!("Initializing empenho-report at: {}", paths.base_dir().display());
            session.settings().save(&paths)?;
            println!("Settings written to: {}", paths.settings_file().display());
            println!();
            println!("Edit the column headers there if your table uses different names.");
        }
        Some(Commands::Config) => {
            println!("empenho-report Configuration");
            println!("============================");
            println!("Config directory: {}", paths.base_dir().display());
            println!("Settings file:    {}", paths.settings_file().display());
            println!(
                "Initialized:      {}",
                if paths.is_initialized() { "yes" } else { "no" }
            );
            println!();
            let settings = session.settings();
            println!("Columns:");
            println!("  Id:          {}", settings.schema.id);
            println!("  Issue date:  {}", settings.schema.issue_date);
            println!("  Category:    {}", settings.schema.expense_category);
            println!("  Beneficiary: {}", settings.schema.beneficiary);
            println!("  Organ:       {}", settings.schema.organ);
            println!("  Amount:      {}", settings.schema.amount);
            println!();
            println!("Settings:");
            println!("  Delimiter:    {:?}", settings.delimiter);
            println!("  Date formats: {}", settings.date_formats.join(", "));
            println!("  Ranking size: {}", settings.top_n);
            println!("  Export file:  {}", settings.export_file_name);
        }
        None => {
            println!("empenho-report - Budget commitment report pipeline");
            println!();
            println!("Run 'empenho --help' for usage information.");
            println!("Run 'empenho report <file.csv>' to report on a commitment table.");
        }
    }

    let (hits, misses) = session.cache().stats();
    debug!(hits, misses, sources = session.cache().len(), "load cache");

    Ok(())
}
