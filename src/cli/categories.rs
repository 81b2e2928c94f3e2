//! CLI command listing the categories on offer for a period

use clap::Args;
use tabled::settings::object::Columns;
use tabled::settings::{Alignment, Modify, Style};
use tabled::{Table, Tabled};

use super::filter::FilterArgs;
use crate::display::format_currency;
use crate::display::report::format_percentage;
use crate::error::EmpenhoResult;
use crate::models::FilterCriteria;
use crate::reports::category_distribution;
use crate::services::{filter, Session};

/// Arguments of `empenho categories`
///
/// Only the file and date bounds of the filter apply here.
#[derive(Args, Debug, Clone)]
pub struct CategoriesArgs {
    #[command(flatten)]
    pub filter: FilterArgs,
}

#[derive(Tabled)]
struct CategoryLine {
    #[tabled(rename = "Category")]
    category: String,
    #[tabled(rename = "Records")]
    count: usize,
    #[tabled(rename = "Value")]
    value: String,
    #[tabled(rename = "Share")]
    share: String,
}

/// Handle `empenho categories`
pub fn handle_categories_command(session: &mut Session, args: CategoriesArgs) -> EmpenhoResult<()> {
    let records = session.load_path(&args.filter.file)?;
    let range = args.filter.date_range(&records)?;

    let dated = filter(&records, &FilterCriteria::full(&records).with_date_range(range));
    let distribution = category_distribution(&dated);

    if distribution.is_empty() {
        println!("No categories in the selected period.");
        return Ok(());
    }

    if let Some(range) = range.filter(|r| !r.is_unbounded()) {
        println!("Categories from {}", range);
    }

    let rows = distribution.iter().map(|c| CategoryLine {
        category: c.category.clone(),
        count: c.count,
        value: format_currency(c.total),
        share: format_percentage(c.share),
    });
    let mut table = Table::new(rows);
    table.with(Style::psql());
    table.with(Modify::new(Columns::new(1..)).with(Alignment::right()));
    println!("{}", table);

    Ok(())
}
