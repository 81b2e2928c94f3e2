//! Terminal rendering of an [`EmpenhoReport`]
//!
//! Tables go through `tabled`; the time series and organ comparison also get
//! a text bar column standing in for the dashboard charts.

use tabled::settings::object::Columns;
use tabled::settings::{Alignment, Modify, Style};
use tabled::{Table, Tabled};

use super::currency::{format_currency, format_optional, format_with_magnitude};
use crate::models::{CommitmentRecord, Money};
use crate::reports::{AggregateRow, CategoryShare, EmpenhoReport, TimePoint};

const BAR_WIDTH: usize = 24;

/// What to include when printing a report
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DisplayOptions {
    /// Print the filtered record listing
    pub listing: bool,
    /// Append "(milhões)"/"(bilhões)" to the grand total
    pub magnitude: bool,
}

impl Default for DisplayOptions {
    fn default() -> Self {
        Self {
            listing: true,
            magnitude: true,
        }
    }
}

#[derive(Tabled)]
struct ListingRow {
    #[tabled(rename = "Id")]
    id: String,
    #[tabled(rename = "Date")]
    date: String,
    #[tabled(rename = "Category")]
    category: String,
    #[tabled(rename = "Value")]
    value: String,
}

#[derive(Tabled)]
struct SeriesRow {
    #[tabled(rename = "Date")]
    date: String,
    #[tabled(rename = "Value")]
    value: String,
    #[tabled(rename = "")]
    bar: String,
}

#[derive(Tabled)]
struct RankRow {
    #[tabled(rename = "#")]
    rank: usize,
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Value")]
    value: String,
    #[tabled(rename = "")]
    bar: String,
}

#[derive(Tabled)]
struct CategoryRow {
    #[tabled(rename = "Category")]
    category: String,
    #[tabled(rename = "Value")]
    value: String,
    #[tabled(rename = "Share")]
    share: String,
}

/// Format the full report for terminal display
pub fn format_report(report: &EmpenhoReport, options: DisplayOptions) -> String {
    let mut output = String::new();

    output.push_str(&format!("Records loaded: {}\n", report.total_loaded));
    if let Some(range) = report.criteria.date_range.filter(|r| !r.is_unbounded()) {
        output.push_str(&format!("Period: {}\n", range));
    }
    output.push_str(&format!(
        "Records selected: {} ({} without a parseable value)\n",
        report.records.len(),
        report.null_amounts
    ));

    if options.listing {
        section(&mut output, "Records considered");
        output.push_str(&listing_table(&report.records));
        output.push('\n');
    }

    section(&mut output, "Committed value over time");
    output.push_str(&series_table(&report.time_series));
    output.push('\n');

    section(&mut output, "Top beneficiaries");
    output.push_str(&rank_table(&report.top_beneficiaries));
    output.push('\n');

    section(&mut output, "Totals by organ");
    output.push_str(&rank_table(&report.top_organs));
    output.push('\n');

    section(&mut output, "Distribution by expense category");
    output.push_str(&category_table(&report.category_distribution));
    output.push('\n');

    section(&mut output, "Summary");
    let total = if options.magnitude {
        format_with_magnitude(report.grand_total)
    } else {
        format_currency(report.grand_total)
    };
    output.push_str(&format!("Total committed (filter applied): {}\n", total));

    output
}

/// Records table with the listing columns of the dashboard
pub fn listing_table(records: &[CommitmentRecord]) -> String {
    let rows = records.iter().map(|r| ListingRow {
        id: r.id.clone(),
        date: r.issue_date.map(|d| d.to_string()).unwrap_or_default(),
        category: r.expense_category.clone(),
        value: format_optional(r.amount),
    });

    let mut table = Table::new(rows);
    table.with(Style::psql());
    table.with(Modify::new(Columns::single(3)).with(Alignment::right()));
    table.to_string()
}

fn series_table(series: &[TimePoint]) -> String {
    let max = max_value(series.iter().map(|p| p.total));
    let rows = series.iter().map(|p| SeriesRow {
        date: p.date.to_string(),
        value: format_currency(p.total),
        bar: format_bar(p.total.to_f64(), max, BAR_WIDTH),
    });

    let mut table = Table::new(rows);
    table.with(Style::psql());
    table.with(Modify::new(Columns::single(1)).with(Alignment::right()));
    table.to_string()
}

fn rank_table(rows: &[AggregateRow]) -> String {
    let max = max_value(rows.iter().map(|r| r.total));
    let rows = rows.iter().enumerate().map(|(i, r)| RankRow {
        rank: i + 1,
        name: truncate(&r.key, 48),
        value: format_currency(r.total),
        bar: format_bar(r.total.to_f64(), max, BAR_WIDTH),
    });

    let mut table = Table::new(rows);
    table.with(Style::psql());
    table.with(Modify::new(Columns::single(2)).with(Alignment::right()));
    table.to_string()
}

fn category_table(rows: &[CategoryShare]) -> String {
    let rows = rows.iter().map(|c| CategoryRow {
        category: c.category.clone(),
        value: format_currency(c.total),
        share: format_percentage(c.share),
    });

    let mut table = Table::new(rows);
    table.with(Style::psql());
    table.with(Modify::new(Columns::new(1..)).with(Alignment::right()));
    table.to_string()
}

fn section(output: &mut String, title: &str) {
    output.push('\n');
    output.push_str(title);
    output.push('\n');
    output.push_str(&separator(title.chars().count()));
    output.push('\n');
}

fn max_value(values: impl Iterator<Item = Money>) -> f64 {
    values.map(|m| m.to_f64()).fold(0.0, f64::max)
}

/// Format a percentage with appropriate precision
pub fn format_percentage(pct: f64) -> String {
    if pct.abs() < 0.1 && pct != 0.0 {
        format!("{:.2}%", pct)
    } else {
        format!("{:.1}%", pct)
    }
}

/// Create a simple bar chart representation
pub fn format_bar(value: f64, max_value: f64, width: usize) -> String {
    if max_value <= 0.0 || value <= 0.0 {
        return " ".repeat(width);
    }

    let filled = ((value / max_value) * width as f64).round() as usize;
    let filled = filled.min(width);

    format!("{}{}", "█".repeat(filled), "░".repeat(width - filled))
}

/// Format a separator line
pub fn separator(width: usize) -> String {
    "─".repeat(width)
}

/// Truncate a string to a maximum number of characters with ellipsis
pub fn truncate(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else if max_len <= 3 {
        "...".chars().take(max_len).collect()
    } else {
        let head: String = s.chars().take(max_len - 3).collect();
        format!("{}...", head)
    }
}
