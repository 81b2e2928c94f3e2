//! Filter arguments shared by the report, export and categories commands
//!
//! Turns command-line values into a [`FilterCriteria`], filling unspecified
//! bounds from the loaded data the same way the dashboard controls default
//! to the full span.

use std::path::PathBuf;

use chrono::NaiveDate;
use clap::Args;

use crate::error::{EmpenhoError, EmpenhoResult};
use crate::models::{CommitmentRecord, DateRange, FilterCriteria, YearRange};
use crate::services::{categories_in, date_span, filter, year_span};

/// Input file and filter controls
#[derive(Args, Debug, Clone)]
pub struct FilterArgs {
    /// Commitment table (CSV)
    pub file: PathBuf,

    /// First issue date to include (YYYY-MM-DD)
    #[arg(short, long)]
    pub start: Option<String>,

    /// Last issue date to include (YYYY-MM-DD)
    #[arg(short, long)]
    pub end: Option<String>,

    /// Expense category to include (repeatable; default: all)
    #[arg(short, long = "category")]
    pub categories: Vec<String>,

    /// Government organ to include (repeatable; default: all)
    #[arg(long = "organ")]
    pub organs: Vec<String>,

    /// First issue year to include
    #[arg(long)]
    pub year_from: Option<i32>,

    /// Last issue year to include
    #[arg(long)]
    pub year_to: Option<i32>,
}

impl FilterArgs {
    /// Build criteria against the loaded records
    pub fn to_criteria(&self, records: &[CommitmentRecord]) -> EmpenhoResult<FilterCriteria> {
        let date_range = self.date_range(records)?;

        let categories = if self.categories.is_empty() {
            // Offer what survives the date filter, all selected
            let dated = FilterCriteria::full(records).with_date_range(date_range);
            categories_in(&filter(records, &dated))
        } else {
            self.categories.clone()
        };

        let mut criteria = FilterCriteria::default()
            .with_date_range(date_range)
            .with_categories(categories)
            .with_years(self.year_range(records)?);

        if !self.organs.is_empty() {
            criteria = criteria.with_organs(self.organs.iter().cloned());
        }

        Ok(criteria)
    }

    /// Date range from the arguments, defaulting each bound to the data span
    pub fn date_range(&self, records: &[CommitmentRecord]) -> EmpenhoResult<Option<DateRange>> {
        let start = self.start.as_deref().map(|s| parse_date_arg("start", s)).transpose()?;
        let end = self.end.as_deref().map(|s| parse_date_arg("end", s)).transpose()?;
        let span = date_span(records);

        let range = match (start, end, span) {
            (None, None, _) => Some(DateRange::covering(records)),
            (start, end, span) => Some(DateRange::new(
                start.or(span.map(|s| s.start)).unwrap_or(NaiveDate::MIN),
                end.or(span.map(|s| s.end)).unwrap_or(NaiveDate::MAX),
            )?),
        };
        Ok(range)
    }

    fn year_range(&self, records: &[CommitmentRecord]) -> EmpenhoResult<Option<YearRange>> {
        if self.year_from.is_none() && self.year_to.is_none() {
            return Ok(None);
        }
        let span = year_span(records);
        let from = self.year_from.or(span.map(|s| s.from)).unwrap_or(i32::MIN);
        let to = self.year_to.or(span.map(|s| s.to)).unwrap_or(i32::MAX);
        YearRange::new(from, to).map(Some)
    }
}

fn parse_date_arg(name: &str, value: &str) -> EmpenhoResult<NaiveDate> {
    NaiveDate::parse_from_str(value, "%Y-%m-%d").map_err(|_| {
        EmpenhoError::Validation(format!(
            "Invalid {} date format: {}. Use YYYY-MM-DD",
            name, value
        ))
    })
}
