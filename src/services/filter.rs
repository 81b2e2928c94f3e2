//! Filter stage
//!
//! Applies [`FilterCriteria`] to a record set and derives the option lists
//! the user-facing controls offer (date span, categories, organs, years).

use std::collections::HashSet;

use chrono::Datelike;
use tracing::debug;

use crate::models::{CommitmentRecord, DateRange, FilterCriteria, YearRange};

/// Records satisfying every predicate of `criteria`, in input order
pub fn filter(records: &[CommitmentRecord], criteria: &FilterCriteria) -> Vec<CommitmentRecord> {
    let filtered: Vec<CommitmentRecord> = records
        .iter()
        .filter(|r| criteria.matches(r))
        .cloned()
        .collect();

    debug!(
        input = records.len(),
        output = filtered.len(),
        "applied filter criteria"
    );
    filtered
}

/// Full span of non-null issue dates
pub fn date_span(records: &[CommitmentRecord]) -> Option<DateRange> {
    DateRange::span_of(records)
}

/// Full span of issue years
pub fn year_span(records: &[CommitmentRecord]) -> Option<YearRange> {
    date_span(records).map(|span| YearRange {
        from: span.start.year(),
        to: span.end.year(),
    })
}

/// Distinct categories in order of first appearance
pub fn categories_in(records: &[CommitmentRecord]) -> Vec<String> {
    distinct(records.iter().map(|r| r.expense_category.as_str()))
}

/// Distinct organs in order of first appearance
pub fn organs_in(records: &[CommitmentRecord]) -> Vec<String> {
    distinct(records.iter().map(|r| r.organ.as_str()))
}

fn distinct<'a>(values: impl Iterator<Item = &'a str>) -> Vec<String> {
    let mut seen = HashSet::new();
    values
        .filter(|v| seen.insert(*v))
        .map(str::to_string)
        .collect()
}
