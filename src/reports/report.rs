//! Empenho report
//!
//! [`render`] is the whole pipeline after loading: filter the records, then
//! compute every derived view in one pass over the filtered set.

use serde::Serialize;
use tracing::info;

use super::aggregate::{
    category_distribution, grand_total, time_series, top_beneficiaries, top_organs,
    AggregateRow, CategoryShare, TimePoint, DEFAULT_TOP_N,
};
use crate::models::{CommitmentRecord, FilterCriteria, Money};
use crate::services::filter::filter;

/// Knobs for report generation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReportOptions {
    /// Size of the beneficiary and organ rankings
    pub top_n: usize,
}

impl Default for ReportOptions {
    fn default() -> Self {
        Self {
            top_n: DEFAULT_TOP_N,
        }
    }
}

/// Every view derived from one filtered record set
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EmpenhoReport {
    /// Records in the source before filtering
    pub total_loaded: usize,
    /// Criteria the report was computed under
    pub criteria: FilterCriteria,
    /// Filtered listing, in source order
    pub records: Vec<CommitmentRecord>,
    /// Summed value per issue date
    pub time_series: Vec<TimePoint>,
    /// Largest beneficiaries
    pub top_beneficiaries: Vec<AggregateRow>,
    /// Largest organs
    pub top_organs: Vec<AggregateRow>,
    /// All categories with their shares
    pub category_distribution: Vec<CategoryShare>,
    /// Sum over the filtered records
    pub grand_total: Money,
    /// Filtered records left out of every sum because their amount is null
    pub null_amounts: usize,
}

impl EmpenhoReport {
    /// Whether the filter selected nothing
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// IDs of the filtered records, in listing order
    pub fn record_ids(&self) -> impl Iterator<Item = &str> {
        self.records.iter().map(|r| r.id.as_str())
    }
}

/// Run filter and aggregation over `records`
pub fn render(
    records: &[CommitmentRecord],
    criteria: &FilterCriteria,
    options: ReportOptions,
) -> EmpenhoReport {
    let filtered = filter(records, criteria);

    let report = EmpenhoReport {
        total_loaded: records.len(),
        criteria: criteria.clone(),
        time_series: time_series(&filtered),
        top_beneficiaries: top_beneficiaries(&filtered, options.top_n),
        top_organs: top_organs(&filtered, options.top_n),
        category_distribution: category_distribution(&filtered),
        grand_total: grand_total(&filtered),
        null_amounts: filtered.iter().filter(|r| !r.has_amount()).count(),
        records: filtered,
    };

    info!(
        loaded = report.total_loaded,
        selected = report.records.len(),
        grand_total = %report.grand_total,
        "rendered report"
    );
    report
}
