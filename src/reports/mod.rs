//! Reports module for empenho-report
//!
//! The aggregation engine and the report assembled from it.

pub mod aggregate;
pub mod report;

pub use aggregate::{
    category_distribution, grand_total, group_totals, rank_top_n, time_series,
    top_beneficiaries, top_organs, AggregateRow, CategoryShare, TimePoint, DEFAULT_TOP_N,
};
pub use report::{render, EmpenhoReport, ReportOptions};
