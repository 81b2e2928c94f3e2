//! Service layer for empenho-report
//!
//! Loading, caching and filtering of commitment records.

pub mod cache;
pub mod filter;
pub mod loader;
pub mod session;

pub use cache::{content_digest, LoadCache, SourceKey};
pub use filter::{categories_in, date_span, filter, organs_in, year_span};
pub use loader::{parse_issue_date, LoadStats, RecordLoader};
pub use session::Session;
