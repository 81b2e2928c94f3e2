//! Core data models for empenho-report
//!
//! - [`CommitmentRecord`]: one row of the source table
//! - [`Money`]: exact decimal amount in reais
//! - [`FilterCriteria`]: the predicates a report is computed under

pub mod filter;
pub mod money;
pub mod record;

pub use filter::{DateRange, FilterCriteria, YearRange};
pub use money::{Money, MoneyParseError};
pub use record::{CommitmentRecord, Field};
