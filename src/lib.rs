//! empenho-report - Budget commitment (empenho) report pipeline
//!
//! This library loads a table of Brazilian federal budget commitments,
//! filters it by issue date, expense category, organ and year, and
//! aggregates the result into a time series, rankings of beneficiaries and
//! organs, a category distribution and a grand total. Values are rendered in
//! the Brazilian currency convention (`R$ 1.234,56`).
//!
//! # Architecture
//!
//! The crate is organized into the following modules:
//!
//! - `config`: Configuration, column schema and path management
//! - `error`: Custom error types
//! - `models`: Core data models (records, money, filter criteria)
//! - `services`: Loading, caching and filtering
//! - `reports`: Aggregation engine and report assembly
//! - `display`: Currency formatting and terminal tables
//! - `export`: CSV, JSON and YAML export
//! - `cli`: Command handlers for the `empenho` binary
//!
//! # Example
//!
//! ```rust,ignore
//! use empenho_report::config::Settings;
//! use empenho_report::reports::{render, ReportOptions};
//! use empenho_report::services::Session;
//! use empenho_report::models::FilterCriteria;
//!
//! let mut session = Session::new(Settings::default());
//! let records = session.load_path("empenhos.csv".as_ref())?;
//! let report = render(&records, &FilterCriteria::full(&records), ReportOptions::default());
//! ```

pub mod cli;
pub mod config;
pub mod display;
pub mod error;
pub mod export;
pub mod logging;
pub mod models;
pub mod reports;
pub mod services;

pub use error::{EmpenhoError, EmpenhoResult};
