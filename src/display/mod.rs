//! Display formatting for terminal output
//!
//! Currency strings in the Brazilian convention and the tables printed by
//! the `report` and `categories` commands.

pub mod currency;
pub mod report;

pub use currency::{format_currency, format_optional, format_with_magnitude, magnitude_suffix};
pub use report::{format_report, listing_table, DisplayOptions};
