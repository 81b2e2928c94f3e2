//! Filter criteria for the report pipeline
//!
//! A [`FilterCriteria`] is the value the user-facing controls produce: a date
//! range, a category multi-select and, optionally, an organ multi-select and a
//! year range. All predicates combine with AND.

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;

use super::CommitmentRecord;
use crate::error::{EmpenhoError, EmpenhoResult};

/// Inclusive calendar date range
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateRange {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl DateRange {
    /// Range admitting every calendar date; null dates still fail it
    pub const UNBOUNDED: DateRange = DateRange {
        start: NaiveDate::MIN,
        end: NaiveDate::MAX,
    };

    /// Create a new range; `start` must not be after `end`
    pub fn new(start: NaiveDate, end: NaiveDate) -> EmpenhoResult<Self> {
        if start > end {
            return Err(EmpenhoError::Validation(format!(
                "Start date {} is after end date {}",
                start, end
            )));
        }
        Ok(Self { start, end })
    }

    /// Span of the records' issue dates, or [`DateRange::UNBOUNDED`] when
    /// none parsed
    pub fn covering(records: &[CommitmentRecord]) -> Self {
        Self::span_of(records).unwrap_or(Self::UNBOUNDED)
    }

    pub fn is_unbounded(&self) -> bool {
        *self == Self::UNBOUNDED
    }

    /// Check whether a date falls inside the range (inclusive)
    pub fn contains(&self, date: NaiveDate) -> bool {
        date >= self.start && date <= self.end
    }

    /// Smallest range covering every non-null issue date, if any
    pub fn span_of<'a, I>(records: I) -> Option<Self>
    where
        I: IntoIterator<Item = &'a CommitmentRecord>,
    {
        records
            .into_iter()
            .filter_map(|r| r.issue_date)
            .fold(None, |span: Option<Self>, date| match span {
                None => Some(Self {
                    start: date,
                    end: date,
                }),
                Some(s) => Some(Self {
                    start: s.start.min(date),
                    end: s.end.max(date),
                }),
            })
    }
}

impl fmt::Display for DateRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} to {}", self.start, self.end)
    }
}

/// Inclusive year range (the upload variant's year slider)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct YearRange {
    pub from: i32,
    pub to: i32,
}

impl YearRange {
    pub fn new(from: i32, to: i32) -> EmpenhoResult<Self> {
        if from > to {
            return Err(EmpenhoError::Validation(format!(
                "Year range {}..{} is empty",
                from, to
            )));
        }
        Ok(Self { from, to })
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        (self.from..=self.to).contains(&date.year())
    }
}

/// Conjunction of predicates selecting records for a report
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct FilterCriteria {
    /// Issue date range; `None` disables the date predicate
    pub date_range: Option<DateRange>,

    /// Allowed expense categories; an empty set matches nothing
    pub categories: BTreeSet<String>,

    /// Allowed organs; `None` disables the organ predicate
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub organs: Option<BTreeSet<String>>,

    /// Issue year range; `None` disables the year predicate
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub years: Option<YearRange>,
}

impl FilterCriteria {
    /// Criteria covering the full date span and every category in `records`
    ///
    /// The date predicate is always active, so records without an issue date
    /// never pass.
    pub fn full(records: &[CommitmentRecord]) -> Self {
        Self {
            date_range: Some(DateRange::covering(records)),
            categories: records
                .iter()
                .map(|r| r.expense_category.clone())
                .collect(),
            organs: None,
            years: None,
        }
    }

    pub fn with_date_range(mut self, range: Option<DateRange>) -> Self {
        self.date_range = range;
        self
    }

    pub fn with_categories<I, S>(mut self, categories: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.categories = categories.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_organs<I, S>(mut self, organs: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.organs = Some(organs.into_iter().map(Into::into).collect());
        self
    }

    pub fn with_years(mut self, years: Option<YearRange>) -> Self {
        self.years = years;
        self
    }

    /// Check whether a single record satisfies every active predicate
    pub fn matches(&self, record: &CommitmentRecord) -> bool {
        if let Some(range) = &self.date_range {
            match record.issue_date {
                Some(date) if range.contains(date) => {}
                _ => return false,
            }
        }

        if !self.categories.contains(&record.expense_category) {
            return false;
        }

        if let Some(organs) = &self.organs {
            if !organs.contains(&record.organ) {
                return false;
            }
        }

        if let Some(years) = &self.years {
            match record.issue_date {
                Some(date) if years.contains(date) => {}
                _ => return false,
            }
        }

        true
    }
}
