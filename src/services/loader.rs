//! Data loader
//!
//! Turns a delimited-text source into [`CommitmentRecord`]s. Columns are
//! located by header name through the [`ColumnSchema`]; per-field parse
//! failures null the field and keep the row, a missing required column fails
//! the whole load.

use std::borrow::Cow;
use std::collections::HashMap;
use std::io::Read;
use std::path::Path;

use chrono::{NaiveDate, NaiveDateTime};
use csv::{ReaderBuilder, StringRecord};
use tracing::{debug, info, warn};

use crate::config::{ColumnSchema, Settings};
use crate::error::{EmpenhoError, EmpenhoResult};
use crate::models::{CommitmentRecord, Field, Money};

/// Datetime layouts found in exports of the source system
const DATETIME_FORMATS: [&str; 4] = [
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%dT%H:%M:%S",
    "%d/%m/%Y %H:%M:%S",
    "%d/%m/%Y %H:%M",
];

/// Fallback date layouts tried after the configured ones
const DATE_FORMATS: [&str; 4] = ["%Y-%m-%d", "%d/%m/%Y", "%Y/%m/%d", "%d-%m-%Y"];

/// Delimiters probed when the configured one does not split the header
const ALTERNATE_DELIMITERS: [u8; 2] = [b';', b'\t'];

/// Resolved column positions for one source
#[derive(Debug, Clone, Copy)]
struct ColumnIndex {
    id: usize,
    issue_date: usize,
    expense_category: usize,
    beneficiary: usize,
    organ: usize,
    amount: usize,
}

impl ColumnIndex {
    fn resolve(headers: &StringRecord, schema: &ColumnSchema) -> EmpenhoResult<Self> {
        let positions: HashMap<&str, usize> = headers
            .iter()
            .enumerate()
            .map(|(idx, h)| (h.trim(), idx))
            .collect();

        let missing: Vec<&str> = Field::ALL
            .iter()
            .map(|f| schema.header(*f))
            .filter(|h| !positions.contains_key(h.trim()))
            .collect();
        if !missing.is_empty() {
            return Err(EmpenhoError::missing_columns(missing));
        }

        let at = |field: Field| positions[schema.header(field).trim()];
        Ok(Self {
            id: at(Field::Id),
            issue_date: at(Field::IssueDate),
            expense_category: at(Field::ExpenseCategory),
            beneficiary: at(Field::Beneficiary),
            organ: at(Field::Organ),
            amount: at(Field::Amount),
        })
    }
}

/// Counters reported after a load
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LoadStats {
    pub rows: usize,
    pub null_dates: usize,
    pub null_amounts: usize,
}

/// Parses commitment tables
#[derive(Debug, Clone)]
pub struct RecordLoader {
    schema: ColumnSchema,
    delimiter: u8,
    date_formats: Vec<String>,
}

impl Default for RecordLoader {
    fn default() -> Self {
        Self::from_settings(&Settings::default())
    }
}

impl RecordLoader {
    /// Build a loader from user settings
    pub fn from_settings(settings: &Settings) -> Self {
        Self {
            schema: settings.schema.clone(),
            // Settings::validate guarantees an ASCII delimiter
            delimiter: u8::try_from(settings.delimiter).unwrap_or(b','),
            date_formats: settings.date_formats.clone(),
        }
    }

    pub fn schema(&self) -> &ColumnSchema {
        &self.schema
    }

    /// Load records from a file on disk
    pub fn load_path(&self, path: &Path) -> EmpenhoResult<Vec<CommitmentRecord>> {
        let bytes = std::fs::read(path).map_err(|e| {
            EmpenhoError::Io(format!("Failed to read {}: {}", path.display(), e))
        })?;
        self.load_bytes(&bytes)
    }

    /// Load records from any reader
    pub fn load_reader<R: Read>(&self, mut reader: R) -> EmpenhoResult<Vec<CommitmentRecord>> {
        let mut bytes = Vec::new();
        reader.read_to_end(&mut bytes)?;
        self.load_bytes(&bytes)
    }

    /// Load records from raw source bytes
    pub fn load_bytes(&self, bytes: &[u8]) -> EmpenhoResult<Vec<CommitmentRecord>> {
        self.load_bytes_with_stats(bytes).map(|(records, _)| records)
    }

    /// Load records and return parse counters alongside
    pub fn load_bytes_with_stats(
        &self,
        bytes: &[u8],
    ) -> EmpenhoResult<(Vec<CommitmentRecord>, LoadStats)> {
        let decoded = decode(bytes);
        let text = decoded
            .strip_prefix('\u{feff}')
            .unwrap_or(decoded.as_ref());
        let delimiter = self.detect_delimiter(text);

        let mut reader = ReaderBuilder::new()
            .delimiter(delimiter)
            .flexible(true)
            .from_reader(text.as_bytes());

        let headers = reader.headers()?.clone();
        let columns = ColumnIndex::resolve(&headers, &self.schema)?;

        let mut records = Vec::new();
        let mut stats = LoadStats::default();

        for (row_number, result) in reader.records().enumerate() {
            let row = result?;
            let record = self.parse_row(&row, row_number, &columns);

            if record.issue_date.is_none() {
                stats.null_dates += 1;
            }
            if record.amount.is_none() {
                stats.null_amounts += 1;
            }
            records.push(record);
        }
        stats.rows = records.len();

        info!(
            rows = stats.rows,
            null_dates = stats.null_dates,
            null_amounts = stats.null_amounts,
            "loaded commitment records"
        );
        Ok((records, stats))
    }

    fn parse_row(
        &self,
        row: &StringRecord,
        row_number: usize,
        columns: &ColumnIndex,
    ) -> CommitmentRecord {
        let cell = |idx: usize| row.get(idx).map(str::trim).unwrap_or("");

        let raw_date = cell(columns.issue_date);
        let issue_date = parse_issue_date(raw_date, &self.date_formats);
        if issue_date.is_none() && !raw_date.is_empty() {
            debug!(row = row_number, value = raw_date, "unparseable issue date");
        }

        let raw_amount = cell(columns.amount);
        let amount = Money::parse(raw_amount).ok();
        if amount.is_none() && !raw_amount.is_empty() {
            debug!(row = row_number, value = raw_amount, "unparseable amount");
        }

        CommitmentRecord {
            id: cell(columns.id).to_string(),
            issue_date,
            expense_category: cell(columns.expense_category).to_string(),
            beneficiary: cell(columns.beneficiary).to_string(),
            organ: cell(columns.organ).to_string(),
            amount,
            row_number,
        }
    }

    /// Use the configured delimiter unless the header clearly uses another
    fn detect_delimiter(&self, text: &str) -> u8 {
        let header = text.lines().next().unwrap_or("");
        if header.as_bytes().contains(&self.delimiter) {
            return self.delimiter;
        }
        match ALTERNATE_DELIMITERS
            .iter()
            .copied()
            .find(|d| header.as_bytes().contains(d))
        {
            Some(detected) => {
                let shown = detected as char;
                debug!(delimiter = %shown, "detected alternate delimiter");
                detected
            }
            None => self.delimiter,
        }
    }
}

/// Decode source bytes, falling back to Latin-1 for non-UTF-8 files
fn decode(bytes: &[u8]) -> Cow<'_, str> {
    match std::str::from_utf8(bytes) {
        Ok(text) => Cow::Borrowed(text),
        Err(_) => {
            warn!("source is not valid UTF-8, decoding as Latin-1");
            Cow::Owned(bytes.iter().map(|&b| b as char).collect())
        }
    }
}

/// Parse an issue date tolerantly, keeping only the calendar day
///
/// Returns `None` for empty or unrecognised values.
pub fn parse_issue_date(s: &str, preferred_formats: &[String]) -> Option<NaiveDate> {
    let s = s.trim();
    if s.is_empty() {
        return None;
    }

    let date_formats = preferred_formats
        .iter()
        .map(String::as_str)
        .chain(DATE_FORMATS);
    for format in date_formats {
        if let Ok(date) = NaiveDate::parse_from_str(s, format) {
            return Some(date);
        }
    }

    DATETIME_FORMATS
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(s, format).ok())
        .map(|dt| dt.date())
}
