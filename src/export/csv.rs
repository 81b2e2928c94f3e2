//! CSV Export functionality
//!
//! Writes a subset of record columns as delimited text. Monetary columns are
//! written already formatted (`R$ 1.234,56`); the csv writer quotes them
//! because of the decimal comma.

use std::io::Write;

use crate::config::ColumnSchema;
use crate::display::format_optional;
use crate::error::{EmpenhoError, EmpenhoResult};
use crate::models::{CommitmentRecord, Field};

/// Columns of the canonical ID/value export
pub const ID_VALUE_COLUMNS: [Field; 2] = [Field::Id, Field::Amount];

/// Export `columns` of `records` with a header row of source header names
pub fn export_subset<W: Write>(
    records: &[CommitmentRecord],
    columns: &[Field],
    schema: &ColumnSchema,
    writer: W,
) -> EmpenhoResult<()> {
    if columns.is_empty() {
        return Err(EmpenhoError::Export("No columns selected for export".into()));
    }

    let mut csv_writer = ::csv::Writer::from_writer(writer);

    csv_writer
        .write_record(schema.headers(columns))
        .map_err(|e| EmpenhoError::Export(e.to_string()))?;

    for record in records {
        let row = columns.iter().map(|field| cell(record, *field));
        csv_writer
            .write_record(row)
            .map_err(|e| EmpenhoError::Export(e.to_string()))?;
    }

    csv_writer
        .flush()
        .map_err(|e| EmpenhoError::Export(e.to_string()))?;
    Ok(())
}

/// Export the ID and formatted value of each record
///
/// Header: `Id Empenho,Valor do Empenho Convertido pra R$` under the default
/// schema.
pub fn export_id_values<W: Write>(
    records: &[CommitmentRecord],
    schema: &ColumnSchema,
    writer: W,
) -> EmpenhoResult<()> {
    export_subset(records, &ID_VALUE_COLUMNS, schema, writer)
}

/// Same as [`export_subset`] but returns the CSV text
pub fn export_subset_to_string(
    records: &[CommitmentRecord],
    columns: &[Field],
    schema: &ColumnSchema,
) -> EmpenhoResult<String> {
    let mut buffer = Vec::new();
    export_subset(records, columns, schema, &mut buffer)?;
    String::from_utf8(buffer).map_err(|e| EmpenhoError::Export(e.to_string()))
}

fn cell(record: &CommitmentRecord, field: Field) -> String {
    match field {
        Field::IssueDate => record
            .issue_date
            .map(|d| d.format("%Y-%m-%d").to_string())
            .unwrap_or_default(),
        Field::Amount => format_optional(record.amount),
        _ => record.text(field).unwrap_or_default().to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Money;
    use chrono::NaiveDate;

    fn records() -> Vec<CommitmentRecord> {
        vec![
            CommitmentRecord::new(
                "2024NE000001",
                NaiveDate::from_ymd_opt(2024, 1, 5),
                "Despesas Correntes",
                "ACME, LTDA",
                "Ministério da Saúde",
                Some(Money::parse("1234567.89").unwrap()),
            ),
            CommitmentRecord::new("2024NE000002", None, "Despesas de Capital", "Beta", "MEC", None),
        ]
    }

    #[test]
    fn test_id_value_export() {
        let mut out = Vec::new();
        export_id_values(&records(), &ColumnSchema::default(), &mut out).unwrap();
        let text = String::from_utf8(out).unwrap();

        let mut lines = text.lines();
        assert_eq!(
            lines.next(),
            Some("Id Empenho,Valor do Empenho Convertido pra R$")
        );
        assert_eq!(lines.next(), Some("2024NE000001,\"R$ 1.234.567,89\""));
        assert_eq!(lines.next(), Some("2024NE000002,"));
        assert_eq!(lines.next(), None);
    }

    #[test]
    fn test_subset_with_text_and_date_columns() {
        let columns = [Field::Id, Field::IssueDate, Field::Beneficiary];
        let text = export_subset_to_string(&records(), &columns, &ColumnSchema::default()).unwrap();

        let mut lines = text.lines();
        assert_eq!(lines.next(), Some("Id Empenho,Data Emissão,Favorecido"));
        assert_eq!(lines.next(), Some("2024NE000001,2024-01-05,\"ACME, LTDA\""));
        assert_eq!(lines.next(), Some("2024NE000002,,Beta"));
    }

    #[test]
    fn test_export_reparses_to_same_ids() {
        let text =
            export_subset_to_string(&records(), &ID_VALUE_COLUMNS, &ColumnSchema::default())
                .unwrap();

        let mut reader = ::csv::Reader::from_reader(text.as_bytes());
        let ids: Vec<String> = reader
            .records()
            .map(|r| r.unwrap().get(0).unwrap().to_string())
            .collect();
        assert_eq!(ids, vec!["2024NE000001", "2024NE000002"]);
    }

    #[test]
    fn test_empty_column_list_rejected() {
        let err = export_subset_to_string(&records(), &[], &ColumnSchema::default()).unwrap_err();
        assert!(matches!(err, EmpenhoError::Export(_)));
    }
}
