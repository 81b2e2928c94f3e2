//! Commitment (empenho) record model
//!
//! One row of the source table. Records are produced by the loader and never
//! mutated afterwards.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

use super::Money;

/// A single budget commitment (empenho)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommitmentRecord {
    /// Opaque identifier from the source ("Id Empenho")
    pub id: String,

    /// Issue date; `None` when absent or unparseable
    pub issue_date: Option<NaiveDate>,

    /// Economic expense category ("Categoria de Despesa")
    pub expense_category: String,

    /// Payee ("Favorecido")
    pub beneficiary: String,

    /// Issuing government body ("Órgão")
    pub organ: String,

    /// Committed value in reais; `None` when unparseable
    pub amount: Option<Money>,

    /// Zero-based data row index in the source
    #[serde(default)]
    pub row_number: usize,
}

impl CommitmentRecord {
    /// Create a record with every field populated
    pub fn new(
        id: impl Into<String>,
        issue_date: Option<NaiveDate>,
        expense_category: impl Into<String>,
        beneficiary: impl Into<String>,
        organ: impl Into<String>,
        amount: Option<Money>,
    ) -> Self {
        Self {
            id: id.into(),
            issue_date,
            expense_category: expense_category.into(),
            beneficiary: beneficiary.into(),
            organ: organ.into(),
            amount,
            row_number: 0,
        }
    }

    /// Set the source row number
    pub fn with_row_number(mut self, row_number: usize) -> Self {
        self.row_number = row_number;
        self
    }

    /// Whether the amount parsed and can take part in sums
    pub fn has_amount(&self) -> bool {
        self.amount.is_some()
    }

    /// Borrow the text value of an entity field used for grouping
    ///
    /// Returns `None` for fields that are not free text (date, amount).
    pub fn text(&self, field: Field) -> Option<&str> {
        match field {
            Field::Id => Some(&self.id),
            Field::ExpenseCategory => Some(&self.expense_category),
            Field::Beneficiary => Some(&self.beneficiary),
            Field::Organ => Some(&self.organ),
            Field::IssueDate | Field::Amount => None,
        }
    }
}

/// Canonical field names of a commitment record
///
/// Source headers are mapped onto these through
/// [`ColumnSchema`](crate::config::ColumnSchema).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Field {
    Id,
    IssueDate,
    ExpenseCategory,
    Beneficiary,
    Organ,
    Amount,
}

impl Field {
    /// All required fields, in source-table order
    pub const ALL: [Field; 6] = [
        Field::Id,
        Field::IssueDate,
        Field::ExpenseCategory,
        Field::Beneficiary,
        Field::Organ,
        Field::Amount,
    ];

    /// Canonical snake_case name
    pub fn as_str(&self) -> &'static str {
        match self {
            Field::Id => "id",
            Field::IssueDate => "issue_date",
            Field::ExpenseCategory => "expense_category",
            Field::Beneficiary => "beneficiary",
            Field::Organ => "organ",
            Field::Amount => "amount",
        }
    }

    /// Whether values of this field are monetary
    pub fn is_monetary(&self) -> bool {
        matches!(self, Field::Amount)
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
