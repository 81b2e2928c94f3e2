//! Column schema
//!
//! Maps canonical record fields to the localized headers of the source
//! files. The headers must match the published data exactly, accents and
//! currency symbol included, so they live here and nowhere else.

use serde::{Deserialize, Serialize};

use crate::models::Field;

/// Current schema version
pub const SCHEMA_VERSION: u32 = 1;

/// Mapping from canonical field to source header
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ColumnSchema {
    pub version: u32,
    pub id: String,
    pub issue_date: String,
    pub expense_category: String,
    pub beneficiary: String,
    pub organ: String,
    pub amount: String,
}

impl Default for ColumnSchema {
    fn default() -> Self {
        Self {
            version: SCHEMA_VERSION,
            id: "Id Empenho".to_string(),
            issue_date: "Data Emissão".to_string(),
            expense_category: "Categoria de Despesa".to_string(),
            beneficiary: "Favorecido".to_string(),
            organ: "Órgão".to_string(),
            amount: "Valor do Empenho Convertido pra R$".to_string(),
        }
    }
}

impl ColumnSchema {
    /// Source header for a field
    pub fn header(&self, field: Field) -> &str {
        match field {
            Field::Id => &self.id,
            Field::IssueDate => &self.issue_date,
            Field::ExpenseCategory => &self.expense_category,
            Field::Beneficiary => &self.beneficiary,
            Field::Organ => &self.organ,
            Field::Amount => &self.amount,
        }
    }

    /// Headers for a list of fields, in order
    pub fn headers(&self, fields: &[Field]) -> Vec<&str> {
        fields.iter().map(|f| self.header(*f)).collect()
    }
}
