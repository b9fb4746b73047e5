use chrono::{NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::rows::Rows;
use crate::sheets::{AccountingState, Closing, SalesState, SlotLabels, StatementState};
use crate::totals::DocumentTotals;

/// Top-level sections every persisted document must carry.
pub const SECTIONS: [&str; 3] = ["sales", "statement", "accounting"];

#[derive(Debug, Error)]
pub enum DocumentError {
    #[error("document is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("document is not a JSON object")]
    NotAnObject,
    #[error("document is missing the `{0}` section")]
    MissingSection(&'static str),
}

/// Row counts of a freshly initialized document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DocumentLayout {
    pub sales_rows: usize,
    pub expense_rows: usize,
    pub ledger_rows: usize,
}

impl Default for DocumentLayout {
    fn default() -> Self {
        Self {
            sales_rows: 30,
            expense_rows: 8,
            ledger_rows: 20,
        }
    }
}

/// The whole editable state of the three sheets; the unit of persistence.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AppData {
    pub sales: SalesState,
    pub statement: StatementState,
    pub accounting: AccountingState,
}

impl AppData {
    /// Fresh document dated today (UTC calendar date).
    pub fn with_layout(layout: &DocumentLayout) -> Self {
        Self::with_layout_on(layout, Utc::now().date_naive())
    }

    /// Fresh document with empty rows and default labels, dated `today`.
    pub fn with_layout_on(layout: &DocumentLayout, today: NaiveDate) -> Self {
        let today = today.format("%Y-%m-%d").to_string();
        Self {
            sales: SalesState {
                sales_data: Rows::with_empty_rows(layout.sales_rows),
                sales_person_display_names: SlotLabels::default(),
                current_date: today.clone(),
            },
            statement: StatementState {
                day: String::new(),
                date: today,
                day_closing: Closing::default(),
                night_closing: Closing::default(),
                expenses: Rows::with_empty_rows(layout.expense_rows),
            },
            accounting: AccountingState {
                month: String::new(),
                accounting_data: Rows::with_empty_rows(layout.ledger_rows),
            },
        }
    }

    /// Parse a persisted document.
    ///
    /// The three top-level sections are mandatory (a `null` section counts as
    /// missing); fields inside a present section fall back to empty defaults.
    pub fn from_json(json: &str) -> Result<Self, DocumentError> {
        let value: serde_json::Value = serde_json::from_str(json)?;
        let object = value.as_object().ok_or(DocumentError::NotAnObject)?;
        for section in SECTIONS {
            if object.get(section).map_or(true, serde_json::Value::is_null) {
                return Err(DocumentError::MissingSection(section));
            }
        }
        Ok(serde_json::from_value(value)?)
    }

    pub fn to_json(&self) -> Result<String, DocumentError> {
        Ok(serde_json::to_string(self)?)
    }

    pub fn totals(&self) -> DocumentTotals {
        DocumentTotals::of(self)
    }
}
