//! Derived totals for the three sheets.
//!
//! Every function here is a pure read over the current rows; nothing is cached, so
//! results always agree with the document they were computed from. Raw text is
//! coerced with [`to_number`] and nowhere else.

use serde::Serialize;

use crate::document::AppData;
use crate::numeric::to_number;
use crate::rows::{LedgerRow, Row, SalesSlot};
use crate::sheets::{AccountingState, SalesState, StatementState};

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SalesTotals {
    #[serde(serialize_with = "serialize_columns")]
    columns: [f64; SalesSlot::COUNT],
    pub grand_total: f64,
}

impl SalesTotals {
    pub fn column(&self, slot: SalesSlot) -> f64 {
        self.columns[slot.index()]
    }

    /// `(slot, total)` pairs in sheet column order.
    pub fn columns(&self) -> impl Iterator<Item = (SalesSlot, f64)> + '_ {
        SalesSlot::ALL.into_iter().map(|slot| (slot, self.column(slot)))
    }
}

fn serialize_columns<S: serde::Serializer>(
    columns: &[f64; SalesSlot::COUNT],
    serializer: S,
) -> Result<S::Ok, S::Error> {
    use serde::ser::SerializeMap;

    let mut map = serializer.serialize_map(Some(columns.len()))?;
    for slot in SalesSlot::ALL {
        map.serialize_entry(slot.key(), &columns[slot.index()])?;
    }
    map.end()
}

pub fn sales_totals(sales: &SalesState) -> SalesTotals {
    let mut columns = [0.0; SalesSlot::COUNT];
    for row in sales.sales_data.iter() {
        for slot in SalesSlot::ALL {
            columns[slot.index()] += to_number(row.field(slot));
        }
    }
    let grand_total = columns.iter().sum();
    SalesTotals {
        columns,
        grand_total,
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LedgerRowTotals {
    /// `cash - expense`
    pub remaining_cash: f64,
    /// `service + cash`
    pub total: f64,
}

pub fn ledger_row_totals(row: &LedgerRow) -> LedgerRowTotals {
    let service = to_number(&row.service);
    let cash = to_number(&row.cash);
    let expense = to_number(&row.expense);
    LedgerRowTotals {
        remaining_cash: cash - expense,
        total: service + cash,
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LedgerTotals {
    pub service: f64,
    pub cash: f64,
    pub expense: f64,
    pub remaining_cash: f64,
    pub total: f64,
}

/// Column sums of the ledger. `remaining_cash` and `total` accumulate the per-row
/// values rather than being derived from the column sums.
pub fn ledger_totals(accounting: &AccountingState) -> LedgerTotals {
    accounting
        .accounting_data
        .iter()
        .fold(LedgerTotals::default(), |mut totals, row| {
            let per_row = ledger_row_totals(row);
            totals.service += to_number(&row.service);
            totals.cash += to_number(&row.cash);
            totals.expense += to_number(&row.expense);
            totals.remaining_cash += per_row.remaining_cash;
            totals.total += per_row.total;
            totals
        })
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StatementTotals {
    pub day_closing_total: f64,
    pub night_closing_total: f64,
    pub total_closing_atm: f64,
    pub total_closing_cash: f64,
    pub total_closing: f64,
    pub total_expenses: f64,
    pub net_cash: f64,
}

pub fn statement_totals(statement: &StatementState) -> StatementTotals {
    let day_atm = to_number(&statement.day_closing.atm);
    let day_cash = to_number(&statement.day_closing.cash);
    let night_atm = to_number(&statement.night_closing.atm);
    let night_cash = to_number(&statement.night_closing.cash);

    let total_closing_atm = day_atm + night_atm;
    let total_closing_cash = day_cash + night_cash;
    let total_expenses = statement
        .expenses
        .iter()
        .map(|expense| to_number(&expense.amount))
        .sum::<f64>();

    StatementTotals {
        day_closing_total: day_atm + day_cash,
        night_closing_total: night_atm + night_cash,
        total_closing_atm,
        total_closing_cash,
        total_closing: total_closing_atm + total_closing_cash,
        total_expenses,
        net_cash: total_closing_cash - total_expenses,
    }
}

/// Totals of every sheet in one document.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct DocumentTotals {
    pub sales: SalesTotals,
    pub statement: StatementTotals,
    pub accounting: LedgerTotals,
}

impl DocumentTotals {
    pub fn of(doc: &AppData) -> Self {
        Self {
            sales: sales_totals(&doc.sales),
            statement: statement_totals(&doc.statement),
            accounting: ledger_totals(&doc.accounting),
        }
    }
}
