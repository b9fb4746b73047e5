//! `daybook-model` defines the in-memory data model of the Daybook bookkeeping sheets.
//!
//! The crate is self-contained so it can be shared by:
//! - the persistence layer (`daybook-storage`), which serializes [`AppData`] as JSON
//! - the session controller (`daybook-session`), which owns the live document
//! - any rendering/export surface, which only needs read access plus the totals
//!
//! All sheet fields hold raw user text. Numbers are only derived on read, through
//! [`to_number`], by the functions in [`totals`].

pub mod display;
mod document;
mod error;
mod numeric;
mod rows;
mod sheets;
pub mod totals;

pub use display::{format_amount, format_total, DisplayPolicy};
pub use document::{AppData, DocumentError, DocumentLayout, SECTIONS};
pub use error::ModelError;
pub use numeric::{is_explicit_zero, is_valid_decimal_input, parse_number, to_number};
pub use rows::{
    ExpenseField, ExpenseRow, LedgerField, LedgerRow, Row, RowId, Rows, SalesRow, SalesSlot,
};
pub use sheets::{
    AccountingState, Closing, ClosingField, ClosingKind, SalesState, SlotLabels, StatementState,
};
pub use totals::{DocumentTotals, LedgerRowTotals, LedgerTotals, SalesTotals, StatementTotals};
