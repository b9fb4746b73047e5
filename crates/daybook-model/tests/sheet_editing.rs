use std::sync::Arc;

use chrono::NaiveDate;
use daybook_model::{
    format_total, AppData, DisplayPolicy, DocumentLayout, ExpenseField, LedgerField, Rows,
    SalesRow, SalesSlot,
};
use pretty_assertions::assert_eq;

fn fresh() -> AppData {
    AppData::with_layout_on(
        &DocumentLayout::default(),
        NaiveDate::from_ymd_opt(2024, 7, 1).expect("valid date"),
    )
}

#[test]
fn editing_one_cell_leaves_every_other_row_shared() {
    let doc = fresh();
    let before = &doc.sales.sales_data;
    let after = before
        .with_field(7, SalesSlot::Shakil, "15")
        .expect("row 7 exists");

    assert_eq!(after.len(), before.len());
    for index in 0..before.len() {
        let same = Arc::ptr_eq(
            before.shared(index).expect("row"),
            after.shared(index).expect("row"),
        );
        assert_eq!(same, index != 7, "row {index}");
    }

    let edited = after.get(7).expect("row 7");
    assert_eq!(edited.id, 7);
    for slot in SalesSlot::ALL {
        let expected = if slot == SalesSlot::Shakil { "15" } else { "" };
        assert_eq!(daybook_model::Row::field(edited, slot), expected);
    }
}

#[test]
fn appending_keeps_ids_equal_to_insertion_index() {
    let mut rows: Rows<SalesRow> = Rows::with_empty_rows(2);
    for _ in 0..3 {
        let len = rows.len();
        rows = rows.appended();
        assert_eq!(rows.len(), len + 1);
    }
    let ids: Vec<u32> = rows.iter().map(|row| row.id).collect();
    assert_eq!(ids, vec![0, 1, 2, 3, 4]);
}

#[test]
fn every_sheet_accepts_edits_and_round_trips() {
    let mut doc = fresh();
    doc.sales.sales_data = doc
        .sales
        .sales_data
        .with_field(0, SalesSlot::Bilal, "10")
        .expect("sales row");
    doc.statement.expenses = doc
        .statement
        .expenses
        .appended()
        .with_field(8, ExpenseField::Details, "gas")
        .and_then(|rows| rows.with_field(8, ExpenseField::Amount, "12.5"))
        .expect("expense row");
    doc.statement.day_closing.atm = "200".to_string();
    doc.accounting.month = "July 2024".to_string();
    doc.accounting.accounting_data = doc
        .accounting
        .accounting_data
        .with_field(3, LedgerField::Service, "abc")
        .expect("ledger row");

    let json = doc.to_json().expect("serialize");
    assert_eq!(AppData::from_json(&json).expect("parse"), doc);

    let totals = doc.totals();
    assert_eq!(totals.sales.grand_total, 10.0);
    assert_eq!(totals.statement.total_expenses, 12.5);
    assert_eq!(totals.statement.net_cash, -12.5);
    assert_eq!(totals.accounting.service, 0.0);
    assert_eq!(
        format_total(totals.statement.net_cash, DisplayPolicy::PositiveOnly),
        ""
    );
    assert_eq!(format_total(totals.statement.day_closing_total, DisplayPolicy::NonZero), "200");
}
