use clap::ValueEnum;
use daybook_model::{
    format_total, AppData, DisplayPolicy, DocumentTotals, LedgerTotals, SalesTotals,
    StatementTotals,
};
use serde::Serialize;

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum Sheet {
    Sales,
    Statement,
    Accounting,
    All,
}

impl Sheet {
    fn includes(self, other: Sheet) -> bool {
        self == Sheet::All || self == other
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct JsonReport<'a> {
    source: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    sales: Option<SalesTotals>,
    #[serde(skip_serializing_if = "Option::is_none")]
    statement: Option<StatementTotals>,
    #[serde(skip_serializing_if = "Option::is_none")]
    accounting: Option<LedgerTotals>,
}

impl<'a> JsonReport<'a> {
    pub fn new(source: &'a str, totals: &DocumentTotals, sheet: Sheet) -> Self {
        Self {
            source,
            sales: sheet.includes(Sheet::Sales).then_some(totals.sales),
            statement: sheet.includes(Sheet::Statement).then_some(totals.statement),
            accounting: sheet.includes(Sheet::Accounting).then_some(totals.accounting),
        }
    }
}

fn line(out: &mut String, label: &str, value: f64, policy: DisplayPolicy) {
    let rendered = format!("  {label:<18}{:>14}", format_total(value, policy));
    out.push_str(rendered.trim_end());
    out.push('\n');
}

/// Plain-text footer totals, rendered with the same blanking rules as the sheets.
pub fn render_text(source: &str, doc: &AppData, sheet: Sheet) -> String {
    let totals = doc.totals();
    let mut out = format!("Source: {source}\n");

    if sheet.includes(Sheet::Sales) {
        let labels = &doc.sales.sales_person_display_names;
        out.push_str(&format!("\nSales {}\n", doc.sales.current_date));
        for (slot, total) in totals.sales.columns() {
            line(&mut out, labels.get(slot), total, DisplayPolicy::NonZero);
        }
        line(
            &mut out,
            "Grand total",
            totals.sales.grand_total,
            DisplayPolicy::NonZero,
        );
    }

    if sheet.includes(Sheet::Statement) {
        let statement = &totals.statement;
        let heading = [doc.statement.day.as_str(), doc.statement.date.as_str()]
            .into_iter()
            .filter(|part| !part.is_empty())
            .collect::<Vec<_>>()
            .join(" ");
        out.push_str(&format!("\nStatement {heading}\n"));
        for (label, value) in [
            ("Day closing", statement.day_closing_total),
            ("Night closing", statement.night_closing_total),
            ("Closing ATM", statement.total_closing_atm),
            ("Closing cash", statement.total_closing_cash),
            ("Total closing", statement.total_closing),
        ] {
            line(&mut out, label, value, DisplayPolicy::PositiveOnly);
        }
        line(
            &mut out,
            "Expenses",
            statement.total_expenses,
            DisplayPolicy::PositiveOnly,
        );
        line(&mut out, "Net cash", statement.net_cash, DisplayPolicy::NonZero);
    }

    if sheet.includes(Sheet::Accounting) {
        let ledger = &totals.accounting;
        out.push_str(&format!("\nAccounting {}\n", doc.accounting.month));
        for (label, value) in [
            ("Service", ledger.service),
            ("Cash", ledger.cash),
            ("Expense", ledger.expense),
            ("Remaining cash", ledger.remaining_cash),
            ("Total", ledger.total),
        ] {
            line(&mut out, label, value, DisplayPolicy::NonZero);
        }
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use daybook_model::{DocumentLayout, SalesSlot};

    #[test]
    fn zero_totals_are_blank_and_labels_follow_the_document() {
        let mut doc = AppData::with_layout(&DocumentLayout::default());
        doc.sales.sales_person_display_names.set(SalesSlot::Bilal, "Rafi");
        doc.sales.sales_data = doc
            .sales
            .sales_data
            .with_field(0, SalesSlot::Bilal, "1234.5")
            .unwrap();

        let text = render_text("autosave", &doc, Sheet::Sales);
        assert!(text.contains("  Rafi                     1,234.5\n"), "{text}");
        assert!(text.contains("\n  Alomgir\n"), "{text}");
        assert!(!text.contains("Statement"));
    }

    #[test]
    fn negative_closing_is_hidden_but_negative_net_cash_is_shown() {
        let mut doc = AppData::with_layout(&DocumentLayout::default());
        doc.statement.night_closing.cash = "-20".to_string();
        doc.statement.expenses = doc
            .statement
            .expenses
            .with_field(0, daybook_model::ExpenseField::Amount, "5")
            .unwrap();

        let text = render_text("autosave", &doc, Sheet::Statement);
        assert!(text.contains("\n  Night closing\n"), "{text}");
        assert!(text.contains("  Expenses                       5\n"), "{text}");
        assert!(text.contains("  Net cash                     -25\n"), "{text}");
    }

    #[test]
    fn negative_expense_total_is_hidden() {
        let mut doc = AppData::with_layout(&DocumentLayout::default());
        doc.statement.expenses = doc
            .statement
            .expenses
            .with_field(0, daybook_model::ExpenseField::Amount, "-8")
            .unwrap();

        let text = render_text("autosave", &doc, Sheet::Statement);
        assert!(text.contains("\n  Expenses\n"), "{text}");
        assert!(text.contains("  Net cash                       8\n"), "{text}");
    }
}
