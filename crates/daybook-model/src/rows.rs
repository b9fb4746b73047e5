use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::ModelError;

/// Stable row identifier: the collection length at the moment the row was appended.
pub type RowId = u32;

/// A sheet row made of raw text fields plus a stable [`RowId`].
pub trait Row: Clone {
    /// Editable field selector. The id is never a field.
    type Field: Copy;

    fn empty(id: RowId) -> Self;
    fn id(&self) -> RowId;
    fn field(&self, field: Self::Field) -> &str;
    fn set_field(&mut self, field: Self::Field, value: String);
}

/// Salesperson column on the sales sheet: four named staff plus a cash catch-all.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SalesSlot {
    Bilal,
    Shahjahan,
    Belal,
    Shakil,
    Cash,
}

impl SalesSlot {
    pub const COUNT: usize = 5;

    /// Column order on the sheet.
    pub const ALL: [SalesSlot; Self::COUNT] = [
        SalesSlot::Bilal,
        SalesSlot::Shahjahan,
        SalesSlot::Belal,
        SalesSlot::Shakil,
        SalesSlot::Cash,
    ];

    /// JSON key of the slot in rows and in the label map.
    pub fn key(self) -> &'static str {
        match self {
            SalesSlot::Bilal => "bilal",
            SalesSlot::Shahjahan => "shahjahan",
            SalesSlot::Belal => "belal",
            SalesSlot::Shakil => "shakil",
            SalesSlot::Cash => "cash",
        }
    }

    pub(crate) fn index(self) -> usize {
        self as usize
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SalesRow {
    pub id: RowId,
    #[serde(default)]
    pub bilal: String,
    #[serde(default)]
    pub shahjahan: String,
    #[serde(default)]
    pub belal: String,
    #[serde(default)]
    pub shakil: String,
    #[serde(default)]
    pub cash: String,
}

impl Row for SalesRow {
    type Field = SalesSlot;

    fn empty(id: RowId) -> Self {
        Self {
            id,
            bilal: String::new(),
            shahjahan: String::new(),
            belal: String::new(),
            shakil: String::new(),
            cash: String::new(),
        }
    }

    fn id(&self) -> RowId {
        self.id
    }

    fn field(&self, field: SalesSlot) -> &str {
        match field {
            SalesSlot::Bilal => &self.bilal,
            SalesSlot::Shahjahan => &self.shahjahan,
            SalesSlot::Belal => &self.belal,
            SalesSlot::Shakil => &self.shakil,
            SalesSlot::Cash => &self.cash,
        }
    }

    fn set_field(&mut self, field: SalesSlot, value: String) {
        match field {
            SalesSlot::Bilal => self.bilal = value,
            SalesSlot::Shahjahan => self.shahjahan = value,
            SalesSlot::Belal => self.belal = value,
            SalesSlot::Shakil => self.shakil = value,
            SalesSlot::Cash => self.cash = value,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ExpenseField {
    Details,
    Amount,
}

/// One line of the daily statement's expense list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExpenseRow {
    pub id: RowId,
    #[serde(default)]
    pub details: String,
    #[serde(default)]
    pub amount: String,
}

impl Row for ExpenseRow {
    type Field = ExpenseField;

    fn empty(id: RowId) -> Self {
        Self {
            id,
            details: String::new(),
            amount: String::new(),
        }
    }

    fn id(&self) -> RowId {
        self.id
    }

    fn field(&self, field: ExpenseField) -> &str {
        match field {
            ExpenseField::Details => &self.details,
            ExpenseField::Amount => &self.amount,
        }
    }

    fn set_field(&mut self, field: ExpenseField, value: String) {
        match field {
            ExpenseField::Details => self.details = value,
            ExpenseField::Amount => self.amount = value,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LedgerField {
    Date,
    Service,
    Cash,
    Expense,
}

/// One line of the monthly accounting report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LedgerRow {
    pub id: RowId,
    /// ISO `YYYY-MM-DD` or empty.
    #[serde(default)]
    pub date: String,
    #[serde(default)]
    pub service: String,
    #[serde(default)]
    pub cash: String,
    #[serde(default)]
    pub expense: String,
}

impl Row for LedgerRow {
    type Field = LedgerField;

    fn empty(id: RowId) -> Self {
        Self {
            id,
            date: String::new(),
            service: String::new(),
            cash: String::new(),
            expense: String::new(),
        }
    }

    fn id(&self) -> RowId {
        self.id
    }

    fn field(&self, field: LedgerField) -> &str {
        match field {
            LedgerField::Date => &self.date,
            LedgerField::Service => &self.service,
            LedgerField::Cash => &self.cash,
            LedgerField::Expense => &self.expense,
        }
    }

    fn set_field(&mut self, field: LedgerField, value: String) {
        match field {
            LedgerField::Date => self.date = value,
            LedgerField::Service => self.service = value,
            LedgerField::Cash => self.cash = value,
            LedgerField::Expense => self.expense = value,
        }
    }
}

/// Ordered, append-only row collection.
///
/// Rows are shared behind `Arc`, so [`Rows::with_field`] and [`Rows::appended`]
/// produce a new collection that reuses every untouched row. Serializes as a plain
/// JSON array of rows.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Rows<R>(Vec<Arc<R>>);

impl<R> Default for Rows<R> {
    fn default() -> Self {
        Self(Vec::new())
    }
}

impl<R: Row> Rows<R> {
    /// `count` empty rows with ids `0..count`.
    pub fn with_empty_rows(count: usize) -> Self {
        Self((0..count).map(|i| Arc::new(R::empty(i as RowId))).collect())
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&R> {
        self.0.get(index).map(Arc::as_ref)
    }

    /// Shared handle to a row; two collections share a row when their handles are
    /// `Arc::ptr_eq`.
    pub fn shared(&self, index: usize) -> Option<&Arc<R>> {
        self.0.get(index)
    }

    pub fn iter(&self) -> impl Iterator<Item = &R> + '_ {
        self.0.iter().map(Arc::as_ref)
    }

    /// Copy of this collection with one field of one row replaced by `value`.
    ///
    /// The value is stored verbatim; no numeric coercion happens at write time.
    pub fn with_field(
        &self,
        index: usize,
        field: R::Field,
        value: impl Into<String>,
    ) -> Result<Self, ModelError> {
        let current = self.0.get(index).ok_or(ModelError::RowOutOfBounds {
            index,
            len: self.0.len(),
        })?;
        let mut row = R::clone(current);
        row.set_field(field, value.into());

        let mut rows = self.0.clone();
        rows[index] = Arc::new(row);
        Ok(Self(rows))
    }

    /// Copy of this collection with one empty row appended. The new row's id is the
    /// previous length.
    pub fn appended(&self) -> Self {
        let mut rows = self.0.clone();
        rows.push(Arc::new(R::empty(self.0.len() as RowId)));
        Self(rows)
    }
}

impl<R: Row> FromIterator<R> for Rows<R> {
    fn from_iter<I: IntoIterator<Item = R>>(iter: I) -> Self {
        Self(iter.into_iter().map(Arc::new).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn with_field_replaces_only_the_addressed_cell() {
        let rows: Rows<SalesRow> = Rows::with_empty_rows(3);
        let edited = rows.with_field(1, SalesSlot::Belal, "12").unwrap();

        assert_eq!(edited.get(1).unwrap().belal, "12");
        assert_eq!(edited.get(1).unwrap().bilal, "");
        assert_eq!(edited.get(1).unwrap().id, 1);
        assert!(Arc::ptr_eq(rows.shared(0).unwrap(), edited.shared(0).unwrap()));
        assert!(Arc::ptr_eq(rows.shared(2).unwrap(), edited.shared(2).unwrap()));
        assert!(!Arc::ptr_eq(rows.shared(1).unwrap(), edited.shared(1).unwrap()));

        // The source collection is untouched.
        assert_eq!(rows.get(1).unwrap().belal, "");
    }

    #[test]
    fn with_field_keeps_partial_text_verbatim() {
        let rows: Rows<LedgerRow> = Rows::with_empty_rows(1);
        let edited = rows.with_field(0, LedgerField::Cash, "3.").unwrap();
        let edited = edited.with_field(0, LedgerField::Expense, "-").unwrap();
        assert_eq!(edited.get(0).unwrap().cash, "3.");
        assert_eq!(edited.get(0).unwrap().expense, "-");
    }

    #[test]
    fn with_field_rejects_out_of_bounds_rows() {
        let rows: Rows<ExpenseRow> = Rows::with_empty_rows(2);
        assert_eq!(
            rows.with_field(2, ExpenseField::Amount, "5").unwrap_err(),
            ModelError::RowOutOfBounds { index: 2, len: 2 }
        );
    }

    #[test]
    fn appended_row_takes_previous_length_as_id() {
        let rows: Rows<ExpenseRow> = Rows::with_empty_rows(8);
        let grown = rows.appended();
        assert_eq!(grown.len(), 9);
        assert_eq!(grown.get(8).unwrap(), &ExpenseRow::empty(8));
        for i in 0..8 {
            assert!(Arc::ptr_eq(rows.shared(i).unwrap(), grown.shared(i).unwrap()));
        }
    }

    #[test]
    fn rows_serialize_as_a_plain_array() {
        let rows: Rows<ExpenseRow> = Rows::with_empty_rows(1)
            .with_field(0, ExpenseField::Details, "milk")
            .unwrap();
        let json = serde_json::to_value(&rows).unwrap();
        assert_eq!(
            json,
            serde_json::json!([{"id": 0, "details": "milk", "amount": ""}])
        );
    }
}
