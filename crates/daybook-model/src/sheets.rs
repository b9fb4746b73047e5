use serde::{Deserialize, Serialize};

use crate::rows::{ExpenseRow, LedgerRow, Rows, SalesRow, SalesSlot};

/// User-editable column headers for the five sales slots.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SlotLabels {
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

impl Default for SlotLabels {
    fn default() -> Self {
        Self {
            bilal: "Jasim".to_string(),
            shahjahan: "Alomgir".to_string(),
            belal: "Razzak".to_string(),
            shakil: "Sohel".to_string(),
            cash: "ক্যাশ (Cash)".to_string(),
        }
    }
}

impl SlotLabels {
    pub fn get(&self, slot: SalesSlot) -> &str {
        match slot {
            SalesSlot::Bilal => &self.bilal,
            SalesSlot::Shahjahan => &self.shahjahan,
            SalesSlot::Belal => &self.belal,
            SalesSlot::Shakil => &self.shakil,
            SalesSlot::Cash => &self.cash,
        }
    }

    pub fn set(&mut self, slot: SalesSlot, label: impl Into<String>) {
        let label = label.into();
        match slot {
            SalesSlot::Bilal => self.bilal = label,
            SalesSlot::Shahjahan => self.shahjahan = label,
            SalesSlot::Belal => self.belal = label,
            SalesSlot::Shakil => self.shakil = label,
            SalesSlot::Cash => self.cash = label,
        }
    }
}

/// Daily sales count sheet.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SalesState {
    #[serde(default)]
    pub sales_data: Rows<SalesRow>,
    #[serde(default)]
    pub sales_person_display_names: SlotLabels,
    /// ISO `YYYY-MM-DD`.
    #[serde(default)]
    pub current_date: String,
}

/// ATM and cash figures counted at one closing.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Closing {
    #[serde(default)]
    pub atm: String,
    #[serde(default)]
    pub cash: String,
}

impl Closing {
    pub fn field(&self, field: ClosingField) -> &str {
        match field {
            ClosingField::Atm => &self.atm,
            ClosingField::Cash => &self.cash,
        }
    }

    pub fn set_field(&mut self, field: ClosingField, value: impl Into<String>) {
        let value = value.into();
        match field {
            ClosingField::Atm => self.atm = value,
            ClosingField::Cash => self.cash = value,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ClosingKind {
    Day,
    Night,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ClosingField {
    Atm,
    Cash,
}

/// Daily statement sheet: two closings and an expense list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StatementState {
    #[serde(default)]
    pub day: String,
    /// ISO `YYYY-MM-DD`.
    #[serde(default)]
    pub date: String,
    #[serde(default)]
    pub day_closing: Closing,
    #[serde(default)]
    pub night_closing: Closing,
    #[serde(default)]
    pub expenses: Rows<ExpenseRow>,
}

impl StatementState {
    pub fn closing(&self, kind: ClosingKind) -> &Closing {
        match kind {
            ClosingKind::Day => &self.day_closing,
            ClosingKind::Night => &self.night_closing,
        }
    }

    pub fn closing_mut(&mut self, kind: ClosingKind) -> &mut Closing {
        match kind {
            ClosingKind::Day => &mut self.day_closing,
            ClosingKind::Night => &mut self.night_closing,
        }
    }
}

/// Monthly business accounting sheet.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AccountingState {
    #[serde(default)]
    pub month: String,
    #[serde(default)]
    pub accounting_data: Rows<LedgerRow>,
}
