use std::sync::Arc;

use chrono::Local;
use daybook_model::{
    is_explicit_zero, AccountingState, AppData, ClosingField, ClosingKind, DocumentTotals,
    ExpenseField, LedgerField, ModelError, Row, SalesSlot, SalesState, StatementState,
};
use daybook_storage::slots::{
    normalize_snapshot_name, snapshot_key, snapshot_names, AUTOSAVE_KEY,
};
use daybook_storage::{
    read_document, write_document, AutoSaveManager, KeyValueStore, StorageError,
};
use tokio::time::Instant;

use crate::config::SessionConfig;
use crate::error::SessionError;
use crate::notify::{Notification, Notifications};
use crate::validation::InputFlags;

const AUTOSAVE_FAILED: &str = "Autosave failed. Storage might be full.";
const AUTOSAVE_UNREADABLE: &str = "Autosaved data could not be read. Starting with a fresh sheet.";

/// One editing session over a store.
///
/// All edits are synchronous and replace the live document. When the session was
/// opened inside a tokio runtime, every edit also schedules a debounced write of
/// the document to the autosave slot.
pub struct Session {
    store: Arc<dyn KeyValueStore>,
    config: SessionConfig,
    data: AppData,
    flags: InputFlags,
    save_name: String,
    snapshot_names: Vec<String>,
    selected: Option<String>,
    notifications: Notifications,
    autosave: Option<AutoSaveManager>,
}

impl Session {
    /// Open a session, recovering the autosaved document if there is a usable one.
    ///
    /// Never fails: an unreadable or malformed autosave slot falls back to a fresh
    /// document (with a warning notification), and an unreadable key listing to an
    /// empty snapshot index.
    pub fn open(store: Arc<dyn KeyValueStore>, config: SessionConfig) -> Self {
        let notifications = Notifications::new(config.notifications);
        let data = match read_document(store.as_ref(), AUTOSAVE_KEY) {
            Ok(Some(doc)) => doc,
            Ok(None) => AppData::with_layout(&config.layout),
            Err(err) => {
                log::warn!("ignoring unusable autosave: {err}");
                notifications.warning(AUTOSAVE_UNREADABLE);
                AppData::with_layout(&config.layout)
            }
        };

        let names = snapshot_names(store.as_ref()).unwrap_or_else(|err| {
            log::warn!("failed to list snapshots: {err}");
            Vec::new()
        });
        let selected = names.first().cloned();

        let autosave = match tokio::runtime::Handle::try_current() {
            Ok(_) => {
                let sink = notifications.clone();
                Some(AutoSaveManager::spawn_with_hook(
                    store.clone(),
                    config.autosave,
                    Arc::new(move |_: &StorageError| sink.error(AUTOSAVE_FAILED)),
                ))
            }
            Err(_) => {
                log::debug!("no tokio runtime; autosave only runs on explicit flush");
                None
            }
        };

        Self {
            store,
            config,
            data,
            flags: InputFlags::default(),
            save_name: Local::now().format("%B %Y").to_string(),
            snapshot_names: names,
            selected,
            notifications,
            autosave,
        }
    }

    pub fn data(&self) -> &AppData {
        &self.data
    }

    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    pub fn totals(&self) -> DocumentTotals {
        self.data.totals()
    }

    pub fn notifications(&self) -> &Notifications {
        &self.notifications
    }

    /// The notification that should currently be on screen.
    pub fn active_notification(&self) -> Option<Notification> {
        self.notifications.active(Instant::now())
    }

    pub fn input_flags(&self) -> &InputFlags {
        &self.flags
    }

    pub fn is_flagged(&self, row: usize, slot: SalesSlot) -> bool {
        self.flags.contains(row, slot)
    }

    // Sheet-level updates.

    pub fn update_sales(&mut self, update: impl FnOnce(&SalesState) -> SalesState) {
        self.data.sales = update(&self.data.sales);
        self.commit();
    }

    pub fn update_statement(&mut self, update: impl FnOnce(&StatementState) -> StatementState) {
        self.data.statement = update(&self.data.statement);
        self.commit();
    }

    pub fn update_accounting(
        &mut self,
        update: impl FnOnce(&AccountingState) -> AccountingState,
    ) {
        self.data.accounting = update(&self.data.accounting);
        self.commit();
    }

    // Sales sheet.

    /// Store `value` verbatim in a sales cell and re-check its validation flag.
    pub fn set_sales_field(
        &mut self,
        row: usize,
        slot: SalesSlot,
        value: impl Into<String>,
    ) -> Result<(), SessionError> {
        let value = value.into();
        let rows = self.data.sales.sales_data.with_field(row, slot, value.as_str())?;
        self.flags.check(row, slot, &value);
        self.data.sales.sales_data = rows;
        self.commit();
        Ok(())
    }

    /// Focus left a sales cell: text that reads as exactly zero is cleared.
    ///
    /// Returns whether the cell was cleared.
    pub fn blur_sales_field(&mut self, row: usize, slot: SalesSlot) -> Result<bool, SessionError> {
        let len = self.data.sales.sales_data.len();
        let current = self
            .data
            .sales
            .sales_data
            .get(row)
            .ok_or(ModelError::RowOutOfBounds { index: row, len })?;
        if !is_explicit_zero(current.field(slot)) {
            return Ok(false);
        }
        self.set_sales_field(row, slot, "")?;
        Ok(true)
    }

    pub fn append_sales_row(&mut self) {
        self.data.sales.sales_data = self.data.sales.sales_data.appended();
        self.commit();
    }

    pub fn set_slot_label(&mut self, slot: SalesSlot, label: impl Into<String>) {
        self.data.sales.sales_person_display_names.set(slot, label);
        self.commit();
    }

    pub fn set_sales_date(&mut self, date: impl Into<String>) {
        self.data.sales.current_date = date.into();
        self.commit();
    }

    // Statement sheet.

    pub fn set_statement_day(&mut self, day: impl Into<String>) {
        self.data.statement.day = day.into();
        self.commit();
    }

    pub fn set_statement_date(&mut self, date: impl Into<String>) {
        self.data.statement.date = date.into();
        self.commit();
    }

    pub fn set_closing(&mut self, kind: ClosingKind, field: ClosingField, value: impl Into<String>) {
        self.data.statement.closing_mut(kind).set_field(field, value);
        self.commit();
    }

    pub fn set_expense_field(
        &mut self,
        row: usize,
        field: ExpenseField,
        value: impl Into<String>,
    ) -> Result<(), SessionError> {
        self.data.statement.expenses = self.data.statement.expenses.with_field(row, field, value)?;
        self.commit();
        Ok(())
    }

    pub fn append_expense_row(&mut self) {
        self.data.statement.expenses = self.data.statement.expenses.appended();
        self.commit();
    }

    // Accounting sheet.

    pub fn set_accounting_month(&mut self, month: impl Into<String>) {
        self.data.accounting.month = month.into();
        self.commit();
    }

    pub fn set_ledger_field(
        &mut self,
        row: usize,
        field: LedgerField,
        value: impl Into<String>,
    ) -> Result<(), SessionError> {
        self.data.accounting.accounting_data =
            self.data.accounting.accounting_data.with_field(row, field, value)?;
        self.commit();
        Ok(())
    }

    pub fn append_ledger_row(&mut self) {
        self.data.accounting.accounting_data = self.data.accounting.accounting_data.appended();
        self.commit();
    }

    // Named snapshots.

    pub fn save_name(&self) -> &str {
        &self.save_name
    }

    pub fn set_save_name(&mut self, name: impl Into<String>) {
        self.save_name = name.into();
    }

    /// Known snapshot names, ascending.
    pub fn snapshot_names(&self) -> &[String] {
        &self.snapshot_names
    }

    pub fn selected_snapshot(&self) -> Option<&str> {
        self.selected.as_deref()
    }

    /// Select the snapshot the next [`load_selected_snapshot`](Self::load_selected_snapshot)
    /// reads. Any name may be selected; existence is checked on load.
    pub fn select_snapshot(&mut self, name: impl Into<String>) {
        self.selected = Some(name.into());
    }

    /// Save the live document under the current save name.
    pub fn save_snapshot(&mut self) -> Result<(), SessionError> {
        let name = self.save_name.clone();
        self.save_snapshot_as(&name)
    }

    pub fn save_snapshot_as(&mut self, name: &str) -> Result<(), SessionError> {
        let Some(name) = normalize_snapshot_name(name) else {
            self.notifications
                .warning("Please enter a name for the month to save.");
            return Err(SessionError::MissingSaveName);
        };

        if let Err(err) = write_document(self.store.as_ref(), &snapshot_key(name), &self.data) {
            log::error!("failed to save snapshot `{name}`: {err}");
            self.notifications
                .error("Failed to save data. Storage might be full.");
            return Err(err.into());
        }

        // Only a newly indexed name moves the selection.
        if let Err(pos) = self.snapshot_names.binary_search_by(|n| n.as_str().cmp(name)) {
            self.snapshot_names.insert(pos, name.to_string());
            self.selected = Some(name.to_string());
        }
        self.notifications.info(format!("Data saved for \"{name}\"."));
        Ok(())
    }

    pub fn load_selected_snapshot(&mut self) -> Result<(), SessionError> {
        let Some(name) = self.selected.clone().filter(|n| !n.is_empty()) else {
            self.notifications.warning("Please select a month to load.");
            return Err(SessionError::MissingSelection);
        };
        self.load_snapshot(&name)
    }

    /// Replace the live document with a stored snapshot.
    ///
    /// On any failure the live document is left exactly as it was.
    pub fn load_snapshot(&mut self, name: &str) -> Result<(), SessionError> {
        match read_document(self.store.as_ref(), &snapshot_key(name)) {
            Ok(Some(doc)) => {
                self.data = doc;
                self.flags.clear();
                self.commit();
                self.notifications
                    .info(format!("Data for \"{name}\" loaded successfully."));
                Ok(())
            }
            Ok(None) => {
                self.notifications
                    .warning(format!("No data found for \"{name}\"."));
                Err(SessionError::SnapshotNotFound(name.to_string()))
            }
            Err(StorageError::Document(source)) => {
                log::error!("snapshot `{name}` is malformed: {source}");
                self.notifications
                    .error("Failed to load data. It may be corrupted.");
                Err(SessionError::Malformed {
                    name: name.to_string(),
                    source,
                })
            }
            Err(err) => {
                log::error!("failed to read snapshot `{name}`: {err}");
                self.notifications
                    .error("Failed to load data. It may be corrupted.");
                Err(err.into())
            }
        }
    }

    // Autosave.

    /// Write the live document to the autosave slot right now, bypassing the
    /// debounce.
    pub fn write_autosave(&self) -> Result<(), SessionError> {
        write_document(self.store.as_ref(), AUTOSAVE_KEY, &self.data).map_err(|err| {
            log::error!("autosave failed: {err}");
            self.notifications.error(AUTOSAVE_FAILED);
            SessionError::from(err)
        })
    }

    /// Write any pending autosave immediately.
    pub async fn flush(&self) -> Result<(), SessionError> {
        match &self.autosave {
            Some(autosave) => Ok(autosave.flush().await?),
            None => self.write_autosave(),
        }
    }

    /// Flush and stop the autosave task. Edits made afterwards are only persisted
    /// by [`write_autosave`](Self::write_autosave).
    pub async fn shutdown(&mut self) -> Result<(), SessionError> {
        match self.autosave.take() {
            Some(autosave) => Ok(autosave.shutdown().await?),
            None => self.write_autosave(),
        }
    }

    /// Successful debounced writes so far; `0` when autosave is not running.
    pub fn autosave_count(&self) -> usize {
        self.autosave.as_ref().map_or(0, AutoSaveManager::save_count)
    }

    fn commit(&self) {
        if let Some(autosave) = &self.autosave {
            if let Err(err) = autosave.record(self.data.clone()) {
                log::warn!("autosave not scheduled: {err}");
            }
        }
    }
}

impl std::fmt::Debug for Session {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Session")
            .field("save_name", &self.save_name)
            .field("snapshot_names", &self.snapshot_names)
            .field("selected", &self.selected)
            .field("autosave", &self.autosave)
            .finish_non_exhaustive()
    }
}
