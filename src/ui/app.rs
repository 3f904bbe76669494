use anyhow::Result;
use chrono::{Local, NaiveDate};
use uuid::Uuid;

use crate::error::LedgerError;
use crate::ledger::{select, summarize, DateFilter, LedgerStore, Summary};
use crate::models::{Transaction, TxnType};
use crate::ui::chart::ChartHandle;
use crate::ui::form::{EntryForm, RangeForm};
use crate::ui::util::{scroll_down, scroll_to_bottom, scroll_to_top, scroll_up};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Screen {
    Dashboard,
    Transactions,
}

impl Screen {
    pub(crate) fn all() -> &'static [Screen] {
        &[Self::Dashboard, Self::Transactions]
    }
}

impl std::fmt::Display for Screen {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Dashboard => write!(f, "Dashboard"),
            Self::Transactions => write!(f, "Transactions"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum InputMode {
    Normal,
    Command,
    Entry,
    Range,
    Confirm,
}

impl std::fmt::Display for InputMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Normal => write!(f, "NORMAL"),
            Self::Command => write!(f, "COMMAND"),
            Self::Entry => write!(f, "ENTRY"),
            Self::Range => write!(f, "RANGE"),
            Self::Confirm => write!(f, "CONFIRM"),
        }
    }
}

/// Pending action that requires user confirmation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum PendingAction {
    DeleteTransaction { id: Uuid, description: String },
}

pub(crate) struct App {
    pub(crate) running: bool,
    pub(crate) screen: Screen,
    pub(crate) input_mode: InputMode,
    pub(crate) command_input: String,
    pub(crate) status_message: String,
    pub(crate) show_help: bool,
    /// Blocking message; the next key press dismisses it.
    pub(crate) notice: Option<String>,
    pub(crate) currency: String,
    pub(crate) today: NaiveDate,

    // Ledger view
    pub(crate) filter: DateFilter,
    pub(crate) transactions: Vec<Transaction>,
    pub(crate) ledger_count: usize,
    pub(crate) summary: Summary,
    pub(crate) chart: ChartHandle,
    pub(crate) transaction_index: usize,
    pub(crate) transaction_scroll: usize,

    // Forms
    pub(crate) entry_form: Option<EntryForm>,
    pub(crate) range_form: Option<RangeForm>,

    // Confirmation
    pub(crate) pending_action: Option<PendingAction>,
    pub(crate) confirm_message: String,

    // Layout (updated each render frame)
    pub(crate) visible_rows: usize,
}

impl App {
    pub(crate) fn new(currency: impl Into<String>) -> Self {
        Self {
            running: true,
            screen: Screen::Dashboard,
            input_mode: InputMode::Normal,
            command_input: String::new(),
            status_message: String::new(),
            show_help: false,
            notice: None,
            currency: currency.into(),
            today: Local::now().date_naive(),

            filter: DateFilter::All,
            transactions: Vec::new(),
            ledger_count: 0,
            summary: Summary::default(),
            chart: ChartHandle::default(),
            transaction_index: 0,
            transaction_scroll: 0,

            entry_form: None,
            range_form: None,

            pending_action: None,
            confirm_message: String::new(),

            visible_rows: 20,
        }
    }

    /// Re-read the ledger, re-run the filter, and push new totals into the chart.
    pub(crate) fn refresh(&mut self, store: &LedgerStore) -> Result<()> {
        let ledger = store.list()?;
        self.ledger_count = ledger.len();

        let visible = select(&ledger, &self.filter, self.today)?;
        self.summary = summarize(visible.iter().copied());
        self.transactions = visible.into_iter().cloned().collect();

        if self.transaction_index >= self.transactions.len() {
            self.transaction_index = self.transactions.len().saturating_sub(1);
        }
        if self.transaction_scroll > self.transaction_index {
            self.transaction_scroll = self.transaction_index;
        }

        if self.chart.is_initialized() {
            self.chart.update(&self.summary);
        } else {
            self.chart.create(&self.summary);
        }
        Ok(())
    }

    /// Switch filters. A custom filter without both bounds leaves the current one active.
    pub(crate) fn apply_filter(&mut self, filter: DateFilter, store: &LedgerStore) -> Result<()> {
        match filter.bounds(self.today) {
            Err(e @ LedgerError::MissingFilterRange) => {
                self.show_notice(format!("⚠️ {e}"));
                return Ok(());
            }
            Err(e) => return Err(e.into()),
            Ok(_) => {}
        }
        self.filter = filter;
        self.transaction_index = 0;
        self.transaction_scroll = 0;
        self.refresh(store)?;
        log::info!("filter set to {} ({filter})", filter.name());
        self.set_status(format!(
            "Filter: {filter} ({} of {} transactions)",
            self.transactions.len(),
            self.ledger_count
        ));
        Ok(())
    }

    // ── Entry forms ───────────────────────────────────────────

    pub(crate) fn open_entry_form(&mut self, kind: TxnType) {
        self.entry_form = Some(EntryForm::new(kind));
        self.input_mode = InputMode::Entry;
    }

    pub(crate) fn close_entry_form(&mut self) {
        self.entry_form = None;
        self.input_mode = InputMode::Normal;
    }

    /// Validate and store the open form.
    ///
    /// On success the fields are cleared for the next entry. On a validation
    /// error the values stay and a notice explains what is wrong.
    pub(crate) fn submit_entry_form(&mut self, store: &LedgerStore) -> Result<()> {
        let Some(form) = self.entry_form.as_mut() else {
            log::error!("{}", LedgerError::MissingUiElement("entry form"));
            self.input_mode = InputMode::Normal;
            return Ok(());
        };

        match store.add(form.kind, &form.draft) {
            Ok(txn) => {
                form.clear();
                self.refresh(store)?;
                self.show_notice(format!("✅ {} added successfully!", txn.kind));
                self.set_status(format!("Added: {} ({})", txn.description, txn.category));
            }
            Err(LedgerError::Validation(e)) => {
                self.show_notice(format!("⚠️ Please enter valid details: {e}"));
            }
            Err(e) => return Err(e.into()),
        }
        Ok(())
    }

    // ── Custom range form ─────────────────────────────────────

    pub(crate) fn open_range_form(&mut self) {
        let form = match self.filter {
            DateFilter::Custom {
                start: Some(start),
                end: Some(end),
            } => RangeForm {
                start: start.to_string(),
                end: end.to_string(),
                focus: 0,
            },
            _ => RangeForm::default(),
        };
        self.range_form = Some(form);
        self.input_mode = InputMode::Range;
    }

    pub(crate) fn close_range_form(&mut self) {
        self.range_form = None;
        self.input_mode = InputMode::Normal;
    }

    pub(crate) fn submit_range_form(&mut self, store: &LedgerStore) -> Result<()> {
        let Some(form) = self.range_form.as_ref() else {
            log::error!("{}", LedgerError::MissingUiElement("custom range form"));
            self.input_mode = InputMode::Normal;
            return Ok(());
        };

        match form.to_filter() {
            Ok(filter) => {
                self.close_range_form();
                self.apply_filter(filter, store)
            }
            Err(e @ LedgerError::MissingFilterRange) => {
                self.show_notice(format!("⚠️ {e}"));
                Ok(())
            }
            Err(e) => Err(e.into()),
        }
    }

    // ── Deletion ──────────────────────────────────────────────

    /// Ask for confirmation before deleting the row under the cursor.
    pub(crate) fn request_delete(&mut self) {
        let Some(txn) = self.transactions.get(self.transaction_index) else {
            log::warn!("{}", LedgerError::MissingUiElement("selected transaction row"));
            return;
        };
        self.confirm_message = format!("Delete '{}' on {}?", txn.description, txn.date);
        self.pending_action = Some(PendingAction::DeleteTransaction {
            id: txn.id,
            description: txn.description.clone(),
        });
        self.input_mode = InputMode::Confirm;
    }

    pub(crate) fn confirm_pending(&mut self, store: &LedgerStore) -> Result<()> {
        if let Some(action) = self.pending_action.take() {
            match action {
                PendingAction::DeleteTransaction { id, description } => {
                    if store.delete(id)? {
                        self.set_status(format!("Deleted: {description}"));
                    } else {
                        self.set_status(format!("Already gone: {description}"));
                    }
                    self.refresh(store)?;
                }
            }
        }
        self.input_mode = InputMode::Normal;
        self.confirm_message.clear();
        Ok(())
    }

    pub(crate) fn cancel_pending(&mut self) {
        self.pending_action = None;
        self.input_mode = InputMode::Normal;
        self.confirm_message.clear();
        self.set_status("Cancelled");
    }

    /// Remove every record with this date and description.
    pub(crate) fn delete_matching(
        &mut self,
        date: NaiveDate,
        description: &str,
        store: &LedgerStore,
    ) -> Result<()> {
        let removed = store.delete_matching(date, description)?;
        self.refresh(store)?;
        self.set_status(format!(
            "Deleted {removed} transaction{} matching {date} '{description}'",
            if removed == 1 { "" } else { "s" }
        ));
        Ok(())
    }

    /// Tear the chart down and build it again from the current totals.
    pub(crate) fn reset_chart(&mut self) {
        self.chart.replace(&self.summary);
        self.set_status("Chart reinitialized");
    }

    // ── Cursor ────────────────────────────────────────────────

    pub(crate) fn move_down(&mut self) {
        let page = self.visible_rows.max(1);
        scroll_down(
            &mut self.transaction_index,
            &mut self.transaction_scroll,
            self.transactions.len(),
            page,
        );
    }

    pub(crate) fn move_up(&mut self) {
        scroll_up(&mut self.transaction_index, &mut self.transaction_scroll);
    }

    pub(crate) fn goto_top(&mut self) {
        scroll_to_top(&mut self.transaction_index, &mut self.transaction_scroll);
    }

    pub(crate) fn goto_bottom(&mut self) {
        let page = self.visible_rows.max(1);
        scroll_to_bottom(
            &mut self.transaction_index,
            &mut self.transaction_scroll,
            self.transactions.len(),
            page,
        );
    }

    pub(crate) fn set_status(&mut self, msg: impl Into<String>) {
        self.status_message = msg.into();
    }

    pub(crate) fn show_notice(&mut self, msg: impl Into<String>) {
        self.notice = Some(msg.into());
    }
}

#[cfg(test)]
#[path = "app_tests.rs"]
mod app_tests;
