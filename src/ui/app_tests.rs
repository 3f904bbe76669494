#![allow(clippy::unwrap_used)]

use chrono::NaiveDate;
use rust_decimal_macros::dec;

use super::*;
use crate::db::Database;
use crate::ledger::{DateFilter, LedgerStore};
use crate::models::{TransactionDraft, TxnType};

fn setup() -> (App, LedgerStore) {
    let store = LedgerStore::new(Database::open_in_memory().unwrap());
    store.initialize().unwrap();
    let mut app = App::new("₹");
    app.today = NaiveDate::from_ymd_opt(2024, 3, 15).unwrap();
    app.refresh(&store).unwrap();
    (app, store)
}

fn type_into_form(app: &mut App, values: [&str; 4]) {
    let form = app.entry_form.as_mut().unwrap();
    for value in values {
        for c in value.chars() {
            form.push(c);
        }
        form.next_field();
    }
}

fn seed(store: &LedgerStore, kind: TxnType, date: &str, desc: &str, amount: &str) {
    store
        .add(kind, &TransactionDraft::new(date, desc, "Misc", amount))
        .unwrap();
}

// ── Startup ───────────────────────────────────────────────────

#[test]
fn test_refresh_survives_oversized_stored_amounts() {
    let (mut app, store) = setup();
    let blob = r#"[
        {"date":"2024-03-01","description":"a","category":"x","amount":50000000000000000000000000000,"type":"Income"},
        {"date":"2024-03-02","description":"b","category":"x","amount":50000000000000000000000000000,"type":"Income"}
    ]"#;
    store.db().set_item(crate::ledger::STORAGE_KEY, blob).unwrap();

    app.refresh(&store).unwrap();
    assert_eq!(app.summary.total_income, rust_decimal::Decimal::MAX);
    assert_eq!(
        app.chart.widget().unwrap().labels(),
        &["50.0%", "0.0%", "50.0%"]
    );
}

#[test]
fn test_refresh_creates_chart_once() {
    let (mut app, store) = setup();
    assert!(app.chart.is_initialized());
    assert_eq!(app.chart.generation(), 1);
    assert_eq!(app.chart.widget().unwrap().labels(), &["0%", "0%", "0%"]);

    seed(&store, TxnType::Income, "2024-03-01", "Salary", "1000");
    app.refresh(&store).unwrap();
    assert_eq!(app.chart.generation(), 1);
    assert_eq!(app.summary.total_income, dec!(1000));
}

// ── Entry form ────────────────────────────────────────────────

#[test]
fn test_submit_valid_entry() {
    let (mut app, store) = setup();
    app.open_entry_form(TxnType::Income);
    assert_eq!(app.input_mode, InputMode::Entry);
    type_into_form(&mut app, ["2024-03-01", "Salary", "Job", "1000"]);

    app.submit_entry_form(&store).unwrap();

    assert_eq!(app.transactions.len(), 1);
    assert_eq!(app.summary.balance, dec!(1000));
    assert_eq!(app.notice.as_deref(), Some("✅ Income added successfully!"));
    // form stays open and empty for the next entry
    let form = app.entry_form.as_ref().unwrap();
    assert!(form.draft.date.is_empty());
    assert!(form.draft.amount.is_empty());
    assert_eq!(app.input_mode, InputMode::Entry);
    assert_eq!(
        app.chart.widget().unwrap().labels(),
        &["50.0%", "0.0%", "50.0%"]
    );
}

#[test]
fn test_submit_invalid_entry_keeps_values() {
    let (mut app, store) = setup();
    app.open_entry_form(TxnType::Expense);
    type_into_form(&mut app, ["2024-03-01", "Tea", "Food", "-5"]);

    app.submit_entry_form(&store).unwrap();

    assert!(app.transactions.is_empty());
    assert!(store.list().unwrap().is_empty());
    assert!(app
        .notice
        .as_deref()
        .unwrap()
        .starts_with("⚠️ Please enter valid details"));
    assert_eq!(app.entry_form.as_ref().unwrap().draft.amount, "-5");
}

#[test]
fn test_submit_without_form_is_noop() {
    let (mut app, store) = setup();
    app.input_mode = InputMode::Entry;
    app.submit_entry_form(&store).unwrap();
    assert_eq!(app.input_mode, InputMode::Normal);
    assert!(app.notice.is_none());
}

#[test]
fn test_close_entry_form() {
    let (mut app, _store) = setup();
    app.open_entry_form(TxnType::Income);
    app.close_entry_form();
    assert!(app.entry_form.is_none());
    assert_eq!(app.input_mode, InputMode::Normal);
}

// ── Filters ───────────────────────────────────────────────────

#[test]
fn test_apply_filter_updates_totals() {
    let (mut app, store) = setup();
    seed(&store, TxnType::Income, "2024-03-01", "Salary", "1000");
    seed(&store, TxnType::Expense, "2022-06-01", "Old", "200");
    app.refresh(&store).unwrap();
    assert_eq!(app.summary.total_expense, dec!(200));

    app.apply_filter(DateFilter::LastYear, &store).unwrap();
    assert_eq!(app.filter, DateFilter::LastYear);
    assert_eq!(app.transactions.len(), 1);
    assert_eq!(app.ledger_count, 2);
    assert_eq!(app.summary.total_expense, dec!(0));
    assert_eq!(app.status_message, "Filter: Last year (1 of 2 transactions)");
}

#[test]
fn test_custom_filter_missing_bound_keeps_previous() {
    let (mut app, store) = setup();
    app.apply_filter(DateFilter::LastMonth, &store).unwrap();

    let partial = DateFilter::Custom {
        start: NaiveDate::from_ymd_opt(2024, 1, 1),
        end: None,
    };
    app.apply_filter(partial, &store).unwrap();

    assert_eq!(app.filter, DateFilter::LastMonth);
    assert_eq!(
        app.notice.as_deref(),
        Some("⚠️ Please select both start and end dates")
    );
}

#[test]
fn test_range_form_round_trip() {
    let (mut app, store) = setup();
    seed(&store, TxnType::Expense, "2024-01-10", "Tea", "3");
    seed(&store, TxnType::Expense, "2024-02-10", "Cake", "4");

    app.open_range_form();
    assert_eq!(app.input_mode, InputMode::Range);
    {
        let form = app.range_form.as_mut().unwrap();
        form.start = "2024-01-01".into();
        form.end = "2024-01-31".into();
    }
    app.submit_range_form(&store).unwrap();

    assert!(app.range_form.is_none());
    assert_eq!(app.transactions.len(), 1);
    assert_eq!(app.transactions[0].description, "Tea");

    // reopening prefills the active range
    app.open_range_form();
    let form = app.range_form.as_ref().unwrap();
    assert_eq!(form.start, "2024-01-01");
    assert_eq!(form.end, "2024-01-31");
}

#[test]
fn test_range_form_incomplete_shows_notice() {
    let (mut app, store) = setup();
    app.open_range_form();
    app.range_form.as_mut().unwrap().start = "2024-01-01".into();
    app.submit_range_form(&store).unwrap();

    assert!(app.notice.is_some());
    assert!(app.range_form.is_some());
    assert_eq!(app.filter, DateFilter::All);
}

// ── Deletion ──────────────────────────────────────────────────

#[test]
fn test_request_delete_without_rows() {
    let (mut app, _store) = setup();
    app.request_delete();
    assert_eq!(app.input_mode, InputMode::Normal);
    assert!(app.pending_action.is_none());
}

#[test]
fn test_delete_confirm_flow() {
    let (mut app, store) = setup();
    seed(&store, TxnType::Expense, "2024-03-02", "Coffee", "4.50");
    seed(&store, TxnType::Expense, "2024-03-03", "Lunch", "12");
    app.refresh(&store).unwrap();
    app.move_down();
    assert_eq!(app.transaction_index, 1);

    app.request_delete();
    assert_eq!(app.input_mode, InputMode::Confirm);
    assert_eq!(app.confirm_message, "Delete 'Lunch' on 2024-03-03?");

    app.confirm_pending(&store).unwrap();
    assert_eq!(app.input_mode, InputMode::Normal);
    assert_eq!(app.transactions.len(), 1);
    assert_eq!(app.transactions[0].description, "Coffee");
    assert_eq!(app.transaction_index, 0);
    assert_eq!(app.status_message, "Deleted: Lunch");
}

#[test]
fn test_delete_cancel_flow() {
    let (mut app, store) = setup();
    seed(&store, TxnType::Expense, "2024-03-02", "Coffee", "4.50");
    app.refresh(&store).unwrap();

    app.request_delete();
    app.cancel_pending();
    assert!(app.pending_action.is_none());
    assert_eq!(app.transactions.len(), 1);
    assert_eq!(app.status_message, "Cancelled");
}

#[test]
fn test_delete_matching_removes_all_duplicates() {
    let (mut app, store) = setup();
    seed(&store, TxnType::Expense, "2024-03-02", "Rent", "500");
    seed(&store, TxnType::Expense, "2024-03-02", "Rent", "500");
    seed(&store, TxnType::Income, "2024-03-02", "Salary", "900");

    let date = NaiveDate::from_ymd_opt(2024, 3, 2).unwrap();
    app.delete_matching(date, "Rent", &store).unwrap();

    assert_eq!(app.transactions.len(), 1);
    assert_eq!(app.summary.total_expense, dec!(0));
    assert_eq!(
        app.status_message,
        "Deleted 2 transactions matching 2024-03-02 'Rent'"
    );
}

// ── Chart and cursor ──────────────────────────────────────────

#[test]
fn test_reset_chart_rebuilds() {
    let (mut app, store) = setup();
    seed(&store, TxnType::Income, "2024-03-01", "Salary", "300");
    seed(&store, TxnType::Expense, "2024-03-02", "Food", "100");
    app.refresh(&store).unwrap();

    app.reset_chart();
    assert_eq!(app.chart.generation(), 2);
    assert_eq!(
        app.chart.widget().unwrap().labels(),
        &["50.0%", "16.7%", "33.3%"]
    );
}

#[test]
fn test_cursor_movement() {
    let (mut app, store) = setup();
    for day in 1..=5 {
        seed(&store, TxnType::Expense, &format!("2024-03-0{day}"), "x", "1");
    }
    app.refresh(&store).unwrap();
    app.visible_rows = 2;

    app.goto_bottom();
    assert_eq!(app.transaction_index, 4);
    assert_eq!(app.transaction_scroll, 3);
    app.move_up();
    app.move_up();
    assert_eq!(app.transaction_index, 2);
    assert_eq!(app.transaction_scroll, 2);
    app.goto_top();
    assert_eq!((app.transaction_index, app.transaction_scroll), (0, 0));
}
