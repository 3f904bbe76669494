use std::collections::HashMap;
use std::sync::LazyLock;

use super::app::{App, Screen};
use super::form::parse_date;
use crate::ledger::{DateFilter, LedgerStore};
use crate::models::TxnType;

pub(crate) struct Command {
    pub(crate) description: &'static str,
    pub(crate) run: fn(&str, &mut App, &LedgerStore) -> anyhow::Result<()>,
}

macro_rules! register_command {
    ($name:expr, $desc:expr, $func:expr, $registry:expr) => {{
        $registry.insert(
            $name,
            Command {
                description: $desc,
                run: $func,
            },
        );
    }};
}

pub(crate) static COMMANDS: LazyLock<HashMap<&str, Command>> = LazyLock::new(|| {
    let mut r: HashMap<&str, Command> = HashMap::new();

    register_command!("q", "Quit TallyTUI", cmd_quit, r);
    register_command!("quit", "Quit TallyTUI", cmd_quit, r);
    register_command!("d", "Go to Dashboard", cmd_dashboard, r);
    register_command!("dashboard", "Go to Dashboard", cmd_dashboard, r);
    register_command!("t", "Go to Transactions", cmd_transactions, r);
    register_command!("transactions", "Go to Transactions", cmd_transactions, r);
    register_command!("help", "Show available commands", cmd_help, r);
    register_command!("h", "Show available commands", cmd_help, r);
    register_command!("income", "Open the income form", cmd_income, r);
    register_command!("inc", "Open the income form", cmd_income, r);
    register_command!("expense", "Open the expense form", cmd_expense, r);
    register_command!("exp", "Open the expense form", cmd_expense, r);
    register_command!(
        "filter",
        "Filter by date (e.g. :filter last-month, :filter custom 2024-01-01 2024-01-31)",
        cmd_filter,
        r
    );
    register_command!("f", "Filter by date (all, last-month, last-year, custom)", cmd_filter, r);
    register_command!("range", "Open the custom range form", cmd_range, r);
    register_command!("delete", "Delete selected transaction", cmd_delete, r);
    register_command!("delete-txn", "Delete selected transaction", cmd_delete, r);
    register_command!(
        "delete-matching",
        "Delete by date and description (e.g. :delete-matching 2024-01-05 Rent)",
        cmd_delete_matching,
        r
    );
    register_command!("reset-chart", "Rebuild the overview chart", cmd_reset_chart, r);

    r
});

pub(crate) fn handle_command(input: &str, app: &mut App, store: &LedgerStore) -> anyhow::Result<()> {
    let trimmed = input.trim();
    let mut parts = trimmed.splitn(2, ' ');
    let cmd_name = parts.next().unwrap_or("");
    let args = parts.next().unwrap_or("").trim();

    if let Some(cmd) = COMMANDS.get(cmd_name) {
        (cmd.run)(args, app, store)?;
    } else {
        let suggestion = find_closest(cmd_name);
        app.set_status(format!(
            "Unknown command: :{cmd_name}. Did you mean :{suggestion}?"
        ));
    }

    Ok(())
}

fn find_closest(input: &str) -> String {
    COMMANDS
        .keys()
        .filter(|k| k.len() > 1) // skip single-letter aliases for suggestions
        .min_by_key(|k| levenshtein(input, k))
        .unwrap_or(&"help")
        .to_string()
}

fn levenshtein(a: &str, b: &str) -> usize {
    let (a, b) = (a.as_bytes(), b.as_bytes());
    let mut prev: Vec<usize> = (0..=b.len()).collect();
    let mut curr = vec![0; b.len() + 1];

    for i in 1..=a.len() {
        curr[0] = i;
        for j in 1..=b.len() {
            let cost = if a[i - 1] == b[j - 1] { 0 } else { 1 };
            curr[j] = (prev[j] + 1).min(curr[j - 1] + 1).min(prev[j - 1] + cost);
        }
        std::mem::swap(&mut prev, &mut curr);
    }

    prev[b.len()]
}

// ── Command implementations ──────────────────────────────────

fn cmd_quit(_args: &str, app: &mut App, _store: &LedgerStore) -> anyhow::Result<()> {
    app.running = false;
    Ok(())
}

fn cmd_dashboard(_args: &str, app: &mut App, _store: &LedgerStore) -> anyhow::Result<()> {
    app.screen = Screen::Dashboard;
    Ok(())
}

fn cmd_transactions(_args: &str, app: &mut App, _store: &LedgerStore) -> anyhow::Result<()> {
    app.screen = Screen::Transactions;
    Ok(())
}

fn cmd_help(_args: &str, app: &mut App, _store: &LedgerStore) -> anyhow::Result<()> {
    app.show_help = true;
    Ok(())
}

fn cmd_income(_args: &str, app: &mut App, _store: &LedgerStore) -> anyhow::Result<()> {
    app.open_entry_form(TxnType::Income);
    Ok(())
}

fn cmd_expense(_args: &str, app: &mut App, _store: &LedgerStore) -> anyhow::Result<()> {
    app.open_entry_form(TxnType::Expense);
    Ok(())
}

fn cmd_filter(args: &str, app: &mut App, store: &LedgerStore) -> anyhow::Result<()> {
    let mut parts = args.split_whitespace();
    let mode = parts.next().unwrap_or("all");
    let start = parts.next().and_then(parse_date);
    let end = parts.next().and_then(parse_date);

    match DateFilter::parse(mode, start, end) {
        Some(filter) => app.apply_filter(filter, store),
        None => {
            app.set_status(format!(
                "Unknown filter '{mode}'. Use all, last-month, last-year or custom <start> <end>"
            ));
            Ok(())
        }
    }
}

fn cmd_range(_args: &str, app: &mut App, _store: &LedgerStore) -> anyhow::Result<()> {
    app.open_range_form();
    Ok(())
}

fn cmd_delete(_args: &str, app: &mut App, _store: &LedgerStore) -> anyhow::Result<()> {
    if app.transactions.is_empty() {
        app.set_status("No transaction selected");
        return Ok(());
    }
    app.request_delete();
    Ok(())
}

fn cmd_delete_matching(args: &str, app: &mut App, store: &LedgerStore) -> anyhow::Result<()> {
    let mut parts = args.splitn(2, ' ');
    let date = parts.next().and_then(parse_date);
    let description = parts.next().unwrap_or("").trim();

    match date {
        Some(date) if !description.is_empty() => app.delete_matching(date, description, store),
        _ => {
            app.set_status("Usage: :delete-matching <YYYY-MM-DD> <description>");
            Ok(())
        }
    }
}

fn cmd_reset_chart(_args: &str, app: &mut App, _store: &LedgerStore) -> anyhow::Result<()> {
    app.reset_chart();
    Ok(())
}
