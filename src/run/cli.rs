use anyhow::{Context, Result};
use chrono::{Local, NaiveDate};
use uuid::Uuid;

use crate::config::{self, Settings};
use crate::error::LedgerError;
use crate::ledger::{format_currency, select, summarize, DateFilter, LedgerStore, SLICE_LABELS};
use crate::models::{TransactionDraft, TxnType};

pub(crate) fn as_cli(args: &[String], store: &LedgerStore, settings: &Settings) -> Result<()> {
    match args[1].as_str() {
        "add" | "a" => cli_add(&args[2..], store, settings),
        "list" | "ls" => cli_list(&args[2..], store, settings),
        "summary" | "s" => cli_summary(&args[2..], store, settings),
        "delete" => cli_delete(&args[2..], store),
        "delete-matching" => cli_delete_matching(&args[2..], store),
        "currency" => cli_currency(&args[2..], settings),
        "--help" | "-h" | "help" => {
            print_usage();
            Ok(())
        }
        "--version" | "-V" | "version" => {
            println!("tallytui {}", env!("CARGO_PKG_VERSION"));
            Ok(())
        }
        other => {
            print_usage();
            anyhow::bail!("Unknown command: {other}");
        }
    }
}

fn print_usage() {
    println!("TallyTUI - local-only income and expense ledger");
    println!();
    println!("Usage: tallytui [command]");
    println!();
    println!("Commands:");
    println!("  (none)                                  Launch interactive TUI");
    println!("  add <income|expense> <date> <category> <amount> <description...>");
    println!("                                          Record a transaction (date as YYYY-MM-DD)");
    println!("  list [--filter <mode>]                  List transactions");
    println!("  summary [--filter <mode>]               Print totals and chart shares");
    println!("    --filter all|last-month|last-year|custom");
    println!("    --from <YYYY-MM-DD> --to <YYYY-MM-DD> Bounds for the custom filter");
    println!("  delete <id>                             Delete one transaction by id");
    println!("  delete-matching <date> <description...> Delete every match of date and description");
    println!("  currency <symbol>                       Set the currency symbol");
    println!("  --help, -h                              Show this help");
    println!("  --version, -V                           Show version");
}

fn cli_add(args: &[String], store: &LedgerStore, settings: &Settings) -> Result<()> {
    if args.len() < 5 {
        anyhow::bail!(
            "Usage: tallytui add <income|expense> <date> <category> <amount> <description...>"
        );
    }
    let kind = TxnType::parse(&args[0]).ok_or_else(|| {
        let known: Vec<&str> = TxnType::all().iter().map(|t| t.as_str()).collect();
        anyhow::anyhow!("Unknown type '{}' (use {})", args[0], known.join(" or "))
    })?;
    let draft = TransactionDraft::new(
        args[1].as_str(),
        args[4..].join(" "),
        args[2].as_str(),
        args[3].as_str(),
    );

    let txn = store.add(kind, &draft)?;
    println!(
        "Added {} {} on {}: {} ({})",
        txn.kind,
        format_currency(txn.amount, &settings.currency_symbol),
        txn.date,
        txn.description,
        txn.category
    );
    println!("  id: {}", txn.id);
    Ok(())
}

/// Reads `--filter`, `--from` and `--to`. No flags means every record.
fn parse_filter(args: &[String]) -> Result<DateFilter> {
    let flag = |name: &str| {
        args.windows(2)
            .find(|w| w[0] == name)
            .map(|w| w[1].as_str())
    };
    let date = |name: &str| -> Result<Option<NaiveDate>> {
        flag(name)
            .map(|s| {
                NaiveDate::parse_from_str(s, "%Y-%m-%d")
                    .with_context(|| format!("Invalid {name} date '{s}' (expected YYYY-MM-DD)"))
            })
            .transpose()
    };

    let start = date("--from")?;
    let end = date("--to")?;
    let mode = match flag("--filter") {
        Some(mode) => mode,
        None if start.is_some() || end.is_some() => "custom",
        None => "all",
    };
    DateFilter::parse(mode, start, end).ok_or_else(|| {
        anyhow::anyhow!("Unknown filter '{mode}' (use all, last-month, last-year or custom)")
    })
}

fn cli_list(args: &[String], store: &LedgerStore, settings: &Settings) -> Result<()> {
    let filter = parse_filter(args)?;
    let ledger = store.list()?;
    let visible = select(&ledger, &filter, Local::now().date_naive())?;

    if visible.is_empty() {
        println!("No transactions ({filter})");
        return Ok(());
    }

    println!(
        "{:<12} {:<28} {:<16} {:>14} {:<8} Id",
        "Date", "Description", "Category", "Amount", "Type"
    );
    println!("{}", "─".repeat(118));
    for txn in &visible {
        println!(
            "{:<12} {:<28} {:<16} {:>14} {:<8} {}",
            txn.date,
            crate::ui::util::truncate(&txn.description, 28),
            crate::ui::util::truncate(&txn.category, 16),
            format_currency(txn.amount, &settings.currency_symbol),
            txn.kind,
            txn.id
        );
    }
    println!();
    println!("{} of {} transactions ({filter})", visible.len(), ledger.len());
    Ok(())
}

fn cli_summary(args: &[String], store: &LedgerStore, settings: &Settings) -> Result<()> {
    let filter = parse_filter(args)?;
    let ledger = store.list()?;
    let visible = select(&ledger, &filter, Local::now().date_naive())?;
    let summary = summarize(visible.iter().copied());
    let symbol = &settings.currency_symbol;

    println!("TallyTUI - {filter}");
    println!("{}", "─".repeat(40));
    println!("  Total Income:   {}", format_currency(summary.total_income, symbol));
    println!("  Total Expenses: {}", format_currency(summary.total_expense, symbol));
    println!("  Balance:        {}", format_currency(summary.balance, symbol));
    println!("  Transactions:   {}", visible.len());
    println!();
    println!("Chart shares:");
    for (label, share) in SLICE_LABELS.iter().zip(summary.chart_labels()) {
        println!("  {label:<10} {share:>7}");
    }
    Ok(())
}

fn cli_delete(args: &[String], store: &LedgerStore) -> Result<()> {
    let raw = args
        .first()
        .ok_or_else(|| anyhow::anyhow!("Usage: tallytui delete <id>"))?;
    let id = Uuid::parse_str(raw).with_context(|| format!("Invalid id '{raw}'"))?;

    if store.delete(id)? {
        println!("Deleted {id}");
    } else {
        println!("No transaction with id {id}");
    }
    Ok(())
}

fn cli_delete_matching(args: &[String], store: &LedgerStore) -> Result<()> {
    if args.len() < 2 {
        anyhow::bail!("Usage: tallytui delete-matching <YYYY-MM-DD> <description...>");
    }
    let date = NaiveDate::parse_from_str(&args[0], "%Y-%m-%d")
        .with_context(|| format!("Invalid date '{}' (expected YYYY-MM-DD)", args[0]))?;
    let description = args[1..].join(" ");

    let removed = store.delete_matching(date, &description)?;
    println!("Deleted {removed} transaction(s) matching {date} '{description}'");
    Ok(())
}

fn cli_currency(args: &[String], settings: &Settings) -> Result<()> {
    let Some(symbol) = args.first().filter(|s| !s.trim().is_empty()) else {
        println!("Currency symbol: {}", settings.currency_symbol);
        return Ok(());
    };
    let path = config::settings_path()?;
    let updated = Settings {
        currency_symbol: symbol.trim().to_string(),
        ..settings.clone()
    };
    config::save_settings_to(&path, &updated)?;
    println!("Currency symbol set to {}", updated.currency_symbol);
    Ok(())
}

/// Whether a CLI error is the user's fault and deserves a short message.
pub(crate) fn is_input_error(err: &anyhow::Error) -> bool {
    matches!(
        err.downcast_ref::<LedgerError>(),
        Some(LedgerError::Validation(_) | LedgerError::MissingFilterRange)
    )
}
