mod config;
mod db;
mod error;
mod ledger;
mod models;
mod run;
mod ui;

use anyhow::{Context, Result};
use std::path::Path;

fn main() -> Result<()> {
    let args: Vec<String> = std::env::args().collect();
    let data_dir = config::data_dir()?;
    if let Err(e) = init_logging(&data_dir) {
        eprintln!("Warning: {e:#}; logging disabled");
    }
    let settings = config::load_settings();

    let db_path = settings.database_path(&data_dir);
    let db = db::Database::open(&db_path)?;
    let store = ledger::LedgerStore::new(db);
    store.initialize()?;
    log::info!("ledger opened at {}", db_path.display());

    match args.len() {
        1 => run::as_tui(&store, &settings),
        2.. => match run::as_cli(&args, &store, &settings) {
            Err(e) if run::is_input_error(&e) => {
                eprintln!("{e}");
                std::process::exit(2);
            }
            other => other,
        },
        _ => {
            eprintln!("Usage: tallytui [command]");
            Ok(())
        }
    }
}

/// Log to `tallytui.log` in the data directory; the terminal belongs to the TUI.
/// `RUST_LOG` overrides the default `warn` level.
fn init_logging(data_dir: &Path) -> Result<()> {
    let path = data_dir.join("tallytui.log");
    let file = std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(&path)
        .with_context(|| format!("Failed to open log file: {}", path.display()))?;

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn"))
        .target(env_logger::Target::Pipe(Box::new(file)))
        .try_init()
        .context("Failed to start logger")
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use super::*;

    #[test]
    fn test_init_logging_reports_failures() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("no-such-dir");
        let err = init_logging(&missing).unwrap_err();
        assert!(format!("{err:#}").contains("Failed to open log file"));

        // a second logger can never be installed
        let _ = init_logging(dir.path());
        let err = init_logging(dir.path()).unwrap_err();
        assert!(format!("{err:#}").contains("Failed to start logger"));
        assert!(dir.path().join("tallytui.log").exists());
    }
}
