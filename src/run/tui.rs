use anyhow::Result;
use chrono::Local;
use crossterm::event::{self, Event, KeyCode, KeyModifiers};
use crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io;

use crate::config::Settings;
use crate::ledger::{DateFilter, LedgerStore};
use crate::models::TxnType;
use crate::ui::app::{App, InputMode, Screen};
use crate::ui::commands;

pub(crate) fn as_tui(store: &LedgerStore, settings: &Settings) -> Result<()> {
    let mut app = App::new(settings.currency_symbol.clone());
    app.refresh(store)?;

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = run_app(&mut terminal, &mut app, store);

    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    app.chart.dispose();
    if let Err(ref e) = result {
        log::error!("{e:?}");
        eprintln!("Error: {e:?}");
    }

    result
}

fn run_app(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
    store: &LedgerStore,
) -> Result<()> {
    while app.running {
        terminal.draw(|f| {
            // tab + status + command bars, table borders and header
            let content_height = f.area().height.saturating_sub(6) as usize;
            app.visible_rows = content_height.max(1);
            crate::ui::render::render(f, app);
        })?;

        if let Event::Key(key) = event::read()? {
            // Relative filters track the wall clock across midnight
            app.today = Local::now().date_naive();
            handle_key(key, app, store)?;
        }
    }
    Ok(())
}

fn handle_key(key: event::KeyEvent, app: &mut App, store: &LedgerStore) -> Result<()> {
    if app.notice.is_some() {
        app.notice = None;
        return Ok(());
    }
    if app.show_help {
        app.show_help = false;
        return Ok(());
    }
    match app.input_mode {
        InputMode::Normal => handle_normal_input(key, app, store),
        InputMode::Command => handle_command_input(key, app, store),
        InputMode::Entry => handle_entry_input(key, app, store),
        InputMode::Range => handle_range_input(key, app, store),
        InputMode::Confirm => handle_confirm_input(key, app, store),
    }
}

// ── Input handlers ───────────────────────────────────────────

fn handle_normal_input(key: event::KeyEvent, app: &mut App, store: &LedgerStore) -> Result<()> {
    match key.code {
        KeyCode::Char(':') => {
            app.input_mode = InputMode::Command;
            app.command_input.clear();
        }
        KeyCode::Char('q') | KeyCode::Char('c')
            if key.modifiers.contains(KeyModifiers::CONTROL) =>
        {
            app.running = false;
        }
        KeyCode::Char('d') if key.modifiers.contains(KeyModifiers::CONTROL) => {
            for _ in 0..app.visible_rows / 2 {
                app.move_down();
            }
        }
        KeyCode::Char('u') if key.modifiers.contains(KeyModifiers::CONTROL) => {
            for _ in 0..app.visible_rows / 2 {
                app.move_up();
            }
        }
        KeyCode::Char('j') | KeyCode::Down => app.move_down(),
        KeyCode::Char('k') | KeyCode::Up => app.move_up(),
        KeyCode::Char('g') => app.goto_top(),
        KeyCode::Char('G') => app.goto_bottom(),
        KeyCode::Char('1') => app.screen = Screen::Dashboard,
        KeyCode::Char('2') => app.screen = Screen::Transactions,
        KeyCode::Tab | KeyCode::BackTab => {
            let screens = Screen::all();
            let idx = screens.iter().position(|s| *s == app.screen).unwrap_or(0);
            let next = if key.code == KeyCode::Tab {
                (idx + 1) % screens.len()
            } else {
                (idx + screens.len() - 1) % screens.len()
            };
            app.screen = screens[next];
        }
        KeyCode::Char('i') => app.open_entry_form(TxnType::Income),
        KeyCode::Char('e') => app.open_entry_form(TxnType::Expense),
        KeyCode::Char('a') => app.apply_filter(DateFilter::All, store)?,
        KeyCode::Char('m') => app.apply_filter(DateFilter::LastMonth, store)?,
        KeyCode::Char('y') => app.apply_filter(DateFilter::LastYear, store)?,
        KeyCode::Char('c') => app.open_range_form(),
        KeyCode::Char('R') => app.reset_chart(),
        KeyCode::Char('D') if app.screen == Screen::Transactions => {
            commands::handle_command("delete", app, store)?;
        }
        KeyCode::Char('?') => {
            app.show_help = true;
        }
        KeyCode::Esc => {
            app.status_message.clear();
        }
        _ => {}
    }
    Ok(())
}

fn handle_command_input(key: event::KeyEvent, app: &mut App, store: &LedgerStore) -> Result<()> {
    match key.code {
        KeyCode::Enter => {
            let input = app.command_input.clone();
            app.input_mode = InputMode::Normal;
            app.command_input.clear();
            commands::handle_command(&input, app, store)?;
        }
        KeyCode::Esc => {
            app.input_mode = InputMode::Normal;
            app.command_input.clear();
        }
        KeyCode::Backspace => {
            app.command_input.pop();
            if app.command_input.is_empty() {
                app.input_mode = InputMode::Normal;
            }
        }
        KeyCode::Char(c) => {
            app.command_input.push(c);
        }
        _ => {}
    }
    Ok(())
}

fn handle_entry_input(key: event::KeyEvent, app: &mut App, store: &LedgerStore) -> Result<()> {
    match key.code {
        KeyCode::Enter => return app.submit_entry_form(store),
        KeyCode::Esc => {
            app.close_entry_form();
            return Ok(());
        }
        _ => {}
    }
    let Some(form) = app.entry_form.as_mut() else {
        app.input_mode = InputMode::Normal;
        return Ok(());
    };
    match key.code {
        KeyCode::Tab | KeyCode::Down => form.next_field(),
        KeyCode::BackTab | KeyCode::Up => form.prev_field(),
        KeyCode::Backspace => form.pop(),
        KeyCode::Char(c) => form.push(c),
        _ => {}
    }
    Ok(())
}

fn handle_range_input(key: event::KeyEvent, app: &mut App, store: &LedgerStore) -> Result<()> {
    match key.code {
        KeyCode::Enter => return app.submit_range_form(store),
        KeyCode::Esc => {
            app.close_range_form();
            return Ok(());
        }
        _ => {}
    }
    let Some(form) = app.range_form.as_mut() else {
        app.input_mode = InputMode::Normal;
        return Ok(());
    };
    match key.code {
        KeyCode::Tab | KeyCode::BackTab | KeyCode::Down | KeyCode::Up => form.next_field(),
        KeyCode::Backspace => form.pop(),
        KeyCode::Char(c) => form.push(c),
        _ => {}
    }
    Ok(())
}

fn handle_confirm_input(key: event::KeyEvent, app: &mut App, store: &LedgerStore) -> Result<()> {
    match key.code {
        KeyCode::Char('y') | KeyCode::Char('Y') => app.confirm_pending(store)?,
        // Any other key = cancel
        _ => app.cancel_pending(),
    }
    Ok(())
}
