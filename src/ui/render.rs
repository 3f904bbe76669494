use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Tabs, Wrap},
    Frame,
};

use super::app::{App, InputMode, Screen};
use super::commands;
use super::form::{ENTRY_FIELDS, RANGE_FIELDS};
use super::theme;
use super::util::popup_area;

pub(crate) fn render(f: &mut Frame, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // Tab bar
            Constraint::Min(5),    // Main content
            Constraint::Length(1), // Status bar
            Constraint::Length(1), // Command bar
        ])
        .split(f.area());

    render_tab_bar(f, chunks[0], app);
    render_screen(f, chunks[1], app);
    render_status_bar(f, chunks[2], app);
    render_command_bar(f, chunks[3], app);

    match app.input_mode {
        InputMode::Entry => render_entry_form(f, f.area(), app),
        InputMode::Range => render_range_form(f, f.area(), app),
        _ => {}
    }
    if let Some(notice) = &app.notice {
        render_notice(f, f.area(), notice);
    }
    if app.show_help {
        render_help_overlay(f, f.area());
    }
}

fn render_tab_bar(f: &mut Frame, area: Rect, app: &App) {
    let titles: Vec<Line> = Screen::all()
        .iter()
        .enumerate()
        .map(|(i, s)| {
            let num = format!("{}", i + 1);
            if *s == app.screen {
                Line::from(vec![
                    Span::styled(format!("{num}:"), Style::default().fg(theme::TEXT_DIM)),
                    Span::styled(
                        format!("{s}"),
                        Style::default()
                            .fg(theme::ACCENT)
                            .add_modifier(Modifier::BOLD),
                    ),
                ])
            } else {
                Line::from(Span::styled(
                    format!("{num}:{s}"),
                    Style::default().fg(theme::TEXT_DIM),
                ))
            }
        })
        .collect();

    let tabs = Tabs::new(titles)
        .divider(Span::styled(" | ", Style::default().fg(theme::OVERLAY)))
        .style(Style::default().bg(theme::HEADER_BG));

    f.render_widget(tabs, area);
}

fn render_screen(f: &mut Frame, area: Rect, app: &App) {
    match app.screen {
        Screen::Dashboard => super::screens::dashboard::render(f, area, app),
        Screen::Transactions => super::screens::transactions::render(f, area, app),
    }
}

fn render_status_bar(f: &mut Frame, area: Rect, app: &App) {
    let mode_label = format!(" {} ", app.input_mode);
    let mode_bg = match app.input_mode {
        InputMode::Normal => theme::ACCENT,
        InputMode::Command | InputMode::Entry => theme::GREEN,
        InputMode::Range => theme::YELLOW,
        InputMode::Confirm => theme::RED,
    };
    let mode_style = Style::default()
        .fg(theme::HEADER_BG)
        .bg(mode_bg)
        .add_modifier(Modifier::BOLD);

    let info = format!(
        " {} | {} | {} of {} txns",
        app.screen,
        app.filter,
        app.transactions.len(),
        app.ledger_count
    );

    let right = match app.input_mode {
        InputMode::Entry | InputMode::Range => " Tab next field | Enter submit | Esc close ",
        _ => match app.screen {
            Screen::Dashboard => " i/e add | a/m/y/c filter | ? help ",
            Screen::Transactions => " D delete | a/m/y/c filter | ? help ",
        },
    };

    let available = area.width as usize;
    let used = mode_label.chars().count() + info.chars().count() + right.len();
    let pad = available.saturating_sub(used);

    let bar = Paragraph::new(Line::from(vec![
        Span::styled(&mode_label, mode_style),
        Span::styled(&info, theme::status_bar_style()),
        Span::styled(" ".repeat(pad), theme::status_bar_style()),
        Span::styled(right, theme::status_bar_style()),
    ]));
    f.render_widget(bar, area);
}

fn render_command_bar(f: &mut Frame, area: Rect, app: &App) {
    let (content, cursor_offset) = match app.input_mode {
        InputMode::Command => (
            Line::from(vec![
                Span::styled(":", Style::default().fg(theme::ACCENT)),
                Span::styled(&app.command_input, theme::command_bar_style()),
            ]),
            Some(1 + app.command_input.chars().count() as u16),
        ),
        InputMode::Confirm => (
            Line::from(vec![
                Span::styled(&app.confirm_message, Style::default().fg(theme::YELLOW)),
                Span::styled(" [y/N] ", Style::default().fg(theme::RED)),
            ]),
            None,
        ),
        _ => (
            if app.status_message.is_empty() {
                Line::from(Span::styled(
                    " Press : for commands, i/e to add, ? for help",
                    theme::dim_style(),
                ))
            } else {
                Line::from(Span::styled(
                    &app.status_message,
                    theme::command_bar_style(),
                ))
            },
            None,
        ),
    };

    let bar = Paragraph::new(content).style(Style::default().bg(theme::COMMAND_BG));
    f.render_widget(bar, area);

    if let Some(offset) = cursor_offset {
        f.set_cursor_position((area.x + offset, area.y));
    }
}

/// Label/value lines for a popup form, with the cursor placed on the focused field.
fn render_form(
    f: &mut Frame,
    area: Rect,
    title: &str,
    labels: &[&str],
    values: &[&str],
    focus: usize,
) {
    let mut lines = vec![Line::from("")];
    for (i, (label, value)) in labels.iter().zip(values).enumerate() {
        let focused = i == focus;
        let label_style = if focused {
            Style::default()
                .fg(theme::ACCENT)
                .add_modifier(Modifier::BOLD)
        } else {
            theme::dim_style()
        };
        lines.push(Line::from(vec![
            Span::styled(format!(" {label:<12} "), label_style),
            Span::styled(value.to_string(), theme::normal_style()),
        ]));
    }
    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled(
        " Dates as YYYY-MM-DD. Enter to submit, Esc to close.",
        theme::dim_style(),
    )));

    let popup = popup_area(area, 60, lines.len() as u16 + 2);
    f.render_widget(Clear, popup);
    let form = Paragraph::new(lines).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(theme::ACCENT))
            .title(Span::styled(
                title.to_string(),
                Style::default()
                    .fg(theme::ACCENT)
                    .add_modifier(Modifier::BOLD),
            ))
            .style(theme::popup_style()),
    );
    f.render_widget(form, popup);

    if let Some(value) = values.get(focus) {
        // 1 border + 1 blank line, then one row per field
        let x = popup.x + 1 + 14 + value.chars().count() as u16;
        let y = popup.y + 2 + focus as u16;
        if x < popup.right() && y < popup.bottom() {
            f.set_cursor_position((x, y));
        }
    }
}

fn render_entry_form(f: &mut Frame, area: Rect, app: &App) {
    let Some(form) = &app.entry_form else {
        return;
    };
    let values: Vec<&str> = (0..ENTRY_FIELDS.len()).map(|i| form.value(i)).collect();
    render_form(f, area, &form.title(), &ENTRY_FIELDS, &values, form.focus);
}

fn render_range_form(f: &mut Frame, area: Rect, app: &App) {
    let Some(form) = &app.range_form else {
        return;
    };
    let values: Vec<&str> = (0..RANGE_FIELDS.len()).map(|i| form.value(i)).collect();
    render_form(f, area, " Custom Range ", &RANGE_FIELDS, &values, form.focus);
}

fn render_notice(f: &mut Frame, area: Rect, notice: &str) {
    let lines = vec![
        Line::from(""),
        Line::from(Span::styled(
            notice.to_string(),
            Style::default()
                .fg(theme::YELLOW)
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        Line::from(Span::styled(" Press any key ", theme::dim_style())),
    ];
    let popup = popup_area(area, 56, 7);
    f.render_widget(Clear, popup);
    let msg = Paragraph::new(lines)
        .centered()
        .wrap(Wrap { trim: true })
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(theme::YELLOW))
                .style(theme::popup_style()),
        );
    f.render_widget(msg, popup);
}

fn render_help_overlay(f: &mut Frame, area: Rect) {
    let section = |title: &'static str| {
        Line::from(Span::styled(
            title,
            Style::default()
                .fg(theme::YELLOW)
                .add_modifier(Modifier::BOLD),
        ))
    };
    let mut help_text = vec![
        Line::from(Span::styled(
            " TallyTUI Help ",
            Style::default()
                .fg(theme::ACCENT)
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        section(" Navigation"),
        Line::from(Span::styled(
            "  j/k or Up/Down   Move cursor           1-2        Switch tabs",
            theme::normal_style(),
        )),
        Line::from(Span::styled(
            "  Tab/Shift-Tab    Cycle tabs            g/G        Top/Bottom",
            theme::normal_style(),
        )),
        Line::from(Span::styled(
            "  Ctrl-d/u         Page Down/Up          Ctrl-q     Quit",
            theme::normal_style(),
        )),
        Line::from(""),
        section(" Ledger"),
        Line::from(Span::styled(
            "  i / e            Add income / expense  D          Delete selected",
            theme::normal_style(),
        )),
        Line::from(Span::styled(
            "  a / m / y        All / month / year    c          Custom range",
            theme::normal_style(),
        )),
        Line::from(Span::styled(
            "  R                Rebuild chart         :          Command mode",
            theme::normal_style(),
        )),
        Line::from(""),
        section(" Commands"),
    ];

    let mut seen = std::collections::HashSet::new();
    let mut cmd_lines: Vec<(&str, &str)> = Vec::new();
    for (&name, cmd) in commands::COMMANDS.iter() {
        if name.len() <= 3 {
            continue;
        }
        if seen.insert(cmd.description) {
            cmd_lines.push((name, cmd.description));
        }
    }
    cmd_lines.sort_by_key(|(name, _)| *name);
    for (name, desc) in &cmd_lines {
        help_text.push(Line::from(Span::styled(
            format!("  :{name:<16} {desc}"),
            theme::normal_style(),
        )));
    }

    help_text.push(Line::from(""));
    help_text.push(Line::from(Span::styled(
        " Press any key to close ",
        Style::default().fg(theme::TEXT_DIM),
    )));

    let popup = popup_area(area, 96, help_text.len() as u16 + 2);
    f.render_widget(Clear, popup);
    let help = Paragraph::new(help_text).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(theme::ACCENT))
            .style(theme::popup_style()),
    );
    f.render_widget(help, popup);
}
