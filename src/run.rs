mod cli;
mod tui;

pub(crate) use cli::{as_cli, is_input_error};
pub(crate) use tui::as_tui;
