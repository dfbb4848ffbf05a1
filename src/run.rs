mod cli;
mod tui;

pub(crate) use cli::{as_cli, shellexpand};
pub(crate) use tui::as_tui;

#[cfg(test)]
mod cli_tests;
