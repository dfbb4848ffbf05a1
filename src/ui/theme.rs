use ratatui::style::{Color, Modifier, Style};
use rust_decimal::Decimal;

pub(crate) const HEADER_BG: Color = Color::Rgb(30, 30, 46);
pub(crate) const HEADER_FG: Color = Color::Rgb(205, 214, 244);
pub(crate) const ACCENT: Color = Color::Rgb(137, 180, 250);
pub(crate) const GREEN: Color = Color::Rgb(166, 227, 161);
pub(crate) const RED: Color = Color::Rgb(243, 139, 168);
pub(crate) const YELLOW: Color = Color::Rgb(249, 226, 175);
pub(crate) const SURFACE: Color = Color::Rgb(49, 50, 68);
pub(crate) const TEXT: Color = Color::Rgb(205, 214, 244);
pub(crate) const TEXT_DIM: Color = Color::Rgb(127, 132, 156);
pub(crate) const OVERLAY: Color = Color::Rgb(69, 71, 90);
pub(crate) const COMMAND_BG: Color = Color::Rgb(24, 24, 37);

pub(crate) fn header_style() -> Style {
    Style::default()
        .fg(HEADER_FG)
        .bg(HEADER_BG)
        .add_modifier(Modifier::BOLD)
}

pub(crate) fn selected_style() -> Style {
    Style::default().fg(HEADER_BG).bg(ACCENT)
}

pub(crate) fn normal_style() -> Style {
    Style::default().fg(TEXT)
}

pub(crate) fn dim_style() -> Style {
    Style::default().fg(TEXT_DIM)
}

pub(crate) fn amount_style() -> Style {
    Style::default().fg(RED)
}

pub(crate) fn alt_row_style() -> Style {
    Style::default().fg(TEXT).bg(SURFACE)
}

pub(crate) fn command_bar_style() -> Style {
    Style::default().fg(TEXT).bg(COMMAND_BG)
}

pub(crate) fn status_bar_style() -> Style {
    Style::default().fg(TEXT_DIM).bg(SURFACE)
}

pub(crate) fn title_style() -> Style {
    Style::default().fg(TEXT_DIM).add_modifier(Modifier::BOLD)
}

/// Green while money is left, red once the budget is overspent.
pub(crate) fn remaining_color(remaining: Decimal) -> Color {
    if remaining >= Decimal::ZERO {
        GREEN
    } else {
        RED
    }
}

/// Row style for list/table position `i`, with the cursor at `cursor`.
pub(crate) fn row_style(i: usize, cursor: Option<usize>) -> Style {
    if cursor == Some(i) {
        selected_style()
    } else if i % 2 == 1 {
        alt_row_style()
    } else {
        normal_style()
    }
}
