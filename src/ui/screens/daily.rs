use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

use super::expenses::render_table;
use crate::models::format_currency;
use crate::ui::app::App;
use crate::ui::theme;
use crate::ui::util::titled_block;

pub(crate) fn render(f: &mut Frame, area: Rect, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(5), Constraint::Length(1)])
        .split(area);

    let heading = app.daily_date.format("%d %B %Y").to_string();

    if app.daily.rows.is_empty() {
        let msg = vec![
            Line::from(""),
            Line::from(Span::styled("No expenses for this date.", theme::dim_style())),
            Line::from(""),
            Line::from(Span::styled(
                "H/L to step days, :day YYYY-MM-DD to jump",
                theme::dim_style(),
            )),
        ];
        f.render_widget(
            Paragraph::new(msg)
                .centered()
                .block(titled_block(format!(" Expenses on {heading} "))),
            chunks[0],
        );
    } else {
        render_table(
            f,
            chunks[0],
            &app.daily.rows,
            app.daily_scroll,
            Some(app.daily_index),
            format!(" Expenses on {heading} ({}) ", app.daily.rows.len()),
        );
    }

    let total = Paragraph::new(Line::from(vec![
        Span::styled(" Total: ", theme::dim_style()),
        Span::styled(
            format_currency(app.daily.total),
            Style::default()
                .fg(theme::YELLOW)
                .add_modifier(Modifier::BOLD),
        ),
    ]));
    f.render_widget(total, chunks[1]);
}
