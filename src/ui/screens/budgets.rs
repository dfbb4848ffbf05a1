use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{List, ListItem, Paragraph},
    Frame,
};

use crate::models::format_currency;
use crate::ui::app::App;
use crate::ui::theme;
use crate::ui::util::{progress_bar, spent_ratio, titled_block};

pub(crate) fn render(f: &mut Frame, area: Rect, app: &App) {
    if app.budgets.is_empty() {
        render_empty(f, area);
        return;
    }

    let items: Vec<ListItem> = app
        .budgets
        .iter()
        .zip(&app.budget_spent)
        .enumerate()
        .skip(app.budget_scroll)
        .take(area.height.saturating_sub(2) as usize)
        .map(|(i, (budget, spent))| {
            let ratio = spent_ratio(*spent, budget.amount);
            let color = if ratio > 0.9 {
                theme::RED
            } else if ratio > 0.7 {
                theme::YELLOW
            } else {
                theme::GREEN
            };

            ListItem::new(Line::from(vec![
                Span::styled(
                    format!("{:<30}", budget.label()),
                    theme::row_style(i, Some(app.budget_index)),
                ),
                Span::styled(
                    format!(" {} spent ", format_currency(*spent)),
                    Style::default().fg(color),
                ),
                Span::styled(progress_bar(ratio, 20), Style::default().fg(color)),
                Span::styled(
                    format!(" {:.0}%", ratio * 100.0),
                    Style::default().fg(color).add_modifier(Modifier::BOLD),
                ),
            ]))
        })
        .collect();

    let list = List::new(items).block(titled_block(format!(" Budgets ({}) ", app.budgets.len())));
    f.render_widget(list, area);
}

fn render_empty(f: &mut Frame, area: Rect) {
    let msg = Paragraph::new(vec![
        Line::from(""),
        Line::from(Span::styled("No budgets set", theme::dim_style())),
        Line::from(""),
        Line::from(Span::styled(
            "Use :budget <month> <year> <amount> to set one",
            theme::dim_style(),
        )),
    ])
    .centered()
    .block(titled_block(" Budgets ".into()));
    f.render_widget(msg, area);
}
