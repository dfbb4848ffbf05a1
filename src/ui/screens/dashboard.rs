use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Bar, BarChart, BarGroup, Block, Borders, Paragraph},
    Frame,
};
use rust_decimal::Decimal;

use crate::models::{capitalize, format_currency, YearMonth};
use crate::ui::app::App;
use crate::ui::theme;
use crate::ui::util::{bar_value, titled_block};

pub(crate) fn render(f: &mut Frame, area: Rect, app: &App) {
    let warn_height = if app.expenses.dropped_count() > 0 { 1 } else { 0 };
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(7),           // Summary cards
            Constraint::Length(warn_height), // Dropped-row warning
            Constraint::Min(8),              // Category chart
        ])
        .split(area);

    render_summary_cards(f, chunks[0], app);
    if warn_height > 0 {
        let warning = Paragraph::new(Line::from(Span::styled(
            format!(
                " {} stored expense row(s) have unreadable dates and are hidden from every view",
                app.expenses.dropped_count()
            ),
            Style::default().fg(theme::YELLOW),
        )));
        f.render_widget(warning, chunks[1]);
    }
    render_category_chart(f, chunks[2], app);
}

fn render_summary_cards(f: &mut Frame, area: Rect, app: &App) {
    let cards = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage(33),
            Constraint::Percentage(34),
            Constraint::Percentage(33),
        ])
        .split(area);

    let period = YearMonth::of(app.today);
    let month_label = format!("{} {}", capitalize(period.month_name()), period.year);
    let count = app
        .expenses
        .rows
        .iter()
        .filter(|e| period.contains(e.date))
        .count();

    render_card(
        f,
        cards[0],
        "Budget",
        app.summary.budget,
        theme::ACCENT,
        Some(if app.summary.budget.is_zero() {
            "no budget set".to_string()
        } else {
            month_label.clone()
        }),
    );
    render_card(
        f,
        cards[1],
        "Spent",
        app.summary.spent,
        theme::RED,
        Some(format!("{count} expenses")),
    );
    render_card(
        f,
        cards[2],
        "Remaining",
        app.summary.remaining,
        theme::remaining_color(app.summary.remaining),
        Some(month_label),
    );
}

fn render_card(
    f: &mut Frame,
    area: Rect,
    title: &str,
    amount: Decimal,
    color: ratatui::style::Color,
    subtitle: Option<String>,
) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(theme::OVERLAY))
        .title(Span::styled(format!(" {title} "), theme::title_style()));

    let text = Paragraph::new(vec![
        Line::from(""),
        Line::from(Span::styled(
            format_currency(amount),
            Style::default().fg(color).add_modifier(Modifier::BOLD),
        )),
        Line::from(Span::styled(subtitle.unwrap_or_default(), theme::dim_style())),
    ])
    .centered()
    .block(block);

    f.render_widget(text, area);
}

fn render_category_chart(f: &mut Frame, area: Rect, app: &App) {
    let block = titled_block(" Spending by Category (this month) ".into());

    if app.month_by_category.is_empty() {
        let msg = Paragraph::new(Line::from(Span::styled(
            "No expenses yet this month. Add one with :add",
            theme::dim_style(),
        )))
        .centered()
        .block(block);
        f.render_widget(msg, area);
        return;
    }

    let bars: Vec<Bar> = app
        .month_by_category
        .iter()
        .map(|(category, amount)| {
            Bar::default()
                .value(bar_value(*amount))
                .text_value(format_currency(*amount))
                .label(Line::from(category.as_str()))
                .style(Style::default().fg(theme::ACCENT))
                .value_style(
                    Style::default()
                        .fg(theme::HEADER_BG)
                        .bg(theme::ACCENT)
                        .add_modifier(Modifier::BOLD),
                )
        })
        .collect();

    let chart = BarChart::default()
        .block(block)
        .data(BarGroup::default().bars(&bars))
        .bar_width(12)
        .bar_gap(2)
        .bar_style(Style::default().fg(theme::ACCENT))
        .value_style(Style::default().fg(theme::TEXT));

    f.render_widget(chart, area);
}
