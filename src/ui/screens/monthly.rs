use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Bar, BarChart, BarGroup, Cell, Paragraph, Row, Table},
    Frame,
};

use super::expenses::render_table;
use crate::models::format_currency;
use crate::ui::app::App;
use crate::ui::theme;
use crate::ui::util::{bar_value, titled_block};

pub(crate) fn render(f: &mut Frame, area: Rect, app: &App) {
    if app.overview.is_empty() {
        render_empty(f, area, app);
        return;
    }

    let table_height = app.overview.budget_vs_actual.len() as u16 + 3;
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),            // Selection + top category
            Constraint::Length(10),           // Totals chart
            Constraint::Length(table_height), // Budget vs actual
            Constraint::Min(5),               // Expenses, newest first
        ])
        .split(area);

    render_heading(f, chunks[0], app);
    render_totals_chart(f, chunks[1], app);
    render_budget_vs_actual(f, chunks[2], app);
    render_rows(f, chunks[3], app);
}

fn render_rows(f: &mut Frame, area: Rect, app: &App) {
    // The pane is shorter than the page the key handlers scroll by.
    let page = (area.height.saturating_sub(3) as usize).max(1);
    let index = app.monthly_index;
    let scroll = app
        .monthly_scroll
        .min(index)
        .max((index + 1).saturating_sub(page));
    render_table(
        f,
        area,
        &app.overview.rows,
        scroll,
        Some(index),
        format!(" Expenses ({}) ", app.overview.rows.len()),
    );
}

fn render_heading(f: &mut Frame, area: Rect, app: &App) {
    let selected: Vec<String> = app.selected_periods.iter().map(|p| p.to_string()).collect();
    let mut spans = vec![
        Span::styled(" Months: ", theme::dim_style()),
        Span::styled(selected.join(", "), theme::normal_style()),
        Span::styled(
            format!("   {} expenses", app.overview.rows.len()),
            theme::dim_style(),
        ),
    ];
    if let Some((category, total)) = app.overview.top_category {
        spans.push(Span::styled("   Most spent on: ", theme::dim_style()));
        spans.push(Span::styled(
            format!("{category} ({})", format_currency(total)),
            Style::default()
                .fg(theme::GREEN)
                .add_modifier(Modifier::BOLD),
        ));
    }
    f.render_widget(
        Paragraph::new(Line::from(spans)).block(titled_block(" Monthly Overview ".into())),
        area,
    );
}

fn render_totals_chart(f: &mut Frame, area: Rect, app: &App) {
    let bars: Vec<Bar> = app
        .overview
        .totals
        .iter()
        .map(|(period, amount)| {
            Bar::default()
                .value(bar_value(*amount))
                .text_value(format_currency(*amount))
                .label(Line::from(period.to_string()))
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
        .block(titled_block(" Spent per Month ".into()))
        .data(BarGroup::default().bars(&bars))
        .bar_width(12)
        .bar_gap(2)
        .bar_style(Style::default().fg(theme::ACCENT))
        .value_style(Style::default().fg(theme::TEXT));

    f.render_widget(chart, area);
}

fn render_budget_vs_actual(f: &mut Frame, area: Rect, app: &App) {
    let header = Row::new(
        ["Month", "Budget", "Spent", "Remaining"]
            .iter()
            .map(|h| Cell::from(*h).style(theme::header_style())),
    );

    let rows: Vec<Row> = app
        .overview
        .budget_vs_actual
        .iter()
        .enumerate()
        .map(|(i, row)| {
            Row::new(vec![
                Cell::from(format!("  {}", row.period)),
                Cell::from(format_currency(row.budget)),
                Cell::from(format_currency(row.spent)),
                Cell::from(Span::styled(
                    format_currency(row.remaining),
                    Style::default().fg(theme::remaining_color(row.remaining)),
                )),
            ])
            .style(theme::row_style(i, None))
        })
        .collect();

    let widths = [
        Constraint::Length(12),
        Constraint::Length(18),
        Constraint::Length(18),
        Constraint::Length(18),
    ];
    let table = Table::new(rows, widths)
        .header(header)
        .block(titled_block(" Budget vs Actual ".into()));
    f.render_widget(table, area);
}

fn render_empty(f: &mut Frame, area: Rect, app: &App) {
    let hint = if app.periods.is_empty() {
        "No expenses yet. Add one with :add"
    } else {
        "No expenses in the selected months. Use :months YYYY-MM ..."
    };
    let msg = Paragraph::new(vec![
        Line::from(""),
        Line::from(Span::styled(hint, theme::dim_style())),
    ])
    .centered()
    .block(titled_block(" Monthly Overview ".into()));
    f.render_widget(msg, area);
}
