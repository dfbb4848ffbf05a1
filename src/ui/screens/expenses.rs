use ratatui::{
    layout::{Constraint, Rect},
    text::{Line, Span},
    widgets::{Cell, Paragraph, Row, Table},
    Frame,
};

use crate::models::{format_currency, Expense};
use crate::ui::app::App;
use crate::ui::theme;
use crate::ui::util::{titled_block, truncate};

pub(crate) fn render(f: &mut Frame, area: Rect, app: &App) {
    if app.expenses.is_empty() {
        let msg = vec![
            Line::from(""),
            Line::from(Span::styled("No expenses recorded yet", theme::dim_style())),
            Line::from(""),
            Line::from(Span::styled(
                "Add one with :add 2024-03-01 food 12.50 lunch",
                theme::dim_style(),
            )),
        ];
        f.render_widget(
            Paragraph::new(msg)
                .centered()
                .block(titled_block(" Expenses (0) ".into())),
            area,
        );
        return;
    }

    let title = format!(
        " Expenses ({}) {}",
        app.expenses.rows.len(),
        if app.expenses.dropped_count() > 0 {
            format!("[{} hidden: bad date] ", app.expenses.dropped_count())
        } else {
            String::new()
        }
    );
    render_table(
        f,
        area,
        &app.expenses.rows,
        app.expense_scroll,
        Some(app.expense_index),
        title,
    );
}

/// Expense rows as a table. Shared with the Daily screen.
pub(crate) fn render_table(
    f: &mut Frame,
    area: Rect,
    rows: &[Expense],
    scroll: usize,
    cursor: Option<usize>,
    title: String,
) {
    let header_cells = ["Date", "Category", "Description", "Amount"]
        .iter()
        .map(|h| Cell::from(*h).style(theme::header_style()));
    let header = Row::new(header_cells).height(1);

    let table_rows: Vec<Row> = rows
        .iter()
        .enumerate()
        .skip(scroll)
        .take(area.height.saturating_sub(3) as usize)
        .map(|(i, e)| {
            Row::new(vec![
                Cell::from(format!("  {}", e.date.format("%Y-%m-%d"))),
                Cell::from(e.category.as_str()),
                Cell::from(truncate(&e.description, 40)),
                Cell::from(Span::styled(format_currency(e.amount), theme::amount_style())),
            ])
            .style(theme::row_style(i, cursor))
        })
        .collect();

    let widths = [
        Constraint::Length(14),
        Constraint::Length(12),
        Constraint::Min(20),
        Constraint::Length(16),
    ];

    let table = Table::new(table_rows, widths)
        .header(header)
        .block(titled_block(title));
    f.render_widget(table, area);
}
