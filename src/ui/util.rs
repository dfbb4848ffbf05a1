use ratatui::{
    style::Style,
    text::Span,
    widgets::{Block, Borders},
};
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;

use super::theme;

/// Truncate a string to `max` visible characters, appending "…" if truncated.
/// The result is guaranteed to be at most `max` characters (counting "…" as one).
/// Safe for multi-byte UTF-8 characters.
pub(crate) fn truncate(s: &str, max: usize) -> String {
    if max == 0 {
        return String::new();
    }
    let char_count = s.chars().count();
    if char_count <= max {
        return s.to_string();
    }
    let truncated: String = s.chars().take(max.saturating_sub(1)).collect();
    format!("{truncated}…")
}

/// Whole-unit bar height for a chart. Negative or oversized values clamp.
pub(crate) fn bar_value(amount: Decimal) -> u64 {
    amount.max(Decimal::ZERO).round().to_u64().unwrap_or(u64::MAX)
}

/// Fraction of `budget` already spent, clamped to `0.0..=1.0`.
pub(crate) fn spent_ratio(spent: Decimal, budget: Decimal) -> f64 {
    if budget > Decimal::ZERO {
        spent
            .checked_div(budget)
            .and_then(|r| r.to_f64())
            .unwrap_or(1.0)
            .clamp(0.0, 1.0)
    } else if spent > Decimal::ZERO {
        1.0
    } else {
        0.0
    }
}

pub(crate) fn progress_bar(ratio: f64, width: usize) -> String {
    let filled = ((ratio * width as f64) as usize).min(width);
    let empty = width - filled;
    format!("[{}{}]", "█".repeat(filled), "░".repeat(empty))
}

/// Bordered block with the dim bold title used across screens.
pub(crate) fn titled_block(title: String) -> Block<'static> {
    Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(theme::OVERLAY))
        .title(Span::styled(title, theme::title_style()))
}

/// Move a list cursor down by one, adjusting scroll to keep cursor visible.
pub(crate) fn scroll_down(index: &mut usize, scroll: &mut usize, len: usize, page: usize) {
    if *index + 1 < len {
        *index += 1;
        if *index >= *scroll + page {
            *scroll = index.saturating_sub(page.saturating_sub(1));
        }
    }
}

/// Move a list cursor up by one, adjusting scroll to keep cursor visible.
pub(crate) fn scroll_up(index: &mut usize, scroll: &mut usize) {
    *index = index.saturating_sub(1);
    if *index < *scroll {
        *scroll = *index;
    }
}

/// Jump cursor to the top of a list.
pub(crate) fn scroll_to_top(index: &mut usize, scroll: &mut usize) {
    *index = 0;
    *scroll = 0;
}

/// Jump cursor to the bottom of a list.
pub(crate) fn scroll_to_bottom(index: &mut usize, scroll: &mut usize, len: usize, page: usize) {
    if len > 0 {
        *index = len - 1;
        *scroll = index.saturating_sub(page.saturating_sub(1));
    }
}
