use chrono::NaiveDate;
use rusqlite::types::Value;
use rust_decimal::Decimal;

use super::money::format_currency;
use super::{Category, YearMonth};

#[derive(Debug, Clone, PartialEq)]
pub struct Expense {
    pub id: i64,
    pub date: NaiveDate,
    pub category: Category,
    pub description: String,
    pub amount: Decimal,
}

impl Expense {
    pub fn year_month(&self) -> YearMonth {
        YearMonth::of(self.date)
    }

    /// Human-readable row label, e.g. `2024-03-01 | Food | lunch | ₹12.50`.
    /// Rows with identical fields share a label.
    pub fn label(&self) -> String {
        format!(
            "{} | {} | {} | {}",
            self.date.format("%Y-%m-%d"),
            self.category,
            self.description,
            format_currency(self.amount)
        )
    }
}

/// A stored expense row whose date did not parse. The raw cells keep their
/// SQLite storage class so a later save writes them back untouched.
#[derive(Debug, Clone, PartialEq)]
pub struct RawExpense {
    pub id: i64,
    pub date: Value,
    pub category: Value,
    pub description: Value,
    pub amount: Value,
}

/// The loaded Expenses table: parsed rows in storage order plus the rows
/// excluded from every view.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ExpenseTable {
    pub rows: Vec<Expense>,
    pub dropped: Vec<RawExpense>,
}

impl ExpenseTable {
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn dropped_count(&self) -> usize {
        self.dropped.len()
    }

    /// Next free row id, counting dropped rows so their ids are never reused.
    pub fn next_id(&self) -> i64 {
        self.rows
            .iter()
            .map(|e| e.id)
            .chain(self.dropped.iter().map(|r| r.id))
            .max()
            .unwrap_or(0)
            + 1
    }
}
