use chrono::NaiveDate;
use rust_decimal::Decimal;
use tracing::info;

use super::Store;
use crate::error::Result;
use crate::models::{ensure_non_negative, Category, Expense};

impl Store {
    /// Append one expense and return its id.
    pub(crate) fn add_expense(
        &mut self,
        date: NaiveDate,
        category: Category,
        description: &str,
        amount: Decimal,
    ) -> Result<i64> {
        let amount = ensure_non_negative(amount)?;
        let id = self.modify(|snapshot| {
            let id = snapshot.expenses.next_id();
            snapshot.expenses.rows.push(Expense {
                id,
                date,
                category,
                description: description.to_string(),
                amount,
            });
            Ok(id)
        })?;
        info!(id, %date, %category, %amount, "added expense");
        Ok(id)
    }

    /// Remove every expense whose label equals `label`. Returns how many rows
    /// were removed; zero is not an error and the tables are still rewritten.
    pub(crate) fn delete_expense(&mut self, label: &str) -> Result<usize> {
        let removed = self.modify(|snapshot| {
            let before = snapshot.expenses.rows.len();
            snapshot.expenses.rows.retain(|e| e.label() != label);
            Ok(before - snapshot.expenses.rows.len())
        })?;
        info!(removed, label, "deleted expenses by label");
        Ok(removed)
    }

    pub(crate) fn delete_expense_by_id(&mut self, id: i64) -> Result<bool> {
        let removed = self.modify(|snapshot| {
            let before = snapshot.expenses.rows.len();
            snapshot.expenses.rows.retain(|e| e.id != id);
            Ok(before != snapshot.expenses.rows.len())
        })?;
        info!(id, removed, "deleted expense by id");
        Ok(removed)
    }
}
