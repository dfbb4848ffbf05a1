use rust_decimal::Decimal;
use tracing::info;

use super::Store;
use crate::error::Result;
use crate::models::{ensure_non_negative, parse_month_name, Budget};

/// Outcome of `add_or_update_budget`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Upsert {
    Inserted(i64),
    Updated(i64),
}

impl Store {
    /// Set the budget for a month. The first stored row for the same month
    /// and year is updated in place; otherwise a new row is appended.
    pub(crate) fn add_or_update_budget(
        &mut self,
        month: &str,
        year: i32,
        amount: Decimal,
    ) -> Result<Upsert> {
        let month = parse_month_name(month)?;
        let amount = ensure_non_negative(amount)?;
        let outcome = self.modify(|snapshot| {
            if let Some(existing) = snapshot.budgets.iter_mut().find(|b| b.matches(month, year)) {
                existing.amount = amount;
                return Ok(Upsert::Updated(existing.id));
            }
            let id = snapshot.budgets.iter().map(|b| b.id).max().unwrap_or(0) + 1;
            snapshot.budgets.push(Budget {
                id,
                month: month.to_string(),
                year,
                amount,
            });
            Ok(Upsert::Inserted(id))
        })?;
        info!(month, year, %amount, ?outcome, "saved budget");
        Ok(outcome)
    }

    /// Remove every budget whose label equals `label`.
    pub(crate) fn delete_budget(&mut self, label: &str) -> Result<usize> {
        let removed = self.modify(|snapshot| {
            let before = snapshot.budgets.len();
            snapshot.budgets.retain(|b| b.label() != label);
            Ok(before - snapshot.budgets.len())
        })?;
        info!(removed, label, "deleted budgets by label");
        Ok(removed)
    }

    pub(crate) fn delete_budget_by_id(&mut self, id: i64) -> Result<bool> {
        let removed = self.modify(|snapshot| {
            let before = snapshot.budgets.len();
            snapshot.budgets.retain(|b| b.id != id);
            Ok(before != snapshot.budgets.len())
        })?;
        info!(id, removed, "deleted budget by id");
        Ok(removed)
    }
}
