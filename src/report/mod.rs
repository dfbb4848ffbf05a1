//! Read-only views over loaded tables. Nothing here touches storage.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use std::collections::BTreeMap;

use crate::models::{Budget, Category, Expense, YearMonth};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub(crate) struct PeriodSummary {
    pub(crate) budget: Decimal,
    pub(crate) spent: Decimal,
    pub(crate) remaining: Decimal,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub(crate) struct DailyView {
    /// Highest amount first.
    pub(crate) rows: Vec<Expense>,
    pub(crate) total: Decimal,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct BudgetVsActual {
    pub(crate) period: YearMonth,
    pub(crate) budget: Decimal,
    pub(crate) spent: Decimal,
    pub(crate) remaining: Decimal,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub(crate) struct MonthlyOverview {
    /// Expenses in the selected periods, newest first.
    pub(crate) rows: Vec<Expense>,
    /// Category with the largest total. Ties go to the alphabetically first name.
    pub(crate) top_category: Option<(Category, Decimal)>,
    /// Total spent per period that has expenses, oldest first.
    pub(crate) totals: Vec<(YearMonth, Decimal)>,
    /// One row per selected period, in selection order.
    pub(crate) budget_vs_actual: Vec<BudgetVsActual>,
}

impl MonthlyOverview {
    pub(crate) fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// Budget amount for a month, 0 when no budget is set.
pub(crate) fn find_budget(budgets: &[Budget], period: YearMonth) -> Decimal {
    Budget::find(budgets, period.month_name(), period.year)
        .map(|b| b.amount)
        .unwrap_or(Decimal::ZERO)
}

/// Budget, spending and what is left for the month containing `today`.
pub(crate) fn current_period_summary(
    expenses: &[Expense],
    budgets: &[Budget],
    today: NaiveDate,
) -> PeriodSummary {
    let period = YearMonth::of(today);
    let spent = spent_in(expenses, period);
    let budget = find_budget(budgets, period);
    PeriodSummary {
        budget,
        spent,
        remaining: budget.saturating_sub(spent),
    }
}

pub(crate) fn daily_view(expenses: &[Expense], date: NaiveDate) -> DailyView {
    let mut rows: Vec<Expense> = expenses.iter().filter(|e| e.date == date).cloned().collect();
    rows.sort_by(|a, b| b.amount.cmp(&a.amount));
    let total = sum(rows.iter().map(|e| e.amount));
    DailyView { rows, total }
}

pub(crate) fn monthly_overview(
    expenses: &[Expense],
    budgets: &[Budget],
    selected: &[YearMonth],
) -> MonthlyOverview {
    let mut rows: Vec<Expense> = expenses
        .iter()
        .filter(|e| selected.contains(&e.year_month()))
        .cloned()
        .collect();
    if rows.is_empty() {
        return MonthlyOverview::default();
    }
    rows.sort_by(|a, b| b.date.cmp(&a.date));

    let mut by_period: BTreeMap<YearMonth, Decimal> = BTreeMap::new();
    for e in &rows {
        let total = by_period.entry(e.year_month()).or_default();
        *total = total.saturating_add(e.amount);
    }
    let top_category = category_totals(&rows).first().copied();

    let budget_vs_actual = selected
        .iter()
        .map(|&period| {
            let budget = find_budget(budgets, period);
            let spent = by_period.get(&period).copied().unwrap_or(Decimal::ZERO);
            BudgetVsActual {
                period,
                budget,
                spent,
                remaining: budget.saturating_sub(spent),
            }
        })
        .collect();

    MonthlyOverview {
        rows,
        top_category,
        totals: by_period.into_iter().collect(),
        budget_vs_actual,
    }
}

pub(crate) fn spent_in(expenses: &[Expense], period: YearMonth) -> Decimal {
    sum(
        expenses
            .iter()
            .filter(|e| period.contains(e.date))
            .map(|e| e.amount),
    )
}

/// Total per category, largest first. Equal totals are ordered by category name.
pub(crate) fn category_totals(expenses: &[Expense]) -> Vec<(Category, Decimal)> {
    let mut by_category: BTreeMap<&'static str, (Category, Decimal)> = BTreeMap::new();
    for e in expenses {
        let entry = by_category
            .entry(e.category.as_str())
            .or_insert((e.category, Decimal::ZERO));
        entry.1 = entry.1.saturating_add(e.amount);
    }
    let mut totals: Vec<(Category, Decimal)> = by_category.into_values().collect();
    // Stable sort keeps the alphabetical order from the map for ties.
    totals.sort_by(|a, b| b.1.cmp(&a.1));
    totals
}

/// Sum that clamps at the `Decimal` range instead of overflowing. Amounts
/// loaded from an existing file are not bounded by input validation.
fn sum(amounts: impl Iterator<Item = Decimal>) -> Decimal {
    amounts.fold(Decimal::ZERO, Decimal::saturating_add)
}

/// Distinct periods that have expenses, oldest first.
pub(crate) fn available_periods(expenses: &[Expense]) -> Vec<YearMonth> {
    let mut periods: Vec<YearMonth> = expenses.iter().map(Expense::year_month).collect();
    periods.sort();
    periods.dedup();
    periods
}

#[cfg(test)]
mod tests;
