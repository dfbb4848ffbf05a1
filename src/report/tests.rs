#![allow(clippy::unwrap_used)]

use chrono::NaiveDate;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use super::*;

fn day(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn ym(s: &str) -> YearMonth {
    s.parse().unwrap()
}

fn expense(id: i64, date: NaiveDate, category: Category, amount: Decimal) -> Expense {
    Expense {
        id,
        date,
        category,
        description: String::new(),
        amount,
    }
}

fn budget(month: &str, year: i32, amount: Decimal) -> Budget {
    Budget {
        id: 1,
        month: month.into(),
        year,
        amount,
    }
}

fn march_expenses() -> Vec<Expense> {
    vec![
        expense(1, day(2024, 3, 1), Category::Food, dec!(100)),
        expense(2, day(2024, 3, 15), Category::Transport, dec!(50)),
    ]
}

// ── current_period_summary ───────────────────────────────────

#[test]
fn test_current_period_summary() {
    let budgets = vec![budget("march", 2024, dec!(200))];
    let summary = current_period_summary(&march_expenses(), &budgets, day(2024, 3, 20));
    assert_eq!(
        summary,
        PeriodSummary {
            budget: dec!(200),
            spent: dec!(150),
            remaining: dec!(50),
        }
    );
}

#[test]
fn test_current_period_summary_without_budget() {
    let summary = current_period_summary(&march_expenses(), &[], day(2024, 3, 1));
    assert_eq!(summary.budget, Decimal::ZERO);
    assert_eq!(summary.remaining, dec!(-150));
}

#[test]
fn test_current_period_summary_ignores_same_month_other_year() {
    let mut expenses = march_expenses();
    expenses.push(expense(3, day(2023, 3, 5), Category::Bills, dec!(999)));
    let budgets = vec![budget("march", 2023, dec!(1))];
    let summary = current_period_summary(&expenses, &budgets, day(2024, 3, 2));
    assert_eq!(summary.spent, dec!(150));
    assert_eq!(summary.budget, Decimal::ZERO);
}

#[test]
fn test_current_period_summary_empty() {
    let summary = current_period_summary(&[], &[], day(2024, 3, 2));
    assert_eq!(summary, PeriodSummary::default());
}

// ── daily_view ────────────────────────────────────────────────

#[test]
fn test_daily_view_exact_day() {
    let view = daily_view(&march_expenses(), day(2024, 3, 1));
    assert_eq!(view.rows.len(), 1);
    assert_eq!(view.total, dec!(100));

    let empty = daily_view(&march_expenses(), day(2024, 3, 2));
    assert!(empty.rows.is_empty());
    assert_eq!(empty.total, Decimal::ZERO);
}

#[test]
fn test_daily_view_sorted_by_amount_descending() {
    let d = day(2024, 3, 9);
    let expenses = vec![
        expense(1, d, Category::Food, dec!(5)),
        expense(2, d, Category::Bills, dec!(80)),
        expense(3, d, Category::Other, dec!(5)),
        expense(4, d, Category::Shopping, dec!(20)),
    ];
    let view = daily_view(&expenses, d);
    let ids: Vec<i64> = view.rows.iter().map(|e| e.id).collect();
    assert_eq!(ids, vec![2, 4, 1, 3]);
    assert_eq!(view.total, dec!(110));
}

// ── monthly_overview ─────────────────────────────────────────

#[test]
fn test_monthly_overview_top_category_and_remaining() {
    let expenses = vec![
        expense(1, day(2024, 3, 1), Category::Food, dec!(100)),
        expense(2, day(2024, 3, 2), Category::Food, dec!(50)),
        expense(3, day(2024, 3, 3), Category::Transport, dec!(30)),
    ];
    let budgets = vec![budget("march", 2024, dec!(500))];
    let overview = monthly_overview(&expenses, &budgets, &[ym("2024-03")]);

    assert_eq!(overview.top_category, Some((Category::Food, dec!(150))));
    assert_eq!(overview.totals, vec![(ym("2024-03"), dec!(180))]);
    assert_eq!(overview.budget_vs_actual.len(), 1);
    let row = overview.budget_vs_actual[0];
    assert_eq!(row.budget, dec!(500));
    assert_eq!(row.spent, dec!(180));
    assert_eq!(row.remaining, dec!(500) - dec!(180));
    // Newest first.
    assert_eq!(overview.rows[0].id, 3);
}

#[test]
fn test_monthly_overview_multiple_periods() {
    let expenses = vec![
        expense(1, day(2024, 2, 10), Category::Bills, dec!(70)),
        expense(2, day(2024, 3, 1), Category::Food, dec!(10)),
        expense(3, day(2024, 4, 1), Category::Food, dec!(999)),
    ];
    let budgets = vec![budget("february", 2024, dec!(100))];
    let overview = monthly_overview(&expenses, &budgets, &[ym("2024-03"), ym("2024-02")]);

    assert_eq!(overview.rows.len(), 2);
    assert_eq!(
        overview.totals,
        vec![(ym("2024-02"), dec!(70)), (ym("2024-03"), dec!(10))]
    );
    assert_eq!(overview.top_category, Some((Category::Bills, dec!(70))));

    let periods: Vec<String> = overview
        .budget_vs_actual
        .iter()
        .map(|r| r.period.to_string())
        .collect();
    assert_eq!(periods, vec!["2024-03", "2024-02"]);
    assert_eq!(overview.budget_vs_actual[0].budget, Decimal::ZERO);
    assert_eq!(overview.budget_vs_actual[0].remaining, dec!(-10));
    assert_eq!(overview.budget_vs_actual[1].remaining, dec!(30));
}

#[test]
fn test_monthly_overview_selected_period_without_expenses() {
    let overview = monthly_overview(
        &march_expenses(),
        &[budget("may", 2024, dec!(40))],
        &[ym("2024-03"), ym("2024-05")],
    );
    let may = overview.budget_vs_actual[1];
    assert_eq!(may.spent, Decimal::ZERO);
    assert_eq!(may.remaining, dec!(40));
    assert_eq!(overview.totals.len(), 1);
}

#[test]
fn test_monthly_overview_tie_breaks_alphabetically() {
    let expenses = vec![
        expense(1, day(2024, 3, 1), Category::Transport, dec!(25)),
        expense(2, day(2024, 3, 2), Category::Bills, dec!(25)),
        expense(3, day(2024, 3, 3), Category::Food, dec!(25)),
    ];
    let overview = monthly_overview(&expenses, &[], &[ym("2024-03")]);
    assert_eq!(overview.top_category, Some((Category::Bills, dec!(25))));
}

#[test]
fn test_monthly_overview_no_match_is_empty() {
    let overview = monthly_overview(&march_expenses(), &[], &[ym("2023-01")]);
    assert!(overview.is_empty());
    assert!(overview.top_category.is_none());
    assert!(overview.totals.is_empty());
    assert!(overview.budget_vs_actual.is_empty());

    assert!(monthly_overview(&march_expenses(), &[], &[]).is_empty());
}

// ── helpers ───────────────────────────────────────────────────

#[test]
fn test_available_periods_sorted_unique() {
    let expenses = vec![
        expense(1, day(2024, 3, 1), Category::Food, dec!(1)),
        expense(2, day(2023, 11, 1), Category::Food, dec!(1)),
        expense(3, day(2024, 3, 9), Category::Food, dec!(1)),
    ];
    assert_eq!(
        available_periods(&expenses),
        vec![ym("2023-11"), ym("2024-03")]
    );
}

#[test]
fn test_find_budget_first_match() {
    let budgets = vec![
        budget("march", 2024, dec!(1)),
        budget("march", 2024, dec!(2)),
    ];
    assert_eq!(find_budget(&budgets, ym("2024-03")), dec!(1));
    assert_eq!(find_budget(&budgets, ym("2024-04")), Decimal::ZERO);
}

#[test]
fn test_category_totals_ordering() {
    let expenses = vec![
        expense(1, day(2024, 3, 1), Category::Transport, dec!(10)),
        expense(2, day(2024, 3, 1), Category::Food, dec!(40)),
        expense(3, day(2024, 3, 2), Category::Bills, dec!(10)),
        expense(4, day(2024, 3, 2), Category::Food, dec!(5)),
    ];
    assert_eq!(
        category_totals(&expenses),
        vec![
            (Category::Food, dec!(45)),
            (Category::Bills, dec!(10)),
            (Category::Transport, dec!(10)),
        ]
    );
    assert!(category_totals(&[]).is_empty());
}

#[test]
fn test_spent_in() {
    assert_eq!(spent_in(&march_expenses(), ym("2024-03")), dec!(150));
    assert_eq!(spent_in(&march_expenses(), ym("2024-04")), Decimal::ZERO);
}

// ── overflow ──────────────────────────────────────────────────

/// Stored files can hold amounts no input path would accept.
fn huge_march_expenses() -> Vec<Expense> {
    vec![
        expense(1, day(2024, 3, 1), Category::Food, Decimal::MAX),
        expense(2, day(2024, 3, 1), Category::Food, Decimal::MAX),
    ]
}

#[test]
fn test_current_period_summary_saturates_instead_of_overflowing() {
    let budgets = vec![budget("march", 2024, dec!(10))];
    let summary = current_period_summary(&huge_march_expenses(), &budgets, day(2024, 3, 20));
    assert_eq!(summary.spent, Decimal::MAX);
    assert_eq!(summary.remaining, dec!(10) - Decimal::MAX);
}

#[test]
fn test_daily_view_saturates_instead_of_overflowing() {
    let view = daily_view(&huge_march_expenses(), day(2024, 3, 1));
    assert_eq!(view.rows.len(), 2);
    assert_eq!(view.total, Decimal::MAX);
}

#[test]
fn test_monthly_overview_saturates_instead_of_overflowing() {
    let mut expenses = huge_march_expenses();
    expenses.push(expense(3, day(2024, 3, 2), Category::Food, Decimal::MIN));
    let overview = monthly_overview(&expenses, &[], &[ym("2024-03")]);
    assert_eq!(overview.rows.len(), 3);
    assert_eq!(overview.top_category.unwrap().0, Category::Food);
    assert_eq!(overview.totals.len(), 1);
    assert_eq!(overview.budget_vs_actual[0].spent, overview.totals[0].1);
}
