#![allow(clippy::unwrap_used)]

use chrono::NaiveDate;
use rust_decimal_macros::dec;

use super::app::{App, InputMode, PendingAction, Screen};
use super::commands::{handle_command, run_pending};
use crate::models::{Category, YearMonth};
use crate::store::Store;

fn day(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn setup() -> (App, Store) {
    let store = Store::open_in_memory().unwrap();
    let mut app = App::with_today(day(2024, 3, 20));
    app.refresh_all(&store).unwrap();
    (app, store)
}

fn run(input: &str, app: &mut App, store: &mut Store) {
    handle_command(input, app, store).unwrap();
}

// ── Navigation ────────────────────────────────────────────────

#[test]
fn test_screen_commands() {
    let (mut app, mut store) = setup();
    run("e", &mut app, &mut store);
    assert_eq!(app.screen, Screen::Expenses);
    run("budgets", &mut app, &mut store);
    assert_eq!(app.screen, Screen::Budgets);
    run("monthly", &mut app, &mut store);
    assert_eq!(app.screen, Screen::Monthly);
    run("d", &mut app, &mut store);
    assert_eq!(app.screen, Screen::Dashboard);
}

#[test]
fn test_quit() {
    let (mut app, mut store) = setup();
    run("q", &mut app, &mut store);
    assert!(!app.running);
}

#[test]
fn test_unknown_command_suggests() {
    let (mut app, mut store) = setup();
    run("budgt", &mut app, &mut store);
    assert!(app.status_message.contains("Unknown command: :budgt"));
    assert!(app.status_message.contains(":budget"));
}

// ── Adding ────────────────────────────────────────────────────

#[test]
fn test_add_expense_refreshes_views() {
    let (mut app, mut store) = setup();
    run("add 2024-03-05 food 12.50 lunch with team", &mut app, &mut store);

    assert_eq!(app.expenses.rows.len(), 1);
    let e = &app.expenses.rows[0];
    assert_eq!(e.category, Category::Food);
    assert_eq!(e.description, "lunch with team");
    assert_eq!(e.amount, dec!(12.50));
    assert_eq!(app.summary.spent, dec!(12.50));
    assert!(app.status_message.starts_with("Added Food expense"));
}

#[test]
fn test_add_invalid_amount_sets_status() {
    let (mut app, mut store) = setup();
    run("add 2024-03-05 food lots", &mut app, &mut store);

    assert!(app.status_message.starts_with("invalid input"));
    assert!(store.load_expenses().unwrap().is_empty());
}

#[test]
fn test_add_unknown_category_sets_status() {
    let (mut app, mut store) = setup();
    run("add 2024-03-05 rent 100", &mut app, &mut store);

    assert!(app.status_message.starts_with("invalid input"));
    assert!(store.load_expenses().unwrap().is_empty());
}

#[test]
fn test_add_missing_args_shows_usage() {
    let (mut app, mut store) = setup();
    run("add 2024-03-05", &mut app, &mut store);
    assert!(app.status_message.starts_with("Usage"));
}

// ── Budgets ───────────────────────────────────────────────────

#[test]
fn test_budget_insert_then_update() {
    let (mut app, mut store) = setup();
    run("budget march 2024 200", &mut app, &mut store);
    assert!(app.status_message.starts_with("Added budget"));
    assert_eq!(app.summary.budget, dec!(200));

    run("budget March 2024 350", &mut app, &mut store);
    assert!(app.status_message.starts_with("Updated budget"));
    assert_eq!(app.budgets.len(), 1);
    assert_eq!(app.summary.budget, dec!(350));
}

#[test]
fn test_budget_bad_month_sets_status() {
    let (mut app, mut store) = setup();
    run("budget smarch 2024 200", &mut app, &mut store);
    assert!(app.status_message.starts_with("invalid input"));
    assert!(store.load_budgets().unwrap().is_empty());
}

// ── Deleting ──────────────────────────────────────────────────

#[test]
fn test_delete_expense_asks_for_confirmation() {
    let (mut app, mut store) = setup();
    run("add 2024-03-05 food 12.50 lunch", &mut app, &mut store);
    run("e", &mut app, &mut store);

    run("delete-expense", &mut app, &mut store);
    assert_eq!(app.input_mode, InputMode::Confirm);
    let action = app.pending_action.take().unwrap();
    let PendingAction::DeleteExpense { ref label, .. } = action else {
        unreachable!("expected an expense deletion, got {action:?}");
    };
    assert_eq!(label, "2024-03-05 | Food | lunch | ₹12.50");
    // Nothing is removed until the action runs.
    assert_eq!(store.load_expenses().unwrap().rows.len(), 1);

    run_pending(action, &mut app, &mut store).unwrap();
    assert!(app.expenses.rows.is_empty());
    assert!(store.load_expenses().unwrap().is_empty());
}

#[test]
fn test_delete_expense_outside_list_is_refused() {
    let (mut app, mut store) = setup();
    run("add 2024-03-05 food 12.50 lunch", &mut app, &mut store);
    run("delete-expense", &mut app, &mut store);

    assert_eq!(app.input_mode, InputMode::Normal);
    assert!(app.pending_action.is_none());
}

#[test]
fn test_delete_expense_by_label_removes_duplicates() {
    let (mut app, mut store) = setup();
    run("add 2024-03-05 food 10 tea", &mut app, &mut store);
    run("add 2024-03-05 food 10 tea", &mut app, &mut store);
    run("add 2024-03-06 bills 40 power", &mut app, &mut store);

    run(
        "delete-expense 2024-03-05 | Food | tea | ₹10.00",
        &mut app,
        &mut store,
    );
    assert!(app.status_message.starts_with("Deleted 2 expense(s)"));
    assert_eq!(app.expenses.rows.len(), 1);
    assert_eq!(app.expenses.rows[0].category, Category::Bills);
}

#[test]
fn test_delete_budget_selected() {
    let (mut app, mut store) = setup();
    run("budget april 2024 100", &mut app, &mut store);
    run("b", &mut app, &mut store);
    run("delete-budget", &mut app, &mut store);

    let action = app.pending_action.take().unwrap();
    assert_eq!(
        action,
        PendingAction::DeleteBudget {
            id: app.budgets[0].id,
            label: "April 2024 - ₹100.00".to_string(),
        }
    );
    run_pending(action, &mut app, &mut store).unwrap();
    assert!(app.budgets.is_empty());
}

// ── Views ─────────────────────────────────────────────────────

#[test]
fn test_day_command() {
    let (mut app, mut store) = setup();
    run("add 2024-03-05 food 10 tea", &mut app, &mut store);
    run("add 2024-03-05 transport 25 cab", &mut app, &mut store);
    run("add 2024-03-06 bills 40 power", &mut app, &mut store);

    run("day 2024-03-05", &mut app, &mut store);
    assert_eq!(app.screen, Screen::Daily);
    assert_eq!(app.daily.rows.len(), 2);
    assert_eq!(app.daily.rows[0].amount, dec!(25));
    assert_eq!(app.daily.total, dec!(35));
}

#[test]
fn test_months_selection() {
    let (mut app, mut store) = setup();
    run("add 2024-02-10 food 30", &mut app, &mut store);
    run("add 2024-03-05 food 10", &mut app, &mut store);

    // An existing selection survives a reload; `:months` resets it to the latest.
    assert_eq!(app.selected_periods, vec![YearMonth::new(2024, 2).unwrap()]);
    run("months", &mut app, &mut store);
    assert_eq!(app.selected_periods, vec![YearMonth::new(2024, 3).unwrap()]);

    run("months 2024-02 2024-03", &mut app, &mut store);
    assert_eq!(app.selected_periods.len(), 2);
    assert_eq!(app.overview.rows.len(), 2);
    assert_eq!(app.overview.totals.len(), 2);

    run("months 2024-03 2024-02 2024-03", &mut app, &mut store);
    assert_eq!(
        app.selected_periods,
        vec![YearMonth::new(2024, 3).unwrap(), YearMonth::new(2024, 2).unwrap()]
    );
    assert_eq!(app.overview.budget_vs_actual.len(), 2);

    run("months 2023-12", &mut app, &mut store);
    assert!(app.status_message.starts_with("No expenses in"));
    assert_eq!(app.selected_periods.len(), 2);
}

#[test]
fn test_step_period() {
    let (mut app, mut store) = setup();
    run("add 2024-01-10 food 30", &mut app, &mut store);
    run("add 2024-03-05 food 10", &mut app, &mut store);

    app.step_period(-1);
    assert_eq!(app.selected_periods, vec![YearMonth::new(2024, 1).unwrap()]);
    app.step_period(-1);
    assert_eq!(app.selected_periods, vec![YearMonth::new(2024, 1).unwrap()]);
    app.step_period(5);
    assert_eq!(app.selected_periods, vec![YearMonth::new(2024, 3).unwrap()]);
}

#[test]
fn test_export_writes_file() {
    let (mut app, mut store) = setup();
    run("add 2024-03-05 food 10 tea", &mut app, &mut store);
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("out.csv");

    run(&format!("export {}", path.display()), &mut app, &mut store);
    assert!(app.status_message.starts_with("Exported 1 expenses"));
    let text = std::fs::read_to_string(&path).unwrap();
    assert!(text.starts_with("Date,Category,Description,Amount"));
}

#[test]
fn test_monthly_rows_newest_first_and_deletable() {
    let (mut app, mut store) = setup();
    run("add 2024-03-02 food 10 tea", &mut app, &mut store);
    run("add 2024-03-09 bills 40 power", &mut app, &mut store);
    run("add 2024-03-05 transport 25 cab", &mut app, &mut store);
    run("m", &mut app, &mut store);

    let dates: Vec<NaiveDate> = app.overview.rows.iter().map(|e| e.date).collect();
    assert_eq!(dates, vec![day(2024, 3, 9), day(2024, 3, 5), day(2024, 3, 2)]);
    assert_eq!(app.selected_expense().unwrap().description, "power");

    app.monthly_index = 1;
    run("delete-expense", &mut app, &mut store);
    let action = app.pending_action.take().unwrap();
    run_pending(action, &mut app, &mut store).unwrap();

    let left: Vec<&str> = app
        .overview
        .rows
        .iter()
        .map(|e| e.description.as_str())
        .collect();
    assert_eq!(left, vec!["power", "tea"]);
    assert_eq!(app.monthly_index, 1);
}
