use anyhow::{Context, Result};
use chrono::Local;
use std::path::PathBuf;

use crate::models::*;
use crate::report;
use crate::store::{Store, Upsert};

pub(crate) fn as_cli(args: &[String], store: &mut Store) -> Result<()> {
    match args[0].as_str() {
        "add" => cli_add(&args[1..], store),
        "delete" => cli_delete(&args[1..], store),
        "budget" => cli_budget(&args[1..], store),
        "delete-budget" => cli_delete_budget(&args[1..], store),
        "list" | "ls" => cli_list(store),
        "budgets" => cli_budgets(store),
        "summary" | "s" => cli_summary(store),
        "day" => cli_day(&args[1..], store),
        "overview" => cli_overview(&args[1..], store),
        "export" => cli_export(&args[1..], store),
        "--help" | "-h" | "help" => {
            print_usage();
            Ok(())
        }
        "--version" | "-V" | "version" => {
            println!("spendbook {}", env!("CARGO_PKG_VERSION"));
            Ok(())
        }
        other => {
            print_usage();
            anyhow::bail!("Unknown command: {other}");
        }
    }
}

fn print_usage() {
    println!("SpendBook: a local personal expense tracker");
    println!();
    println!("Usage: spendbook [--file <path>] [command]");
    println!();
    println!("Commands:");
    println!("  (none)                              Launch interactive TUI");
    println!("  add <date> <category> <amount> [description]");
    println!("                                      Record an expense");
    println!("  delete <label> | --id <n>           Delete expense(s)");
    println!("  budget <month> <year> <amount>      Set a monthly budget");
    println!("  delete-budget <label> | --id <n>    Delete budget(s)");
    println!("  list                                List all expenses");
    println!("  budgets                             List all budgets");
    println!("  summary                             Budget, spent and remaining this month");
    println!("  day [YYYY-MM-DD]                    Expenses on one day (default: today)");
    println!("  overview [YYYY-MM ...]              Monthly overview (default: latest month)");
    println!("  export [path]                       Export expenses to CSV");
    println!("  --help, -h                          Show this help");
    println!("  --version, -V                       Show version");
    println!();
    println!("Categories: {}", category_names().join(", "));
}

fn category_names() -> Vec<&'static str> {
    Category::all().iter().map(|c| c.as_str()).collect()
}

/// Parse `--id <n>` if present.
fn id_flag(args: &[String]) -> Result<Option<i64>> {
    args.windows(2)
        .find(|w| w[0] == "--id")
        .map(|w| {
            w[1].parse::<i64>()
                .with_context(|| format!("Invalid id: {}", w[1]))
        })
        .transpose()
}

fn cli_add(args: &[String], store: &mut Store) -> Result<()> {
    if args.len() < 3 {
        anyhow::bail!("Usage: spendbook add <YYYY-MM-DD> <category> <amount> [description]");
    }
    let date = parse_date(&args[0])?;
    let category: Category = args[1].parse()?;
    let amount = parse_amount(&args[2])?;
    let description = args[3..].join(" ");

    let id = store.add_expense(date, category, &description, amount)?;
    let expense = Expense {
        id,
        date,
        category,
        description,
        amount,
    };
    println!("Added: {}", expense.label());
    Ok(())
}

fn cli_delete(args: &[String], store: &mut Store) -> Result<()> {
    if let Some(id) = id_flag(args)? {
        if store.delete_expense_by_id(id)? {
            println!("Deleted expense #{id}");
        } else {
            println!("No expense with id {id}");
        }
        return Ok(());
    }
    if args.is_empty() {
        anyhow::bail!("Usage: spendbook delete <label> | --id <n>");
    }
    let label = args.join(" ");
    let n = store.delete_expense(&label)?;
    println!("Deleted {n} expense(s)");
    Ok(())
}

fn cli_budget(args: &[String], store: &mut Store) -> Result<()> {
    if args.len() != 3 {
        anyhow::bail!("Usage: spendbook budget <month> <year> <amount>");
    }
    let year = parse_year(&args[1])?;
    let amount = parse_amount(&args[2])?;
    let month = capitalize(parse_month_name(&args[0])?);
    match store.add_or_update_budget(&args[0], year, amount)? {
        Upsert::Inserted(_) => println!("Added budget for {month} {year}"),
        Upsert::Updated(_) => println!("Updated budget for {month} {year}"),
    }
    Ok(())
}

fn cli_delete_budget(args: &[String], store: &mut Store) -> Result<()> {
    if let Some(id) = id_flag(args)? {
        if store.delete_budget_by_id(id)? {
            println!("Deleted budget #{id}");
        } else {
            println!("No budget with id {id}");
        }
        return Ok(());
    }
    if args.is_empty() {
        anyhow::bail!("Usage: spendbook delete-budget <label> | --id <n>");
    }
    let label = args.join(" ");
    let n = store.delete_budget(&label)?;
    println!("Deleted {n} budget(s)");
    Ok(())
}

fn cli_list(store: &mut Store) -> Result<()> {
    let table = store.load_expenses()?;
    if table.dropped_count() > 0 {
        eprintln!(
            "Warning: {} stored row(s) have unreadable dates and are hidden",
            table.dropped_count()
        );
    }
    if table.is_empty() {
        println!("No expenses");
        return Ok(());
    }

    println!(
        "{:<5} {:<10}  {:<10} {:>14}  Description",
        "ID", "Date", "Category", "Amount"
    );
    println!("{}", "─".repeat(60));
    for e in &table.rows {
        println!(
            "{:<5} {:<10}  {:<10} {:>14}  {}",
            e.id,
            e.date,
            e.category,
            format_currency(e.amount),
            e.description,
        );
    }
    Ok(())
}

fn cli_budgets(store: &mut Store) -> Result<()> {
    let budgets = store.load_budgets()?;
    if budgets.is_empty() {
        println!("No budgets");
        return Ok(());
    }
    println!("{:<5} Budget", "ID");
    println!("{}", "─".repeat(40));
    for b in &budgets {
        println!("{:<5} {}", b.id, b.label());
    }
    Ok(())
}

fn cli_summary(store: &mut Store) -> Result<()> {
    let snapshot = store.load_all()?;
    let today = Local::now().date_naive();
    let summary = report::current_period_summary(&snapshot.expenses.rows, &snapshot.budgets, today);
    let period = YearMonth::of(today);

    println!("SpendBook: {}", period_heading(period));
    println!("{}", "─".repeat(40));
    println!("  Budget:     {}", format_currency(summary.budget));
    println!("  Spent:      {}", format_currency(summary.spent));
    println!("  Remaining:  {}", format_currency(summary.remaining));
    Ok(())
}

/// `March 2024`, matching the budget labels.
pub(super) fn period_heading(period: YearMonth) -> String {
    format!("{} {}", capitalize(period.month_name()), period.year)
}

/// Parse `YYYY-MM` arguments. A repeated period keeps its first position.
pub(super) fn parse_periods(args: &[String]) -> Result<Vec<YearMonth>> {
    let mut seen = std::collections::HashSet::new();
    let mut periods = args
        .iter()
        .map(|a| a.parse::<YearMonth>())
        .collect::<std::result::Result<Vec<_>, _>>()?;
    periods.retain(|p| seen.insert(*p));
    Ok(periods)
}

fn cli_day(args: &[String], store: &mut Store) -> Result<()> {
    let date = match args.first() {
        Some(a) => parse_date(a)?,
        None => Local::now().date_naive(),
    };
    let table = store.load_expenses()?;
    let view = report::daily_view(&table.rows, date);

    println!("Expenses on {}", date.format("%d %B %Y"));
    println!("{}", "─".repeat(40));
    if view.rows.is_empty() {
        println!("  No expenses found for this date.");
        return Ok(());
    }
    for e in &view.rows {
        println!("  {}", e.label());
    }
    println!();
    println!("  Total: {}", format_currency(view.total));
    Ok(())
}

fn cli_overview(args: &[String], store: &mut Store) -> Result<()> {
    let snapshot = store.load_all()?;
    let rows = &snapshot.expenses.rows;

    let selected: Vec<YearMonth> = if args.is_empty() {
        report::available_periods(rows).last().copied().into_iter().collect()
    } else {
        parse_periods(args)?
    };

    let overview = report::monthly_overview(rows, &snapshot.budgets, &selected);
    if overview.is_empty() {
        println!("No data available for the selected months.");
        return Ok(());
    }

    if let Some((category, total)) = overview.top_category {
        println!("Top category: {category} ({})", format_currency(total));
        println!();
    }

    println!("Totals by month:");
    let max = overview
        .totals
        .iter()
        .map(|(_, t)| *t)
        .max()
        .unwrap_or_default();
    for (period, total) in &overview.totals {
        let ratio = crate::ui::util::spent_ratio(*total, max);
        println!(
            "  {period}  {} {}",
            crate::ui::util::progress_bar(ratio, 20),
            format_currency(*total)
        );
    }

    println!();
    println!(
        "{:<10} {:>14} {:>14} {:>14}",
        "Month", "Budget", "Spent", "Remaining"
    );
    println!("{}", "─".repeat(55));
    for row in &overview.budget_vs_actual {
        println!(
            "{:<10} {:>14} {:>14} {:>14}",
            row.period.to_string(),
            format_currency(row.budget),
            format_currency(row.spent),
            format_currency(row.remaining),
        );
    }

    println!();
    println!("Expenses:");
    for e in &overview.rows {
        println!("  {}", e.label());
    }
    Ok(())
}

fn cli_export(args: &[String], store: &mut Store) -> Result<()> {
    let output_path = args
        .first()
        .filter(|a| !a.starts_with('-'))
        .map(|a| PathBuf::from(shellexpand(a)))
        .unwrap_or_else(|| {
            let home = std::env::var("HOME").unwrap_or_else(|_| ".".into());
            let today = Local::now().format("%Y-%m-%d");
            PathBuf::from(format!("{home}/spendbook-export-{today}.csv"))
        });

    let count = store.export_csv(&output_path)?;
    if count == 0 {
        println!("No expenses to export");
    } else {
        println!("Exported {count} expenses to {}", output_path.display());
    }
    Ok(())
}

pub(crate) fn shellexpand(path: &str) -> String {
    if let Some(rest) = path.strip_prefix("~/") {
        let home = std::env::var("HOME").unwrap_or_else(|_| ".".into());
        format!("{home}/{rest}")
    } else {
        path.to_string()
    }
}
