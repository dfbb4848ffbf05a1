use std::collections::{HashMap, HashSet};
use std::path::PathBuf;
use std::sync::LazyLock;

use super::app::{App, PendingAction, Screen};
use crate::models::{parse_amount, parse_date, parse_year, Category, YearMonth};
use crate::store::{Store, Upsert};

pub(crate) struct Command {
    pub(crate) description: &'static str,
    pub(crate) run: fn(&str, &mut App, &mut Store) -> anyhow::Result<()>,
}

macro_rules! register_command {
    ($name:expr, $desc:expr, $func:expr, $registry:expr) => {{
        $registry.insert(
            $name,
            Command {
                description: $desc,
                run: $func,
            },
        );
    }};
}

pub(crate) static COMMANDS: LazyLock<HashMap<&str, Command>> = LazyLock::new(|| {
    let mut r: HashMap<&str, Command> = HashMap::new();

    register_command!("q", "Quit SpendBook", cmd_quit, r);
    register_command!("quit", "Quit SpendBook", cmd_quit, r);
    register_command!("d", "Go to Dashboard", cmd_dashboard, r);
    register_command!("dashboard", "Go to Dashboard", cmd_dashboard, r);
    register_command!("e", "Go to Expenses", cmd_expenses, r);
    register_command!("expenses", "Go to Expenses", cmd_expenses, r);
    register_command!("day", "Show one day (e.g. :day 2024-03-01)", cmd_day, r);
    register_command!("m", "Go to Monthly overview", cmd_monthly, r);
    register_command!("monthly", "Go to Monthly overview", cmd_monthly, r);
    register_command!(
        "months",
        "Select months (e.g. :months 2024-02 2024-03)",
        cmd_months,
        r
    );
    register_command!("b", "Go to Budgets", cmd_budgets, r);
    register_command!("budgets", "Go to Budgets", cmd_budgets, r);
    register_command!("help", "Show available commands", cmd_help, r);
    register_command!("h", "Show available commands", cmd_help, r);
    register_command!(
        "add",
        "Add expense (e.g. :add 2024-03-01 food 12.50 lunch)",
        cmd_add,
        r
    );
    register_command!(
        "a",
        "Add expense (e.g. :a 2024-03-01 food 12.50 lunch)",
        cmd_add,
        r
    );
    register_command!(
        "budget",
        "Set monthly budget (e.g. :budget march 2024 500)",
        cmd_budget,
        r
    );
    register_command!(
        "delete-expense",
        "Delete selected expense, or all matching a label",
        cmd_delete_expense,
        r
    );
    register_command!(
        "delete-budget",
        "Delete selected budget, or all matching a label",
        cmd_delete_budget,
        r
    );
    register_command!(
        "export",
        "Export expenses to CSV (e.g. :export ~/expenses.csv)",
        cmd_export,
        r
    );

    r
});

pub(crate) fn handle_command(
    input: &str,
    app: &mut App,
    store: &mut Store,
) -> anyhow::Result<()> {
    let trimmed = input.trim();
    let mut parts = trimmed.splitn(2, ' ');
    let cmd_name = parts.next().unwrap_or("");
    let args = parts.next().unwrap_or("").trim();

    if let Some(cmd) = COMMANDS.get(cmd_name) {
        (cmd.run)(args, app, store)?;
    } else {
        let suggestion = find_closest(cmd_name);
        app.set_status(format!(
            "Unknown command: :{cmd_name}. Did you mean :{suggestion}?"
        ));
    }

    Ok(())
}

fn find_closest(input: &str) -> String {
    COMMANDS
        .keys()
        .filter(|k| k.len() > 1) // skip single-letter aliases for suggestions
        .min_by_key(|k| (levenshtein(input, k), **k))
        .unwrap_or(&"help")
        .to_string()
}

fn levenshtein(a: &str, b: &str) -> usize {
    let (a, b) = (a.as_bytes(), b.as_bytes());
    let mut prev: Vec<usize> = (0..=b.len()).collect();
    let mut curr = vec![0; b.len() + 1];

    for i in 1..=a.len() {
        curr[0] = i;
        for j in 1..=b.len() {
            let cost = if a[i - 1] == b[j - 1] { 0 } else { 1 };
            curr[j] = (prev[j] + 1).min(curr[j - 1] + 1).min(prev[j - 1] + cost);
        }
        std::mem::swap(&mut prev, &mut curr);
    }

    prev[b.len()]
}

/// Reload after a successful mutation; turn validation failures into a status
/// message. Anything else (a corrupt store, a failed write) ends the session.
fn finish(
    app: &mut App,
    store: &Store,
    result: crate::error::Result<String>,
) -> anyhow::Result<()> {
    match result {
        Ok(msg) => {
            app.refresh_all(store)?;
            app.set_status(msg);
            Ok(())
        }
        Err(e) if e.is_validation() => {
            app.set_status(e.to_string());
            Ok(())
        }
        Err(e) => Err(e.into()),
    }
}

// ── Command implementations ──────────────────────────────────

fn cmd_quit(_args: &str, app: &mut App, _store: &mut Store) -> anyhow::Result<()> {
    app.running = false;
    Ok(())
}

fn cmd_dashboard(_args: &str, app: &mut App, _store: &mut Store) -> anyhow::Result<()> {
    app.screen = Screen::Dashboard;
    Ok(())
}

fn cmd_expenses(_args: &str, app: &mut App, _store: &mut Store) -> anyhow::Result<()> {
    app.screen = Screen::Expenses;
    Ok(())
}

fn cmd_day(args: &str, app: &mut App, _store: &mut Store) -> anyhow::Result<()> {
    let date = if args.is_empty() {
        app.today
    } else {
        match parse_date(args) {
            Ok(d) => d,
            Err(e) => {
                app.set_status(e.to_string());
                return Ok(());
            }
        }
    };
    app.screen = Screen::Daily;
    app.set_daily_date(date);
    app.set_status(format!("Expenses on {}", date.format("%d %B %Y")));
    Ok(())
}

fn cmd_monthly(_args: &str, app: &mut App, _store: &mut Store) -> anyhow::Result<()> {
    app.screen = Screen::Monthly;
    Ok(())
}

fn cmd_months(args: &str, app: &mut App, _store: &mut Store) -> anyhow::Result<()> {
    if args.is_empty() {
        app.selected_periods.clear();
        app.recompute();
        app.screen = Screen::Monthly;
        app.set_status("Showing latest month");
        return Ok(());
    }

    let parsed: Result<Vec<YearMonth>, _> = args.split_whitespace().map(str::parse).collect();
    let mut periods = match parsed {
        Ok(p) => p,
        Err(e) => {
            app.set_status(e.to_string());
            return Ok(());
        }
    };
    // Repeats keep their first position.
    let mut seen = HashSet::new();
    periods.retain(|p| seen.insert(*p));
    let unknown: Vec<String> = periods
        .iter()
        .filter(|p| !app.periods.contains(p))
        .map(|p| p.to_string())
        .collect();
    if !unknown.is_empty() {
        app.set_status(format!("No expenses in: {}", unknown.join(", ")));
        return Ok(());
    }

    app.select_periods(periods);
    app.screen = Screen::Monthly;
    let names: Vec<String> = app.selected_periods.iter().map(|p| p.to_string()).collect();
    app.set_status(format!("Showing {}", names.join(", ")));
    Ok(())
}

fn cmd_budgets(_args: &str, app: &mut App, _store: &mut Store) -> anyhow::Result<()> {
    app.screen = Screen::Budgets;
    Ok(())
}

fn cmd_help(_args: &str, app: &mut App, _store: &mut Store) -> anyhow::Result<()> {
    app.show_help = true;
    Ok(())
}

fn cmd_add(args: &str, app: &mut App, store: &mut Store) -> anyhow::Result<()> {
    let parts: Vec<&str> = args.splitn(4, ' ').collect();
    if parts.len() < 3 {
        app.set_status("Usage: :add <YYYY-MM-DD> <category> <amount> [description]");
        return Ok(());
    }
    let description = parts.get(3).map(|d| d.trim()).unwrap_or("");

    let result = (|| -> crate::error::Result<String> {
        let date = parse_date(parts[0])?;
        let category: Category = parts[1].parse()?;
        let amount = parse_amount(parts[2])?;
        store.add_expense(date, category, description, amount)?;
        Ok(format!(
            "Added {category} expense of {} on {date}",
            crate::models::format_currency(amount)
        ))
    })();
    finish(app, store, result)
}

fn cmd_budget(args: &str, app: &mut App, store: &mut Store) -> anyhow::Result<()> {
    let parts: Vec<&str> = args.split_whitespace().collect();
    if parts.len() != 3 {
        app.set_status("Usage: :budget <month> <year> <amount>");
        return Ok(());
    }

    let result = (|| -> crate::error::Result<String> {
        let year = parse_year(parts[1])?;
        let amount = parse_amount(parts[2])?;
        let verb = match store.add_or_update_budget(parts[0], year, amount)? {
            Upsert::Inserted(_) => "Added",
            Upsert::Updated(_) => "Updated",
        };
        Ok(format!(
            "{verb} budget for {} {year}: {}",
            parts[0],
            crate::models::format_currency(amount)
        ))
    })();
    finish(app, store, result)
}

fn cmd_delete_expense(args: &str, app: &mut App, store: &mut Store) -> anyhow::Result<()> {
    if !args.is_empty() {
        let result = store
            .delete_expense(args)
            .map(|n| format!("Deleted {n} expense(s) labelled '{args}'"));
        return finish(app, store, result);
    }

    let Some(expense) = app.selected_expense() else {
        app.set_status("No expense selected (use the Expenses, Daily or Monthly tab)");
        return Ok(());
    };
    let action = PendingAction::DeleteExpense {
        id: expense.id,
        label: expense.label(),
    };
    let message = format!("Delete '{}'?", expense.label());
    app.confirm(action, message);
    Ok(())
}

fn cmd_delete_budget(args: &str, app: &mut App, store: &mut Store) -> anyhow::Result<()> {
    if !args.is_empty() {
        let result = store
            .delete_budget(args)
            .map(|n| format!("Deleted {n} budget(s) labelled '{args}'"));
        return finish(app, store, result);
    }

    if app.screen != Screen::Budgets {
        app.set_status("Switch to Budgets to delete the selected budget");
        return Ok(());
    }
    let Some(budget) = app.selected_budget() else {
        app.set_status("No budget selected");
        return Ok(());
    };
    let action = PendingAction::DeleteBudget {
        id: budget.id,
        label: budget.label(),
    };
    let message = format!("Delete budget '{}'?", budget.label());
    app.confirm(action, message);
    Ok(())
}

/// Carry out a confirmed action.
pub(crate) fn run_pending(
    action: PendingAction,
    app: &mut App,
    store: &mut Store,
) -> anyhow::Result<()> {
    let result = match action {
        PendingAction::DeleteExpense { id, label } => store
            .delete_expense_by_id(id)
            .map(|_| format!("Deleted: {label}")),
        PendingAction::DeleteBudget { id, label } => store
            .delete_budget_by_id(id)
            .map(|_| format!("Deleted budget: {label}")),
    };
    finish(app, store, result)
}

fn cmd_export(args: &str, app: &mut App, store: &mut Store) -> anyhow::Result<()> {
    let path = if args.is_empty() {
        default_export_path(app)
    } else {
        PathBuf::from(crate::run::shellexpand(args))
    };
    match store.export_csv(&path) {
        Ok(count) => app.set_status(format!("Exported {count} expenses to {}", path.display())),
        Err(e) => app.set_status(format!("Export failed: {e}")),
    }
    Ok(())
}

fn default_export_path(app: &App) -> PathBuf {
    let dir = directories::UserDirs::new()
        .map(|d| d.home_dir().to_path_buf())
        .unwrap_or_else(|| PathBuf::from("."));
    dir.join(format!("spendbook-export-{}.csv", app.today.format("%Y-%m-%d")))
}
