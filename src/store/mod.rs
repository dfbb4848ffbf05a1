mod budgets;
mod expenses;
mod export;
mod schema;

pub(crate) use budgets::Upsert;

use rusqlite::types::Value;
use rusqlite::{params, Connection, ErrorCode, TransactionBehavior};
use rust_decimal::Decimal;
use std::collections::HashMap;
use std::path::Path;
use std::str::FromStr;
use tracing::{debug, info, warn};

use crate::error::{Error, Result};
use crate::models::*;
use schema::{BUDGETS_TABLE, BUDGET_COLUMNS, EXPENSES_TABLE, EXPENSE_COLUMNS};

/// Full state of the container, as loaded at the start of a mutation.
#[derive(Debug, Clone, Default)]
pub(crate) struct Snapshot {
    pub(crate) expenses: ExpenseTable,
    pub(crate) budgets: Vec<Budget>,
}

/// The persisted container: one SQLite file holding the Expenses and
/// Budgets tables. Every write replaces both tables wholesale.
pub(crate) struct Store {
    conn: Connection,
}

impl Store {
    /// Open the container at `path`, creating it with empty tables when the
    /// file does not exist yet. An existing file is not validated here; a bad
    /// file surfaces as `CorruptStore` on the first load.
    pub(crate) fn open(path: &Path) -> Result<Self> {
        let existed = path.exists();
        let conn = Connection::open(path)?;
        if !existed {
            conn.execute_batch(schema::SCHEMA)?;
            info!(path = %path.display(), "initialized new expense store");
        } else {
            debug!(path = %path.display(), "opened existing expense store");
        }
        Ok(Self { conn })
    }

    #[cfg(test)]
    pub(crate) fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        conn.execute_batch(schema::SCHEMA)?;
        Ok(Self { conn })
    }

    #[cfg(test)]
    pub(crate) fn conn(&self) -> &Connection {
        &self.conn
    }

    pub(crate) fn load_expenses(&self) -> Result<ExpenseTable> {
        read_expenses(&self.conn)
    }

    pub(crate) fn load_budgets(&self) -> Result<Vec<Budget>> {
        read_budgets(&self.conn)
    }

    pub(crate) fn load_all(&self) -> Result<Snapshot> {
        Ok(Snapshot {
            expenses: self.load_expenses()?,
            budgets: self.load_budgets()?,
        })
    }

    /// Run one read-modify-write cycle inside a single immediate transaction.
    /// If `f` fails nothing is written.
    pub(crate) fn modify<T>(&mut self, f: impl FnOnce(&mut Snapshot) -> Result<T>) -> Result<T> {
        let tx = self
            .conn
            .transaction_with_behavior(TransactionBehavior::Immediate)
            .map_err(unreadable)?;
        let mut snapshot = Snapshot {
            expenses: read_expenses(&tx)?,
            budgets: read_budgets(&tx)?,
        };
        let out = f(&mut snapshot)?;
        save_all(&tx, &snapshot.expenses, &snapshot.budgets)?;
        tx.commit()?;
        Ok(out)
    }
}

/// A file that is not a SQLite database, or a damaged one, is a corrupt
/// store. Anything else is a plain storage failure.
fn unreadable(e: rusqlite::Error) -> Error {
    match e.sqlite_error_code() {
        Some(ErrorCode::NotADatabase | ErrorCode::DatabaseCorrupt) => {
            Error::corrupt(format!("container is not readable: {e}"))
        }
        _ => Error::Storage(e),
    }
}

// ── Reading ───────────────────────────────────────────────────

/// Rows of a table in storage order, with a lookup from normalized column
/// name to index. Duplicate names keep the first occurrence.
struct RawTable {
    columns: HashMap<String, usize>,
    rows: Vec<(i64, Vec<Value>)>,
}

impl RawTable {
    fn column(&self, table: &str, name: &str) -> Result<usize> {
        self.columns
            .get(&name.to_lowercase())
            .copied()
            .ok_or_else(|| Error::corrupt(format!("table {table} is missing column {name}")))
    }
}

fn read_table(conn: &Connection, table: &str) -> Result<RawTable> {
    let corrupt = |e: rusqlite::Error| Error::corrupt(format!("cannot read table {table}: {e}"));

    let mut stmt = conn
        .prepare(&format!("SELECT rowid, * FROM \"{table}\" ORDER BY rowid"))
        .map_err(corrupt)?;

    let mut columns = HashMap::new();
    for (i, name) in stmt.column_names().iter().enumerate().skip(1) {
        columns.entry(name.trim().to_lowercase()).or_insert(i);
    }

    let width = stmt.column_count();
    let rows = stmt
        .query_map([], |row| {
            let id: i64 = row.get(0)?;
            let cells = (0..width)
                .map(|i| row.get::<_, Value>(i))
                .collect::<std::result::Result<Vec<_>, _>>()?;
            Ok((id, cells))
        })
        .map_err(corrupt)?
        .collect::<std::result::Result<Vec<_>, _>>()
        .map_err(corrupt)?;

    Ok(RawTable { columns, rows })
}

fn cell_text(value: &Value) -> Option<String> {
    match value {
        Value::Null => None,
        Value::Integer(i) => Some(i.to_string()),
        Value::Real(f) => Some(f.to_string()),
        Value::Text(s) => Some(s.clone()),
        Value::Blob(b) => Some(String::from_utf8_lossy(b).into_owned()),
    }
}

fn cell_or_null(cells: &[Value], col: usize) -> Value {
    cells.get(col).cloned().unwrap_or(Value::Null)
}

fn cell_decimal(value: &Value) -> Option<Decimal> {
    match value {
        Value::Integer(i) => Some(Decimal::from(*i)),
        Value::Real(f) => Decimal::try_from(*f).ok().map(|d| d.normalize()),
        Value::Text(s) => {
            let s = s.trim();
            Decimal::from_str(s)
                .or_else(|_| Decimal::from_scientific(s))
                .ok()
        }
        Value::Null | Value::Blob(_) => None,
    }
}

fn cell_year(value: &Value) -> Option<i32> {
    match value {
        Value::Integer(i) => i32::try_from(*i).ok(),
        Value::Real(f) if f.fract() == 0.0 => Some(*f as i32),
        Value::Text(s) => s.trim().parse().ok(),
        _ => None,
    }
}

fn read_expenses(conn: &Connection) -> Result<ExpenseTable> {
    let raw = read_table(conn, EXPENSES_TABLE)?;
    let [date_col, category_col, description_col, amount_col] =
        EXPENSE_COLUMNS.map(|name| raw.column(EXPENSES_TABLE, name));
    let (date_col, category_col, description_col, amount_col) =
        (date_col?, category_col?, description_col?, amount_col?);

    let mut table = ExpenseTable::default();
    for (id, cells) in &raw.rows {
        let Some(date) = cell_text(&cells[date_col]).as_deref().and_then(coerce_date) else {
            table.dropped.push(RawExpense {
                id: *id,
                date: cell_or_null(cells, date_col),
                category: cell_or_null(cells, category_col),
                description: cell_or_null(cells, description_col),
                amount: cell_or_null(cells, amount_col),
            });
            continue;
        };
        let amount = cell_decimal(&cells[amount_col]).ok_or_else(|| {
            Error::corrupt(format!(
                "expense row {id} has a non-numeric amount: {:?}",
                cell_text(&cells[amount_col]).unwrap_or_default()
            ))
        })?;
        table.rows.push(Expense {
            id: *id,
            date,
            category: Category::parse_lenient(&cell_text(&cells[category_col]).unwrap_or_default()),
            description: cell_text(&cells[description_col]).unwrap_or_default(),
            amount,
        });
    }

    if !table.dropped.is_empty() {
        warn!(
            dropped = table.dropped.len(),
            "expense rows with unparseable dates excluded from views"
        );
    }
    debug!(rows = table.rows.len(), "loaded expenses");
    Ok(table)
}

fn read_budgets(conn: &Connection) -> Result<Vec<Budget>> {
    let raw = read_table(conn, BUDGETS_TABLE)?;
    let [month_col, year_col, budget_col] =
        BUDGET_COLUMNS.map(|name| raw.column(BUDGETS_TABLE, name));
    let (month_col, year_col, budget_col) = (month_col?, year_col?, budget_col?);

    let budgets = raw
        .rows
        .iter()
        .map(|(id, cells)| {
            let month = cell_text(&cells[month_col])
                .ok_or_else(|| Error::corrupt(format!("budget row {id} has no month")))?;
            let year = cell_year(&cells[year_col])
                .ok_or_else(|| Error::corrupt(format!("budget row {id} has an invalid year")))?;
            let amount = cell_decimal(&cells[budget_col]).ok_or_else(|| {
                Error::corrupt(format!("budget row {id} has a non-numeric budget"))
            })?;
            Ok(Budget {
                id: *id,
                month: month.trim().to_lowercase(),
                year,
                amount,
            })
        })
        .collect::<Result<Vec<_>>>()?;

    debug!(rows = budgets.len(), "loaded budgets");
    Ok(budgets)
}

// ── Writing ───────────────────────────────────────────────────

/// Overwrite both tables with the complete desired state: recreate them and
/// insert every row with its id. Must run inside a transaction.
fn save_all(conn: &Connection, expenses: &ExpenseTable, budgets: &[Budget]) -> Result<()> {
    conn.execute_batch(&format!(
        "DROP TABLE IF EXISTS \"{EXPENSES_TABLE}\"; DROP TABLE IF EXISTS \"{BUDGETS_TABLE}\";"
    ))?;
    conn.execute_batch(schema::SCHEMA)?;

    let mut stmt = conn.prepare(
        "INSERT INTO Expenses (rowid, Date, Category, Description, Amount)
         VALUES (?1, ?2, ?3, ?4, ?5)",
    )?;
    for e in &expenses.rows {
        stmt.execute(params![
            e.id,
            e.date.format(schema::DATE_STORAGE_FORMAT).to_string(),
            e.category.as_str(),
            e.description,
            e.amount.to_string(),
        ])?;
    }
    for raw in &expenses.dropped {
        stmt.execute(params![
            raw.id,
            raw.date,
            raw.category,
            raw.description,
            raw.amount,
        ])?;
    }

    let mut stmt = conn.prepare(
        "INSERT INTO Budgets (rowid, Month, Year, Budget) VALUES (?1, ?2, ?3, ?4)",
    )?;
    for b in budgets {
        stmt.execute(params![b.id, b.month, b.year, b.amount.to_string()])?;
    }

    debug!(
        expenses = expenses.rows.len() + expenses.dropped.len(),
        budgets = budgets.len(),
        "saved expense store"
    );
    Ok(())
}
