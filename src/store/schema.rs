pub(crate) const EXPENSES_TABLE: &str = "Expenses";
pub(crate) const BUDGETS_TABLE: &str = "Budgets";

/// Column names as written. Lookups on load are case-insensitive and trimmed.
pub(crate) const EXPENSE_COLUMNS: [&str; 4] = ["Date", "Category", "Description", "Amount"];
pub(crate) const BUDGET_COLUMNS: [&str; 3] = ["Month", "Year", "Budget"];

pub(crate) const SCHEMA: &str = r#"
CREATE TABLE IF NOT EXISTS Expenses (
    Date        TEXT,
    Category    TEXT,
    Description TEXT,
    Amount      TEXT
);

CREATE TABLE IF NOT EXISTS Budgets (
    Month  TEXT,
    Year   INTEGER,
    Budget TEXT
);
"#;

/// Timestamp form dates are stored in.
pub(crate) const DATE_STORAGE_FORMAT: &str = "%Y-%m-%d 00:00:00";
