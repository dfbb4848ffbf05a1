mod budget;
mod category;
mod expense;
mod input;
mod money;
mod period;

pub use budget::Budget;
pub use category::Category;
pub use expense::{Expense, ExpenseTable, RawExpense};
pub use input::{coerce_date, ensure_non_negative, parse_amount, parse_date, parse_year};
pub use money::format_currency;
pub use period::{capitalize, parse_month_name, YearMonth};
