use rust_decimal::Decimal;

use super::money::format_currency;
use super::period::capitalize;

#[derive(Debug, Clone, PartialEq)]
pub struct Budget {
    pub id: i64,
    /// Lowercase month name, e.g. `"march"`.
    pub month: String,
    pub year: i32,
    pub amount: Decimal,
}

impl Budget {
    pub fn matches(&self, month: &str, year: i32) -> bool {
        self.year == year && self.month == month.trim().to_lowercase()
    }

    /// e.g. `March 2024 - ₹200.00`
    pub fn label(&self) -> String {
        format!(
            "{} {} - {}",
            capitalize(&self.month),
            self.year,
            format_currency(self.amount)
        )
    }

    /// First budget for the given month and year, in storage order.
    pub fn find<'a>(budgets: &'a [Budget], month: &str, year: i32) -> Option<&'a Budget> {
        budgets.iter().find(|b| b.matches(month, year))
    }
}
