use chrono::{Datelike, NaiveDate};
use std::str::FromStr;

use crate::error::Error;

const MONTH_NAMES: [&str; 12] = [
    "january",
    "february",
    "march",
    "april",
    "may",
    "june",
    "july",
    "august",
    "september",
    "october",
    "november",
    "december",
];

/// Calendar month used as the grouping key for expenses. Displays as `YYYY-MM`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct YearMonth {
    pub year: i32,
    /// 1..=12
    pub month: u32,
}

impl YearMonth {
    pub fn new(year: i32, month: u32) -> Option<Self> {
        (1..=12).contains(&month).then_some(Self { year, month })
    }

    pub fn of(date: NaiveDate) -> Self {
        Self {
            year: date.year(),
            month: date.month(),
        }
    }

    /// Period for a stored budget month name such as `"march"`.
    pub fn from_month_name(name: &str, year: i32) -> Option<Self> {
        let clean = name.trim().to_lowercase();
        let idx = MONTH_NAMES.iter().position(|m| *m == clean)?;
        Self::new(year, idx as u32 + 1)
    }

    /// Lowercase English month name, the form budgets are keyed by.
    pub fn month_name(&self) -> &'static str {
        MONTH_NAMES[(self.month as usize).saturating_sub(1) % 12]
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        date.year() == self.year && date.month() == self.month
    }
}

impl std::fmt::Display for YearMonth {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:04}-{:02}", self.year, self.month)
    }
}

impl FromStr for YearMonth {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let bad = || Error::invalid(format!("invalid period '{s}' (expected YYYY-MM)"));
        let (y, m) = s.trim().split_once('-').ok_or_else(bad)?;
        let year: i32 = y.parse().map_err(|_| bad())?;
        let month: u32 = m.parse().map_err(|_| bad())?;
        Self::new(year, month).ok_or_else(bad)
    }
}

/// Normalize a month name to the stored form. Accepts full English names
/// and three-letter abbreviations in any case.
pub fn parse_month_name(s: &str) -> Result<&'static str, Error> {
    let clean = s.trim().to_lowercase();
    MONTH_NAMES
        .iter()
        .find(|name| **name == clean || (clean.len() == 3 && name.starts_with(&clean)))
        .copied()
        .ok_or_else(|| Error::invalid(format!("unknown month '{}'", s.trim())))
}

/// `march` -> `March`
pub fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
