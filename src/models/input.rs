use chrono::{DateTime, NaiveDate, NaiveDateTime};
use rust_decimal::Decimal;
use std::str::FromStr;

use crate::error::{Error, Result};

const DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
];

const DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%m/%d/%Y", "%Y/%m/%d"];

/// Best-effort date parse for stored cells. Returns `None` for anything that
/// does not look like a calendar date; the time component is discarded.
pub fn coerce_date(s: &str) -> Option<NaiveDate> {
    let s = s.trim();
    if s.is_empty() {
        return None;
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.date_naive());
    }
    for fmt in DATETIME_FORMATS {
        if let Ok(dt) = NaiveDateTime::parse_from_str(s, fmt) {
            return Some(dt.date());
        }
    }
    DATE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(s, fmt).ok())
}

pub fn parse_date(s: &str) -> Result<NaiveDate> {
    coerce_date(s).ok_or_else(|| Error::invalid(format!("invalid date '{}' (expected YYYY-MM-DD)", s.trim())))
}

/// Parse a non-negative amount. A leading currency symbol and thousand
/// separators are tolerated so rendered amounts can be pasted back.
pub fn parse_amount(s: &str) -> Result<Decimal> {
    let clean: String = s
        .trim()
        .trim_start_matches(super::money::CURRENCY_SYMBOL)
        .trim_start_matches('$')
        .chars()
        .filter(|c| *c != ',')
        .collect();
    let amount = Decimal::from_str(&clean)
        .or_else(|_| Decimal::from_scientific(&clean))
        .map_err(|_| Error::invalid(format!("invalid amount '{}'", s.trim())))?;
    ensure_non_negative(amount)
}

/// Largest amount accepted for a single expense or budget.
pub const MAX_AMOUNT: Decimal = Decimal::from_parts(1_000_000_000, 0, 0, false, 0);

pub fn ensure_non_negative(amount: Decimal) -> Result<Decimal> {
    if amount < Decimal::ZERO {
        return Err(Error::invalid(format!("amount must not be negative: {amount}")));
    }
    if amount > MAX_AMOUNT {
        return Err(Error::invalid(format!(
            "amount must not exceed {MAX_AMOUNT}: {amount}"
        )));
    }
    Ok(amount)
}

pub fn parse_year(s: &str) -> Result<i32> {
    s.trim()
        .parse::<i32>()
        .map_err(|_| Error::invalid(format!("invalid year '{}'", s.trim())))
}
