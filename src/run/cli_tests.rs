#![allow(clippy::unwrap_used)]

use super::cli::{parse_periods, period_heading};
use crate::models::YearMonth;

fn ym(year: i32, month: u32) -> YearMonth {
    YearMonth::new(year, month).unwrap()
}

fn args(list: &[&str]) -> Vec<String> {
    list.iter().map(|s| s.to_string()).collect()
}

// ── summary ───────────────────────────────────────────────────

#[test]
fn test_period_heading_capitalizes_month() {
    assert_eq!(period_heading(ym(2024, 3)), "March 2024");
    assert_eq!(period_heading(ym(2023, 12)), "December 2023");
}

// ── overview ──────────────────────────────────────────────────

#[test]
fn test_parse_periods_drops_repeats_keeping_first() {
    let periods = parse_periods(&args(&["2024-03", "2024-02", "2024-03"])).unwrap();
    assert_eq!(periods, vec![ym(2024, 3), ym(2024, 2)]);
}

#[test]
fn test_parse_periods_rejects_bad_period() {
    let err = parse_periods(&args(&["2024-13"])).unwrap_err();
    assert!(err.to_string().contains("2024-13"));
}
