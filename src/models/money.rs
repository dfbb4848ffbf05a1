use rust_decimal::Decimal;

pub const CURRENCY_SYMBOL: &str = "₹";

/// Format an amount with the currency symbol, thousand separators and
/// 2 decimal places. e.g. `1234567.891` → `"₹1,234,567.89"`
pub fn format_currency(val: Decimal) -> String {
    let abs = val.abs().round_dp(2);
    let formatted = format!("{abs:.2}");
    let mut parts = formatted.split('.');
    let int_part = parts.next().unwrap_or("0");
    let dec_part = parts.next().unwrap_or("00");

    let with_commas: String = int_part
        .as_bytes()
        .rchunks(3)
        .rev()
        .map(|chunk| std::str::from_utf8(chunk).unwrap_or(""))
        .collect::<Vec<_>>()
        .join(",");

    if val < Decimal::ZERO && !abs.is_zero() {
        format!("-{CURRENCY_SYMBOL}{with_commas}.{dec_part}")
    } else {
        format!("{CURRENCY_SYMBOL}{with_commas}.{dec_part}")
    }
}
