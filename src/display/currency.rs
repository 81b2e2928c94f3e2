//! Currency formatting for Brazilian reais
//!
//! `R$ 1.234.567,89`: '.' groups thousands, ',' separates two decimal
//! places, symbol and a space in front.

use rust_decimal::Decimal;

use crate::models::Money;

/// Currency symbol prefixed to every formatted amount
pub const CURRENCY_SYMBOL: &str = "R$";

/// Format an amount as `R$ 1.234,56`
///
/// Rounds half-even on the exact decimal, so `10.015` shows as `R$ 10,02`.
/// A binary-float formatter would print `R$ 10,01` for the same input,
/// because `10.015` is stored just below the midpoint.
pub fn format_currency(amount: Money) -> String {
    let cents = amount.to_cents();
    let sign = if cents < 0 { "-" } else { "" };
    let abs = cents.unsigned_abs();

    format!(
        "{} {}{},{:02}",
        CURRENCY_SYMBOL,
        sign,
        group_thousands(abs / 100),
        abs % 100
    )
}

/// Format an amount and append "(bilhões)" or "(milhões)" for large values
pub fn format_with_magnitude(amount: Money) -> String {
    let formatted = format_currency(amount);
    match magnitude_suffix(amount) {
        Some(suffix) => format!("{} ({})", formatted, suffix),
        None => formatted,
    }
}

/// Format an optional amount; null amounts render as an empty string
pub fn format_optional(amount: Option<Money>) -> String {
    amount.map(format_currency).unwrap_or_default()
}

/// Unit word for amounts of at least a million
pub fn magnitude_suffix(amount: Money) -> Option<&'static str> {
    let value = amount.amount();
    if value >= Decimal::from(1_000_000_000u64) {
        Some("bilhões")
    } else if value >= Decimal::from(1_000_000u64) {
        Some("milhões")
    } else {
        None
    }
}

fn group_thousands(value: u128) -> String {
    let digits = value.to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);

    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push('.');
        }
        grouped.push(c);
    }
    grouped
}
