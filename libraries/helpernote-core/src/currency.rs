//! Won amounts: lenient parsing and display formatting.

use regex::Regex;
use rust_decimal::{Decimal, RoundingStrategy};
use std::str::FromStr;
use std::sync::LazyLock;

// Leading numeric prefix, the way form inputs are read ("123.45원" -> 123.45, "1e3" -> 1000).
static NUMERIC_PREFIX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\s*([+-]?(?:\d+(?:\.\d+)?|\.\d+))([eE][+-]?\d+)?")
        .expect("numeric prefix pattern is valid")
});

/// Parse a user-entered amount, falling back to zero.
///
/// `None`, empty strings and strings without a leading number yield `0`, as
/// do exponents too large for a `Decimal`.
pub fn to_number(value: Option<&str>) -> Decimal {
    let Some(caps) = value.and_then(|raw| NUMERIC_PREFIX.captures(raw)) else {
        return Decimal::ZERO;
    };
    let Some(mantissa) = caps.get(1).map(|m| m.as_str().trim_start_matches('+')) else {
        return Decimal::ZERO;
    };

    let parsed = match caps.get(2) {
        Some(exponent) => Decimal::from_scientific(&format!("{}{}", mantissa, exponent.as_str())),
        None => Decimal::from_str(mantissa),
    };
    parsed.unwrap_or(Decimal::ZERO)
}

/// Format an amount as Korean won, e.g. `₩1,000,000`.
///
/// Fractions are rounded to whole won; negatives render as `-₩1,000`.
pub fn format_currency(amount: Decimal) -> String {
    let rounded = amount.round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero);
    let negative = rounded.is_sign_negative() && !rounded.is_zero();
    let digits = rounded.abs().trunc().to_string();

    let grouped = group_thousands(&digits);
    if negative {
        format!("-₩{}", grouped)
    } else {
        format!("₩{}", grouped)
    }
}

/// `to_number` followed by `format_currency`.
pub fn format_currency_str(value: Option<&str>) -> String {
    format_currency(to_number(value))
}

fn group_thousands(digits: &str) -> String {
    let len = digits.len();
    let mut out = String::with_capacity(len + len / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (len - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}
