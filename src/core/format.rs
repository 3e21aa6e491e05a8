//! Number formatting for stat cards.
//!
//! Non-finite input is treated as zero, and a value that rounds to zero never
//! carries a minus sign.

use serde_json::Value;

/// Groups the integer part with commas.
///
/// `None` keeps up to three fraction digits and trims trailing zeros.
/// `Some(d)` always renders exactly `d` digits.
pub fn group_thousands(n: f64, decimals: Option<usize>) -> String {
    let n = finite_or_zero(n);
    let body = match decimals {
        Some(d) => format!("{:.*}", d, n.abs()),
        None => trim_fraction(format!("{:.3}", n.abs())),
    };

    let (int_part, frac_part) = match body.split_once('.') {
        Some((int_part, frac_part)) => (int_part, Some(frac_part)),
        None => (body.as_str(), None),
    };

    let mut out = String::with_capacity(body.len() + body.len() / 3 + 1);
    if n < 0.0 && !is_zero(&body) {
        out.push('-');
    }
    out.push_str(&group_digits(int_part));
    if let Some(frac_part) = frac_part {
        out.push('.');
        out.push_str(frac_part);
    }
    out
}

/// Exactly `decimals` fraction digits, no grouping.
pub fn format_fixed(n: f64, decimals: usize) -> String {
    let n = finite_or_zero(n);
    let body = format!("{:.*}", decimals, n.abs());
    if n < 0.0 && !is_zero(&body) {
        format!("-{}", body)
    } else {
        body
    }
}

/// Symbol-prefixed amount with two decimals, e.g. `-$1,234.50`.
pub fn format_currency(n: f64, symbol: &str) -> String {
    let n = finite_or_zero(n);
    let body = group_thousands(n.abs(), Some(2));
    if n < 0.0 && !is_zero(&body) {
        format!("-{}{}", symbol, body)
    } else {
        format!("{}{}", symbol, body)
    }
}

/// Reads a metric that may arrive as a number or a numeric string.
pub fn coerce_number(value: &Value) -> f64 {
    match value {
        Value::Number(n) => n.as_f64().unwrap_or(0.0),
        Value::String(s) => s.trim().parse::<f64>().map(finite_or_zero).unwrap_or(0.0),
        _ => 0.0,
    }
}

fn finite_or_zero(n: f64) -> f64 {
    if n.is_finite() {
        n
    } else {
        0.0
    }
}

fn is_zero(digits: &str) -> bool {
    digits.chars().all(|c| c == '0' || c == '.' || c == ',')
}

fn trim_fraction(s: String) -> String {
    if s.contains('.') {
        s.trim_end_matches('0').trim_end_matches('.').to_string()
    } else {
        s
    }
}

fn group_digits(digits: &str) -> String {
    let len = digits.len();
    let mut out = String::with_capacity(len + len / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (len - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}
