//! Price strings and price formatting.
//!
//! The backend sends prices as decimal strings (`"150000"`, `"19.90"`). They
//! are read with browser-style leniency: the longest numeric prefix counts,
//! anything unreadable is treated as missing.

/// Parse the longest leading decimal number in `raw`.
///
/// Leading whitespace is skipped, trailing garbage is ignored (`"12.5kg"` is
/// `12.5`). Returns `None` when no digits lead the string or the value is not
/// finite.
pub fn parse_decimal(raw: &str) -> Option<f64> {
    let s = raw.trim_start();
    let bytes = s.as_bytes();
    let mut end = 0;

    if matches!(bytes.first(), Some(b'+') | Some(b'-')) {
        end += 1;
    }

    let int_start = end;
    while end < bytes.len() && bytes[end].is_ascii_digit() {
        end += 1;
    }
    let mut digits = end - int_start;

    if end < bytes.len() && bytes[end] == b'.' {
        let frac_start = end + 1;
        let mut frac_end = frac_start;
        while frac_end < bytes.len() && bytes[frac_end].is_ascii_digit() {
            frac_end += 1;
        }
        digits += frac_end - frac_start;
        if digits > 0 {
            end = frac_end;
        }
    }

    if digits == 0 {
        return None;
    }

    if end < bytes.len() && matches!(bytes[end], b'e' | b'E') {
        let mut exp_end = end + 1;
        if exp_end < bytes.len() && matches!(bytes[exp_end], b'+' | b'-') {
            exp_end += 1;
        }
        let exp_digits_start = exp_end;
        while exp_end < bytes.len() && bytes[exp_end].is_ascii_digit() {
            exp_end += 1;
        }
        if exp_end > exp_digits_start {
            end = exp_end;
        }
    }

    s[..end].parse::<f64>().ok().filter(|v| v.is_finite())
}

/// Like [`parse_decimal`], but unreadable input counts as `0`.
pub fn parse_decimal_or_zero(raw: &str) -> f64 {
    parse_decimal(raw).unwrap_or(0.0)
}

/// Render an amount for display in the given ISO currency.
///
/// - `USD`: `$1,234.50`
/// - `IDR`: `Rp 150.000` (whole rupiah, dot grouping)
/// - anything else: `1234.50 EUR`
pub fn format_price(amount: f64, currency: &str) -> String {
    let sign = if amount < 0.0 { "-" } else { "" };
    let abs = amount.abs();

    match currency.to_ascii_uppercase().as_str() {
        "USD" => {
            let fixed = format!("{abs:.2}");
            let (whole, cents) = fixed.split_once('.').unwrap_or((fixed.as_str(), "00"));
            format!("{sign}${}.{cents}", group_thousands(whole, ','))
        }
        "IDR" => {
            let whole = format!("{:.0}", abs.round());
            format!("{sign}Rp {}", group_thousands(&whole, '.'))
        }
        other => format!("{sign}{abs:.2} {other}"),
    }
}

fn group_thousands(digits: &str, separator: char) -> String {
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(separator);
        }
        out.push(ch);
    }
    out
}
