//! Display formatting for prices, magnitudes and percentages.
//!
//! All functions are pure. NaN/Infinity inputs are not guarded; callers only
//! feed values derived from finite seed data.

/// Currency with `$` prefix and thousands separators. Sub-dollar prices get
/// four decimals so small-cap coins (ADA, DOGE) stay readable.
pub fn currency(x: f64) -> String {
    let decimals = if x.abs() < 1.0 { 4 } else { 2 };
    let sign = if x.is_sign_negative() { "-" } else { "" };
    let fixed = format!("{:.*}", decimals, x.abs());
    let (int_part, frac_part) = fixed.split_once('.').unwrap_or((fixed.as_str(), ""));
    format!("{}${}.{}", sign, group_thousands(int_part), frac_part)
}

/// Compact magnitude for market cap / volume: T, B, M suffixes, raw below 1e6.
pub fn compact(x: f64) -> String {
    if x >= 1e12 {
        format!("${:.2}T", x / 1e12)
    } else if x >= 1e9 {
        format!("${:.2}B", x / 1e9)
    } else if x >= 1e6 {
        format!("${:.2}M", x / 1e6)
    } else {
        format!("${:.2}", x)
    }
}

/// Fixed two-decimal percentage. The explicit `+` on gains is a call-site
/// choice, not intrinsic to the value.
pub fn percent(x: f64, explicit_plus: bool) -> String {
    if explicit_plus {
        format!("{:+.2}%", x)
    } else {
        format!("{:.2}%", x)
    }
}

fn group_thousands(digits: &str) -> String {
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    let len = digits.len();
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (len - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_currency_decimal_boundary() {
        // Four decimals strictly below one dollar, two at or above.
        assert_eq!(currency(0.4532), "$0.4532");
        assert_eq!(currency(124.56), "$124.56");
        assert_eq!(currency(1.0), "$1.00");
    }

    #[test]
    fn test_currency_thousands_grouping() {
        assert_eq!(currency(52387.42), "$52,387.42");
        assert_eq!(currency(1_032_856.0), "$1,032,856.00");
        assert_eq!(currency(999.99), "$999.99");
    }

    #[test]
    fn test_currency_negative() {
        assert_eq!(currency(-2.5), "-$2.50");
        assert_eq!(currency(-0.078), "-$0.0780");
    }

    #[test]
    fn test_compact_suffixes() {
        assert_eq!(compact(1_032_856_742_189.0), "$1.03T");
        assert_eq!(compact(28_945_631_087.0), "$28.95B");
        assert_eq!(compact(923_456_789.0), "$923.46M");
        assert_eq!(compact(4_500.0), "$4500.00");
    }

    #[test]
    fn test_percent_sign_control() {
        assert_eq!(percent(2.5, true), "+2.50%");
        assert_eq!(percent(2.5, false), "2.50%");
        assert_eq!(percent(-1.27, true), "-1.27%");
        assert_eq!(percent(-1.27, false), "-1.27%");
    }
}
