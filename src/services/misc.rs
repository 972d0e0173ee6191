//! Display formatting shared by the dashboard pages.

/// Groups the digits of an integer in thousands: `1234567` -> `1,234,567`
pub fn format_count(value: u64) -> String {
    let digits = value.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

/// Whole-dollar amount with thousands separators: `12345.6` -> `$12,346`
pub fn format_currency(amount: f64) -> String {
    let rounded = amount.round();
    let sign = if rounded < 0.0 { "-" } else { "" };
    format!("{sign}${}", format_count(rounded.abs() as u64))
}

/// Compact dollar amount for commentary: `28460.0` -> `$28.5K`
pub fn format_currency_short(amount: f64) -> String {
    if amount.abs() >= 1_000_000.0 {
        format!("${:.1}M", amount / 1_000_000.0)
    } else if amount.abs() >= 1_000.0 {
        format!("${:.1}K", amount / 1_000.0)
    } else {
        format!("${amount:.0}")
    }
}

/// `0.1956` -> `19.6%`
pub fn format_percent(fraction: f64) -> String {
    format!("{:.1}%", fraction * 100.0)
}

/// `1` -> `1 order`, `3` -> `3 orders`
pub fn order_count(count: usize) -> String {
    if count == 1 {
        "1 order".to_string()
    } else {
        format!("{} orders", format_count(count as u64))
    }
}

/// `numerator / denominator`, or 0 when the denominator is 0
pub fn ratio(numerator: f64, denominator: f64) -> f64 {
    if denominator == 0.0 {
        0.0
    } else {
        numerator / denominator
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_count() {
        assert_eq!(format_count(0), "0");
        assert_eq!(format_count(999), "999");
        assert_eq!(format_count(1000), "1,000");
        assert_eq!(format_count(1234567), "1,234,567");
    }

    #[test]
    fn test_format_currency() {
        assert_eq!(format_currency(0.0), "$0");
        assert_eq!(format_currency(12345.6), "$12,346");
        assert_eq!(format_currency(999.4), "$999");
        assert_eq!(format_currency(-1500.0), "-$1,500");
    }

    #[test]
    fn test_format_currency_short() {
        assert_eq!(format_currency_short(28460.0), "$28.5K");
        assert_eq!(format_currency_short(950.0), "$950");
        assert_eq!(format_currency_short(2_500_000.0), "$2.5M");
    }

    #[test]
    fn test_order_count() {
        assert_eq!(order_count(0), "0 orders");
        assert_eq!(order_count(1), "1 order");
        assert_eq!(order_count(1500), "1,500 orders");
    }

    #[test]
    fn test_ratio_and_percent() {
        assert_eq!(ratio(1.0, 0.0), 0.0);
        assert_eq!(ratio(3.0, 4.0), 0.75);
        assert_eq!(format_percent(0.1956), "19.6%");
    }
}
