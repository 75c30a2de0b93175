/// Group the digits of a whole number in threes.
fn with_separators(whole: u64) -> String {
    let digits = whole.to_string();
    let mut result = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            result.push(',');
        }
        result.push(c);
    }
    result
}

/// Format a currency value, e.g. `$1,234.56` or `-$27.50`
pub fn format_currency(value: f64) -> String {
    let total_cents = (value.abs() * 100.0).round() as u64;
    let formatted = format!("${}.{:02}", with_separators(total_cents / 100), total_cents % 100);

    if value < 0.0 && total_cents > 0 {
        format!("-{formatted}")
    } else {
        formatted
    }
}

/// Format a fractional rate as a percentage
pub fn format_percentage(value: f64) -> String {
    format!("{:.2}%", value * 100.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_currency() {
        assert_eq!(format_currency(0.0), "$0.00");
        assert_eq!(format_currency(999.5), "$999.50");
        assert_eq!(format_currency(1000.0), "$1,000.00");
        assert_eq!(format_currency(1234567.891), "$1,234,567.89");
        assert_eq!(format_currency(100416.67), "$100,416.67");
    }

    #[test]
    fn test_format_currency_negative() {
        assert_eq!(format_currency(-27.5), "-$27.50");
        assert_eq!(format_currency(-1000.0), "-$1,000.00");
        assert_eq!(format_currency(-0.001), "$0.00");
    }

    #[test]
    fn test_cents_carry_into_dollars() {
        assert_eq!(format_currency(0.999), "$1.00");
        assert_eq!(format_currency(99999.996), "$100,000.00");
    }

    #[test]
    fn test_format_percentage() {
        assert_eq!(format_percentage(0.0025), "0.25%");
        assert_eq!(format_percentage(0.12), "12.00%");
    }
}
