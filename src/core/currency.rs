// File: src/core/currency.rs

/// Formats a rupee amount with two decimals and comma thousands separators,
/// e.g. `12345.678` -> `₹12,345.68`.
pub fn format_rupees(amount: f64) -> String {
    let fixed = format!("{:.2}", amount.abs());
    let (whole, frac) = fixed.split_once('.').unwrap_or((fixed.as_str(), "00"));

    let mut grouped = String::with_capacity(whole.len() + whole.len() / 3);
    for (i, digit) in whole.chars().enumerate() {
        if i > 0 && (whole.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(digit);
    }

    let sign = if amount < 0.0 && fixed.bytes().any(|b| b.is_ascii_digit() && b != b'0') {
        "-"
    } else {
        ""
    };
    format!("{sign}₹{grouped}.{frac}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn groups_thousands() {
        assert_eq!(format_rupees(12345.67), "₹12,345.67");
        assert_eq!(format_rupees(1234567.0), "₹1,234,567.00");
        assert_eq!(format_rupees(100.0), "₹100.00");
        assert_eq!(format_rupees(1000.0), "₹1,000.00");
    }

    #[test]
    fn rounds_to_two_decimals() {
        assert_eq!(format_rupees(0.0), "₹0.00");
        assert_eq!(format_rupees(999.999), "₹1,000.00");
        assert_eq!(format_rupees(2.346), "₹2.35");
    }

    #[test]
    fn negative_amounts_keep_their_sign() {
        assert_eq!(format_rupees(-2500.5), "-₹2,500.50");
        assert_eq!(format_rupees(-0.001), "₹0.00");
    }
}
