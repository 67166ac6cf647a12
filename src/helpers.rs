pub const DEFAULT_SYMBOL: &str = "AAPL";

pub fn round_to_decimals(value: f64, decimals: u32) -> f64 {
    let factor = 10f64.powi(decimals as i32);
    (value * factor).round() / factor
}

/// Trims and upper-cases a user supplied ticker, falling back to
/// [`DEFAULT_SYMBOL`] when nothing is left.
pub fn normalize_symbol(raw: &str) -> String {
    let symbol = raw.trim().to_uppercase();
    if symbol.is_empty() {
        DEFAULT_SYMBOL.to_string()
    } else {
        symbol
    }
}

/// Shortest decimal form of a rounded value: `9.0` prints as `9`, `9.2` as `9.2`.
pub fn format_number(value: f64) -> String {
    format!("{}", value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_round_to_decimals() {
        assert_relative_eq!(round_to_decimals(103.636_363, 2), 103.64);
        assert_relative_eq!(round_to_decimals(-7.449, 1), -7.4);
        assert_relative_eq!(round_to_decimals(130.0, 2), 130.0);
    }

    #[test]
    fn test_normalize_symbol() {
        assert_eq!(normalize_symbol("  tsla "), "TSLA");
        assert_eq!(normalize_symbol(""), "AAPL");
        assert_eq!(normalize_symbol("   "), "AAPL");
        assert_eq!(normalize_symbol("MsFt"), "MSFT");
    }

    #[test]
    fn test_format_number() {
        assert_eq!(format_number(11.0), "11");
        assert_eq!(format_number(-12.4), "-12.4");
        assert_eq!(format_number(220.5), "220.5");
    }
}
