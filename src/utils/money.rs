// src/utils/money.rs
use rust_decimal::prelude::FromPrimitive;
use rust_decimal::Decimal;

/// Converts a raw f64 into a monetary Decimal rounded to 2 decimal places.
/// Non-finite inputs collapse to zero.
/// Example: 21000.000000000004 -> 21000.00
pub fn to_money(value: f64) -> Decimal {
    Decimal::from_f64(value)
        .unwrap_or(Decimal::ZERO)
        .round_dp(2)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn test_rounds_to_cents() {
        assert_eq!(to_money(21000.000000000004), Decimal::from_str("21000").unwrap());
        assert_eq!(to_money(3.14159), Decimal::from_str("3.14").unwrap());
        assert_eq!(to_money(0.2 + 0.1), Decimal::from_str("0.30").unwrap());
    }

    #[test]
    fn test_non_finite_collapses_to_zero() {
        assert_eq!(to_money(f64::NAN), Decimal::ZERO);
        assert_eq!(to_money(f64::INFINITY), Decimal::ZERO);
    }
}
