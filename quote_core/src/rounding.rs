//! # Rounding
//!
//! Every currency and weight figure in a breakdown is rounded to two
//! decimal places, half away from zero. Rounding happens on decimal values,
//! never on binary floats, so `1.005` rounds to `1.01` the way a person
//! reading the number expects.
//!
//! Floats are brought into decimal form through their shortest round-trip
//! text representation (`1.005_f64` becomes exactly `1.005`), not through
//! their exact binary expansion (`1.00499999999999989...`).
//!
//! ## Example
//!
//! ```rust
//! use quote_core::rounding::round2;
//!
//! assert_eq!(round2(1.005), 1.01);
//! assert_eq!(round2(2.345), 2.35);
//! assert_eq!(round2(round2(3.6771)), round2(3.6771));
//! ```

use std::str::FromStr;

use rust_decimal::prelude::FromPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};

/// Number of decimal places kept in every returned figure
pub const DECIMAL_PLACES: u32 = 2;

/// Round a float to 2 decimal places, half away from zero.
///
/// Non-finite values and values too large for a decimal are returned
/// unchanged.
pub fn round2(value: f64) -> f64 {
    match to_decimal(value) {
        Some(decimal) => to_f64(round2_decimal(decimal)),
        None => value,
    }
}

/// Round a decimal to 2 decimal places, half away from zero.
pub fn round2_decimal(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(DECIMAL_PLACES, RoundingStrategy::MidpointAwayFromZero)
}

/// Convert a float to a decimal using its shortest round-trip representation.
///
/// Returns `None` for NaN, infinities and magnitudes a `Decimal` cannot hold.
pub fn to_decimal(value: f64) -> Option<Decimal> {
    if !value.is_finite() {
        return None;
    }
    Decimal::from_str(&value.to_string())
        .ok()
        .or_else(|| Decimal::from_f64(value))
}

/// Convert a decimal back to the nearest float.
///
/// Goes through the decimal text so `284.93` becomes the float closest to
/// 284.93 and prints back as `284.93`.
pub fn to_f64(value: Decimal) -> f64 {
    value.to_string().parse().unwrap_or(f64::NAN)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_half_rounds_away_from_zero() {
        assert_eq!(round2(1.005), 1.01);
        assert_eq!(round2(2.345), 2.35);
        assert_eq!(round2(-1.005), -1.01);
        assert_eq!(round2(0.125), 0.13);
    }

    #[test]
    fn test_ordinary_rounding() {
        assert_eq!(round2(3.6771), 3.68);
        assert_eq!(round2(154.5), 154.5);
        assert_eq!(round2(1.234), 1.23);
        assert_eq!(round2(0.0), 0.0);
    }

    #[test]
    fn test_idempotent() {
        for value in [1.005, 2.345, 3.6771, 284.925, 0.1 + 0.2, 1_234_567.891] {
            let once = round2(value);
            assert_eq!(round2(once), once, "round2 not idempotent for {}", value);
        }
    }

    #[test]
    fn test_float_artifacts_do_not_leak() {
        // 0.1 + 0.2 == 0.30000000000000004
        assert_eq!(round2(0.1 + 0.2), 0.3);
        assert_eq!(round2(1.1 * 3.0), 3.3);
    }

    #[test]
    fn test_non_finite_passes_through() {
        assert!(round2(f64::NAN).is_nan());
        assert_eq!(round2(f64::INFINITY), f64::INFINITY);
    }

    #[test]
    fn test_decimal_rounding() {
        assert_eq!(round2_decimal(dec!(284.925)), dec!(284.93));
        assert_eq!(round2_decimal(dec!(3.6771)), dec!(3.68));
        assert_eq!(round2_decimal(dec!(-0.005)), dec!(-0.01));
    }

    #[test]
    fn test_to_decimal_uses_shortest_representation() {
        assert_eq!(to_decimal(1.005), Some(dec!(1.005)));
        assert_eq!(to_decimal(1.19), Some(dec!(1.19)));
        assert_eq!(to_decimal(f64::NAN), None);
    }

    #[test]
    fn test_to_f64() {
        assert_eq!(to_f64(dec!(284.93)), 284.93);
        assert_eq!(to_f64(dec!(20)), 20.0);
    }
}
