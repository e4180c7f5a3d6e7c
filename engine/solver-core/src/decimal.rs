//! Fixed-precision views of exact rationals.
//!
//! Probabilities are computed as exact `BigRational` values; callers that
//! want a decimal see them through a half-up rounding at a configured number
//! of places.

use num_bigint::BigInt;
use num_rational::BigRational;
use num_traits::{Signed, ToPrimitive};

fn scale_factor(places: u32) -> BigInt {
    BigInt::from(10u32).pow(places)
}

/// Round a rational to `places` decimal digits, half away from zero.
pub fn round_half_up(value: &BigRational, places: u32) -> BigRational {
    let scale = scale_factor(places);
    let scaled = value * BigRational::from_integer(scale.clone());
    BigRational::new(scaled.round().to_integer(), scale)
}

/// Render a rational as a decimal string with exactly `places` digits.
pub fn to_decimal_string(value: &BigRational, places: u32) -> String {
    let scale = scale_factor(places);
    let scaled = (value * BigRational::from_integer(scale.clone())).round();
    let units = scaled.to_integer();

    let sign = if units.is_negative() { "-" } else { "" };
    let magnitude = units.abs();
    let whole = &magnitude / &scale;
    let frac = &magnitude % &scale;

    if places == 0 {
        format!("{}{}", sign, whole)
    } else {
        format!(
            "{}{}.{:0>width$}",
            sign,
            whole,
            frac.to_string(),
            width = places as usize
        )
    }
}

/// Lossy conversion for display in percentage dumps.
pub fn to_f64(value: &BigRational) -> f64 {
    value.to_f64().unwrap_or(0.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ratio(n: i64, d: i64) -> BigRational {
        BigRational::new(BigInt::from(n), BigInt::from(d))
    }

    #[test]
    fn test_round_half_up() {
        // 1/3 -> 0.3333
        assert_eq!(round_half_up(&ratio(1, 3), 4), ratio(3333, 10000));
        // 2/3 -> 0.6667
        assert_eq!(round_half_up(&ratio(2, 3), 4), ratio(6667, 10000));
        // a tie rounds up: 0.25 at 1 place -> 0.3
        assert_eq!(round_half_up(&ratio(1, 4), 1), ratio(3, 10));
        // exact values are unchanged
        assert_eq!(round_half_up(&ratio(1, 2), 6), ratio(1, 2));
    }

    #[test]
    fn test_to_decimal_string() {
        assert_eq!(to_decimal_string(&ratio(1, 2), 4), "0.5000");
        assert_eq!(to_decimal_string(&ratio(1, 3), 6), "0.333333");
        assert_eq!(to_decimal_string(&ratio(5, 4), 2), "1.25");
        assert_eq!(to_decimal_string(&ratio(-1, 8), 3), "-0.125");
        assert_eq!(to_decimal_string(&ratio(3, 1), 0), "3");
    }
}
