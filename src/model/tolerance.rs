//! Comparisons on weights, quotas and vote ratios.
//!
//! Quotas are products of integer weights and vote shares, so they rarely land
//! exactly on a representable `f64`. Every boundary check in the crate goes
//! through these helpers, which treat values within [`TOLERANCE`] as equal.

pub const TOLERANCE: f64 = 1e-9;

pub fn approx_eq(a: f64, b: f64) -> bool {
    (a - b).abs() <= TOLERANCE
}

/// `a < b`, and not merely by rounding noise.
pub fn lt(a: f64, b: f64) -> bool {
    a < b - TOLERANCE
}

pub fn gt(a: f64, b: f64) -> bool {
    a > b + TOLERANCE
}

pub fn le(a: f64, b: f64) -> bool {
    !gt(a, b)
}

pub fn ge(a: f64, b: f64) -> bool {
    !lt(a, b)
}

/// Round half away from zero to one decimal place.
pub fn round_tenth(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn boundaries_absorb_rounding_noise() {
        let quota = 10.0 * (1.0 / 3.0) * 3.0;
        assert!(le(quota, 10.0));
        assert!(ge(quota, 10.0));
        assert!(!lt(10.0 - 1e-12, 10.0));
        assert!(lt(9.99, 10.0));
        assert!(gt(10.01, 10.0));
    }

    #[test]
    fn rounds_to_one_decimal() {
        assert_eq!(round_tenth(1.25), 1.3);
        assert_eq!(round_tenth(0.04), 0.0);
        assert_eq!(round_tenth(2.0 / 3.0), 0.7);
    }
}
