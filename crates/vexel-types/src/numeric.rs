//! Numeric sanitization.
//!
//! Every number written into a document passes through [`sanitize`]: it must
//! be finite and is rounded to two decimals. Non-finite values are rejected
//! with the name of the attribute that produced them, so a corrupt value can
//! never reach a document.

use thiserror::Error;

/// Maximum number of decimal places a document number may carry.
pub const MAX_DECIMALS: usize = 2;

/// A computed value that cannot be written into a document.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum NumericError {
    #[error("Non-finite value for {name}: {value}")]
    NonFinite { name: String, value: String },
}

/// Round to two decimal places.
///
/// Magnitudes too large to scale are returned as is; they carry no
/// fractional digits anyway.
pub fn round2(value: f64) -> f64 {
    let scaled = value * 100.0;
    if !scaled.is_finite() {
        return value;
    }
    let rounded = scaled.round() / 100.0;
    // Avoid "-0" leaking into markup.
    if rounded == 0.0 {
        0.0
    } else {
        rounded
    }
}

/// Reject non-finite values, then round to two decimals.
pub fn sanitize(name: &str, value: f64) -> Result<f64, NumericError> {
    if !value.is_finite() {
        return Err(NumericError::NonFinite {
            name: name.to_string(),
            value: format_number(value),
        });
    }
    Ok(round2(value))
}

/// Human/markup form of a number.
///
/// Finite values print with at most two decimals and no trailing zeros;
/// non-finite values print as `NaN`, `Infinity` or `-Infinity`.
pub fn format_number(value: f64) -> String {
    if value.is_nan() {
        "NaN".to_string()
    } else if value == f64::INFINITY {
        "Infinity".to_string()
    } else if value == f64::NEG_INFINITY {
        "-Infinity".to_string()
    } else {
        format!("{}", round2(value))
    }
}

/// Number of decimal digits in the shortest round-trip form of `value`.
///
/// Returns 0 for non-finite values.
pub fn decimal_places(value: f64) -> usize {
    if !value.is_finite() {
        return 0;
    }
    let text = format!("{}", value);
    text.split_once('.').map(|(_, frac)| frac.len()).unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rounds_to_two_decimals() {
        assert_eq!(round2(1.234), 1.23);
        assert_eq!(round2(1.235_1), 1.24);
        assert_eq!(round2(-0.001), 0.0);
        assert_eq!(round2(100.0), 100.0);
    }

    #[test]
    fn sanitize_rejects_non_finite() {
        let err = sanitize("cx", f64::NAN).unwrap_err();
        assert_eq!(err.to_string(), "Non-finite value for cx: NaN");

        let err = sanitize("r", f64::INFINITY).unwrap_err();
        assert_eq!(err.to_string(), "Non-finite value for r: Infinity");

        assert_eq!(sanitize("x", 10.456).unwrap(), 10.46);
    }

    #[test]
    fn huge_finite_values_survive_rounding() {
        assert_eq!(round2(1e307), 1e307);
        assert_eq!(round2(-f64::MAX), -f64::MAX);
        assert_eq!(sanitize("cx", 1e307).unwrap(), 1e307);
    }

    #[test]
    fn format_trims_trailing_zeros() {
        assert_eq!(format_number(100.0), "100");
        assert_eq!(format_number(12.5), "12.5");
        assert_eq!(format_number(7.12345), "7.12");
        assert_eq!(format_number(-0.0), "0");
        assert_eq!(format_number(f64::NEG_INFINITY), "-Infinity");
    }

    #[test]
    fn counts_decimal_places() {
        assert_eq!(decimal_places(10.0), 0);
        assert_eq!(decimal_places(10.25), 2);
        assert_eq!(decimal_places(10.125), 3);
        assert_eq!(decimal_places(f64::NAN), 0);
        assert_eq!(decimal_places(round2(0.1 + 0.2)), 1);
    }

    mod props {
        use super::super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn sanitized_values_have_at_most_two_decimals(v in -1.0e6f64..1.0e6) {
                let s = sanitize("v", v).unwrap();
                prop_assert!(decimal_places(s) <= MAX_DECIMALS);
                prop_assert!((s - v).abs() <= 0.005 + 1e-9);
            }
        }
    }
}
