//! Utilities for numerics.
//!
//! All decisions that depend on comparing real numbers (pivot selection, rank counting,
//! consistency checks, RREF detection) go through [`is_zero`] and [`same`]. Both compare exactly.

/// Decimal places used when rendering non-integral entries and no precision was requested.
pub const DEFAULT_PRECISION: usize = 3;

/// Returns whether `value` is exactly zero (`-0.0` included).
#[inline]
pub fn is_zero(value: f64) -> bool {
    value == 0.0
}

/// Returns whether `a` and `b` are exactly equal.
#[inline]
pub fn same(a: f64, b: f64) -> bool {
    a == b
}

/// Renders a scalar as a plain integer if it has no fractional part, otherwise with `precision`
/// decimal places.
pub(crate) fn format_scalar(value: f64, precision: usize) -> String {
    if value.is_finite() && value.fract() == 0.0 {
        if is_zero(value) {
            // don't print `-0`
            "0".to_string()
        } else {
            format!("{value:.0}")
        }
    } else {
        format!("{value:.precision$}")
    }
}

/// Inserts `,` between groups of three digits in the integral part of a formatted number.
///
/// Strings that aren't plain numbers (`NaN`, `inf`) are returned unchanged.
pub(crate) fn group_thousands(formatted: &str) -> String {
    let (sign, unsigned) = match formatted.strip_prefix('-') {
        Some(rest) => ("-", rest),
        None => ("", formatted),
    };
    let split = unsigned.find('.').unwrap_or(unsigned.len());
    let (integral, fraction) = unsigned.split_at(split);
    if integral.is_empty() || !integral.bytes().all(|b| b.is_ascii_digit()) {
        return formatted.to_string();
    }

    let mut out = String::with_capacity(formatted.len() + integral.len() / 3);
    out.push_str(sign);
    for (i, digit) in integral.chars().enumerate() {
        if i != 0 && (integral.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(digit);
    }
    out.push_str(fraction);
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero() {
        assert!(is_zero(0.0));
        assert!(is_zero(-0.0));
        assert!(!is_zero(1e-300));
        assert!(!is_zero(f64::NAN));
    }

    #[test]
    fn scalars() {
        assert_eq!(format_scalar(3.0, 3), "3");
        assert_eq!(format_scalar(-12.0, 3), "-12");
        assert_eq!(format_scalar(-0.0, 3), "0");
        assert_eq!(format_scalar(0.5, 3), "0.500");
        assert_eq!(format_scalar(-1.0 / 3.0, 3), "-0.333");
        assert_eq!(format_scalar(2.0 / 3.0, 1), "0.7");
    }

    #[test]
    fn thousands() {
        assert_eq!(group_thousands("0"), "0");
        assert_eq!(group_thousands("999"), "999");
        assert_eq!(group_thousands("1000"), "1,000");
        assert_eq!(group_thousands("-1234567"), "-1,234,567");
        assert_eq!(group_thousands("12345.678"), "12,345.678");
        assert_eq!(group_thousands("NaN"), "NaN");
        assert_eq!(group_thousands("-inf"), "-inf");
    }
}
