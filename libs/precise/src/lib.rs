//! Arbitrary-precision decimal string comparison
//!
//! Monetary fields arrive from venue APIs as decimal strings ("64250.10",
//! "1e-8") or raw JSON numbers. Comparing them through `f64` silently loses
//! precision on large integers and long fractions, so every relational check
//! in this workspace goes through [`compare`] instead, which parses both
//! operands into [`rust_decimal::Decimal`] and compares exactly.
//!
//! No function in this crate touches native floating point.

use std::cmp::Ordering;
use std::str::FromStr;

use rust_decimal::Decimal;
use thiserror::Error;

/// Errors raised while parsing decimal literals
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum PreciseError {
    /// Operand is not a plain or scientific decimal literal
    #[error("invalid decimal literal '{literal}' - expected numeric format")]
    InvalidLiteral { literal: String },
}

/// Parse a plain ("-1.5") or scientific ("1e-8") decimal literal.
pub fn parse(literal: &str) -> Result<Decimal, PreciseError> {
    Decimal::from_str(literal)
        .or_else(|_| Decimal::from_scientific(literal))
        .map_err(|_| PreciseError::InvalidLiteral {
            literal: literal.to_string(),
        })
}

/// Exact ordering of two decimal literals.
pub fn compare(a: &str, b: &str) -> Result<Ordering, PreciseError> {
    Ok(parse(a)?.cmp(&parse(b)?))
}

/// `a > b` over decimal literals.
pub fn string_gt(a: &str, b: &str) -> Result<bool, PreciseError> {
    Ok(compare(a, b)? == Ordering::Greater)
}

/// `a >= b` over decimal literals.
pub fn string_ge(a: &str, b: &str) -> Result<bool, PreciseError> {
    Ok(compare(a, b)? != Ordering::Less)
}

/// `a < b` over decimal literals.
pub fn string_lt(a: &str, b: &str) -> Result<bool, PreciseError> {
    Ok(compare(a, b)? == Ordering::Less)
}

/// `a <= b` over decimal literals.
pub fn string_le(a: &str, b: &str) -> Result<bool, PreciseError> {
    Ok(compare(a, b)? != Ordering::Greater)
}

/// `a == b` over decimal literals, ignoring representation.
pub fn string_eq(a: &str, b: &str) -> Result<bool, PreciseError> {
    Ok(compare(a, b)? == Ordering::Equal)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn parses_plain_and_scientific_literals() {
        assert_eq!(parse("64250.10").unwrap(), dec!(64250.10));
        assert_eq!(parse("-1").unwrap(), dec!(-1));
        assert_eq!(parse("1e-8").unwrap(), dec!(0.00000001));
    }

    #[test]
    fn rejects_non_numeric_literals() {
        let err = parse("BTC/USD").unwrap_err();
        assert_eq!(
            err,
            PreciseError::InvalidLiteral {
                literal: "BTC/USD".to_string()
            }
        );
        assert!(parse("").is_err());
    }

    #[test]
    fn representation_does_not_affect_equality() {
        assert!(string_eq("0.00000001", "1e-8").unwrap());
        assert!(string_eq("1.50", "1.5").unwrap());
    }

    #[test]
    fn compares_beyond_f64_precision() {
        // adjacent integers above 2^53 collapse to the same f64
        assert!(string_gt("9007199254740993", "9007199254740992").unwrap());
        assert!(string_lt("0.3", "0.30000000000000004").unwrap());
    }

    #[test]
    fn ordering_of_signed_values() {
        assert!(string_lt("-1", "0").unwrap());
        assert!(string_gt("0", "-0.00001").unwrap());
        assert!(string_ge("0", "0").unwrap());
        assert!(string_le("0", "0").unwrap());
        assert!(!string_gt("0", "0").unwrap());
    }

    #[test]
    fn unparseable_operand_surfaces_as_error() {
        assert!(string_ge("abc", "0").is_err());
        assert!(string_ge("0", "abc").is_err());
    }
}
