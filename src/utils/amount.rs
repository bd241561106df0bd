//! Decimal amount handling.
//!
//! Horizon and callers speak in decimal strings ("1.5", "100"), the ledger speaks in
//! stroops (1 unit = 10^7 stroops). Conversion is exact: no floating point is involved,
//! anything beyond seven fractional digits is rejected rather than rounded.

use crate::constants::{STELLAR_AMOUNT_DECIMALS, STELLAR_STROOPS_PER_UNIT};
use serde::Serialize;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq, Serialize)]
pub enum AmountError {
    #[error("amount is empty")]
    Empty,
    #[error("malformed amount: {0}")]
    Malformed(String),
    #[error("amount {0} has more than 7 decimal places")]
    TooPrecise(String),
    #[error("amount {0} exceeds the ledger maximum")]
    Overflow(String),
    #[error("amount {0} must be greater than zero")]
    NotPositive(String),
}

/// Parses a decimal string into stroops.
///
/// Accepts `^\d+(\.\d{1,7})?$`. Zero is allowed here; callers that need a strictly
/// positive value use [`parse_positive_amount`].
pub fn parse_amount(amount: &str) -> Result<i64, AmountError> {
    if amount.is_empty() {
        return Err(AmountError::Empty);
    }
    if amount.starts_with('-') {
        return Err(AmountError::NotPositive(amount.to_string()));
    }

    let (whole, fraction) = match amount.split_once('.') {
        Some((whole, fraction)) => (whole, fraction),
        None => (amount, ""),
    };

    let is_digits = |s: &str| s.bytes().all(|b| b.is_ascii_digit());
    if whole.is_empty() || !is_digits(whole) || !is_digits(fraction) {
        return Err(AmountError::Malformed(amount.to_string()));
    }
    if amount.contains('.') && fraction.is_empty() {
        return Err(AmountError::Malformed(amount.to_string()));
    }
    if fraction.len() > STELLAR_AMOUNT_DECIMALS {
        return Err(AmountError::TooPrecise(amount.to_string()));
    }

    let overflow = || AmountError::Overflow(amount.to_string());

    let whole: i64 = whole.parse().map_err(|_| overflow())?;
    let padded = format!("{fraction:0<width$}", width = STELLAR_AMOUNT_DECIMALS);
    let fraction: i64 = padded
        .parse()
        .map_err(|_| AmountError::Malformed(amount.to_string()))?;

    whole
        .checked_mul(STELLAR_STROOPS_PER_UNIT)
        .and_then(|stroops| stroops.checked_add(fraction))
        .ok_or_else(overflow)
}

/// Parses a decimal string into stroops, rejecting zero.
pub fn parse_positive_amount(amount: &str) -> Result<i64, AmountError> {
    let stroops = parse_amount(amount)?;
    if stroops == 0 {
        return Err(AmountError::NotPositive(amount.to_string()));
    }
    Ok(stroops)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_whole_and_fractional_amounts() {
        assert_eq!(parse_amount("1").unwrap(), 10_000_000);
        assert_eq!(parse_amount("1.5").unwrap(), 15_000_000);
        assert_eq!(parse_amount("0.0000001").unwrap(), 1);
        assert_eq!(parse_amount("922337203685.4775807").unwrap(), i64::MAX);
    }

    #[test]
    fn test_parse_rejects_malformed_input() {
        assert_eq!(parse_amount(""), Err(AmountError::Empty));
        for bad in ["abc", "1.", ".5", "1.2.3", "1,5", " 1", "+1", "1e7"] {
            assert!(
                matches!(parse_amount(bad), Err(AmountError::Malformed(_))),
                "{bad} should be malformed"
            );
        }
    }

    #[test]
    fn test_parse_rejects_negative_and_precision() {
        assert!(matches!(
            parse_amount("-1"),
            Err(AmountError::NotPositive(_))
        ));
        assert!(matches!(
            parse_amount("0.00000001"),
            Err(AmountError::TooPrecise(_))
        ));
    }

    #[test]
    fn test_parse_rejects_overflow() {
        assert!(matches!(
            parse_amount("922337203685.4775808"),
            Err(AmountError::Overflow(_))
        ));
        assert!(matches!(
            parse_amount("99999999999999999999"),
            Err(AmountError::Overflow(_))
        ));
    }

    #[test]
    fn test_positive_amount_rejects_zero() {
        assert!(matches!(
            parse_positive_amount("0"),
            Err(AmountError::NotPositive(_))
        ));
        assert!(matches!(
            parse_positive_amount("0.0000000"),
            Err(AmountError::NotPositive(_))
        ));
        assert_eq!(parse_positive_amount("10").unwrap(), 100_000_000);
    }
}
