//! # Checked arithmetic
//!
//! Every amount the contract stores goes through these helpers. Nothing in the
//! crate adds, subtracts or multiplies ledger amounts with raw operators.
//!
//! Amounts are 128-bit unsigned integers. Failures are reported as
//! [`Error`] values instead of wrapping or panicking, so callers can
//! propagate them with `?` and the host rolls back the whole invocation.

use crate::Error;

/// Ledger amount: token units and base-currency units alike.
pub type Amount = u128;

pub fn add(a: Amount, b: Amount) -> Result<Amount, Error> {
    a.checked_add(b).ok_or(Error::ArithmeticOverflow)
}

pub fn sub(a: Amount, b: Amount) -> Result<Amount, Error> {
    a.checked_sub(b).ok_or(Error::ArithmeticUnderflow)
}

/// `0 * x` short-circuits to zero without touching the overflow path.
pub fn mul(a: Amount, b: Amount) -> Result<Amount, Error> {
    if a == 0 {
        return Ok(0);
    }
    a.checked_mul(b).ok_or(Error::ArithmeticOverflow)
}

/// Floor division.
pub fn div(a: Amount, b: Amount) -> Result<Amount, Error> {
    a.checked_div(b).ok_or(Error::DivisionByZero)
}

/// Offset a ledger timestamp by `seconds`.
pub fn add_seconds(timestamp: u64, seconds: u64) -> Result<u64, Error> {
    timestamp
        .checked_add(seconds)
        .ok_or(Error::ArithmeticOverflow)
}

/// Convert an amount into the `i128` used by SEP-41 token clients.
pub fn to_token_amount(amount: Amount) -> Result<i128, Error> {
    i128::try_from(amount).map_err(|_| Error::ArithmeticOverflow)
}
