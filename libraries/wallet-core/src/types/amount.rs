//! Amount - non-negative decimal with cent precision
//!
//! Balances and transfer amounts are always >= 0 and carry at most two
//! fractional digits. Storage persists them as integer minor units.

use crate::error::{Result, WalletError};
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Number of fractional digits an amount may carry
pub const SCALE: u32 = 2;

/// A non-negative amount of money.
///
/// # Invariant
/// The inner value is >= 0, has at most [`SCALE`] fractional digits, and
/// fits into `i64` minor units.
///
/// # Example
/// ```
/// use wallet_core::Amount;
/// use rust_decimal::Decimal;
///
/// let amount = Amount::new(Decimal::new(3050, 2)).unwrap();
/// assert_eq!(amount.to_minor_units(), 3050);
///
/// assert!(Amount::new(Decimal::new(-1, 0)).is_err());
/// assert!(Amount::new(Decimal::new(1, 3)).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "Decimal", into = "Decimal")]
pub struct Amount(Decimal);

impl Amount {
    /// Zero amount constant
    pub const ZERO: Self = Self(Decimal::ZERO);

    /// Create a new amount, rejecting negative, sub-cent, or oversized values
    pub fn new(value: Decimal) -> Result<Self> {
        if value.is_sign_negative() && !value.is_zero() {
            return Err(WalletError::invalid_amount(format!(
                "{} is negative",
                value
            )));
        }

        let normalized = value.normalize();
        if normalized.scale() > SCALE {
            return Err(WalletError::invalid_amount(format!(
                "{} has more than {} decimal places",
                value, SCALE
            )));
        }

        let minor = normalized
            .checked_mul(Decimal::ONE_HUNDRED)
            .and_then(|m| m.to_i64())
            .ok_or_else(|| WalletError::invalid_amount(format!("{} is too large", value)))?;

        Ok(Self::from_minor_units_unchecked(minor))
    }

    /// Build an amount from integer minor units (cents)
    pub fn from_minor_units(minor: i64) -> Result<Self> {
        if minor < 0 {
            return Err(WalletError::invalid_amount(format!(
                "{} minor units is negative",
                minor
            )));
        }
        Ok(Self::from_minor_units_unchecked(minor))
    }

    fn from_minor_units_unchecked(minor: i64) -> Self {
        Self(Decimal::new(minor, SCALE))
    }

    /// Amount in integer minor units (cents)
    pub fn to_minor_units(&self) -> i64 {
        // Construction guarantees the scaled value fits.
        (self.0 * Decimal::ONE_HUNDRED).to_i64().unwrap_or(i64::MAX)
    }

    /// Get the inner Decimal value
    pub fn value(&self) -> Decimal {
        self.0
    }

    /// True for 0.00
    pub fn is_zero(&self) -> bool {
        self.0.is_zero()
    }
}

impl fmt::Display for Amount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.2}", self.0)
    }
}

impl TryFrom<Decimal> for Amount {
    type Error = WalletError;

    fn try_from(value: Decimal) -> Result<Self> {
        Self::new(value)
    }
}

impl From<Amount> for Decimal {
    fn from(amount: Amount) -> Self {
        amount.0
    }
}

impl Default for Amount {
    fn default() -> Self {
        Self::ZERO
    }
}
