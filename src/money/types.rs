//! Types used throughout the money formatting code.
use std::fmt;

use serde::{Deserialize, Serialize, de};
use thiserror::Error;

/// Decimal precision for monetary values.
/// This is used to convert floating-point tenge to a whole number of tiyn.
pub const DECIMAL_PRECISION: f64 = 100.0;

/// Largest whole-tenge value accepted by [`Amount::from_f64`] (exclusive).
/// Above this an `f64` no longer carries the tiyn digits reliably.
pub const MAX_TENGE: f64 = 1_000_000_000_000.0;

/// Tiyn type, the minor currency unit (1/100 of a tenge).
pub type Tiyn = u64;

/// Errors that can occur when a number is used as a sum of money.
#[derive(Error, Debug, Clone, Copy, PartialEq)]
pub enum InvalidAmount {
    #[error("Invalid amount {0}: not a finite number")]
    NotFinite(f64),
    #[error("Invalid amount {0}: negative")]
    Negative(f64),
    #[error("Invalid amount {0}: too large")]
    TooLarge(f64),
}

/// A non-negative sum of money held as a whole number of tiyn.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Amount(Tiyn);

impl Amount {
    pub const ZERO: Amount = Amount(0);

    /// Creates an amount from a count of tiyn.
    pub const fn from_tiyn(tiyn: Tiyn) -> Self {
        Amount(tiyn)
    }

    /// Creates an amount from whole tenge.
    pub const fn from_tenge(tenge: u64) -> Self {
        Amount(tenge * 100)
    }

    /// Converts a floating-point number of tenge, rounding half away from zero
    /// to the nearest tiyn. The rounding is applied to the whole value, so a
    /// fraction such as `.995` carries into the integer part.
    pub fn from_f64(amount: f64) -> Result<Self, InvalidAmount> {
        if !amount.is_finite() {
            return Err(InvalidAmount::NotFinite(amount));
        }
        if amount < 0.0 {
            return Err(InvalidAmount::Negative(amount));
        }
        if amount >= MAX_TENGE {
            return Err(InvalidAmount::TooLarge(amount));
        }
        Ok(Amount((amount * DECIMAL_PRECISION).round() as Tiyn))
    }

    /// Total value in tiyn.
    pub fn tiyn(&self) -> Tiyn {
        self.0
    }

    /// Whole tenge (the integer part).
    pub fn tenge(&self) -> u64 {
        self.0 / 100
    }

    /// Remaining tiyn (the fractional part), always in `0..=99`.
    pub fn fraction(&self) -> u8 {
        (self.0 % 100) as u8
    }

    pub fn as_f64(&self) -> f64 {
        self.0 as f64 / DECIMAL_PRECISION
    }

    pub fn checked_add(self, other: Amount) -> Option<Amount> {
        self.0.checked_add(other.0).map(Amount)
    }

    /// Multiplies by a non-negative factor, rounding to the nearest tiyn.
    pub fn scale(self, factor: f64) -> Result<Amount, InvalidAmount> {
        Amount::from_f64(self.as_f64() * factor)
    }
}

impl fmt::Display for Amount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{:02}", self.tenge(), self.fraction())
    }
}

impl Serialize for Amount {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        self.as_f64().serialize(serializer)
    }
}

/// Amounts arrive as plain numbers (`1234.5`) and are rounded to tiyn on the way in.
impl<'de> Deserialize<'de> for Amount {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: de::Deserializer<'de>,
    {
        let value = f64::deserialize(deserializer)?;
        Amount::from_f64(value).map_err(de::Error::custom)
    }
}
