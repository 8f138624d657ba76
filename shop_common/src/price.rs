use std::fmt::Display;

use serde::{Deserialize, Serialize};
use thiserror::Error;

//--------------------------------------       Price         ---------------------------------------------------------
/// An amount of money in the smallest unit of the store currency (e.g. cents).
///
/// Prices are never negative, and arithmetic on them is always checked. The relational store keeps amounts in signed
/// 64-bit columns, so only values up to `i64::MAX` can be persisted; see [`Price::to_db`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Ord, PartialOrd, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Price(u64);

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Value cannot be represented as a price: {0}")]
pub struct PriceConversionError(String);

impl From<u64> for Price {
    fn from(value: u64) -> Self {
        Self(value)
    }
}

impl TryFrom<i64> for Price {
    type Error = PriceConversionError;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        u64::try_from(value).map(Self).map_err(|_| PriceConversionError(format!("{value} is negative")))
    }
}

impl Display for Price {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl Price {
    pub fn value(&self) -> u64 {
        self.0
    }

    /// Converts the price into the signed representation used by the store.
    pub fn to_db(&self) -> Result<i64, PriceConversionError> {
        i64::try_from(self.0).map_err(|_| PriceConversionError(format!("{} is too large to store", self.0)))
    }

    pub fn checked_add(self, rhs: Self) -> Option<Self> {
        self.0.checked_add(rhs.0).map(Self)
    }

    /// The extension of a line: unit price multiplied by quantity.
    pub fn checked_mul(self, quantity: u64) -> Option<Self> {
        self.0.checked_mul(quantity).map(Self)
    }
}
