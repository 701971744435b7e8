//! Product price type.

use core::fmt;

use serde::{Deserialize, Serialize};

/// Errors that can occur when parsing a [`Price`].
#[derive(thiserror::Error, Debug, Clone)]
pub enum PriceError {
    /// The amount is negative.
    #[error("price cannot be negative")]
    Negative,
    /// The amount is NaN or infinite.
    #[error("price must be a finite number")]
    NotFinite,
}

/// A non-negative product price.
///
/// Prices travel as plain JSON numbers and are stored as IEEE doubles in the
/// document store, so the representation is `f64` with the invariant checked
/// at the boundary.
///
/// ## Constraints
///
/// - Must be finite (no NaN, no infinities)
/// - Must be zero or greater
///
/// ## Examples
///
/// ```
/// use artemia_core::Price;
///
/// assert!(Price::parse(9.99).is_ok());
/// assert!(Price::parse(0.0).is_ok());
///
/// assert!(Price::parse(-1.0).is_err());
/// assert!(Price::parse(f64::NAN).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize)]
#[serde(try_from = "f64", into = "f64")]
pub struct Price(f64);

impl Price {
    /// Parse a `Price` from a raw amount.
    ///
    /// # Errors
    ///
    /// Returns an error if the amount is negative, NaN, or infinite.
    pub fn parse(amount: f64) -> Result<Self, PriceError> {
        if !amount.is_finite() {
            return Err(PriceError::NotFinite);
        }

        if amount < 0.0 {
            return Err(PriceError::Negative);
        }

        Ok(Self(amount))
    }

    /// A zero price.
    #[must_use]
    pub const fn zero() -> Self {
        Self(0.0)
    }

    /// Returns the amount as an `f64`.
    #[must_use]
    pub const fn amount(&self) -> f64 {
        self.0
    }
}

impl fmt::Display for Price {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl TryFrom<f64> for Price {
    type Error = PriceError;

    fn try_from(amount: f64) -> Result<Self, Self::Error> {
        Self::parse(amount)
    }
}

impl From<Price> for f64 {
    fn from(price: Price) -> Self {
        price.0
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_valid_amounts() {
        assert!(Price::parse(0.0).is_ok());
        assert!(Price::parse(9.99).is_ok());
        assert!(Price::parse(1_000_000.0).is_ok());
    }

    #[test]
    fn test_parse_negative() {
        assert!(matches!(Price::parse(-0.01), Err(PriceError::Negative)));
        assert!(matches!(Price::parse(-100.0), Err(PriceError::Negative)));
    }

    #[test]
    fn test_parse_not_finite() {
        assert!(matches!(Price::parse(f64::NAN), Err(PriceError::NotFinite)));
        assert!(matches!(
            Price::parse(f64::INFINITY),
            Err(PriceError::NotFinite)
        ));
        assert!(matches!(
            Price::parse(f64::NEG_INFINITY),
            Err(PriceError::NotFinite)
        ));
    }

    #[test]
    fn test_zero() {
        assert!((Price::zero().amount() - 0.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_display() {
        let price = Price::parse(9.99).unwrap();
        assert_eq!(format!("{price}"), "9.99");
    }

    #[test]
    fn test_serde_roundtrip() {
        let price = Price::parse(9.99).unwrap();
        let json = serde_json::to_string(&price).unwrap();
        assert_eq!(json, "9.99");

        let parsed: Price = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, price);
    }

    #[test]
    fn test_deserialize_rejects_negative() {
        assert!(serde_json::from_str::<Price>("-1.5").is_err());
    }
}
