//! Order code type.

use core::fmt;

use serde::{Deserialize, Serialize};

/// Errors that can occur when parsing an [`OrderCode`].
#[derive(thiserror::Error, Debug, Clone)]
pub enum OrderCodeError {
    /// The input string is empty or whitespace-only.
    #[error("order code cannot be empty")]
    Empty,
    /// The input string is too long.
    #[error("order code must be at most {max} characters")]
    TooLong {
        /// Maximum allowed length.
        max: usize,
    },
}

/// An order code.
///
/// Order codes identify an order towards the external shipment-tracking
/// API, so they must be non-empty and short enough to travel as a query
/// parameter.
///
/// ## Examples
///
/// ```
/// use artemia_core::OrderCode;
///
/// assert!(OrderCode::parse("ORD-001").is_ok());
///
/// assert!(OrderCode::parse("").is_err());
/// assert!(OrderCode::parse("   ").is_err());
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(transparent)]
pub struct OrderCode(String);

impl OrderCode {
    /// Maximum length of an order code.
    pub const MAX_LENGTH: usize = 64;

    /// Parse an `OrderCode` from a string.
    ///
    /// Surrounding whitespace is trimmed.
    ///
    /// # Errors
    ///
    /// Returns an error if the trimmed input is empty or longer than 64
    /// characters.
    pub fn parse(s: &str) -> Result<Self, OrderCodeError> {
        let trimmed = s.trim();

        if trimmed.is_empty() {
            return Err(OrderCodeError::Empty);
        }

        if trimmed.len() > Self::MAX_LENGTH {
            return Err(OrderCodeError::TooLong {
                max: Self::MAX_LENGTH,
            });
        }

        Ok(Self(trimmed.to_owned()))
    }

    /// Returns the order code as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consumes the `OrderCode` and returns its inner string.
    #[must_use]
    pub fn into_inner(self) -> String {
        self.0
    }
}

impl fmt::Display for OrderCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::str::FromStr for OrderCode {
    type Err = OrderCodeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl AsRef<str> for OrderCode {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_valid_codes() {
        assert!(OrderCode::parse("ORD-001").is_ok());
        assert!(OrderCode::parse("5FNLKKLV").is_ok());
    }

    #[test]
    fn test_parse_trims_whitespace() {
        let code = OrderCode::parse("  ORD-001  ").unwrap();
        assert_eq!(code.as_str(), "ORD-001");
    }

    #[test]
    fn test_parse_empty() {
        assert!(matches!(OrderCode::parse(""), Err(OrderCodeError::Empty)));
        assert!(matches!(
            OrderCode::parse("   "),
            Err(OrderCodeError::Empty)
        ));
    }

    #[test]
    fn test_parse_too_long() {
        let long = "X".repeat(65);
        assert!(matches!(
            OrderCode::parse(&long),
            Err(OrderCodeError::TooLong { .. })
        ));
    }

    #[test]
    fn test_display() {
        let code = OrderCode::parse("ORD-001").unwrap();
        assert_eq!(format!("{code}"), "ORD-001");
    }

    #[test]
    fn test_serde_roundtrip() {
        let code = OrderCode::parse("ORD-001").unwrap();
        let json = serde_json::to_string(&code).unwrap();
        assert_eq!(json, "\"ORD-001\"");

        let parsed: OrderCode = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, code);
    }
}
