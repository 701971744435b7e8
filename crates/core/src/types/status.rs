//! Order status type.

use core::fmt;

use serde::{Deserialize, Serialize};

/// An order's fulfillment status.
///
/// Statuses are free-form text set by the admin panel (the upstream
/// tracking provider reports its own states), so this is a thin wrapper
/// rather than a closed enum. New orders start out as `Pending`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(transparent)]
pub struct OrderStatus(String);

impl OrderStatus {
    /// Status assigned to newly created orders.
    pub const PENDING: &'static str = "Pending";

    /// Create a status from arbitrary text.
    #[must_use]
    pub fn new(status: impl Into<String>) -> Self {
        Self(status.into())
    }

    /// The initial status for a new order.
    #[must_use]
    pub fn pending() -> Self {
        Self(Self::PENDING.to_owned())
    }

    /// Returns the status as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Whether the order is still pending.
    #[must_use]
    pub fn is_pending(&self) -> bool {
        self.0 == Self::PENDING
    }
}

impl Default for OrderStatus {
    fn default() -> Self {
        Self::pending()
    }
}

impl fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<String> for OrderStatus {
    fn from(status: String) -> Self {
        Self(status)
    }
}

impl From<&str> for OrderStatus {
    fn from(status: &str) -> Self {
        Self(status.to_owned())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_pending() {
        let status = OrderStatus::default();
        assert_eq!(status.as_str(), "Pending");
        assert!(status.is_pending());
    }

    #[test]
    fn test_custom_status() {
        let status = OrderStatus::new("Shipped");
        assert_eq!(status.as_str(), "Shipped");
        assert!(!status.is_pending());
    }

    #[test]
    fn test_display() {
        assert_eq!(format!("{}", OrderStatus::pending()), "Pending");
    }

    #[test]
    fn test_serde_roundtrip() {
        let status = OrderStatus::new("Shipped");
        let json = serde_json::to_string(&status).unwrap();
        assert_eq!(json, "\"Shipped\"");

        let parsed: OrderStatus = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, status);
    }
}
