//! Order domain types.

use serde::Serialize;
use serde_json::Value;

use artemia_core::{OrderCode, OrderStatus};

/// A placed order.
///
/// `products` is an ordered sequence of arbitrary product snapshots taken
/// at checkout time; the API stores and returns it verbatim.
#[derive(Debug, Clone, Serialize)]
pub struct Order {
    /// Store-assigned identifier (hex string).
    pub id: String,
    /// Product snapshots, unchanged from the create request.
    pub products: Vec<Value>,
    /// Fulfillment status, `Pending` for new orders.
    pub status: OrderStatus,
    /// External tracking key, unique across the collection.
    #[serde(rename = "orderCode")]
    pub order_code: OrderCode,
}

/// The validated field set written on order creation.
#[derive(Debug, Clone)]
pub struct OrderDraft {
    pub products: Vec<Value>,
    pub status: OrderStatus,
    pub order_code: OrderCode,
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_order_code_serializes_camel_case() {
        let order = Order {
            id: "64f000000000000000000003".to_string(),
            products: vec![json!({"sku": "A1", "qty": 2})],
            status: OrderStatus::pending(),
            order_code: OrderCode::parse("ORD-001").unwrap(),
        };

        let json = serde_json::to_value(&order).unwrap();
        assert_eq!(json["orderCode"], "ORD-001");
        assert_eq!(json["status"], "Pending");
        assert_eq!(json["products"][0]["sku"], "A1");
    }
}
