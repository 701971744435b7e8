//! Order route handlers.
//!
//! Orders are create-only through the API; tracking state comes from the
//! external proxy keyed on the order code.

use axum::{
    Json,
    extract::State,
    http::StatusCode,
};
use serde::Deserialize;
use serde_json::Value;

use artemia_core::{OrderCode, OrderStatus};

use crate::db::OrderRepository;
use crate::error::AppError;
use crate::models::{Order, OrderDraft};
use crate::routes::forms::{missing_field, parse_body, require_field};
use crate::state::AppState;

/// Order creation payload.
///
/// `products` is kept as raw JSON: the snapshots are whatever the checkout
/// captured and are stored verbatim.
#[derive(Debug, Deserialize)]
pub struct CreateOrderRequest {
    pub products: Option<Value>,
    pub status: Option<String>,
    #[serde(rename = "orderCode")]
    pub order_code: Option<String>,
}

impl CreateOrderRequest {
    fn into_draft(self) -> Result<OrderDraft, AppError> {
        let products = match self.products {
            Some(Value::Array(products)) => products,
            Some(_) => {
                return Err(AppError::Validation(
                    "field 'products' must be an array".to_string(),
                ));
            }
            None => return Err(missing_field("products")),
        };

        let order_code = require_field(self.order_code, "orderCode")?;
        let order_code = OrderCode::parse(&order_code)
            .map_err(|e| AppError::Validation(format!("invalid orderCode: {e}")))?;

        let status = self
            .status
            .filter(|s| !s.trim().is_empty())
            .map_or_else(OrderStatus::pending, OrderStatus::from);

        Ok(OrderDraft {
            products,
            status,
            order_code,
        })
    }
}

/// List every order.
pub async fn list(State(state): State<AppState>) -> Result<Json<Vec<Order>>, AppError> {
    let orders = OrderRepository::new(state.store()).list().await?;
    Ok(Json(orders))
}

/// Create an order.
pub async fn create(
    State(state): State<AppState>,
    Json(body): Json<Value>,
) -> Result<(StatusCode, Json<Order>), AppError> {
    let request: CreateOrderRequest = parse_body(body)?;
    let draft = request.into_draft()?;

    let order = OrderRepository::new(state.store()).create(&draft).await?;
    Ok((StatusCode::CREATED, Json(order)))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use serde_json::json;

    fn request(body: Value) -> CreateOrderRequest {
        serde_json::from_value(body).unwrap()
    }

    #[test]
    fn test_draft_defaults_status_to_pending() {
        let draft = request(json!({
            "products": [{"sku": "A1", "qty": 2}],
            "orderCode": "ORD-001",
        }))
        .into_draft()
        .unwrap();

        assert!(draft.status.is_pending());
        assert_eq!(draft.order_code.as_str(), "ORD-001");
        assert_eq!(draft.products, vec![json!({"sku": "A1", "qty": 2})]);
    }

    #[test]
    fn test_draft_keeps_explicit_status() {
        let draft = request(json!({
            "products": [],
            "status": "Shipped",
            "orderCode": "ORD-002",
        }))
        .into_draft()
        .unwrap();

        assert_eq!(draft.status.as_str(), "Shipped");
    }

    #[test]
    fn test_draft_requires_products() {
        let err = request(json!({"orderCode": "ORD-001"}))
            .into_draft()
            .unwrap_err();
        assert!(err.to_string().contains("'products'"));
    }

    #[test]
    fn test_draft_rejects_non_array_products() {
        let err = request(json!({"products": "A1", "orderCode": "ORD-001"}))
            .into_draft()
            .unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
    }

    #[test]
    fn test_draft_requires_order_code() {
        let err = request(json!({"products": []})).into_draft().unwrap_err();
        assert!(err.to_string().contains("'orderCode'"));
    }
}
