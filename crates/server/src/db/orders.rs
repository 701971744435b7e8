//! Order repository.
//!
//! Orders are create-only through the API; the `orderCode` field keys the
//! external tracking proxy and carries a unique index created at startup.

use mongodb::bson::doc;
use mongodb::bson::oid::ObjectId;
use mongodb::options::IndexOptions;
use mongodb::{Collection, IndexModel};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use artemia_core::{OrderCode, OrderStatus};

use super::{RepositoryError, Store, is_duplicate_key};
use crate::models::{Order, OrderDraft};

/// Collection name.
const ORDERS_COLLECTION: &str = "orders";

/// Stored shape of an order document.
#[derive(Debug, Serialize, Deserialize)]
struct OrderDocument {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    id: Option<ObjectId>,
    products: Vec<Value>,
    status: String,
    #[serde(rename = "orderCode")]
    order_code: String,
}

impl OrderDocument {
    fn from_draft(draft: &OrderDraft) -> Self {
        Self {
            id: None,
            products: draft.products.clone(),
            status: draft.status.as_str().to_owned(),
            order_code: draft.order_code.as_str().to_owned(),
        }
    }

    fn into_model(self) -> Result<Order, RepositoryError> {
        let order_code = OrderCode::parse(&self.order_code).map_err(|e| {
            RepositoryError::DataCorruption(format!("invalid order code in store: {e}"))
        })?;

        Ok(Order {
            id: self.id.map(|id| id.to_hex()).unwrap_or_default(),
            products: self.products,
            status: OrderStatus::from(self.status),
            order_code,
        })
    }
}

/// Repository for order documents.
pub struct OrderRepository {
    orders: Collection<OrderDocument>,
}

impl OrderRepository {
    /// Create a new order repository.
    #[must_use]
    pub fn new(store: &Store) -> Self {
        Self {
            orders: store.collection(ORDERS_COLLECTION),
        }
    }

    /// Create the unique index on `orderCode`.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Driver` if index creation fails.
    pub(crate) async fn ensure_indexes(&self) -> Result<(), RepositoryError> {
        let index = IndexModel::builder()
            .keys(doc! { "orderCode": 1 })
            .options(IndexOptions::builder().unique(true).build())
            .build();

        self.orders.create_index(index).await?;
        Ok(())
    }

    /// List every order in the collection.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Driver` if the query fails.
    pub async fn list(&self) -> Result<Vec<Order>, RepositoryError> {
        let mut cursor = self.orders.find(doc! {}).await?;

        let mut orders = Vec::new();
        while cursor.advance().await? {
            orders.push(cursor.deserialize_current()?.into_model()?);
        }

        Ok(orders)
    }

    /// Insert a new order and return it with its assigned id.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Conflict` if the order code already exists
    /// and `RepositoryError::Driver` for other failures.
    pub async fn create(&self, draft: &OrderDraft) -> Result<Order, RepositoryError> {
        let mut document = OrderDocument::from_draft(draft);

        let result = self.orders.insert_one(&document).await.map_err(|e| {
            if is_duplicate_key(&e) {
                RepositoryError::Conflict(format!(
                    "order code '{}' already exists",
                    draft.order_code
                ))
            } else {
                RepositoryError::Driver(e)
            }
        })?;
        document.id = result.inserted_id.as_object_id();

        document.into_model()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_collection_name() {
        assert_eq!(ORDERS_COLLECTION, "orders");
    }

    #[test]
    fn test_document_stores_camel_case_order_code() {
        let draft = OrderDraft {
            products: vec![json!({"sku": "A1", "qty": 2})],
            status: OrderStatus::pending(),
            order_code: OrderCode::parse("ORD-001").unwrap(),
        };

        let bson = mongodb::bson::to_document(&OrderDocument::from_draft(&draft)).unwrap();
        assert_eq!(bson.get_str("orderCode").unwrap(), "ORD-001");
        assert_eq!(bson.get_str("status").unwrap(), "Pending");
    }

    #[test]
    fn test_document_into_model_preserves_products() {
        let document = OrderDocument {
            id: Some(ObjectId::new()),
            products: vec![json!({"sku": "A1", "qty": 2}), json!({"sku": "B2"})],
            status: "Pending".to_string(),
            order_code: "ORD-001".to_string(),
        };

        let order = document.into_model().unwrap();
        assert_eq!(order.products.len(), 2);
        assert_eq!(order.products[0]["qty"], 2);
        assert!(order.status.is_pending());
    }

    #[test]
    fn test_document_with_blank_order_code_is_corrupt() {
        let document = OrderDocument {
            id: Some(ObjectId::new()),
            products: vec![],
            status: "Pending".to_string(),
            order_code: "  ".to_string(),
        };

        assert!(matches!(
            document.into_model(),
            Err(RepositoryError::DataCorruption(_))
        ));
    }
}
