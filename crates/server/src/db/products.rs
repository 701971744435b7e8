//! Product repository.

use mongodb::Collection;
use mongodb::bson::doc;
use mongodb::bson::oid::ObjectId;
use mongodb::options::{FindOneAndReplaceOptions, ReturnDocument};
use serde::{Deserialize, Serialize};

use artemia_core::Price;

use super::{RepositoryError, Store};
use crate::models::{Product, ProductDraft};

/// Collection name.
const PRODUCTS_COLLECTION: &str = "products";

/// Stored shape of a product document.
#[derive(Debug, Serialize, Deserialize)]
struct ProductDocument {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    id: Option<ObjectId>,
    name: String,
    price: f64,
    category: String,
    image: String,
}

impl ProductDocument {
    fn from_draft(draft: &ProductDraft) -> Self {
        Self {
            id: None,
            name: draft.name.clone(),
            price: draft.price.amount(),
            category: draft.category.clone(),
            image: draft.image.clone(),
        }
    }

    fn into_model(self) -> Result<Product, RepositoryError> {
        let price = Price::parse(self.price).map_err(|e| {
            RepositoryError::DataCorruption(format!("invalid price in store: {e}"))
        })?;

        Ok(Product {
            id: self.id.map(|id| id.to_hex()).unwrap_or_default(),
            name: self.name,
            price,
            category: self.category,
            image: self.image,
        })
    }
}

/// Repository for product documents.
pub struct ProductRepository {
    products: Collection<ProductDocument>,
}

impl ProductRepository {
    /// Create a new product repository.
    #[must_use]
    pub fn new(store: &Store) -> Self {
        Self {
            products: store.collection(PRODUCTS_COLLECTION),
        }
    }

    /// List every product in the collection.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Driver` if the query fails.
    pub async fn list(&self) -> Result<Vec<Product>, RepositoryError> {
        let mut cursor = self.products.find(doc! {}).await?;

        let mut products = Vec::new();
        while cursor.advance().await? {
            products.push(cursor.deserialize_current()?.into_model()?);
        }

        Ok(products)
    }

    /// Insert a new product and return it with its assigned id.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Driver` if the insert fails.
    pub async fn create(&self, draft: &ProductDraft) -> Result<Product, RepositoryError> {
        let mut document = ProductDocument::from_draft(draft);

        let result = self.products.insert_one(&document).await?;
        document.id = result.inserted_id.as_object_id();

        document.into_model()
    }

    /// Replace every field of an existing product.
    ///
    /// Returns `None` when no document has the given id.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Driver` if the replace fails.
    pub async fn update(
        &self,
        id: ObjectId,
        draft: &ProductDraft,
    ) -> Result<Option<Product>, RepositoryError> {
        let mut replacement = ProductDocument::from_draft(draft);
        replacement.id = Some(id);

        let options = FindOneAndReplaceOptions::builder()
            .return_document(ReturnDocument::After)
            .build();

        let updated = self
            .products
            .find_one_and_replace(doc! { "_id": id }, replacement)
            .with_options(options)
            .await?;

        updated.map(ProductDocument::into_model).transpose()
    }

    /// Delete a product by id.
    ///
    /// Returns `false` when no document matched.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Driver` if the delete fails.
    pub async fn delete(&self, id: ObjectId) -> Result<bool, RepositoryError> {
        let result = self.products.delete_one(doc! { "_id": id }).await?;
        Ok(result.deleted_count > 0)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_collection_name() {
        assert_eq!(PRODUCTS_COLLECTION, "products");
    }

    #[test]
    fn test_document_into_model() {
        let id = ObjectId::new();
        let document = ProductDocument {
            id: Some(id),
            name: "Widget".to_string(),
            price: 9.99,
            category: "Tools".to_string(),
            image: String::new(),
        };

        let product = document.into_model().unwrap();
        assert_eq!(product.id, id.to_hex());
        assert_eq!(product.name, "Widget");
        assert!((product.price.amount() - 9.99).abs() < f64::EPSILON);
    }

    #[test]
    fn test_document_with_stored_negative_price_is_corrupt() {
        let document = ProductDocument {
            id: Some(ObjectId::new()),
            name: "Widget".to_string(),
            price: -1.0,
            category: "Tools".to_string(),
            image: String::new(),
        };

        assert!(matches!(
            document.into_model(),
            Err(RepositoryError::DataCorruption(_))
        ));
    }

    #[test]
    fn test_draft_document_omits_id() {
        let draft = ProductDraft {
            name: "Widget".to_string(),
            price: Price::parse(9.99).unwrap(),
            category: "Tools".to_string(),
            image: String::new(),
        };

        let document = ProductDocument::from_draft(&draft);
        let bson = mongodb::bson::to_document(&document).unwrap();
        assert!(!bson.contains_key("_id"));
        assert_eq!(bson.get_str("name").unwrap(), "Widget");
    }
}
