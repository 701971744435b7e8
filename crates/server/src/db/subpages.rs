//! Subpage repository.

use mongodb::Collection;
use mongodb::bson::doc;
use mongodb::bson::oid::ObjectId;
use mongodb::options::{FindOneAndUpdateOptions, ReturnDocument};
use serde::{Deserialize, Serialize};

use super::{RepositoryError, Store};
use crate::models::Subpage;

/// Collection name.
const SUBPAGES_COLLECTION: &str = "subpages";

/// Stored shape of a subpage document.
#[derive(Debug, Serialize, Deserialize)]
struct SubpageDocument {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    id: Option<ObjectId>,
    name: String,
}

impl SubpageDocument {
    fn into_model(self) -> Subpage {
        Subpage {
            id: self.id.map(|id| id.to_hex()).unwrap_or_default(),
            name: self.name,
        }
    }
}

/// Repository for subpage documents.
pub struct SubpageRepository {
    subpages: Collection<SubpageDocument>,
}

impl SubpageRepository {
    /// Create a new subpage repository.
    #[must_use]
    pub fn new(store: &Store) -> Self {
        Self {
            subpages: store.collection(SUBPAGES_COLLECTION),
        }
    }

    /// Insert a new subpage and return it with its assigned id.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Driver` if the insert fails.
    pub async fn create(&self, name: &str) -> Result<Subpage, RepositoryError> {
        let mut document = SubpageDocument {
            id: None,
            name: name.to_owned(),
        };

        let result = self.subpages.insert_one(&document).await?;
        document.id = result.inserted_id.as_object_id();

        Ok(document.into_model())
    }

    /// Rename an existing subpage.
    ///
    /// Returns `None` when no document has the given id.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Driver` if the update fails.
    pub async fn update(
        &self,
        id: ObjectId,
        name: &str,
    ) -> Result<Option<Subpage>, RepositoryError> {
        let options = FindOneAndUpdateOptions::builder()
            .return_document(ReturnDocument::After)
            .build();

        let updated = self
            .subpages
            .find_one_and_update(doc! { "_id": id }, doc! { "$set": { "name": name } })
            .with_options(options)
            .await?;

        Ok(updated.map(SubpageDocument::into_model))
    }

    /// Delete a subpage by id.
    ///
    /// Returns `false` when no document matched.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Driver` if the delete fails.
    pub async fn delete(&self, id: ObjectId) -> Result<bool, RepositoryError> {
        let result = self.subpages.delete_one(doc! { "_id": id }).await?;
        Ok(result.deleted_count > 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_collection_name() {
        assert_eq!(SUBPAGES_COLLECTION, "subpages");
    }

    #[test]
    fn test_document_into_model() {
        let id = ObjectId::new();
        let document = SubpageDocument {
            id: Some(id),
            name: "About".to_string(),
        };

        let subpage = document.into_model();
        assert_eq!(subpage.id, id.to_hex());
        assert_eq!(subpage.name, "About");
    }
}
