//! User repository.
//!
//! Login is an exact-match lookup on `username` + `password`; the
//! `username` field carries a unique index created at startup.

use mongodb::bson::doc;
use mongodb::bson::oid::ObjectId;
use mongodb::options::IndexOptions;
use mongodb::{Collection, IndexModel};
use serde::{Deserialize, Serialize};

use super::{RepositoryError, Store, is_duplicate_key};
use crate::models::{User, UserDraft};

/// Collection name.
const USERS_COLLECTION: &str = "users";

/// Stored shape of a user document.
#[derive(Debug, Serialize, Deserialize)]
struct UserDocument {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    id: Option<ObjectId>,
    username: String,
    password: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    phone: Option<String>,
}

impl UserDocument {
    fn from_draft(draft: &UserDraft) -> Self {
        Self {
            id: None,
            username: draft.username.clone(),
            password: draft.password.clone(),
            phone: draft.phone.clone(),
        }
    }

    fn into_model(self) -> User {
        User {
            id: self.id.map(|id| id.to_hex()).unwrap_or_default(),
            username: self.username,
            password: self.password,
            phone: self.phone,
        }
    }
}

/// Repository for user documents.
pub struct UserRepository {
    users: Collection<UserDocument>,
}

impl UserRepository {
    /// Create a new user repository.
    #[must_use]
    pub fn new(store: &Store) -> Self {
        Self {
            users: store.collection(USERS_COLLECTION),
        }
    }

    /// Create the unique index on `username`.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Driver` if index creation fails.
    pub(crate) async fn ensure_indexes(&self) -> Result<(), RepositoryError> {
        let index = IndexModel::builder()
            .keys(doc! { "username": 1 })
            .options(IndexOptions::builder().unique(true).build())
            .build();

        self.users.create_index(index).await?;
        Ok(())
    }

    /// Insert a new user and return it with its assigned id.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Conflict` if the username is taken and
    /// `RepositoryError::Driver` for other failures.
    pub async fn create(&self, draft: &UserDraft) -> Result<User, RepositoryError> {
        let mut document = UserDocument::from_draft(draft);

        let result = self.users.insert_one(&document).await.map_err(|e| {
            if is_duplicate_key(&e) {
                RepositoryError::Conflict(format!("username '{}' is taken", draft.username))
            } else {
                RepositoryError::Driver(e)
            }
        })?;
        document.id = result.inserted_id.as_object_id();

        Ok(document.into_model())
    }

    /// Look up a user by exact username and password match.
    ///
    /// Returns `None` when no user matches both fields.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Driver` if the query fails.
    pub async fn find_by_credentials(
        &self,
        username: &str,
        password: &str,
    ) -> Result<Option<User>, RepositoryError> {
        let found = self
            .users
            .find_one(doc! { "username": username, "password": password })
            .await?;

        Ok(found.map(UserDocument::into_model))
    }

    /// Delete a user by id.
    ///
    /// Returns `false` when no document matched.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Driver` if the delete fails.
    pub async fn delete(&self, id: ObjectId) -> Result<bool, RepositoryError> {
        let result = self.users.delete_one(doc! { "_id": id }).await?;
        Ok(result.deleted_count > 0)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_collection_name() {
        assert_eq!(USERS_COLLECTION, "users");
    }

    #[test]
    fn test_document_omits_missing_phone() {
        let draft = UserDraft {
            username: "alice".to_string(),
            password: "hunter2".to_string(),
            phone: None,
        };

        let bson = mongodb::bson::to_document(&UserDocument::from_draft(&draft)).unwrap();
        assert!(!bson.contains_key("phone"));
        assert_eq!(bson.get_str("username").unwrap(), "alice");
    }

    #[test]
    fn test_document_into_model() {
        let id = ObjectId::new();
        let document = UserDocument {
            id: Some(id),
            username: "alice".to_string(),
            password: "hunter2".to_string(),
            phone: Some("555-0100".to_string()),
        };

        let user = document.into_model();
        assert_eq!(user.id, id.to_hex());
        assert_eq!(user.phone.as_deref(), Some("555-0100"));
    }
}
