//! Theme repository.
//!
//! The theme is a singleton: every write targets the one existing document
//! through a match-all upsert, so the collection never grows past a single
//! entry.

use mongodb::Collection;
use mongodb::bson::doc;
use mongodb::bson::oid::ObjectId;
use mongodb::options::{FindOneAndUpdateOptions, ReturnDocument};
use serde::{Deserialize, Serialize};

use super::{RepositoryError, Store};
use crate::models::{Theme, ThemeDraft};

/// Collection name.
const THEMES_COLLECTION: &str = "themes";

/// Stored shape of the theme document.
#[derive(Debug, Serialize, Deserialize)]
struct ThemeDocument {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    id: Option<ObjectId>,
    color: String,
    name: String,
    logo: String,
}

impl ThemeDocument {
    fn into_model(self) -> Theme {
        Theme {
            color: self.color,
            name: self.name,
            logo: self.logo,
        }
    }
}

/// Repository for the singleton theme document.
pub struct ThemeRepository {
    themes: Collection<ThemeDocument>,
}

impl ThemeRepository {
    /// Create a new theme repository.
    #[must_use]
    pub fn new(store: &Store) -> Self {
        Self {
            themes: store.collection(THEMES_COLLECTION),
        }
    }

    /// Replace the singleton theme, creating it if absent.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Driver` if the upsert fails.
    pub async fn upsert(&self, draft: &ThemeDraft) -> Result<Theme, RepositoryError> {
        let options = FindOneAndUpdateOptions::builder()
            .upsert(true)
            .return_document(ReturnDocument::After)
            .build();

        let updated = self
            .themes
            .find_one_and_update(
                doc! {},
                doc! { "$set": {
                    "color": &draft.color,
                    "name": &draft.name,
                    "logo": &draft.logo,
                } },
            )
            .with_options(options)
            .await?;

        // With upsert + ReturnDocument::After the driver always hands back a
        // document; a missing one means the store misbehaved.
        updated.map(ThemeDocument::into_model).ok_or_else(|| {
            RepositoryError::DataCorruption("theme upsert returned no document".to_string())
        })
    }

    /// Fetch the singleton theme, if one has been written.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Driver` if the query fails.
    pub async fn find(&self) -> Result<Option<Theme>, RepositoryError> {
        let found = self.themes.find_one(doc! {}).await?;
        Ok(found.map(ThemeDocument::into_model))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_collection_name() {
        assert_eq!(THEMES_COLLECTION, "themes");
    }

    #[test]
    fn test_document_into_model() {
        let document = ThemeDocument {
            id: Some(ObjectId::new()),
            color: "#ff8800".to_string(),
            name: "Artemia".to_string(),
            logo: "/uploads/logo.png".to_string(),
        };

        let theme = document.into_model();
        assert_eq!(theme.color, "#ff8800");
        assert_eq!(theme.name, "Artemia");
        assert_eq!(theme.logo, "/uploads/logo.png");
    }
}
