//! Subpage domain types.

use serde::Serialize;

/// A catalog subpage.
#[derive(Debug, Clone, Serialize)]
pub struct Subpage {
    /// Store-assigned identifier (hex string).
    pub id: String,
    /// Display name.
    pub name: String,
}
