//! Theme domain types.

use serde::Serialize;

/// The site theme.
///
/// A singleton: at most one theme document ever exists, maintained via a
/// match-all upsert.
#[derive(Debug, Clone, Serialize)]
pub struct Theme {
    /// Primary color (free-form CSS value).
    pub color: String,
    /// Site display name.
    pub name: String,
    /// Logo reference: an `/uploads/...` path or empty.
    pub logo: String,
}

/// The validated field set written on every theme upsert.
#[derive(Debug, Clone)]
pub struct ThemeDraft {
    pub color: String,
    pub name: String,
    pub logo: String,
}
