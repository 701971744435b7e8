//! User domain types.

use serde::Serialize;

/// A shop user.
///
/// The stored password is plain text and the login response returns the
/// full document, password included. That mirrors what the admin frontend
/// expects today; see DESIGN.md for the flagged implications.
#[derive(Debug, Clone, Serialize)]
pub struct User {
    /// Store-assigned identifier (hex string).
    pub id: String,
    /// Login name, unique across the collection.
    pub username: String,
    /// Plain-text password.
    pub password: String,
    /// Optional contact phone number.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
}

/// The validated field set written on user registration.
#[derive(Debug, Clone)]
pub struct UserDraft {
    pub username: String,
    pub password: String,
    pub phone: Option<String>,
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_phone_omitted_when_absent() {
        let user = User {
            id: "64f000000000000000000002".to_string(),
            username: "alice".to_string(),
            password: "hunter2".to_string(),
            phone: None,
        };

        let json = serde_json::to_value(&user).unwrap();
        assert!(json.get("phone").is_none());
        assert_eq!(json["username"], "alice");
    }
}
