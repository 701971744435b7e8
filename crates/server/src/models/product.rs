//! Product domain types.

use serde::Serialize;

use artemia_core::Price;

/// A catalog product.
#[derive(Debug, Clone, Serialize)]
pub struct Product {
    /// Store-assigned identifier (hex string).
    pub id: String,
    /// Display name.
    pub name: String,
    /// Price, always zero or greater.
    pub price: Price,
    /// Free-form category label.
    pub category: String,
    /// Image reference: an `/uploads/...` path, a data URI, or empty.
    pub image: String,
}

/// The validated field set written on product create and update.
///
/// Updates are full replacements, so the draft always carries every field,
/// including the resolved image.
#[derive(Debug, Clone)]
pub struct ProductDraft {
    pub name: String,
    pub price: Price,
    pub category: String,
    pub image: String,
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_product_json_shape() {
        let product = Product {
            id: "64f000000000000000000001".to_string(),
            name: "Widget".to_string(),
            price: Price::parse(9.99).unwrap(),
            category: "Tools".to_string(),
            image: String::new(),
        };

        let json = serde_json::to_value(&product).unwrap();
        assert_eq!(json["id"], "64f000000000000000000001");
        assert_eq!(json["name"], "Widget");
        assert_eq!(json["price"], 9.99);
        assert_eq!(json["category"], "Tools");
        assert_eq!(json["image"], "");
    }
}
