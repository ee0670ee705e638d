use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// The product attributes a caller hands to the cart when adding an item.
///
/// These are copied into the line item at add-time and never re-synced, so a
/// later catalog price change does not affect what is already in the cart.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductRef {
    pub id: String,
    pub name: String,
    pub price: Decimal,
    pub image: String,
}

impl ProductRef {
    /// Creates a new product reference.
    ///
    /// # Arguments
    /// * `id` - Catalog identifier, used as the line item key
    /// * `name` - Display name
    /// * `price` - Unit price (non-negative)
    /// * `image` - Image URI
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        price: Decimal,
        image: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            price,
            image: image.into(),
        }
    }
}
