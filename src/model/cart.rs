use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::warn;

use super::ProductRef;

/// One product entry in the cart with an associated quantity.
///
/// `name`, `price` and `image` are denormalized copies captured from the
/// [`ProductRef`] when the line was first added.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CartLineItem {
    pub id: String,
    pub name: String,
    pub price: Decimal,
    pub image: String,
    /// Always >= 1 while the line is in a [`Cart`].
    pub quantity: u32,
}

impl CartLineItem {
    /// `price × quantity` for this line, or `None` if it cannot be represented.
    pub fn line_total(&self) -> Option<Decimal> {
        self.price.checked_mul(Decimal::from(self.quantity))
    }
}

/// Sum of line totals, or `None` if any step overflows.
pub fn checked_subtotal(items: &[CartLineItem]) -> Option<Decimal> {
    items
        .iter()
        .try_fold(Decimal::ZERO, |acc, item| acc.checked_add(item.line_total()?))
}

/// Which branch an add took. Drives the wording of the user notification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AddOutcome {
    /// A new line was appended with this quantity.
    Added { quantity: u32 },
    /// An existing line grew to this quantity.
    QuantityUpdated { quantity: u32 },
    /// Nothing changed: the quantity was zero, the price negative, or the
    /// resulting subtotal would not be representable.
    Ignored,
}

/// The cart aggregate: an insertion-ordered collection of line items, at most
/// one per product id.
///
/// Every line has a quantity of at least 1 and a non-negative price, and the
/// subtotal always fits in a [`Decimal`]. Mutations that would break this are
/// refused; deserialization goes through [`Cart::from_items`].
///
/// All methods are synchronous and infallible. Persistence and notifications
/// are layered on top by the cart actor.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(from = "Vec<CartLineItem>", into = "Vec<CartLineItem>")]
pub struct Cart {
    items: Vec<CartLineItem>,
}

impl From<Vec<CartLineItem>> for Cart {
    fn from(items: Vec<CartLineItem>) -> Self {
        Cart::from_items(items)
    }
}

impl From<Cart> for Vec<CartLineItem> {
    fn from(cart: Cart) -> Self {
        cart.items
    }
}

impl Cart {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a cart from persisted line items.
    ///
    /// Duplicate ids are merged into the first occurrence. Lines with a zero
    /// quantity or a negative price are dropped, as is any line that would
    /// push the subtotal past what a [`Decimal`] can hold. Dropped lines are
    /// logged.
    pub fn from_items(items: Vec<CartLineItem>) -> Self {
        let mut cart = Self::new();
        for item in items {
            if item.quantity == 0 {
                warn!(id = %item.id, "Dropping line with zero quantity");
                continue;
            }
            if item.price < Decimal::ZERO {
                warn!(id = %item.id, price = %item.price, "Dropping line with negative price");
                continue;
            }

            let (price, quantity) = match cart.get(&item.id) {
                Some(existing) => (existing.price, existing.quantity.saturating_add(item.quantity)),
                None => (item.price, item.quantity),
            };
            if cart.subtotal_with(&item.id, price, quantity).is_none() {
                warn!(id = %item.id, price = %item.price, quantity = item.quantity, "Dropping line with unrepresentable total");
                continue;
            }

            match cart.position(&item.id) {
                Some(idx) => cart.items[idx].quantity = quantity,
                None => cart.items.push(item),
            }
        }
        cart
    }

    pub fn items(&self) -> &[CartLineItem] {
        &self.items
    }

    pub fn get(&self, id: &str) -> Option<&CartLineItem> {
        self.items.iter().find(|item| item.id == id)
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    fn position(&self, id: &str) -> Option<usize> {
        self.items.iter().position(|item| item.id == id)
    }

    /// The subtotal if line `id` held `quantity` units at `price`.
    fn subtotal_with(&self, id: &str, price: Decimal, quantity: u32) -> Option<Decimal> {
        let others = self
            .items
            .iter()
            .filter(|item| item.id != id)
            .try_fold(Decimal::ZERO, |acc, item| acc.checked_add(item.line_total()?))?;
        others.checked_add(price.checked_mul(Decimal::from(quantity))?)
    }

    /// Adds `quantity` units of `product`.
    ///
    /// An existing line with the same id grows by `quantity`; otherwise a new
    /// line is appended. There is no upper bound beyond `u32::MAX`, where the
    /// quantity saturates.
    pub fn add_item(&mut self, product: ProductRef, quantity: u32) -> AddOutcome {
        if quantity == 0 || product.price < Decimal::ZERO {
            return AddOutcome::Ignored;
        }

        if let Some(idx) = self.position(&product.id) {
            let line = &self.items[idx];
            let grown = line.quantity.saturating_add(quantity);
            if self.subtotal_with(&product.id, line.price, grown).is_none() {
                return AddOutcome::Ignored;
            }
            self.items[idx].quantity = grown;
            return AddOutcome::QuantityUpdated { quantity: grown };
        }

        if self.subtotal_with(&product.id, product.price, quantity).is_none() {
            return AddOutcome::Ignored;
        }
        self.items.push(CartLineItem {
            id: product.id,
            name: product.name,
            price: product.price,
            image: product.image,
            quantity,
        });
        AddOutcome::Added { quantity }
    }

    /// Removes the line with `id`. Returns whether anything was removed.
    pub fn remove_item(&mut self, id: &str) -> bool {
        match self.position(id) {
            Some(idx) => {
                self.items.remove(idx);
                true
            }
            None => false,
        }
    }

    /// Overwrites the quantity of the line with `id`; zero removes the line.
    ///
    /// Returns whether the cart changed. Unknown ids are ignored, as is a
    /// quantity whose total would not be representable.
    pub fn set_quantity(&mut self, id: &str, quantity: u32) -> bool {
        if quantity == 0 {
            return self.remove_item(id);
        }
        let Some(idx) = self.position(id) else {
            return false;
        };
        let line = &self.items[idx];
        if line.quantity == quantity || self.subtotal_with(id, line.price, quantity).is_none() {
            return false;
        }
        self.items[idx].quantity = quantity;
        true
    }

    pub fn clear(&mut self) {
        self.items.clear();
    }

    /// Empties the cart and returns the lines it held.
    pub fn drain(&mut self) -> Vec<CartLineItem> {
        std::mem::take(&mut self.items)
    }

    /// Sum of all quantities (not the number of lines). Used for badges.
    pub fn item_count(&self) -> u64 {
        self.items.iter().map(|item| u64::from(item.quantity)).sum()
    }

    /// Sum of `price × quantity` over all lines.
    pub fn subtotal(&self) -> Decimal {
        // Mutations keep the sum representable; MAX is unreachable.
        checked_subtotal(&self.items).unwrap_or(Decimal::MAX)
    }
}
