//! Shopping basket contents.
//!
//! The basket is keyed by product: a product is either in the basket (with the
//! size and color chosen when it was added) or not.

use serde::{Deserialize, Serialize};

use crate::types::{Price, Product, ProductId};

/// A product snapshot plus the options chosen at the time it was added.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BasketEntry {
    pub product_id: ProductId,
    pub name: String,
    pub brand: String,
    pub price: Price,
    pub image: String,
    pub selected_size: Option<String>,
    pub selected_color: Option<String>,
}

impl BasketEntry {
    /// Build an entry for `product`.
    ///
    /// A missing size falls back to the product's first declared size.
    #[must_use]
    pub fn new(product: &Product, size: Option<&str>, color: Option<&str>) -> Self {
        Self {
            product_id: product.id.clone(),
            name: product.name.clone(),
            brand: product.brand.clone(),
            price: product.price,
            image: product.image.clone(),
            selected_size: size.or_else(|| product.default_size()).map(str::to_owned),
            selected_color: color.map(str::to_owned),
        }
    }
}

/// Outcome of [`Basket::toggle`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BasketChange {
    Added,
    Removed,
}

/// Items the shopper intends to purchase.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Basket {
    entries: Vec<BasketEntry>,
}

impl Basket {
    #[must_use]
    pub fn contains(&self, id: &ProductId) -> bool {
        self.entries.iter().any(|entry| &entry.product_id == id)
    }

    /// Add the entry, or remove its product if it is already in the basket.
    pub fn toggle(&mut self, entry: BasketEntry) -> BasketChange {
        if self.remove(&entry.product_id) {
            BasketChange::Removed
        } else {
            self.entries.push(entry);
            BasketChange::Added
        }
    }

    /// Remove a product. Returns whether anything was removed.
    pub fn remove(&mut self, id: &ProductId) -> bool {
        let before = self.entries.len();
        self.entries.retain(|entry| &entry.product_id != id);
        self.entries.len() != before
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
