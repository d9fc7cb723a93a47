//! Catalog product types.

use serde::{Deserialize, Serialize};

use super::id::{ImageId, ProductId};
use super::price::Price;

/// An additional product image shown in the image collection strip.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductImage {
    pub id: ImageId,
    pub url: String,
}

/// A product as served by the catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: ProductId,
    pub name: String,
    pub brand: String,
    #[serde(default)]
    pub description: String,
    pub price: Price,
    /// Primary image URL.
    pub image: String,
    #[serde(default)]
    pub image_collection: Vec<ProductImage>,
    /// Sizes in catalog (declaration) order.
    #[serde(default)]
    pub sizes: Vec<String>,
    /// CSS color values.
    #[serde(default)]
    pub available_colors: Vec<String>,
    #[serde(default)]
    pub is_recommended: bool,
}

impl Product {
    /// First size in declaration order, used when the shopper never picked one.
    #[must_use]
    pub fn default_size(&self) -> Option<&str> {
        self.sizes.first().map(String::as_str)
    }

    /// Sizes sorted ascending for display in the size picker.
    #[must_use]
    pub fn sorted_sizes(&self) -> Vec<&str> {
        let mut sizes: Vec<&str> = self.sizes.iter().map(String::as_str).collect();
        sizes.sort_unstable();
        sizes
    }

    #[must_use]
    pub fn has_size(&self, size: &str) -> bool {
        self.sizes.iter().any(|s| s == size)
    }

    /// Whether `url` is the primary image or one of the collection images.
    #[must_use]
    pub fn has_image(&self, url: &str) -> bool {
        self.image == url || self.image_collection.iter().any(|img| img.url == url)
    }
}
