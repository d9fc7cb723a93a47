//! Cache types for catalog reads.

use std::sync::Arc;

use simplebrand_core::Product;

/// Cache key for catalog data.
#[derive(Debug, Clone, Hash, PartialEq, Eq)]
pub enum CacheKey {
    Products,
}

/// Cached value types.
#[derive(Debug, Clone)]
pub enum CacheValue {
    Products(Arc<Vec<Product>>),
}
