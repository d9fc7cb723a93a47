//! Product catalog client.
//!
//! # Architecture
//!
//! - The catalog is a JSON array of products read from disk
//! - The whole catalog is cached in memory via `moka` (5 minute TTL), so edits
//!   to the file show up without a restart
//! - A static source backs tests and demos
//!
//! # Example
//!
//! ```rust,ignore
//! use simplebrand_storefront::catalog::CatalogClient;
//!
//! let client = CatalogClient::from_file("crates/storefront/data/catalog.json");
//! let product = client.product(&ProductId::new("parka")).await?;
//! let recommended = client.recommended(6).await?;
//! ```

mod cache;

use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use moka::future::Cache;
use simplebrand_core::{Product, ProductId};
use thiserror::Error;
use tracing::{debug, instrument};

use cache::{CacheKey, CacheValue};

/// Errors that can occur when reading the catalog.
#[derive(Debug, Clone, Error)]
pub enum CatalogError {
    /// Catalog file could not be read.
    #[error("Catalog unavailable: {0}")]
    Io(Arc<std::io::Error>),

    /// Catalog file is not a valid product list.
    #[error("Catalog is malformed: {0}")]
    Parse(Arc<serde_json::Error>),

    /// Product does not exist.
    #[error("Product not found: {0}")]
    NotFound(ProductId),
}

impl CatalogError {
    /// Message safe to show to shoppers.
    ///
    /// I/O and parse details stay in the logs.
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            Self::NotFound(id) => format!("Product not found: {id}"),
            Self::Io(_) | Self::Parse(_) => "Catalog unavailable".to_string(),
        }
    }
}

impl From<std::io::Error> for CatalogError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(Arc::new(err))
    }
}

impl From<serde_json::Error> for CatalogError {
    fn from(err: serde_json::Error) -> Self {
        Self::Parse(Arc::new(err))
    }
}

/// Where product data comes from.
#[derive(Debug)]
enum Source {
    File(PathBuf),
    Static(Arc<Vec<Product>>),
}

/// Client for the product catalog.
///
/// Cheaply cloneable; clones share the cache.
#[derive(Clone)]
pub struct CatalogClient {
    inner: Arc<CatalogClientInner>,
}

struct CatalogClientInner {
    source: Source,
    cache: Cache<CacheKey, CacheValue>,
}

impl CatalogClient {
    /// Create a client reading the catalog from a JSON file.
    #[must_use]
    pub fn from_file(path: impl AsRef<Path>) -> Self {
        Self::with_source(Source::File(path.as_ref().to_path_buf()))
    }

    /// Create a client over a fixed product list.
    #[must_use]
    pub fn from_products(products: Vec<Product>) -> Self {
        Self::with_source(Source::Static(Arc::new(products)))
    }

    fn with_source(source: Source) -> Self {
        let cache = Cache::builder()
            .max_capacity(100)
            .time_to_live(Duration::from_secs(300)) // 5 minutes
            .build();

        Self {
            inner: Arc::new(CatalogClientInner { source, cache }),
        }
    }

    /// Load every product, from cache when possible.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError` if the catalog file is missing or malformed.
    /// Failures are not cached.
    #[instrument(skip(self))]
    pub async fn products(&self) -> Result<Arc<Vec<Product>>, CatalogError> {
        let products = match &self.inner.source {
            Source::Static(products) => return Ok(Arc::clone(products)),
            Source::File(path) => {
                if let Some(CacheValue::Products(products)) =
                    self.inner.cache.get(&CacheKey::Products).await
                {
                    debug!("catalog cache hit");
                    return Ok(products);
                }
                debug!(path = %path.display(), "loading catalog from disk");
                let bytes = tokio::fs::read(path).await?;
                Arc::new(serde_json::from_slice::<Vec<Product>>(&bytes)?)
            }
        };

        self.inner
            .cache
            .insert(CacheKey::Products, CacheValue::Products(Arc::clone(&products)))
            .await;

        Ok(products)
    }

    /// Get a product by ID.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError::NotFound` if no product has this ID, or any
    /// error from loading the catalog.
    #[instrument(skip(self, id), fields(product_id = %id))]
    pub async fn product(&self, id: &ProductId) -> Result<Product, CatalogError> {
        self.products()
            .await?
            .iter()
            .find(|product| &product.id == id)
            .cloned()
            .ok_or_else(|| CatalogError::NotFound(id.clone()))
    }

    /// Get up to `count` recommended products, in catalog order.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError` if the catalog cannot be loaded.
    #[instrument(skip(self))]
    pub async fn recommended(&self, count: usize) -> Result<Vec<Product>, CatalogError> {
        Ok(self
            .products()
            .await?
            .iter()
            .filter(|product| product.is_recommended)
            .take(count)
            .cloned()
            .collect())
    }

    /// Get every recommended product, in catalog order.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError` if the catalog cannot be loaded.
    pub async fn all_recommended(&self) -> Result<Vec<Product>, CatalogError> {
        self.recommended(usize::MAX).await
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use simplebrand_core::{CurrencyCode, Price};

    fn product(id: &str, recommended: bool) -> Product {
        Product {
            id: ProductId::new(id),
            name: format!("Product {id}"),
            brand: "Acme".to_string(),
            description: String::new(),
            price: Price::from_minor_units(1_000, CurrencyCode::USD),
            image: format!("/img/{id}.jpg"),
            image_collection: Vec::new(),
            sizes: vec!["M".to_string()],
            available_colors: Vec::new(),
            is_recommended: recommended,
        }
    }

    #[tokio::test]
    async fn test_product_lookup() {
        let client = CatalogClient::from_products(vec![product("a", false), product("b", true)]);
        let found = client.product(&ProductId::new("b")).await.unwrap();
        assert_eq!(found.name, "Product b");
    }

    #[tokio::test]
    async fn test_product_not_found() {
        let client = CatalogClient::from_products(vec![product("a", false)]);
        let err = client.product(&ProductId::new("zzz")).await.unwrap_err();
        assert!(matches!(err, CatalogError::NotFound(ref id) if id.as_str() == "zzz"));
        assert_eq!(err.to_string(), "Product not found: zzz");
    }

    #[tokio::test]
    async fn test_recommended_filters_and_limits() {
        let client = CatalogClient::from_products(vec![
            product("a", true),
            product("b", false),
            product("c", true),
            product("d", true),
        ]);
        let recommended = client.recommended(2).await.unwrap();
        let ids: Vec<_> = recommended.iter().map(|p| p.id.as_str()).collect();
        assert_eq!(ids, vec!["a", "c"]);
    }

    #[tokio::test]
    async fn test_missing_file_is_io_error() {
        let client = CatalogClient::from_file("/nonexistent/catalog.json");
        let err = client.recommended(6).await.unwrap_err();
        assert!(matches!(err, CatalogError::Io(_)));
    }

    #[tokio::test]
    async fn test_all_recommended_has_no_limit() {
        let products = (0..8).map(|i| product(&format!("p{i}"), i != 3)).collect();
        let client = CatalogClient::from_products(products);
        assert_eq!(client.recommended(6).await.unwrap().len(), 6);
        assert_eq!(client.all_recommended().await.unwrap().len(), 7);
    }

    #[test]
    fn test_user_message_hides_details() {
        let io = CatalogError::from(std::io::Error::other("disk gone"));
        assert_eq!(io.user_message(), "Catalog unavailable");

        let parse = CatalogError::from(serde_json::from_str::<Vec<Product>>("[1]").unwrap_err());
        assert_eq!(parse.user_message(), "Catalog unavailable");

        let missing = CatalogError::NotFound(ProductId::new("zzz"));
        assert_eq!(missing.user_message(), "Product not found: zzz");
    }

    #[tokio::test]
    async fn test_file_is_cached() {
        let path = std::env::temp_dir().join(format!("catalog-{}.json", uuid::Uuid::new_v4()));
        let json = serde_json::to_vec(&vec![product("a", true)]).unwrap();
        tokio::fs::write(&path, json).await.unwrap();

        let client = CatalogClient::from_file(&path);
        assert_eq!(client.products().await.unwrap().len(), 1);

        tokio::fs::write(&path, b"not json").await.unwrap();
        assert_eq!(client.products().await.unwrap().len(), 1);

        tokio::fs::remove_file(&path).await.unwrap();
    }

    #[tokio::test]
    async fn test_malformed_file_is_parse_error() {
        let path = std::env::temp_dir().join(format!("catalog-{}.json", uuid::Uuid::new_v4()));
        tokio::fs::write(&path, b"[{\"id\": 1}]").await.unwrap();

        let client = CatalogClient::from_file(&path);
        assert!(matches!(
            client.products().await.unwrap_err(),
            CatalogError::Parse(_)
        ));

        tokio::fs::remove_file(&path).await.unwrap();
    }

    #[test]
    fn test_bundled_catalog_images_exist() {
        let root = Path::new(env!("CARGO_MANIFEST_DIR"));
        let bytes = std::fs::read(root.join("data/catalog.json")).unwrap();
        let products: Vec<Product> = serde_json::from_slice(&bytes).unwrap();

        for product in &products {
            let urls = std::iter::once(&product.image)
                .chain(product.image_collection.iter().map(|img| &img.url));
            for url in urls {
                let file = url.strip_prefix("/static/").unwrap();
                assert!(root.join("static").join(file).is_file(), "missing {url}");
            }
        }
    }
}
