//! HTTP route handlers for storefront.
//!
//! # Route Structure
//!
//! ```text
//! GET  /health                          - Health check
//!
//! # Products
//! GET  /shop                            - All products
//! GET  /recommended                     - Recommended products
//! GET  /products/{id}                   - Product detail (?image=&size=&color=)
//! GET  /products/{id}/detail            - Product detail fragment (HTMX)
//! GET  /products/{id}/recommended       - Recommended panel fragment (HTMX)
//!
//! # Basket (HTMX fragments)
//! POST /basket/toggle                   - Add or remove a product
//! GET  /basket/count                    - Basket count badge
//! ```

pub mod basket;
pub mod products;
pub mod shop;

use axum::{
    Router,
    routing::{get, post},
};

use crate::state::AppState;

/// Named routes used by links in templates.
pub mod paths {
    use simplebrand_core::ProductId;

    pub const SHOP: &str = "/shop";
    pub const RECOMMENDED_PRODUCTS: &str = "/recommended";
    pub const BASKET_TOGGLE: &str = "/basket/toggle";
    pub const BASKET_COUNT: &str = "/basket/count";

    #[must_use]
    pub fn product(id: &ProductId) -> String {
        format!("/products/{}", urlencoding::encode(id.as_str()))
    }

    #[must_use]
    pub fn product_detail(id: &ProductId) -> String {
        format!("{}/detail", product(id))
    }

    #[must_use]
    pub fn product_recommended(id: &ProductId) -> String {
        format!("{}/recommended", product(id))
    }
}

/// Create the product routes router.
pub fn product_routes() -> Router<AppState> {
    Router::new()
        .route("/{id}", get(products::show))
        .route("/{id}/detail", get(products::detail))
        .route("/{id}/recommended", get(products::recommended))
}

/// Create all routes for the storefront.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route(paths::SHOP, get(shop::index))
        .route(paths::RECOMMENDED_PRODUCTS, get(shop::recommended))
        .route(paths::BASKET_TOGGLE, post(basket::toggle))
        .route(paths::BASKET_COUNT, get(basket::count))
        .nest("/products", product_routes())
}
