//! Product listing route handlers.

use askama::Template;
use askama_web::WebTemplate;
use axum::{extract::State, response::IntoResponse};
use simplebrand_core::{Fetch, Product};
use tracing::instrument;

use crate::catalog::CatalogError;
use crate::filters;
use crate::state::AppState;
use crate::view::{self, ProductCard};

/// Product listing page template.
#[derive(Template, WebTemplate)]
#[template(path = "shop/index.html")]
pub struct ShopTemplate {
    pub title: String,
    pub heading: &'static str,
    pub products: Fetch<Vec<ProductCard>>,
}

fn cards(products: &[Product]) -> Vec<ProductCard> {
    products.iter().map(ProductCard::from).collect()
}

fn settle(result: Result<Vec<ProductCard>, CatalogError>) -> Fetch<Vec<ProductCard>> {
    Fetch::settle(result.map_err(|e| {
        tracing::warn!("Failed to list products: {e}");
        e.user_message()
    }))
}

/// Display every product in the catalog.
#[instrument(skip(state))]
pub async fn index(State(state): State<AppState>) -> impl IntoResponse {
    let products = state.catalog().products().await.map(|all| cards(&all));
    ShopTemplate {
        title: view::document_title(Some("Shop")),
        heading: "Shop",
        products: settle(products),
    }
}

/// Display every recommended product ("See All").
///
/// Unlike the panel on the product page, this listing is not capped.
#[instrument(skip(state))]
pub async fn recommended(State(state): State<AppState>) -> impl IntoResponse {
    let products = state
        .catalog()
        .all_recommended()
        .await
        .map(|recommended| cards(&recommended));
    ShopTemplate {
        title: view::document_title(Some("Recommended Products")),
        heading: "Recommended Products",
        products: settle(products),
    }
}
