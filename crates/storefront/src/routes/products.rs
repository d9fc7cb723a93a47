//! Product route handlers.
//!
//! The detail page fetches its product within the configured budget. If the
//! catalog is slower than that, the page renders the loading state and HTMX
//! pulls the detail fragment, which waits for the fetch to settle. The
//! recommended panel always loads in its own request.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
};
use simplebrand_core::{Fetch, Product, ProductId};
use tower_sessions::Session;
use tracing::instrument;

use crate::catalog::CatalogError;
use crate::filters;
use crate::routes::basket::load_basket;
use crate::routes::paths;
use crate::state::AppState;
use crate::view::{self, ProductCard, ProductView, RecommendedPanel, ViewCoordinator, ViewQuery};

/// Product detail page template.
#[derive(Template, WebTemplate)]
#[template(path = "products/show.html")]
pub struct ProductShowTemplate {
    pub title: String,
    pub product: Fetch<ProductView>,
    pub detail_href: String,
    pub recommended: RecommendedPanel,
}

/// Product detail fragment template (for HTMX).
#[derive(Template, WebTemplate)]
#[template(path = "partials/product_content.html")]
pub struct ProductContentTemplate {
    pub title: String,
    pub product: Fetch<ProductView>,
    pub detail_href: String,
    pub recommended: RecommendedPanel,
}

/// Recommended panel fragment template (for HTMX).
#[derive(Template, WebTemplate)]
#[template(path = "partials/recommended.html")]
pub struct RecommendedTemplate {
    pub recommended: RecommendedPanel,
}

/// Rendered state of the product page, shared by the page and the fragment.
struct ProductPage {
    status: StatusCode,
    title: String,
    product: Fetch<ProductView>,
    detail_href: String,
    recommended: RecommendedPanel,
}

impl ProductPage {
    fn build(
        id: &ProductId,
        product: Option<Result<Product, CatalogError>>,
        query: ViewQuery,
        in_basket: bool,
    ) -> Self {
        let mut status = StatusCode::OK;
        let mut title = view::product_title(None);
        let mut detail_href = view::with_query(
            paths::product_detail(id),
            &query.to_query_string(),
        );

        let product = match product {
            None => Fetch::Pending,
            Some(Ok(product)) => {
                title = view::product_title(Some(&product));
                let coordinator = ViewCoordinator::new(product, query);
                detail_href = coordinator.detail_href();
                Fetch::Ready(coordinator.render(in_basket))
            }
            Some(Err(err)) => {
                status = match err {
                    CatalogError::NotFound(_) => StatusCode::NOT_FOUND,
                    CatalogError::Io(_) | CatalogError::Parse(_) => StatusCode::BAD_GATEWAY,
                };
                tracing::warn!(product_id = %id, error = %err, "Failed to fetch product");
                Fetch::Failed(err.user_message())
            }
        };

        Self {
            status,
            title,
            product,
            detail_href,
            recommended: RecommendedPanel::pending(id),
        }
    }

    fn into_show(self) -> (StatusCode, ProductShowTemplate) {
        (
            self.status,
            ProductShowTemplate {
                title: self.title,
                product: self.product,
                detail_href: self.detail_href,
                recommended: self.recommended,
            },
        )
    }

    /// The fragment answers 200 even on failure; HTMX only swaps 2xx bodies
    /// over the loading state.
    fn into_content(self) -> ProductContentTemplate {
        ProductContentTemplate {
            title: self.title,
            product: self.product,
            detail_href: self.detail_href,
            recommended: self.recommended,
        }
    }
}

/// Display product detail page.
#[instrument(skip(state, session, query))]
pub async fn show(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Query(query): Query<ViewQuery>,
    session: Session,
) -> impl IntoResponse {
    let id = ProductId::new(id);
    let budget = state.config().catalog.product_fetch_timeout;

    let product = if let Ok(result) =
        tokio::time::timeout(budget, state.catalog().product(&id)).await
    {
        Some(result)
    } else {
        tracing::debug!(product_id = %id, "Product fetch still pending, rendering loading state");
        None
    };

    let in_basket = load_basket(&session).await.contains(&id);
    ProductPage::build(&id, product, query, in_basket).into_show()
}

/// Display product detail fragment (for HTMX).
#[instrument(skip(state, session, query))]
pub async fn detail(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Query(query): Query<ViewQuery>,
    session: Session,
) -> impl IntoResponse {
    let id = ProductId::new(id);
    let product = state.catalog().product(&id).await;
    let in_basket = load_basket(&session).await.contains(&id);
    ProductPage::build(&id, Some(product), query, in_basket).into_content()
}

/// Display recommended products panel (for HTMX).
///
/// Also serves the panel's "Try Again" action.
#[instrument(skip(state))]
pub async fn recommended(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> impl IntoResponse {
    let id = ProductId::new(id);
    let count = state.config().catalog.recommended_count;

    let result = state.catalog().recommended(count).await.map_err(|e| {
        tracing::warn!("Failed to fetch recommended products: {e}");
        e.user_message()
    });

    let products = Fetch::settle(result)
        .map(|products| products.iter().map(ProductCard::from).collect());

    RecommendedTemplate {
        recommended: RecommendedPanel::with_products(&id, products),
    }
}
