//! Basket route handlers.
//!
//! Basket operations use HTMX for dynamic updates without full page reloads.
//! The basket itself lives in the session.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Form,
    extract::State,
    response::{AppendHeaders, IntoResponse, Response},
};
use serde::Deserialize;
use simplebrand_core::{Basket, BasketChange, ProductId};
use tower_sessions::Session;
use tracing::instrument;

use crate::error::{Result, add_breadcrumb};
use crate::middleware::session_keys;
use crate::state::AppState;
use crate::view::{BasketButton, ViewCoordinator, ViewQuery};

// =============================================================================
// Session Helpers
// =============================================================================

/// Get the basket from the session; an unreadable basket counts as empty.
pub async fn load_basket(session: &Session) -> Basket {
    match session.get::<Basket>(session_keys::BASKET).await {
        Ok(basket) => basket.unwrap_or_default(),
        Err(e) => {
            tracing::warn!("Failed to read basket from session: {e}");
            Basket::default()
        }
    }
}

/// Store the basket in the session.
async fn save_basket(
    session: &Session,
    basket: &Basket,
) -> std::result::Result<(), tower_sessions::session::Error> {
    session.insert(session_keys::BASKET, basket).await
}

/// Toggle form data, posted by the basket button.
#[derive(Debug, Deserialize)]
pub struct ToggleBasketForm {
    pub product_id: String,
    #[serde(default)]
    pub size: Option<String>,
    #[serde(default)]
    pub color: Option<String>,
}

/// Basket button fragment template (for HTMX).
#[derive(Template, WebTemplate)]
#[template(path = "partials/basket_button.html")]
pub struct BasketButtonTemplate {
    pub basket: BasketButton,
}

/// Basket count badge fragment template (for HTMX).
#[derive(Template, WebTemplate)]
#[template(path = "partials/basket_count.html")]
pub struct BasketCountTemplate {
    pub count: usize,
}

/// Add a product to the basket, or remove it if already there (HTMX).
///
/// Returns the refreshed button with an HTMX trigger so the count badge updates.
#[instrument(skip(state, session))]
pub async fn toggle(
    State(state): State<AppState>,
    session: Session,
    Form(form): Form<ToggleBasketForm>,
) -> Result<Response> {
    let id = ProductId::new(form.product_id);
    let product = state.catalog().product(&id).await?;

    let coordinator = ViewCoordinator::new(
        product,
        ViewQuery {
            image: None,
            size: form.size,
            color: form.color,
        },
    );
    let entry = coordinator.basket_entry();

    let mut basket = load_basket(&session).await;
    let change = basket.toggle(entry);
    save_basket(&session, &basket).await?;

    let message = match change {
        BasketChange::Added => "Item added to basket",
        BasketChange::Removed => "Item removed from basket",
    };
    add_breadcrumb("basket", message, Some(&[("product_id", id.as_str())][..]));
    tracing::info!(product_id = %id, items = basket.len(), "{message}");

    let button = BasketButton {
        product_id: id.to_string(),
        size: coordinator.selected_size().unwrap_or_default().to_string(),
        color: coordinator.selected_color().unwrap_or_default().to_string(),
        in_basket: change == BasketChange::Added,
    };

    Ok((
        AppendHeaders([("HX-Trigger", "basket-updated")]),
        BasketButtonTemplate { basket: button },
    )
        .into_response())
}

/// Get basket count badge (HTMX).
#[instrument(skip(session))]
pub async fn count(session: Session) -> impl IntoResponse {
    BasketCountTemplate {
        count: load_basket(&session).await.len(),
    }
}
