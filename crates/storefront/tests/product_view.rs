//! Router-level tests for the product detail view.

#![allow(clippy::unwrap_used, clippy::indexing_slicing)]

use std::path::PathBuf;
use std::time::Duration;

use axum::{
    Router,
    body::Body,
    http::{Request, StatusCode, header},
    response::Response,
};
use simplebrand_core::{CurrencyCode, ImageId, Price, Product, ProductId, ProductImage};
use simplebrand_storefront::{
    app,
    catalog::CatalogClient,
    config::{CatalogConfig, SentryConfig, StorefrontConfig},
    middleware::REQUEST_ID_HEADER,
    state::AppState,
};
use tower::ServiceExt;

fn test_config() -> StorefrontConfig {
    StorefrontConfig {
        host: "127.0.0.1".parse().unwrap(),
        port: 3000,
        base_url: "http://localhost:3000".to_string(),
        catalog: CatalogConfig {
            path: PathBuf::from("unused.json"),
            recommended_count: 6,
            product_fetch_timeout: Duration::from_secs(5),
        },
        sentry: SentryConfig::default(),
    }
}

fn product(id: &str, name: &str, recommended: bool) -> Product {
    Product {
        id: ProductId::new(id),
        name: name.to_string(),
        brand: "Burton".to_string(),
        description: format!("{name} description"),
        price: Price::from_minor_units(12_900, CurrencyCode::USD),
        image: format!("/img/{id}.jpg"),
        image_collection: vec![ProductImage {
            id: ImageId::new(format!("{id}-back")),
            url: format!("/img/{id}-back.jpg"),
        }],
        sizes: vec!["M".to_string(), "S".to_string(), "L".to_string()],
        available_colors: vec!["#000000".to_string(), "#ff0000".to_string()],
        is_recommended: recommended,
    }
}

fn test_app() -> Router {
    let catalog = CatalogClient::from_products(vec![
        product("parka", "Parka", true),
        product("beanie", "Beanie", true),
        product("gloves", "Gloves", false),
    ]);
    app(AppState::with_catalog(test_config(), catalog))
}

fn broken_app() -> Router {
    let catalog = CatalogClient::from_file("/nonexistent/catalog.json");
    app(AppState::with_catalog(test_config(), catalog))
}

async fn get(app: &Router, uri: &str) -> Response {
    app.clone()
        .oneshot(Request::get(uri).body(Body::empty()).unwrap())
        .await
        .unwrap()
}

async fn body_text(response: Response) -> String {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    String::from_utf8(bytes.to_vec()).unwrap()
}

async fn toggle_basket(app: &Router, cookie: Option<&str>, form: &str) -> Response {
    let mut request = Request::post("/basket/toggle")
        .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded");
    if let Some(cookie) = cookie {
        request = request.header(header::COOKIE, cookie);
    }
    app.clone()
        .oneshot(request.body(Body::from(form.to_string())).unwrap())
        .await
        .unwrap()
}

fn session_cookie(response: &Response) -> String {
    let set_cookie = response
        .headers()
        .get(header::SET_COOKIE)
        .unwrap()
        .to_str()
        .unwrap();
    set_cookie.split(';').next().unwrap().to_string()
}

#[tokio::test]
async fn test_health() {
    let response = get(&test_app(), "/health").await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_text(response).await, "ok");
}

#[tokio::test]
async fn test_product_page_renders_primary_image_first() {
    let response = get(&test_app(), "/products/parka").await;
    assert_eq!(response.status(), StatusCode::OK);

    let html = body_text(response).await;
    assert!(html.contains("<title>View Parka</title>"));
    assert!(html.contains(r#"class="product-modal-image" alt="Parka" src="/img/parka.jpg""#));
    assert!(html.contains("$129.00"));
    assert!(html.contains("Add To Basket"));
    assert!(!html.contains("product-modal-image-duplicate"));
    assert!(!html.contains("Loading Product..."));
}

#[tokio::test]
async fn test_selected_color_tints_duplicate_image() {
    let html = body_text(get(&test_app(), "/products/parka?color=%23ff0000").await).await;

    assert!(html.contains("product-modal-image-duplicate"));
    assert!(html.contains("drop-shadow(0px 10px 10px #ff0000)"));
    assert_eq!(html.matches("color-item-selected").count(), 1);
}

#[tokio::test]
async fn test_unknown_color_is_ignored() {
    let html = body_text(get(&test_app(), "/products/parka?color=%2300ff00").await).await;

    assert!(!html.contains("product-modal-image-duplicate"));
    assert!(!html.contains("color-item-selected"));
}

#[tokio::test]
async fn test_selected_image_from_query() {
    let html = body_text(get(&test_app(), "/products/parka?image=%2Fimg%2Fparka-back.jpg").await).await;
    assert!(html.contains(r#"class="product-modal-image" alt="Parka" src="/img/parka-back.jpg""#));
}

#[tokio::test]
async fn test_sizes_are_listed_sorted() {
    let html = body_text(get(&test_app(), "/products/parka").await).await;

    let l = html.find(r#"<option value="L""#).unwrap();
    let m = html.find(r#"<option value="M""#).unwrap();
    let s = html.find(r#"<option value="S""#).unwrap();
    assert!(l < m && m < s);
}

#[tokio::test]
async fn test_missing_product_shows_message() {
    let response = get(&test_app(), "/products/nope").await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let html = body_text(response).await;
    assert!(html.contains("Product not found: nope"));
    assert!(html.contains("<title>View Item</title>"));
    assert!(!html.contains("Try Again"));
}

#[tokio::test]
async fn test_detail_fragment_has_no_layout() {
    let html = body_text(get(&test_app(), "/products/parka/detail?size=L").await).await;

    assert!(html.contains("<title>View Parka</title>"));
    assert!(html.contains(r#"id="product-content""#));
    assert!(html.contains(r#"<option value="L" selected>"#));
    assert!(!html.contains("<footer"));
}

#[tokio::test]
async fn test_detail_fragment_swaps_in_missing_product_message() {
    let response = get(&test_app(), "/products/nope/detail").await;
    assert_eq!(response.status(), StatusCode::OK);

    let html = body_text(response).await;
    assert!(html.contains(r#"id="product-content""#));
    assert!(html.contains("Product not found: nope"));
    assert!(!html.contains("Loading Product..."));
}

#[tokio::test]
async fn test_detail_fragment_hides_catalog_failure_details() {
    let response = get(&broken_app(), "/products/parka/detail").await;
    assert_eq!(response.status(), StatusCode::OK);

    let html = body_text(response).await;
    assert!(html.contains("Catalog unavailable"));
    assert!(!html.contains("os error"));
    assert!(!html.contains("nonexistent"));
}

#[tokio::test]
async fn test_product_page_failure_keeps_error_status() {
    let response = get(&broken_app(), "/products/parka").await;
    assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
    assert!(!body_text(response).await.contains("os error"));
}

#[tokio::test]
async fn test_recommended_panel_lists_recommended_products() {
    let html = body_text(get(&test_app(), "/products/parka/recommended").await).await;

    assert!(html.contains("Parka"));
    assert!(html.contains("Beanie"));
    assert!(!html.contains("Gloves"));
    assert!(!html.contains("Try Again"));
}

#[tokio::test]
async fn test_recommended_panel_offers_retry_on_failure() {
    let response = get(&broken_app(), "/products/parka/recommended").await;
    assert_eq!(response.status(), StatusCode::OK);

    let html = body_text(response).await;
    assert!(html.contains("Catalog unavailable"));
    assert!(!html.contains("os error"));
    assert!(html.contains("Try Again"));
    assert!(html.contains(r#"hx-get="/products/parka/recommended""#));
}

#[tokio::test]
async fn test_product_page_waits_for_recommended_panel() {
    let html = body_text(get(&test_app(), "/products/parka").await).await;

    assert!(html.contains(r#"hx-get="/products/parka/recommended""#));
    assert_eq!(html.matches("product-card-skeleton").count(), 3);
}

#[tokio::test]
async fn test_basket_toggle_adds_then_removes() {
    let app = test_app();

    let response = toggle_basket(&app, None, "product_id=parka&size=&color=").await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response.headers().get("HX-Trigger").unwrap(),
        "basket-updated"
    );
    let cookie = session_cookie(&response);
    assert!(body_text(response).await.contains("Remove From Basket"));

    let count = app
        .clone()
        .oneshot(
            Request::get("/basket/count")
                .header(header::COOKIE, &cookie)
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(body_text(count).await.trim(), "1");

    let page = app
        .clone()
        .oneshot(
            Request::get("/products/parka")
                .header(header::COOKIE, &cookie)
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert!(body_text(page).await.contains("Remove From Basket"));

    let response = toggle_basket(&app, Some(&cookie), "product_id=parka&size=S&color=%23000000").await;
    assert!(body_text(response).await.contains("Add To Basket"));
}

#[tokio::test]
async fn test_basket_toggle_unknown_product() {
    let response = toggle_basket(&test_app(), None, "product_id=nope").await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_shop_and_recommended_listings() {
    let app = test_app();

    let shop = body_text(get(&app, "/shop").await).await;
    assert!(shop.contains("Gloves"));
    assert!(shop.contains(r#"href="/products/parka""#));

    let recommended = body_text(get(&app, "/recommended").await).await;
    assert!(recommended.contains("Recommended Products"));
    assert!(!recommended.contains("Gloves"));
}

#[tokio::test]
async fn test_see_all_is_not_capped() {
    let products = (1..=8)
        .map(|i| product(&format!("item-{i}"), &format!("Item {i}"), true))
        .collect();
    let app = app(AppState::with_catalog(
        test_config(),
        CatalogClient::from_products(products),
    ));

    let panel = body_text(get(&app, "/products/item-1/recommended").await).await;
    assert_eq!(panel.matches(r#"class="product-card""#).count(), 6);

    let all = body_text(get(&app, "/recommended").await).await;
    assert_eq!(all.matches(r#"class="product-card""#).count(), 8);
    assert!(all.contains("Item 8"));
}

#[tokio::test]
async fn test_shop_failure_shows_message() {
    let html = body_text(get(&broken_app(), "/shop").await).await;
    assert!(html.contains("Catalog unavailable"));
    assert!(!html.contains("os error"));
}

#[tokio::test]
async fn test_response_headers() {
    let response = get(&test_app(), "/products/parka").await;
    assert!(response.headers().contains_key(REQUEST_ID_HEADER));
    assert_eq!(response.headers().get("x-frame-options").unwrap(), "DENY");
    assert!(response.headers().contains_key("content-security-policy"));
}
