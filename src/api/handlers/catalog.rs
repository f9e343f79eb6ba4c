//! Product catalog pass-through.

use super::{ErrorResponse, Failure};
use crate::api::AppState;
use axum::{
    extract::{rejection::PathRejection, Extension, Path},
    http::{header::CACHE_CONTROL, HeaderValue, StatusCode},
    response::{IntoResponse, Json, Response},
};
use serde_json::{json, Value};
use std::sync::Arc;
use tracing::{error, instrument};

const CACHE_POLICY: &str = "public, max-age=300";

pub const PRODUCTS_FAILED: &str = "Failed to fetch products";
pub const PRODUCT_FAILED: &str = "Failed to fetch product";
pub const MISSING_PRODUCT_ID: &str = "Missing product ID in request";
pub const INVALID_PRODUCT_ID: &str = "Invalid product ID in request";

fn cached(body: Value) -> Response {
    (
        StatusCode::OK,
        [(CACHE_CONTROL, HeaderValue::from_static(CACHE_POLICY))],
        Json(body),
    )
        .into_response()
}

/// Upstream HTTP error statuses are passed through; anything else is 500.
fn upstream_status(status: Option<u16>) -> StatusCode {
    status
        .and_then(|code| StatusCode::from_u16(code).ok())
        .filter(|code| code.is_client_error() || code.is_server_error())
        .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR)
}

#[utoipa::path(
    get,
    path = "/products",
    responses(
        (status = 200, description = "All products as returned by the catalog, wrapped in `products`", content_type = "application/json"),
        (status = 500, description = "Catalog unavailable", body = ErrorResponse)
    ),
    tag = "catalog"
)]
#[instrument(skip(state))]
pub async fn list_products(state: Extension<Arc<AppState>>) -> Response {
    match state.catalog().list_products().await {
        Ok(products) => cached(json!({ "products": products })),
        Err(e) => {
            error!("Error fetching products: {}", e);

            Failure::upstream(StatusCode::INTERNAL_SERVER_ERROR, PRODUCTS_FAILED, e.message)
                .into_response()
        }
    }
}

#[utoipa::path(
    get,
    path = "/products/{id}",
    params(
        ("id" = String, Path, description = "Catalog product id")
    ),
    responses(
        (status = 200, description = "Product as returned by the catalog, wrapped in `product`", content_type = "application/json"),
        (status = 400, description = "Missing or undecodable product id", body = ErrorResponse),
        (status = 500, description = "Catalog unavailable; upstream error statuses are passed through", body = ErrorResponse)
    ),
    tag = "catalog"
)]
#[instrument(skip(state))]
pub async fn product(
    state: Extension<Arc<AppState>>,
    id: Result<Path<String>, PathRejection>,
) -> Response {
    let id = match id {
        Ok(id) => id,
        Err(rejection) => {
            return Failure::rejected(rejection.status(), INVALID_PRODUCT_ID, rejection.body_text())
                .into_response();
        }
    };
    let id = id.trim();
    if id.is_empty() {
        return missing_product_id().await;
    }

    match state.catalog().product(id).await {
        Ok(product) => cached(json!({ "product": product })),
        Err(e) => {
            error!("Error fetching product ID {}: {}", id, e);

            Failure::upstream(upstream_status(e.status), PRODUCT_FAILED, e.message).into_response()
        }
    }
}

/// `GET /products/` and blank ids.
pub async fn missing_product_id() -> Response {
    Failure::validation(MISSING_PRODUCT_ID).into_response()
}
