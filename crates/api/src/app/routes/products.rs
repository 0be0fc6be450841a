use std::sync::Arc;

use axum::{
    extract::Extension,
    http::StatusCode,
    response::IntoResponse,
    routing::get,
    Json, Router,
};

use catalog_products::Product;

use crate::app::errors;
use crate::app::services::AppServices;

pub fn router() -> Router {
    Router::new().route("/products", get(list_products).post(add_product))
}

pub async fn list_products(
    Extension(services): Extension<Arc<AppServices>>,
) -> axum::response::Response {
    match services.store().list_all().await {
        Ok(products) => {
            tracing::debug!(count = products.len(), "listed products");
            (StatusCode::OK, Json(products)).into_response()
        }
        Err(e) => errors::store_error_to_response(e),
    }
}

pub async fn add_product(
    Extension(services): Extension<Arc<AppServices>>,
    Json(body): Json<Product>,
) -> axum::response::Response {
    match services.store().save(body).await {
        Ok(saved) => {
            if let Some(id) = saved.id {
                tracing::info!(product_id = %id, "product saved");
            }
            (StatusCode::OK, Json(saved)).into_response()
        }
        Err(e) => errors::store_error_to_response(e),
    }
}
