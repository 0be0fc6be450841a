use axum::Router;

pub mod products;
pub mod system;

/// Router for every product endpoint.
pub fn router() -> Router {
    Router::new().merge(products::router())
}
