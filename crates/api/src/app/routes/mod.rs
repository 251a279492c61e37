use axum::Router;

pub mod system;
pub mod warehouse;

/// Router for all inventory endpoints.
pub fn router() -> Router {
    Router::new().nest("/api/warehouse", warehouse::router())
}
