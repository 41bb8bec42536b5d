use axum::Router;

use crate::middleware::AuthState;

pub mod products;
pub mod system;

/// Router for everything under `/api`.
pub fn router(auth_state: AuthState) -> Router {
    Router::new().nest("/products", products::router(auth_state))
}
