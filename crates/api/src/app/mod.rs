//! HTTP API application wiring (Axum router + service wiring).
//!
//! - `services.rs`: the shared product store handle
//! - `routes/`: HTTP routes + handlers
//! - `dto.rs`: query DTOs and JSON mapping helpers
//! - `errors.rs`: consistent error responses

use std::sync::Arc;

use axum::{Extension, Router, routing::get};
use tower::ServiceBuilder;

use crate::config::ApiConfig;
use crate::middleware::{self, AuthState};

pub mod dto;
pub mod errors;
pub mod routes;
pub mod services;

use services::AppServices;

/// Build the full HTTP router (public entrypoint used by `main.rs`).
///
/// Every call gets its own empty in-memory store.
pub fn build_app(config: &ApiConfig) -> Router {
    build_router(
        AppServices::in_memory(),
        AuthState::new(config.api_token.as_str()),
    )
}

/// Build the router around existing services (tests, embedding).
pub fn build_router(services: AppServices, auth_state: AuthState) -> Router {
    let services = Arc::new(services);

    Router::new()
        .route("/", get(routes::system::hello))
        .route("/health", get(routes::system::health))
        .nest("/api", routes::router(auth_state))
        .fallback(routes::system::not_found)
        .layer(
            ServiceBuilder::new()
                .layer(axum::middleware::from_fn(middleware::log_requests))
                .layer(Extension(services)),
        )
}
