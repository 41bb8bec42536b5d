use std::{sync::Arc, time::Instant};

use axum::{
    extract::State,
    http::{HeaderMap, StatusCode},
    middleware::Next,
    response::Response,
};

use catalog_core::DomainError;

use crate::app::errors;

#[derive(Clone)]
pub struct AuthState {
    pub api_token: Arc<str>,
}

impl AuthState {
    pub fn new(api_token: impl Into<Arc<str>>) -> Self {
        Self {
            api_token: api_token.into(),
        }
    }
}

/// Gate for write routes: the bearer token must equal the configured API token.
pub async fn require_api_token(
    State(state): State<AuthState>,
    req: axum::http::Request<axum::body::Body>,
    next: Next,
) -> Response {
    let authorized = extract_bearer(req.headers())
        .map(|token| token == &*state.api_token)
        .unwrap_or(false);

    if !authorized {
        tracing::warn!(
            method = %req.method(),
            path = %req.uri().path(),
            "rejected request without a valid API token"
        );
        return errors::domain_error_to_response(DomainError::Unauthorized);
    }

    next.run(req).await
}

/// One log event per request: method, path, status, latency.
pub async fn log_requests(req: axum::http::Request<axum::body::Body>, next: Next) -> Response {
    let method = req.method().clone();
    let path = req.uri().path().to_string();
    let started = Instant::now();

    let response = next.run(req).await;

    tracing::info!(
        %method,
        %path,
        status = response.status().as_u16(),
        latency_ms = u64::try_from(started.elapsed().as_millis()).unwrap_or(u64::MAX),
        "request"
    );
    response
}

fn extract_bearer(headers: &HeaderMap) -> Result<&str, StatusCode> {
    let header = headers
        .get(axum::http::header::AUTHORIZATION)
        .ok_or(StatusCode::UNAUTHORIZED)?;

    let header = header.to_str().map_err(|_| StatusCode::UNAUTHORIZED)?;

    let header = header
        .strip_prefix("Bearer ")
        .ok_or(StatusCode::UNAUTHORIZED)?;

    let token = header.trim();
    if token.is_empty() {
        return Err(StatusCode::UNAUTHORIZED);
    }

    Ok(token)
}
