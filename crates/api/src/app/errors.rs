use axum::extract::rejection::{JsonRejection, QueryRejection};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use serde_json::json;

use catalog_core::DomainError;

pub fn domain_error_to_response(err: DomainError) -> axum::response::Response {
    match err {
        DomainError::Validation(_) => (
            StatusCode::BAD_REQUEST,
            axum::Json(json!({
                "error": "validation_error",
                "message": err.to_string(),
                "fields": err.violations(),
            })),
        )
            .into_response(),
        DomainError::InvalidInput(msg) => json_error(StatusCode::BAD_REQUEST, "invalid_input", msg),
        // Identifiers are opaque to clients: one that does not parse simply matches nothing.
        DomainError::InvalidId(_) | DomainError::NotFound => {
            json_error(StatusCode::NOT_FOUND, "not_found", "Product not found")
        }
        DomainError::Unauthorized => json_error(
            StatusCode::UNAUTHORIZED,
            "unauthorized",
            "missing or invalid API token",
        ),
    }
}

/// Body rejections answer 400; transport failures (oversized body) keep their own status.
pub fn json_rejection_to_response(rejection: JsonRejection) -> axum::response::Response {
    let status = match rejection {
        JsonRejection::MissingJsonContentType(_)
        | JsonRejection::JsonSyntaxError(_)
        | JsonRejection::JsonDataError(_) => StatusCode::BAD_REQUEST,
        ref other => other.status(),
    };
    json_error(status, "invalid_json", rejection.body_text())
}

pub fn query_rejection_to_response(rejection: QueryRejection) -> axum::response::Response {
    json_error(StatusCode::BAD_REQUEST, "invalid_input", rejection.body_text())
}

pub fn json_error(
    status: StatusCode,
    code: &'static str,
    message: impl Into<String>,
) -> axum::response::Response {
    (
        status,
        axum::Json(json!({
            "error": code,
            "message": message.into(),
        })),
    )
        .into_response()
}
