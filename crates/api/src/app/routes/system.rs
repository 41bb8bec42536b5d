use axum::http::{StatusCode, Uri};

use crate::app::errors;

pub async fn hello() -> &'static str {
    "Hello World! Server is running smoothly."
}

pub async fn health() -> StatusCode {
    StatusCode::OK
}

pub async fn not_found(uri: Uri) -> axum::response::Response {
    errors::json_error(
        StatusCode::NOT_FOUND,
        "not_found",
        format!("no route for {}", uri.path()),
    )
}
