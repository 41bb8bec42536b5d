use std::sync::Arc;

use axum::{
    Json, Router,
    extract::{
        Extension, Path, Query,
        rejection::{JsonRejection, PathRejection, QueryRejection},
    },
    http::StatusCode,
    response::IntoResponse,
    routing::{delete, get, post, put},
};
use serde_json::Value;

use catalog_core::{DomainError, DomainResult, ProductId};
use catalog_products::{
    aggregate_by_category, list, search_by_name, validate_create, validate_update,
};

use crate::app::{dto, errors};
use crate::app::services::AppServices;
use crate::middleware::{self, AuthState};

/// Reads are public; create/update/delete sit behind the API token gate.
pub fn router(auth_state: AuthState) -> Router {
    let gate = axum::middleware::from_fn_with_state(auth_state, middleware::require_api_token);

    Router::new()
        .route(
            "/",
            get(list_products).merge(post(create_product).route_layer(gate.clone())),
        )
        .route("/search/name", get(search_products))
        .route("/stats", get(product_stats))
        .route(
            "/:id",
            get(get_product).merge(
                put(update_product)
                    .merge(delete(delete_product))
                    .route_layer(gate),
            ),
        )
}

/// Path ids that fail to extract or parse match no product.
fn parse_product_id(path: Result<Path<String>, PathRejection>) -> DomainResult<ProductId> {
    let Path(raw) = path.map_err(|rejection| DomainError::invalid_id(rejection.body_text()))?;
    raw.parse()
}

pub async fn list_products(
    Extension(services): Extension<Arc<AppServices>>,
    query: Result<Query<dto::QueryPairs>, QueryRejection>,
) -> axum::response::Response {
    let query = match query {
        Ok(Query(pairs)) => dto::ListProductsQuery::from_pairs(&pairs),
        Err(rejection) => return errors::query_rejection_to_response(rejection),
    };
    let page = list(
        services.products().list_all(),
        query.category(),
        query.page_request(),
    );
    (StatusCode::OK, Json(dto::page_to_json(page))).into_response()
}

pub async fn get_product(
    Extension(services): Extension<Arc<AppServices>>,
    id: Result<Path<String>, PathRejection>,
) -> axum::response::Response {
    let product_id = match parse_product_id(id) {
        Ok(v) => v,
        Err(e) => return errors::domain_error_to_response(e),
    };
    match services.products().find_by_id(&product_id) {
        Some(product) => (StatusCode::OK, Json(product)).into_response(),
        None => errors::domain_error_to_response(DomainError::NotFound),
    }
}

pub async fn create_product(
    Extension(services): Extension<Arc<AppServices>>,
    body: Result<Json<Value>, JsonRejection>,
) -> axum::response::Response {
    let Json(body) = match body {
        Ok(b) => b,
        Err(rejection) => return errors::json_rejection_to_response(rejection),
    };
    let new = match validate_create(&body) {
        Ok(v) => v,
        Err(e) => return errors::domain_error_to_response(e),
    };

    let product = services.products().insert(new);
    tracing::info!(product_id = %product.id_typed(), "product created");

    (StatusCode::CREATED, Json(product)).into_response()
}

pub async fn update_product(
    Extension(services): Extension<Arc<AppServices>>,
    id: Result<Path<String>, PathRejection>,
    body: Result<Json<Value>, JsonRejection>,
) -> axum::response::Response {
    let product_id = match parse_product_id(id) {
        Ok(v) => v,
        Err(e) => return errors::domain_error_to_response(e),
    };
    let Json(body) = match body {
        Ok(b) => b,
        Err(rejection) => return errors::json_rejection_to_response(rejection),
    };
    let patch = match validate_update(&body) {
        Ok(v) => v,
        Err(e) => return errors::domain_error_to_response(e),
    };
    if patch.is_empty() {
        tracing::debug!(product_id = %product_id, "update carries no known fields");
    }

    match services.products().update(&product_id, patch) {
        Ok(product) => {
            tracing::info!(product_id = %product_id, "product updated");
            (StatusCode::OK, Json(product)).into_response()
        }
        Err(e) => errors::domain_error_to_response(e),
    }
}

pub async fn delete_product(
    Extension(services): Extension<Arc<AppServices>>,
    id: Result<Path<String>, PathRejection>,
) -> axum::response::Response {
    let product_id = match parse_product_id(id) {
        Ok(v) => v,
        Err(e) => return errors::domain_error_to_response(e),
    };

    match services.products().delete(&product_id) {
        Ok(_) => {
            tracing::info!(product_id = %product_id, "product deleted");
            (
                StatusCode::OK,
                Json(serde_json::json!({ "message": "Product deleted" })),
            )
                .into_response()
        }
        Err(e) => errors::domain_error_to_response(e),
    }
}

pub async fn search_products(
    Extension(services): Extension<Arc<AppServices>>,
    query: Result<Query<dto::QueryPairs>, QueryRejection>,
) -> axum::response::Response {
    let query = match query {
        Ok(Query(pairs)) => dto::SearchQuery::from_pairs(&pairs),
        Err(rejection) => return errors::query_rejection_to_response(rejection),
    };
    match search_by_name(services.products().list_all(), query.q.as_deref()) {
        Ok(matched) => (StatusCode::OK, Json(matched)).into_response(),
        Err(e) => errors::domain_error_to_response(e),
    }
}

pub async fn product_stats(
    Extension(services): Extension<Arc<AppServices>>,
) -> axum::response::Response {
    let stats = aggregate_by_category(&services.products().list_all());
    (StatusCode::OK, Json(stats)).into_response()
}
