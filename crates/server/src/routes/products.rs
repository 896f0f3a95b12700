use axum::{
    extract::{
        rejection::{JsonRejection, PathRejection},
        Path, State,
    },
    http::StatusCode,
    Json,
};
use common::types::Message;
use models::{Product, ProductDraft};
use tracing::info;
use uuid::Uuid;

use crate::{errors::JsonApiError, state::ServerState};

pub const DELETED_MESSAGE: &str = "Product deleted successfully";

#[utoipa::path(
    get, path = "/api/products", tag = "products",
    responses(
        (status = 200, description = "All products", body = [crate::openapi::ProductDoc]),
        (status = 500, description = "Storage unavailable", body = crate::openapi::ErrorDoc)
    )
)]
pub async fn list(State(state): State<ServerState>) -> Result<Json<Vec<Product>>, JsonApiError> {
    let list = state.products.get_all().await?;
    info!(count = list.len(), "list products");
    Ok(Json(list))
}

#[utoipa::path(
    get, path = "/api/products/{id}", tag = "products",
    params(("id" = Uuid, Path, description = "Product ID")),
    responses(
        (status = 200, description = "OK", body = crate::openapi::ProductDoc),
        (status = 400, description = "Invalid Id", body = crate::openapi::ErrorDoc),
        (status = 404, description = "Not Found", body = crate::openapi::ErrorDoc)
    )
)]
pub async fn get(
    State(state): State<ServerState>,
    id: Result<Path<Uuid>, PathRejection>,
) -> Result<Json<Product>, JsonApiError> {
    let Path(id) = id?;
    Ok(Json(state.products.get_by_id(id).await?))
}

#[utoipa::path(
    post, path = "/api/products", tag = "products",
    request_body = crate::openapi::ProductInputDoc,
    responses(
        (status = 201, description = "Created", body = crate::openapi::ProductDoc),
        (status = 400, description = "Validation Error", body = crate::openapi::ErrorDoc)
    )
)]
pub async fn create(
    State(state): State<ServerState>,
    body: Result<Json<ProductDraft>, JsonRejection>,
) -> Result<(StatusCode, Json<Product>), JsonApiError> {
    let Json(candidate) = body?;
    let created = state.products.create(candidate).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

#[utoipa::path(
    put, path = "/api/products/{id}", tag = "products",
    params(("id" = Uuid, Path, description = "Product ID")),
    request_body = crate::openapi::ProductInputDoc,
    responses(
        (status = 200, description = "Updated", body = crate::openapi::ProductDoc),
        (status = 400, description = "Validation Error", body = crate::openapi::ErrorDoc),
        (status = 404, description = "Not Found", body = crate::openapi::ErrorDoc)
    )
)]
pub async fn update(
    State(state): State<ServerState>,
    id: Result<Path<Uuid>, PathRejection>,
    body: Result<Json<ProductDraft>, JsonRejection>,
) -> Result<Json<Product>, JsonApiError> {
    let Path(id) = id?;
    let Json(candidate) = body?;
    Ok(Json(state.products.update(id, candidate).await?))
}

#[utoipa::path(
    delete, path = "/api/products/{id}", tag = "products",
    params(("id" = Uuid, Path, description = "Product ID")),
    responses(
        (status = 200, description = "Deleted", body = crate::openapi::MessageDoc),
        (status = 404, description = "Not Found", body = crate::openapi::ErrorDoc)
    )
)]
pub async fn delete(
    State(state): State<ServerState>,
    id: Result<Path<Uuid>, PathRejection>,
) -> Result<Json<Message>, JsonApiError> {
    let Path(id) = id?;
    state.products.delete(id).await?;
    Ok(Json(Message::new(DELETED_MESSAGE)))
}
