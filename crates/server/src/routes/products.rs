use axum::{
    extract::{
        rejection::{JsonRejection, PathRejection},
        Path, State,
    },
    http::StatusCode,
    Json,
};
use chrono::Utc;
use serde::Serialize;
use service::product::{Product, ProductInput};
use tracing::info;
use uuid::Uuid;

use crate::{errors::JsonApiError, routes::AppState};

/// Body returned by a successful delete.
#[derive(Debug, Serialize, utoipa::ToSchema)]
pub struct DeleteResponse {
    pub timestamp: String,
    pub status: u16,
    pub message: String,
}

fn product_id(id: Result<Path<Uuid>, PathRejection>) -> Result<Uuid, JsonApiError> {
    id.map(|Path(id)| id)
        .map_err(|e| JsonApiError::bad_request(format!("invalid product id: {}", e.body_text())))
}

fn product_body(payload: Result<Json<ProductInput>, JsonRejection>) -> Result<ProductInput, JsonApiError> {
    payload
        .map(|Json(input)| input)
        .map_err(|e| JsonApiError::bad_request(format!("malformed request body: {}", e.body_text())))
}

#[utoipa::path(
    post, path = "/products", tag = "products",
    request_body = crate::openapi::ProductInputDoc,
    responses(
        (status = 201, description = "Created", body = crate::openapi::ProductDoc),
        (status = 400, description = "Validation Error"),
        (status = 500, description = "Create Failed")
    )
)]
pub async fn create(
    State(state): State<AppState>,
    payload: Result<Json<ProductInput>, JsonRejection>,
) -> Result<(StatusCode, Json<Product>), JsonApiError> {
    let input = product_body(payload)?;
    let created = state.products.create_product(input).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

#[utoipa::path(
    get, path = "/products/{id}", tag = "products",
    params(("id" = Uuid, Path, description = "Product ID")),
    responses(
        (status = 200, description = "OK", body = crate::openapi::ProductDoc),
        (status = 400, description = "Malformed ID"),
        (status = 404, description = "Not Found")
    )
)]
pub async fn get(State(state): State<AppState>, id: Result<Path<Uuid>, PathRejection>) -> Result<Json<Product>, JsonApiError> {
    let id = product_id(id)?;
    match state.products.get_product(id).await? {
        Some(p) => Ok(Json(p)),
        None => Err(JsonApiError::not_found("Product not found")),
    }
}

#[utoipa::path(
    get, path = "/products", tag = "products",
    responses(
        (status = 200, description = "List OK", body = [crate::openapi::ProductDoc]),
        (status = 500, description = "List Failed")
    )
)]
pub async fn list(State(state): State<AppState>) -> Result<Json<Vec<Product>>, JsonApiError> {
    let list = state.products.list_products().await?;
    info!(count = list.len(), "list products");
    Ok(Json(list))
}

#[utoipa::path(
    put, path = "/products/{id}", tag = "products",
    params(("id" = Uuid, Path, description = "Product ID")),
    request_body = crate::openapi::ProductInputDoc,
    responses(
        (status = 200, description = "Updated", body = crate::openapi::ProductDoc),
        (status = 400, description = "Validation Error"),
        (status = 404, description = "Not Found"),
        (status = 500, description = "Update Failed")
    )
)]
pub async fn update(
    State(state): State<AppState>,
    id: Result<Path<Uuid>, PathRejection>,
    payload: Result<Json<ProductInput>, JsonRejection>,
) -> Result<Json<Product>, JsonApiError> {
    let id = product_id(id)?;
    let input = product_body(payload)?;
    Ok(Json(state.products.update_product(id, input).await?))
}

#[utoipa::path(
    delete, path = "/products/{id}", tag = "products",
    params(("id" = Uuid, Path, description = "Product ID")),
    responses(
        (status = 200, description = "Deleted", body = DeleteResponse),
        (status = 404, description = "Not Found"),
        (status = 500, description = "Delete Failed")
    )
)]
pub async fn delete(State(state): State<AppState>, id: Result<Path<Uuid>, PathRejection>) -> Result<Json<DeleteResponse>, JsonApiError> {
    let id = product_id(id)?;
    state.products.delete_product(id).await?;
    Ok(Json(DeleteResponse {
        timestamp: Utc::now().to_rfc3339(),
        status: StatusCode::OK.as_u16(),
        message: "Product deleted successfully".to_string(),
    }))
}
