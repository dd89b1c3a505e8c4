use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use backoffice_core::AppError;
use backoffice_models::{CreateProductDto, Product, MessageResponse, UpdateProductDto};
use tracing::instrument;
use uuid::Uuid;

use super::service::ProductService;
use crate::state::AppState;
use crate::validator::ValidatedJson;

/// Create a product owned by an enterprise and/or an employee
#[utoipa::path(
    post,
    path = "/api/products",
    request_body = CreateProductDto,
    responses(
        (status = 201, description = "Product created", body = Product),
        (status = 400, description = "No owner, duplicate SKU, or unknown owner", body = MessageResponse),
        (status = 403, description = "Role not assigned or permission denied", body = MessageResponse),
        (status = 422, description = "Validation error", body = MessageResponse)
    ),
    tag = "Products",
    security(("bearer_auth" = []))
)]
#[instrument(skip_all)]
pub async fn create_product(
    State(state): State<AppState>,
    ValidatedJson(dto): ValidatedJson<CreateProductDto>,
) -> Result<(StatusCode, Json<Product>), AppError> {
    let product = ProductService::create_product(state.store.as_ref(), dto).await?;
    Ok((StatusCode::CREATED, Json(product)))
}

#[utoipa::path(
    get,
    path = "/api/products",
    responses(
        (status = 200, description = "All products", body = Vec<Product>),
        (status = 403, description = "Role not assigned or permission denied", body = MessageResponse)
    ),
    tag = "Products",
    security(("bearer_auth" = []))
)]
#[instrument(skip_all)]
pub async fn get_products(
    State(state): State<AppState>,
) -> Result<Json<Vec<Product>>, AppError> {
    let products = ProductService::list_products(state.store.as_ref()).await?;
    Ok(Json(products))
}

#[utoipa::path(
    put,
    path = "/api/products/{id}",
    params(("id" = Uuid, Path, description = "Product ID")),
    request_body = UpdateProductDto,
    responses(
        (status = 200, description = "Product updated", body = Product),
        (status = 400, description = "Duplicate SKU or unknown owner", body = MessageResponse),
        (status = 403, description = "Role not assigned or permission denied", body = MessageResponse),
        (status = 404, description = "Product not found", body = MessageResponse)
    ),
    tag = "Products",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state, dto))]
pub async fn update_product(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    ValidatedJson(dto): ValidatedJson<UpdateProductDto>,
) -> Result<Json<Product>, AppError> {
    let product = ProductService::update_product(state.store.as_ref(), id, dto).await?;
    Ok(Json(product))
}

#[utoipa::path(
    delete,
    path = "/api/products/{id}",
    params(("id" = Uuid, Path, description = "Product ID")),
    responses(
        (status = 200, description = "Product deleted", body = MessageResponse),
        (status = 403, description = "Role not assigned or permission denied", body = MessageResponse),
        (status = 404, description = "Product not found", body = MessageResponse)
    ),
    tag = "Products",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state))]
pub async fn delete_product(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<MessageResponse>, AppError> {
    ProductService::delete_product(state.store.as_ref(), id).await?;
    Ok(Json(MessageResponse::new("Product deleted successfully")))
}
