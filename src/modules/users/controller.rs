use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use backoffice_core::AppError;
use backoffice_models::{
    AssignRoleDto, CreateUserDto, MessageResponse, UpdateUserDto, User, UserWithRole,
};
use tracing::instrument;
use uuid::Uuid;

use super::service::UserService;
use crate::state::AppState;
use crate::validator::ValidatedJson;

/// Create a user
#[utoipa::path(
    post,
    path = "/api/users",
    request_body = CreateUserDto,
    responses(
        (status = 201, description = "User created", body = User),
        (status = 400, description = "Email already exists or malformed body", body = MessageResponse),
        (status = 403, description = "Role not assigned or permission denied", body = MessageResponse),
        (status = 404, description = "Role not found", body = MessageResponse),
        (status = 422, description = "Validation error", body = MessageResponse)
    ),
    tag = "Users",
    security(("bearer_auth" = []))
)]
#[instrument(skip_all)]
pub async fn create_user(
    State(state): State<AppState>,
    ValidatedJson(dto): ValidatedJson<CreateUserDto>,
) -> Result<(StatusCode, Json<User>), AppError> {
    let user = UserService::create_user(state.store.as_ref(), dto).await?;
    Ok((StatusCode::CREATED, Json(user)))
}

/// List users with their roles
#[utoipa::path(
    get,
    path = "/api/users",
    responses(
        (status = 200, description = "All users", body = Vec<UserWithRole>),
        (status = 403, description = "Role not assigned or permission denied", body = MessageResponse)
    ),
    tag = "Users",
    security(("bearer_auth" = []))
)]
#[instrument(skip_all)]
pub async fn get_users(State(state): State<AppState>) -> Result<Json<Vec<UserWithRole>>, AppError> {
    let users = UserService::list_users(state.store.as_ref()).await?;
    Ok(Json(users))
}

/// Update a user
#[utoipa::path(
    put,
    path = "/api/users/{id}",
    params(("id" = Uuid, Path, description = "User ID")),
    request_body = UpdateUserDto,
    responses(
        (status = 200, description = "User updated", body = User),
        (status = 403, description = "Role not assigned or permission denied", body = MessageResponse),
        (status = 404, description = "User or role not found", body = MessageResponse)
    ),
    tag = "Users",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state, dto))]
pub async fn update_user(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    ValidatedJson(dto): ValidatedJson<UpdateUserDto>,
) -> Result<Json<User>, AppError> {
    let user = UserService::update_user(state.store.as_ref(), id, dto).await?;
    Ok(Json(user))
}

/// Assign (or clear) a user's role
#[utoipa::path(
    put,
    path = "/api/users/{id}/role",
    params(("id" = Uuid, Path, description = "User ID")),
    request_body = AssignRoleDto,
    responses(
        (status = 200, description = "Role assigned", body = User),
        (status = 403, description = "Role not assigned or permission denied", body = MessageResponse),
        (status = 404, description = "User or role not found", body = MessageResponse)
    ),
    tag = "Users",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state))]
pub async fn assign_role(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(dto): Json<AssignRoleDto>,
) -> Result<Json<User>, AppError> {
    let user = UserService::assign_role(state.store.as_ref(), id, dto).await?;
    Ok(Json(user))
}
