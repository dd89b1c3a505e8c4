use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;
use backoffice_core::AppError;
use backoffice_models::{CreateRoleDto, MessageResponse, Role};
use tracing::instrument;

use super::service::RoleService;
use crate::middleware::auth::AuthUser;
use crate::state::AppState;
use crate::validator::ValidatedJson;

/// Create a role
///
/// Each module may be listed once. Entries without `read` are stored with
/// every flag cleared.
#[utoipa::path(
    post,
    path = "/api/roles",
    request_body = CreateRoleDto,
    responses(
        (status = 201, description = "Role created", body = Role),
        (status = 400, description = "Role name taken or malformed body", body = MessageResponse),
        (status = 403, description = "Role not assigned or permission denied", body = MessageResponse),
        (status = 422, description = "Duplicate or unknown module", body = MessageResponse)
    ),
    tag = "Roles",
    security(("bearer_auth" = []))
)]
#[instrument(skip_all, fields(created_by = %auth_user.user_id))]
pub async fn create_role(
    State(state): State<AppState>,
    auth_user: AuthUser,
    ValidatedJson(dto): ValidatedJson<CreateRoleDto>,
) -> Result<(StatusCode, Json<Role>), AppError> {
    let role = RoleService::create_role(state.store.as_ref(), dto).await?;
    Ok((StatusCode::CREATED, Json(role)))
}

/// List roles
#[utoipa::path(
    get,
    path = "/api/roles",
    responses(
        (status = 200, description = "All roles", body = Vec<Role>),
        (status = 403, description = "Role not assigned or permission denied", body = MessageResponse)
    ),
    tag = "Roles",
    security(("bearer_auth" = []))
)]
#[instrument(skip_all)]
pub async fn get_roles(State(state): State<AppState>) -> Result<Json<Vec<Role>>, AppError> {
    let roles = RoleService::list_roles(state.store.as_ref()).await?;
    Ok(Json(roles))
}
