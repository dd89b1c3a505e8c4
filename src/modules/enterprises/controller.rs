use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use backoffice_core::AppError;
use backoffice_models::{CreateEnterpriseDto, Enterprise, MessageResponse, UpdateEnterpriseDto};
use tracing::instrument;
use uuid::Uuid;

use super::service::EnterpriseService;
use crate::state::AppState;
use crate::validator::ValidatedJson;

#[utoipa::path(
    post,
    path = "/api/enterprises",
    request_body = CreateEnterpriseDto,
    responses(
        (status = 201, description = "Enterprise created", body = Enterprise),
        (status = 403, description = "Role not assigned or permission denied", body = MessageResponse),
        (status = 422, description = "Validation error", body = MessageResponse)
    ),
    tag = "Enterprises",
    security(("bearer_auth" = []))
)]
#[instrument(skip_all)]
pub async fn create_enterprise(
    State(state): State<AppState>,
    ValidatedJson(dto): ValidatedJson<CreateEnterpriseDto>,
) -> Result<(StatusCode, Json<Enterprise>), AppError> {
    let enterprise = EnterpriseService::create_enterprise(state.store.as_ref(), dto).await?;
    Ok((StatusCode::CREATED, Json(enterprise)))
}

#[utoipa::path(
    get,
    path = "/api/enterprises",
    responses(
        (status = 200, description = "All enterprises", body = Vec<Enterprise>),
        (status = 403, description = "Role not assigned or permission denied", body = MessageResponse)
    ),
    tag = "Enterprises",
    security(("bearer_auth" = []))
)]
#[instrument(skip_all)]
pub async fn get_enterprises(
    State(state): State<AppState>,
) -> Result<Json<Vec<Enterprise>>, AppError> {
    let enterprises = EnterpriseService::list_enterprises(state.store.as_ref()).await?;
    Ok(Json(enterprises))
}

#[utoipa::path(
    put,
    path = "/api/enterprises/{id}",
    params(("id" = Uuid, Path, description = "Enterprise ID")),
    request_body = UpdateEnterpriseDto,
    responses(
        (status = 200, description = "Enterprise updated", body = Enterprise),
        (status = 403, description = "Role not assigned or permission denied", body = MessageResponse),
        (status = 404, description = "Enterprise not found", body = MessageResponse)
    ),
    tag = "Enterprises",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state, dto))]
pub async fn update_enterprise(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    ValidatedJson(dto): ValidatedJson<UpdateEnterpriseDto>,
) -> Result<Json<Enterprise>, AppError> {
    let enterprise = EnterpriseService::update_enterprise(state.store.as_ref(), id, dto).await?;
    Ok(Json(enterprise))
}

#[utoipa::path(
    delete,
    path = "/api/enterprises/{id}",
    params(("id" = Uuid, Path, description = "Enterprise ID")),
    responses(
        (status = 200, description = "Enterprise deleted", body = MessageResponse),
        (status = 403, description = "Role not assigned or permission denied", body = MessageResponse),
        (status = 404, description = "Enterprise not found", body = MessageResponse)
    ),
    tag = "Enterprises",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state))]
pub async fn delete_enterprise(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<MessageResponse>, AppError> {
    EnterpriseService::delete_enterprise(state.store.as_ref(), id).await?;
    Ok(Json(MessageResponse::new("Enterprise deleted successfully")))
}
