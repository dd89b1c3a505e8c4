use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use backoffice_core::AppError;
use backoffice_models::{CreateEmployeeDto, Employee, MessageResponse, UpdateEmployeeDto};
use tracing::instrument;
use uuid::Uuid;

use super::service::EmployeeService;
use crate::state::AppState;
use crate::validator::ValidatedJson;

#[utoipa::path(
    post,
    path = "/api/employees",
    request_body = CreateEmployeeDto,
    responses(
        (status = 201, description = "Employee created", body = Employee),
        (status = 400, description = "Unknown enterprise", body = MessageResponse),
        (status = 403, description = "Role not assigned or permission denied", body = MessageResponse),
        (status = 422, description = "Validation error", body = MessageResponse)
    ),
    tag = "Employees",
    security(("bearer_auth" = []))
)]
#[instrument(skip_all)]
pub async fn create_employee(
    State(state): State<AppState>,
    ValidatedJson(dto): ValidatedJson<CreateEmployeeDto>,
) -> Result<(StatusCode, Json<Employee>), AppError> {
    let employee = EmployeeService::create_employee(state.store.as_ref(), dto).await?;
    Ok((StatusCode::CREATED, Json(employee)))
}

#[utoipa::path(
    get,
    path = "/api/employees",
    responses(
        (status = 200, description = "All employees", body = Vec<Employee>),
        (status = 403, description = "Role not assigned or permission denied", body = MessageResponse)
    ),
    tag = "Employees",
    security(("bearer_auth" = []))
)]
#[instrument(skip_all)]
pub async fn get_employees(
    State(state): State<AppState>,
) -> Result<Json<Vec<Employee>>, AppError> {
    let employees = EmployeeService::list_employees(state.store.as_ref()).await?;
    Ok(Json(employees))
}

#[utoipa::path(
    put,
    path = "/api/employees/{id}",
    params(("id" = Uuid, Path, description = "Employee ID")),
    request_body = UpdateEmployeeDto,
    responses(
        (status = 200, description = "Employee updated", body = Employee),
        (status = 403, description = "Role not assigned or permission denied", body = MessageResponse),
        (status = 404, description = "Employee not found", body = MessageResponse)
    ),
    tag = "Employees",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state, dto))]
pub async fn update_employee(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    ValidatedJson(dto): ValidatedJson<UpdateEmployeeDto>,
) -> Result<Json<Employee>, AppError> {
    let employee = EmployeeService::update_employee(state.store.as_ref(), id, dto).await?;
    Ok(Json(employee))
}

/// Delete an employee and detach it from its enterprise
#[utoipa::path(
    delete,
    path = "/api/employees/{id}",
    params(("id" = Uuid, Path, description = "Employee ID")),
    responses(
        (status = 200, description = "Employee deleted", body = MessageResponse),
        (status = 403, description = "Role not assigned or permission denied", body = MessageResponse),
        (status = 404, description = "Employee not found", body = MessageResponse)
    ),
    tag = "Employees",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state))]
pub async fn delete_employee(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<MessageResponse>, AppError> {
    EmployeeService::delete_employee(state.store.as_ref(), id).await?;
    Ok(Json(MessageResponse::new("Employee deleted successfully")))
}
