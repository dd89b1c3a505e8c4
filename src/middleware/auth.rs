use axum::{
    extract::{FromRequestParts, Request, State},
    http::{HeaderMap, header, request::Parts},
    middleware::Next,
    response::Response,
};
use backoffice_auth::{Claims, verify_token};
use backoffice_core::AppError;
use backoffice_db::{RoleRepository, UserRepository};
use backoffice_models::RoleGrant;
use uuid::Uuid;

use crate::state::AppState;

/// The authenticated principal of a request.
///
/// `role` is resolved from the store on every request, so it reflects the
/// user's current role rather than the snapshot in the credential.
#[derive(Debug, Clone)]
pub struct AuthUser {
    pub user_id: Uuid,
    pub claims: Claims,
    pub role: Option<RoleGrant>,
}

impl AuthUser {
    pub fn role_name(&self) -> Option<&str> {
        self.role.as_ref().map(|role| role.name.as_str())
    }
}

fn bearer_token(headers: &HeaderMap) -> Result<&str, AppError> {
    let auth_header = headers
        .get(header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .ok_or_else(|| AppError::unauthorized("Missing authorization header"))?;

    auth_header
        .strip_prefix("Bearer ")
        .ok_or_else(|| AppError::unauthorized("Invalid authorization header format"))
}

/// Verifies the bearer credential and attaches an [`AuthUser`].
pub async fn authenticate(
    State(state): State<AppState>,
    mut req: Request,
    next: Next,
) -> Result<Response, AppError> {
    let claims = verify_token(bearer_token(req.headers())?, &state.jwt_config)?;
    let user_id = Uuid::parse_str(&claims.sub)
        .map_err(|_| AppError::unauthorized("Invalid user ID in token"))?;
    tracing::Span::current().record("user_id", tracing::field::display(user_id));

    let user = state
        .store
        .find_user_by_id(user_id)
        .await?
        .ok_or_else(|| AppError::unauthorized("User not found"))?;

    // A dangling role reference means no role.
    let role = match user.role_id {
        Some(role_id) => state
            .store
            .find_role_by_id(role_id)
            .await?
            .map(|role| RoleGrant::from(&role)),
        None => None,
    };

    req.extensions_mut().insert(AuthUser {
        user_id,
        claims,
        role,
    });
    Ok(next.run(req).await)
}

impl<S> FromRequestParts<S> for AuthUser
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<AuthUser>()
            .cloned()
            .ok_or_else(|| AppError::unauthorized("Missing authorization header"))
    }
}
