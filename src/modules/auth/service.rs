use std::fmt::Display;

use backoffice_auth::create_access_token;
use backoffice_config::JwtConfig;
use backoffice_core::{AppError, PermissionMap, verify_password};
use backoffice_db::{RoleRepository, Store, UserRepository};
use backoffice_models::{LoginRequest, LoginResponse, LoginUser, Role};
use tracing::{debug, error, info, instrument};

use crate::metrics::{self, Event};

pub const INVALID_CREDENTIALS: &str = "Invalid email or password";
pub const LOGIN_SERVER_ERROR: &str = "Server error during login";

fn invalid_credentials() -> AppError {
    metrics::record(Event::LoginFailed);
    AppError::bad_request(anyhow::anyhow!(INVALID_CREDENTIALS))
}

fn login_failure(err: impl Display) -> AppError {
    error!(error = %err, "Login failed unexpectedly");
    AppError::internal_error(LOGIN_SERVER_ERROR)
}

pub struct AuthService;

impl AuthService {
    /// Authenticates the credentials and issues a session credential that
    /// embeds the role name and its flattened permission map.
    ///
    /// Unknown email and wrong password produce the same error.
    #[instrument(skip(store, dto, jwt_config), fields(email = %dto.email))]
    pub async fn login_user(
        store: &dyn Store,
        dto: LoginRequest,
        jwt_config: &JwtConfig,
    ) -> Result<LoginResponse, AppError> {
        let Some(stored) = store
            .find_user_by_email(&dto.email)
            .await
            .map_err(login_failure)?
        else {
            debug!("No user with this email");
            return Err(invalid_credentials());
        };

        if !verify_password(&dto.password, &stored.password_hash).map_err(login_failure)? {
            debug!("Password mismatch");
            return Err(invalid_credentials());
        }

        let user = stored.user;
        let role: Option<Role> = match user.role_id {
            Some(role_id) => store
                .find_role_by_id(role_id)
                .await
                .map_err(login_failure)?,
            None => None,
        };

        let permissions = role
            .as_ref()
            .map(Role::permission_map)
            .unwrap_or_else(PermissionMap::new);
        let role_name = role.map(|role| role.name);

        let token = create_access_token(
            user.id,
            role_name.as_deref(),
            permissions.clone(),
            jwt_config,
        )
        .map_err(login_failure)?;

        metrics::record(Event::TokenIssued);
        metrics::record(Event::LoginSucceeded {
            role: role_name.as_deref(),
        });
        info!(user_id = %user.id, role = ?role_name, "User logged in");

        Ok(LoginResponse {
            token,
            user: LoginUser {
                id: user.id,
                name: user.name,
                email: user.email,
                role: role_name,
                permissions,
            },
        })
    }
}
