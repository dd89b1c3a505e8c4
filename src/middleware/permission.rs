//! Module/action authorization gate.

use std::future::Future;
use std::pin::Pin;

use axum::{extract::Request, middleware::Next, response::Response};
use backoffice_core::{Action, AppError, Module};
use backoffice_models::RoleGrant;
use tracing::warn;

use crate::metrics::{self, Event};
use crate::middleware::auth::AuthUser;

pub const ROLE_NOT_ASSIGNED: &str = "Role not assigned";
pub const PERMISSION_DENIED: &str = "Permission denied";

/// Decides whether `role` may perform `action` on `module`.
///
/// Pure: the role is only read. Modules absent from the role are denied.
pub fn check_permission(
    role: Option<&RoleGrant>,
    module: Module,
    action: Action,
) -> Result<(), AppError> {
    let role = role.ok_or_else(|| AppError::forbidden(ROLE_NOT_ASSIGNED))?;
    if role.permissions.allows(module, action) {
        Ok(())
    } else {
        Err(AppError::forbidden(PERMISSION_DENIED))
    }
}

type GateFuture = Pin<Box<dyn Future<Output = Result<Response, AppError>> + Send>>;

/// Builds a gate for `axum::middleware::from_fn` that lets the request
/// through only if the authenticated user's role grants `action` on `module`.
///
/// Must run after `authenticate`; a request without an [`AuthUser`] is
/// treated as having no role.
pub fn authorize(module: Module, action: Action) -> impl Fn(Request, Next) -> GateFuture + Clone {
    move |req: Request, next: Next| {
        Box::pin(async move {
            let auth_user = req.extensions().get::<AuthUser>();
            let decision = check_permission(
                auth_user.and_then(|user| user.role.as_ref()),
                module,
                action,
            );

            if let Err(err) = decision {
                warn!(
                    user_id = ?auth_user.map(|user| user.user_id),
                    module = %module,
                    action = %action,
                    reason = %err.message(),
                    "Authorization denied"
                );
                metrics::record(Event::AccessDenied { module, action });
                return Err(err);
            }

            Ok(next.run(req).await)
        })
    }
}
