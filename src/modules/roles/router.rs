use axum::{
    Router, middleware,
    routing::{get, post},
};
use backoffice_core::{Action, Module};

use super::controller::{create_role, get_roles};
use crate::middleware::permission::authorize;
use crate::state::AppState;

pub fn init_roles_router() -> Router<AppState> {
    let read = Router::new()
        .route("/", get(get_roles))
        .route_layer(middleware::from_fn(authorize(Module::Roles, Action::Read)));

    let create = Router::new()
        .route("/", post(create_role))
        .route_layer(middleware::from_fn(authorize(Module::Roles, Action::Create)));

    read.merge(create)
}
