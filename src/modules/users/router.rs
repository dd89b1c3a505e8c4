use axum::{
    Router, middleware,
    routing::{get, post, put},
};
use backoffice_core::{Action, Module};

use super::controller::{assign_role, create_user, get_users, update_user};
use crate::middleware::permission::authorize;
use crate::state::AppState;

pub fn init_users_router() -> Router<AppState> {
    let read = Router::new()
        .route("/", get(get_users))
        .route_layer(middleware::from_fn(authorize(Module::Users, Action::Read)));

    let create = Router::new()
        .route("/", post(create_user))
        .route_layer(middleware::from_fn(authorize(Module::Users, Action::Create)));

    let update = Router::new()
        .route("/{id}", put(update_user))
        .route("/{id}/role", put(assign_role))
        .route_layer(middleware::from_fn(authorize(Module::Users, Action::Update)));

    read.merge(create).merge(update)
}
