use axum::{
    Router, middleware,
    routing::{delete, get, post, put},
};
use backoffice_core::{Action, Module};

use super::controller::{create_enterprise, delete_enterprise, get_enterprises, update_enterprise};
use crate::middleware::permission::authorize;
use crate::state::AppState;

pub fn init_enterprises_router() -> Router<AppState> {
    let read = Router::new()
        .route("/", get(get_enterprises))
        .route_layer(middleware::from_fn(authorize(Module::Enterprises, Action::Read)));

    let create = Router::new()
        .route("/", post(create_enterprise))
        .route_layer(middleware::from_fn(authorize(Module::Enterprises, Action::Create)));

    let update = Router::new()
        .route("/{id}", put(update_enterprise))
        .route_layer(middleware::from_fn(authorize(Module::Enterprises, Action::Update)));

    let remove = Router::new()
        .route("/{id}", delete(delete_enterprise))
        .route_layer(middleware::from_fn(authorize(Module::Enterprises, Action::Delete)));

    read.merge(create).merge(update).merge(remove)
}
