use axum::{
    Router, middleware,
    routing::{delete, get, post, put},
};
use backoffice_core::{Action, Module};

use super::controller::{create_employee, delete_employee, get_employees, update_employee};
use crate::middleware::permission::authorize;
use crate::state::AppState;

pub fn init_employees_router() -> Router<AppState> {
    let read = Router::new()
        .route("/", get(get_employees))
        .route_layer(middleware::from_fn(authorize(Module::Employees, Action::Read)));

    let create = Router::new()
        .route("/", post(create_employee))
        .route_layer(middleware::from_fn(authorize(Module::Employees, Action::Create)));

    let update = Router::new()
        .route("/{id}", put(update_employee))
        .route_layer(middleware::from_fn(authorize(Module::Employees, Action::Update)));

    let remove = Router::new()
        .route("/{id}", delete(delete_employee))
        .route_layer(middleware::from_fn(authorize(Module::Employees, Action::Delete)));

    read.merge(create).merge(update).merge(remove)
}
