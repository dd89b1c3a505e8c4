use axum::{
    Router, middleware,
    routing::{delete, get, post, put},
};
use backoffice_core::{Action, Module};

use super::controller::{create_product, delete_product, get_products, update_product};
use crate::middleware::permission::authorize;
use crate::state::AppState;

pub fn init_products_router() -> Router<AppState> {
    let read = Router::new()
        .route("/", get(get_products))
        .route_layer(middleware::from_fn(authorize(Module::Products, Action::Read)));

    let create = Router::new()
        .route("/", post(create_product))
        .route_layer(middleware::from_fn(authorize(Module::Products, Action::Create)));

    let update = Router::new()
        .route("/{id}", put(update_product))
        .route_layer(middleware::from_fn(authorize(Module::Products, Action::Update)));

    let remove = Router::new()
        .route("/{id}", delete(delete_product))
        .route_layer(middleware::from_fn(authorize(Module::Products, Action::Delete)));

    read.merge(create).merge(update).merge(remove)
}
