//! Request gates.
//!
//! - [`auth`]: `authenticate` verifies the bearer credential, resolves the
//!   user's current role, and attaches an [`auth::AuthUser`] to the request
//! - [`permission`]: `authorize(module, action)` rejects requests whose role
//!   does not grant the action on the module
//!
//! # Example
//!
//! ```ignore
//! use axum::{Router, middleware, routing::get};
//! use backoffice_core::{Action, Module};
//! use crate::middleware::permission::authorize;
//!
//! let read = Router::new()
//!     .route("/", get(list_products))
//!     .route_layer(middleware::from_fn(authorize(Module::Products, Action::Read)));
//! ```

pub mod auth;
pub mod permission;
