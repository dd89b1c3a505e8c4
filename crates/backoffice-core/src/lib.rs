//! # Backoffice Core
//!
//! Core types, errors, and utilities for the Backoffice API.
//!
//! - [`errors`]: Application error type with HTTP response conversion
//! - [`password`]: Password hashing and verification
//! - [`permissions`]: The module/action permission model shared by the server and client
//! - [`serde`]: Custom serde deserialization helpers
//!
//! # Example
//!
//! ```ignore
//! use backoffice_core::permissions::{Action, Module, ModulePermission, PermissionMap, PermissionSet};
//!
//! let entries = vec![ModulePermission::new(Module::Products, PermissionSet::read_only())];
//! let map = PermissionMap::from_entries(&entries);
//! assert!(map.allows(Module::Products, Action::Read));
//! assert!(!map.allows(Module::Products, Action::Delete));
//! ```

pub mod errors;
pub mod password;
pub mod permissions;
pub mod serde;

// Re-export commonly used types at crate root
pub use errors::AppError;
pub use password::{hash_password, verify_password};
pub use permissions::{Action, Module, ModulePermission, PermissionMap, PermissionSet};
