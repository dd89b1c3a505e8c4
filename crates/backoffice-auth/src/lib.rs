//! # Backoffice Auth
//!
//! Session credential types and JWT utilities.
//!
//! A credential is issued at login and carries the user's role name and the
//! flattened per-module permission map, signed and valid for a fixed period
//! (24 hours by default).
//!
//! # Example
//!
//! ```ignore
//! use backoffice_auth::{create_access_token, verify_token};
//! use backoffice_config::JwtConfig;
//!
//! let config = JwtConfig::from_env();
//! let token = create_access_token(user_id, Some("Admin"), permissions, &config)?;
//! let claims = verify_token(&token, &config)?;
//! ```

pub mod claims;
pub mod jwt;

// Re-export commonly used types at crate root
pub use claims::Claims;
pub use jwt::{create_access_token, verify_token};
