//! # Backoffice Client
//!
//! Client-side half of the permission model.
//!
//! - [`api`]: [`BackofficeClient`] logs in over HTTP and keeps the session
//!   in a [`SessionStore`]
//! - [`access`]: [`has_access`] answers "may this session do X to module Y"
//!   from the cached snapshot
//! - [`navigation`]: which admin sections are shown and where a visit lands
//! - [`session`]: the [`SessionContext`] value passed to the checks above
//! - [`store`]: file-backed and in-memory session storage
//!
//! The cached permissions only drive what is shown. The server resolves the
//! user's current role on every request.
//!
//! # Example
//!
//! ```ignore
//! use backoffice_client::{BackofficeClient, FileSessionStore, navigation};
//!
//! let client = BackofficeClient::new("http://localhost:5000", FileSessionStore::new(".session"))?;
//! let session = client.login("admin@example.com", "admin123").await?;
//! for section in navigation::visible_sections(&session.permissions) {
//!     println!("{} -> {}", section.label, section.route());
//! }
//! ```

pub mod access;
pub mod api;
pub mod error;
pub mod navigation;
pub mod session;
pub mod store;

pub use access::{can_read, has_access, parse_permissions};
pub use api::BackofficeClient;
pub use error::{ClientError, ClientResult};
pub use navigation::{Navigation, SECTIONS, Section, landing_section, resolve, visible_sections};
pub use session::SessionContext;
pub use store::{FileSessionStore, MemorySessionStore, SessionStore};
