//! # Backoffice DB
//!
//! Storage for the Backoffice API.
//!
//! The server only talks to the [`Store`] trait object. Two implementations
//! exist:
//!
//! - [`PgStore`]: PostgreSQL through a SQLx pool, with migrations embedded
//!   from the workspace `migrations/` directory
//! - [`MemoryStore`]: tables behind a `tokio` read/write lock, used when no
//!   `DATABASE_URL` is configured and by the test suites
//!
//! # Example
//!
//! ```ignore
//! use std::sync::Arc;
//! use backoffice_db::{init_db_pool, MemoryStore, PgStore, Store};
//!
//! let store: Arc<dyn Store> = match database_url {
//!     Some(url) => Arc::new(PgStore::connect(&url).await?),
//!     None => Arc::new(MemoryStore::new()),
//! };
//! ```

pub mod error;
pub mod memory;
pub mod postgres;
pub mod repository;

pub use error::DbError;
pub use memory::MemoryStore;
pub use postgres::{MIGRATOR, PgStore, init_db_pool};
pub use repository::{
    EmployeeRepository, EnterpriseRepository, ProductRepository, RoleRepository, Store,
    UserRepository,
};

// Re-export PgPool for convenience
pub use sqlx::PgPool;
