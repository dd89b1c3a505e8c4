//! # Backoffice CLI
//!
//! Administrative utilities used by the `backoffice-cli` binary.
//!
//! ## Usage
//!
//! ```ignore
//! use backoffice_cli::seeder::{seed_admin, AdminSeed};
//!
//! let store = PgStore::connect(&database_url).await?;
//! let seeded = seed_admin(&store, AdminSeed { name, email, password }).await?;
//! ```

pub mod seeder;
