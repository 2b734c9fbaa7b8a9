//! # Trial Database Crate
//!
//! This crate is the persistence gateway for trials: the `TrialStore` contract and
//! the stores that implement it.
//!
//! ## Architectural Principles
//!
//! - **Adapter:** All SQL lives here. The rest of the application sees only the
//!   `TrialStore` trait and plain `Trial` values.
//! - **Raw Storage:** Stores hand back exactly what was persisted. Deriving the
//!   current status is left to the service layer.
//! - **Asynchronous & Pooled:** All operations are asynchronous; PostgreSQL access
//!   goes through a connection pool (`PgPool`).
//!
//! ## Public API
//!
//! - `open_store`: Opens the backend chosen in the settings.
//! - `connect` / `run_migrations`: PostgreSQL pool and schema setup.
//! - `TrialStore`, `Mutation`: The persistence contract.
//! - `DbRepository`: The PostgreSQL store. `InMemoryStore`: the process-local one.
//! - `Page`, `PageRequest`, `SortKey`: Paging types.
//! - `DbError`: The specific error types that can be returned from this crate.

// Declare the modules that constitute this crate.
pub mod connection;
pub mod error;
pub mod memory;
pub mod repository;
pub mod store;

// Re-export the key components to create a clean, public-facing API.
pub use connection::{connect, open_store, run_migrations};
pub use error::DbError;
pub use memory::InMemoryStore;
pub use repository::{DbRepository, DbTrial};
pub use store::{Mutation, Page, PageRequest, SortKey, TrialStore};
