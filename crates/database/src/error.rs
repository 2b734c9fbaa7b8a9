use core_types::{CoreError, TrialId};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum DbError {
    #[error("Failed to load environment variables for database connection: {0}")]
    ConnectionConfigError(String),

    #[error("Database error: {0}")]
    Sqlx(#[from] sqlx::Error),

    #[error("Database migration failed: {0}")]
    MigrationError(#[from] sqlx::migrate::MigrateError),

    #[error("Trial not found: {0}")]
    NotFound(TrialId),

    #[error("Stored row could not be decoded: {0}")]
    Decode(String),

    #[error("Invalid query: {0}")]
    InvalidQuery(String),

    /// A modification was refused by the mutation itself; nothing was written.
    #[error(transparent)]
    Rejected(#[from] CoreError),
}
