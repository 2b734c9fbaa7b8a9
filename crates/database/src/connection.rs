use crate::error::DbError;
use crate::memory::InMemoryStore;
use crate::repository::DbRepository;
use crate::store::TrialStore;
use configuration::{DatabaseSettings, StoreBackend};
use sqlx::{postgres::PgPoolOptions, PgPool};
use std::env;
use std::sync::Arc;
use std::time::Duration;

/// Establishes a connection pool to the PostgreSQL database.
///
/// The URL comes from the settings, or from `DATABASE_URL` when the settings
/// leave it unset.
pub async fn connect(settings: &DatabaseSettings) -> Result<PgPool, DbError> {
    let database_url = match &settings.url {
        Some(url) => url.clone(),
        None => env::var("DATABASE_URL").map_err(|_e| {
            DbError::ConnectionConfigError("DATABASE_URL must be set.".to_string())
        })?,
    };

    let pool = PgPoolOptions::new()
        .max_connections(settings.max_connections)
        .acquire_timeout(Duration::from_secs(settings.acquire_timeout_secs))
        .connect(&database_url)
        .await?;

    Ok(pool)
}

/// A utility function to run database migrations automatically.
///
/// This is useful for ensuring the database schema is up-to-date when the application starts,
/// which is especially important in production deployments.
pub async fn run_migrations(pool: &PgPool) -> Result<(), DbError> {
    // Use a relative path from the crate root
    sqlx::migrate!("./migrations").run(pool).await?;
    Ok(())
}

/// Opens the store selected by `settings.backend`.
pub async fn open_store(settings: &DatabaseSettings) -> Result<Arc<dyn TrialStore>, DbError> {
    match settings.backend {
        StoreBackend::Memory => {
            tracing::warn!("Using the in-memory trial store; data will not survive a restart.");
            Ok(Arc::new(InMemoryStore::new()))
        }
        StoreBackend::Postgres => {
            let pool = connect(settings).await?;
            if settings.run_migrations {
                run_migrations(&pool).await?;
                tracing::info!("Database migrations applied.");
            }
            Ok(Arc::new(DbRepository::new(pool)))
        }
    }
}
