use crate::error::DbError;
use crate::store::{Mutation, Page, PageRequest, TrialStore};
use async_trait::async_trait;
use chrono::NaiveDate;
use core_types::{Trial, TrialId, TrialStatus};
use sqlx::postgres::{PgPool, Postgres};
use sqlx::{FromRow, PgExecutor, Transaction};

const TRIAL_COLUMNS: &str = "id, name, status, end_date";

/// The `DbRepository` is the PostgreSQL implementation of `TrialStore`.
/// It encapsulates all SQL queries and data access logic.
#[derive(Debug, Clone)]
pub struct DbRepository {
    pool: PgPool,
}

// This struct represents a row fetched from the trials table.
#[derive(FromRow, Debug, Clone)]
pub struct DbTrial {
    pub id: i64,
    pub name: String,
    pub status: String,
    pub end_date: NaiveDate,
}

impl TryFrom<DbTrial> for Trial {
    type Error = DbError;

    fn try_from(row: DbTrial) -> Result<Self, Self::Error> {
        let status: TrialStatus = row
            .status
            .parse()
            .map_err(|_| DbError::Decode(format!("trial {} has status '{}'", row.id, row.status)))?;
        Ok(Trial {
            id: row.id,
            name: row.name,
            status,
            end_date: row.end_date,
        })
    }
}

impl DbRepository {
    /// Creates a new `DbRepository` with a shared database connection pool.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    /// Writes every column of `trial` over the existing row with the same id.
    async fn update_row<'e>(
        executor: impl PgExecutor<'e>,
        trial: &Trial,
    ) -> Result<DbTrial, DbError> {
        let row = sqlx::query_as::<_, DbTrial>(
            r#"
            UPDATE trials SET name = $2, status = $3, end_date = $4
            WHERE id = $1
            RETURNING id, name, status, end_date
            "#,
        )
        .bind(trial.id)
        .bind(&trial.name)
        .bind(trial.status.as_str())
        .bind(trial.end_date)
        .fetch_optional(executor)
        .await?;
        row.ok_or(DbError::NotFound(trial.id))
    }
}

fn into_trials(rows: Vec<DbTrial>) -> Result<Vec<Trial>, DbError> {
    rows.into_iter().map(Trial::try_from).collect()
}

#[async_trait]
impl TrialStore for DbRepository {
    async fn find_all(&self, request: PageRequest) -> Result<Page<Trial>, DbError> {
        let total: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM trials")
            .fetch_one(&self.pool)
            .await?;

        // The ORDER BY column comes from a closed enum, never from user text.
        let sql = format!(
            "SELECT {TRIAL_COLUMNS} FROM trials ORDER BY {} ASC, id ASC LIMIT $1 OFFSET $2",
            request.sort().column()
        );
        let rows = sqlx::query_as::<_, DbTrial>(&sql)
            .bind(i64::from(request.size()))
            .bind(i64::try_from(request.offset()).unwrap_or(i64::MAX))
            .fetch_all(&self.pool)
            .await?;

        let total = u64::try_from(total).unwrap_or_default();
        Ok(Page::new(into_trials(rows)?, request, total))
    }

    async fn find_by_id(&self, id: TrialId) -> Result<Option<Trial>, DbError> {
        let row = sqlx::query_as::<_, DbTrial>(
            "SELECT id, name, status, end_date FROM trials WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        row.map(Trial::try_from).transpose()
    }

    async fn find_by_status(&self, status: TrialStatus) -> Result<Vec<Trial>, DbError> {
        let rows = sqlx::query_as::<_, DbTrial>(
            "SELECT id, name, status, end_date FROM trials WHERE status = $1 ORDER BY id ASC",
        )
        .bind(status.as_str())
        .fetch_all(&self.pool)
        .await?;
        into_trials(rows)
    }

    async fn find_all_unpaged(&self) -> Result<Vec<Trial>, DbError> {
        let rows = sqlx::query_as::<_, DbTrial>(
            "SELECT id, name, status, end_date FROM trials ORDER BY id ASC",
        )
        .fetch_all(&self.pool)
        .await?;
        into_trials(rows)
    }

    /// Uses `ON CONFLICT (id) DO UPDATE` so the same call serves inserts and replacements.
    async fn save(&self, trial: &Trial) -> Result<Trial, DbError> {
        let row = sqlx::query_as::<_, DbTrial>(
            r#"
            INSERT INTO trials (id, name, status, end_date)
            VALUES ($1, $2, $3, $4)
            ON CONFLICT (id) DO UPDATE
                SET name = EXCLUDED.name, status = EXCLUDED.status, end_date = EXCLUDED.end_date
            RETURNING id, name, status, end_date
            "#,
        )
        .bind(trial.id)
        .bind(&trial.name)
        .bind(trial.status.as_str())
        .bind(trial.end_date)
        .fetch_one(&self.pool)
        .await?;
        Trial::try_from(row)
    }

    async fn modify(&self, id: TrialId, mutation: Mutation) -> Result<Trial, DbError> {
        let mut tx: Transaction<'_, Postgres> = self.pool.begin().await?;

        // Row lock held until commit; dropping `tx` on any early return rolls back.
        let row = sqlx::query_as::<_, DbTrial>(
            "SELECT id, name, status, end_date FROM trials WHERE id = $1 FOR UPDATE",
        )
        .bind(id)
        .fetch_optional(&mut *tx)
        .await?
        .ok_or(DbError::NotFound(id))?;

        let mut trial = Trial::try_from(row)?;
        mutation(&mut trial)?;

        let written = Self::update_row(&mut *tx, &trial).await?;
        tx.commit().await?;
        Trial::try_from(written)
    }

    async fn delete(&self, trial: &Trial) -> Result<(), DbError> {
        let result = sqlx::query("DELETE FROM trials WHERE id = $1")
            .bind(trial.id)
            .execute(&self.pool)
            .await?;
        if result.rows_affected() == 0 {
            return Err(DbError::NotFound(trial.id));
        }
        Ok(())
    }
}
