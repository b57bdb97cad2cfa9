//! SQLite storage implementation.
//!
//! A file-based storage backend using SQLite. Good for:
//! - Local development
//! - Single-server deployments
//! - Testing with persistent data
//!
//! The user document is split across two tables: `user_jobs` holds the
//! skeleton row, `user_job_postings` the appended postings. A
//! `UNIQUE (user_id, source, title, company)` constraint makes
//! `INSERT .. ON CONFLICT DO NOTHING` the atomic duplicate check.

use async_trait::async_trait;
use sqlx::sqlite::{SqlitePool, SqlitePoolOptions};

use crate::error::{StoreError, StoreResult};
use crate::traits::store::{AcceptOutcome, PostingStore};
use crate::types::posting::{Posting, UserJobsDocument};

use super::rows::{assemble_document, PostingRow};

/// SQLite-based posting store.
pub struct SqliteStore {
    pool: SqlitePool,
}

impl SqliteStore {
    /// Create a new SQLite store with the given connection URL.
    ///
    /// # Example URLs
    /// - `sqlite::memory:` - In-memory database (ephemeral)
    /// - `sqlite://./jobs.db?mode=rwc` - File-based, created if missing
    pub async fn new(database_url: &str) -> StoreResult<Self> {
        let pool = SqlitePoolOptions::new()
            .max_connections(5)
            .connect(database_url)
            .await
            .map_err(StoreError::backend)?;

        Self::from_pool(pool).await
    }

    /// Create an in-memory SQLite store (for testing).
    ///
    /// Pinned to a single connection: every SQLite `:memory:` connection is
    /// its own database.
    pub async fn in_memory() -> StoreResult<Self> {
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect("sqlite::memory:")
            .await
            .map_err(StoreError::backend)?;

        Self::from_pool(pool).await
    }

    pub async fn from_pool(pool: SqlitePool) -> StoreResult<Self> {
        let store = Self { pool };
        store.run_migrations().await?;
        Ok(store)
    }

    async fn run_migrations(&self) -> StoreResult<()> {
        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS user_jobs (
                user_id TEXT PRIMARY KEY,
                created_at TEXT NOT NULL DEFAULT CURRENT_TIMESTAMP
            )
            "#,
        )
        .execute(&self.pool)
        .await
        .map_err(StoreError::backend)?;

        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS user_job_postings (
                seq INTEGER PRIMARY KEY AUTOINCREMENT,
                user_id TEXT NOT NULL REFERENCES user_jobs(user_id),
                source TEXT NOT NULL,
                title TEXT NOT NULL,
                company TEXT NOT NULL,
                location TEXT NOT NULL,
                salary TEXT,
                url TEXT NOT NULL,
                published TEXT NOT NULL,
                UNIQUE (user_id, source, title, company)
            )
            "#,
        )
        .execute(&self.pool)
        .await
        .map_err(StoreError::backend)?;

        sqlx::query(
            "CREATE INDEX IF NOT EXISTS idx_user_job_postings_user ON user_job_postings(user_id, seq)",
        )
        .execute(&self.pool)
        .await
        .map_err(StoreError::backend)?;

        Ok(())
    }

    /// Get the underlying connection pool.
    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }
}

#[async_trait]
impl PostingStore for SqliteStore {
    async fn accept(&self, posting: &Posting) -> StoreResult<AcceptOutcome> {
        let user_id = posting
            .user_id
            .as_deref()
            .ok_or_else(|| StoreError::MissingUserId {
                url: posting.url.clone(),
            })?;

        // Skeleton first; set-on-insert only.
        sqlx::query("INSERT INTO user_jobs (user_id) VALUES (?) ON CONFLICT(user_id) DO NOTHING")
            .bind(user_id)
            .execute(&self.pool)
            .await
            .map_err(StoreError::backend)?;

        let result = sqlx::query(
            r#"
            INSERT INTO user_job_postings
                (user_id, source, title, company, location, salary, url, published)
            VALUES (?, ?, ?, ?, ?, ?, ?, ?)
            ON CONFLICT(user_id, source, title, company) DO NOTHING
            "#,
        )
        .bind(user_id)
        .bind(posting.source.as_str())
        .bind(&posting.title)
        .bind(&posting.company)
        .bind(&posting.location)
        .bind(&posting.salary)
        .bind(&posting.url)
        .bind(posting.published)
        .execute(&self.pool)
        .await
        .map_err(StoreError::backend)?;

        Ok(if result.rows_affected() == 1 {
            AcceptOutcome::Inserted
        } else {
            AcceptOutcome::DuplicateDropped
        })
    }

    async fn user_jobs(&self, user_id: &str) -> StoreResult<Option<UserJobsDocument>> {
        let exists: Option<(String,)> =
            sqlx::query_as("SELECT user_id FROM user_jobs WHERE user_id = ?")
                .bind(user_id)
                .fetch_optional(&self.pool)
                .await
                .map_err(StoreError::backend)?;

        if exists.is_none() {
            return Ok(None);
        }

        let rows = sqlx::query_as::<_, PostingRow>(
            r#"
            SELECT user_id, source, title, company, location, salary, url, published
            FROM user_job_postings
            WHERE user_id = ?
            ORDER BY seq
            "#,
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await
        .map_err(StoreError::backend)?;

        assemble_document(user_id, rows).map(Some)
    }

    async fn ping(&self) -> StoreResult<()> {
        sqlx::query("SELECT 1")
            .execute(&self.pool)
            .await
            .map_err(StoreError::backend)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::posting;
    use crate::types::source::Source;

    #[tokio::test]
    async fn test_accept_is_idempotent() {
        let store = SqliteStore::in_memory().await.unwrap();
        let mut p = posting(Source::Internshala, "u1", "Analyst", "Foo");
        p.salary = Some("₹ 3 LPA".into());

        assert_eq!(store.accept(&p).await.unwrap(), AcceptOutcome::Inserted);
        assert_eq!(store.accept(&p).await.unwrap(), AcceptOutcome::DuplicateDropped);

        let doc = store.user_jobs("u1").await.unwrap().unwrap();
        assert_eq!(doc.total(), 1);
        assert_eq!(doc.postings(Source::Internshala), &[p]);
    }

    #[tokio::test]
    async fn test_document_groups_by_source_in_discovery_order() {
        let store = SqliteStore::in_memory().await.unwrap();
        let first = posting(Source::LinkedIn, "u1", "B role", "X");
        let other = posting(Source::Internshala, "u1", "Analyst", "Foo");
        let second = posting(Source::LinkedIn, "u1", "A role", "X");

        for p in [&first, &other, &second] {
            store.accept(p).await.unwrap();
        }

        let doc = store.user_jobs("u1").await.unwrap().unwrap();
        assert_eq!(doc.postings(Source::LinkedIn), &[first, second]);
        assert_eq!(doc.postings(Source::Internshala), &[other]);
    }

    #[tokio::test]
    async fn test_unknown_user_has_no_document() {
        let store = SqliteStore::in_memory().await.unwrap();
        assert!(store.user_jobs("nobody").await.unwrap().is_none());
        store.ping().await.unwrap();
    }
}
