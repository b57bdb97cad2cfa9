//! Server dependencies (using traits for testability)
//!
//! Wires the concrete store and execution-service client behind the
//! `PostingStore` and `JobRegistry` traits the handlers depend on.

use anyhow::{bail, Context, Result};
use job_scraper::{MemoryStore, PostgresStore, PostingStore, SqliteStore};
use std::sync::Arc;

/// Open the posting store named by `database_url`.
///
/// - `sqlite::memory:` - single-connection in-memory SQLite
/// - `sqlite:...` - SQLite file
/// - `postgres:...` / `postgresql:...` - PostgreSQL
/// - unset - process-local `MemoryStore`
pub async fn connect_store(database_url: Option<&str>) -> Result<Arc<dyn PostingStore>> {
    let Some(url) = database_url else {
        tracing::warn!("DATABASE_URL not set, postings are kept in memory only");
        return Ok(Arc::new(MemoryStore::new()));
    };

    if url == "sqlite::memory:" {
        let store = SqliteStore::in_memory()
            .await
            .context("Failed to open in-memory SQLite store")?;
        return Ok(Arc::new(store));
    }

    if url.starts_with("sqlite:") {
        let store = SqliteStore::new(url)
            .await
            .context("Failed to open SQLite store")?;
        tracing::info!("Using SQLite posting store");
        return Ok(Arc::new(store));
    }

    if url.starts_with("postgres:") || url.starts_with("postgresql:") {
        let store = PostgresStore::new(url)
            .await
            .context("Failed to connect to PostgreSQL store")?;
        tracing::info!("Using PostgreSQL posting store");
        return Ok(Arc::new(store));
    }

    bail!("DATABASE_URL must start with sqlite: or postgres:")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_defaults_to_memory_and_opens_sqlite() {
        let memory = connect_store(None).await.unwrap();
        assert!(memory.user_jobs("nobody").await.unwrap().is_none());

        let sqlite = connect_store(Some("sqlite::memory:")).await.unwrap();
        sqlite.ping().await.unwrap();
    }

    #[tokio::test]
    async fn test_rejects_unknown_scheme() {
        let err = connect_store(Some("mysql://localhost/jobs")).await.err().unwrap();
        assert!(err.to_string().contains("sqlite: or postgres:"));
    }
}
