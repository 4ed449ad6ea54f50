//! Postgres-backed message store.
//!
//! The pool is built once at startup from environment-driven configuration
//! and shared by every handler through `AppState`. Handlers talk to the store
//! through the `MessageStore` trait so tests can swap in an in-memory fake.
//!
//! The lifecycle of a message is create-then-read-only: ids are assigned by
//! the serial column and never reused, `created_at` is set by the database at
//! insertion and never touched again.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::Serialize;
use sqlx::postgres::{PgConnectOptions, PgPool, PgPoolOptions, PgSslMode};

use crate::config::{DbConfig, TlsMode, POOL_MAX_CONNECTIONS};

/// A persisted message row.
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct Message {
    pub id: i32,
    pub content: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// Query or connection failure surfaced by the driver. The message is
    /// returned verbatim in API error bodies; this service is internal-facing.
    #[error(transparent)]
    Query(#[from] sqlx::Error),

    #[error("{0}")]
    Unavailable(String),
}

/// Storage seam for the message table.
///
/// Object-safe so `AppState` can hold `Arc<dyn MessageStore>` and handler
/// tests can inject a fake without a live database.
#[async_trait]
pub trait MessageStore: Send + Sync {
    /// Most recent messages first, at most `limit` rows.
    async fn recent_messages(&self, limit: i64) -> Result<Vec<Message>, StoreError>;

    /// Insert one row; the database assigns id and timestamp.
    async fn create_message(&self, content: &str) -> Result<Message, StoreError>;

    /// Trivial round-trip to check the store is reachable.
    async fn ping(&self) -> Result<(), StoreError>;
}

/// `MessageStore` over a sqlx connection pool.
#[derive(Clone)]
pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    /// Connect to Postgres and hand back the pooled store.
    ///
    /// The first connection is established eagerly so an unreachable database
    /// fails startup instead of surfacing on the first request.
    pub async fn connect(config: &DbConfig) -> Result<Self, StoreError> {
        let options = PgConnectOptions::new()
            .host(&config.host)
            .port(config.port)
            .database(&config.database)
            .username(&config.user)
            .password(&config.password)
            .ssl_mode(config.tls_mode.into());

        let pool = PgPoolOptions::new()
            .max_connections(POOL_MAX_CONNECTIONS)
            .connect_with(options)
            .await?;

        Ok(Self { pool })
    }

    /// Create the message table if it does not exist yet.
    ///
    /// Heavier schema management is an external migration concern; this only
    /// guarantees the service never listens against a missing table.
    pub async fn ensure_schema(&self) -> Result<(), StoreError> {
        sqlx::query(
            "CREATE TABLE IF NOT EXISTS messages (
                id SERIAL PRIMARY KEY,
                content TEXT NOT NULL,
                created_at TIMESTAMPTZ NOT NULL DEFAULT now()
            )",
        )
        .execute(&self.pool)
        .await?;

        Ok(())
    }
}

#[async_trait]
impl MessageStore for PgStore {
    async fn recent_messages(&self, limit: i64) -> Result<Vec<Message>, StoreError> {
        let messages = sqlx::query_as::<_, Message>(
            "SELECT id, content, created_at FROM messages ORDER BY id DESC LIMIT $1",
        )
        .bind(limit)
        .fetch_all(&self.pool)
        .await?;

        Ok(messages)
    }

    async fn create_message(&self, content: &str) -> Result<Message, StoreError> {
        let message = sqlx::query_as::<_, Message>(
            "INSERT INTO messages (content) VALUES ($1) RETURNING id, content, created_at",
        )
        .bind(content)
        .fetch_one(&self.pool)
        .await?;

        Ok(message)
    }

    async fn ping(&self) -> Result<(), StoreError> {
        sqlx::query("SELECT 1")
            .execute(&self.pool)
            .await
            .map_err(|e| StoreError::Unavailable(e.to_string()))?;
        Ok(())
    }
}

impl From<TlsMode> for PgSslMode {
    fn from(mode: TlsMode) -> Self {
        match mode {
            TlsMode::Disable => PgSslMode::Disable,
            // Prefer and Require encrypt without certificate verification
            TlsMode::Prefer => PgSslMode::Prefer,
            TlsMode::Require => PgSslMode::Require,
        }
    }
}
