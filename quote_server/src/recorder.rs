//! Rate recorder: best-effort, append-only persistence of relayed quotes.
//!
//! Every successful relay appends one `(bid, timestamp)` row to the `rates`
//! table. Nothing is ever updated or deleted and identical rows are fine.
//! Callers bound each append with its own short deadline and treat any
//! failure as non-fatal.

use std::str::FromStr;
use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use quote_common::{Deadline, Quote};
use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};
use sqlx::FromRow;

use crate::error::PersistenceError;

/// Database used when no other URL is configured.
pub const DEFAULT_DATABASE_URL: &str = "sqlite://exchange_rates.db";

const CREATE_RATES_TABLE: &str = "CREATE TABLE IF NOT EXISTS rates (
    bid TEXT NOT NULL,
    timestamp DATETIME NOT NULL
)";

const INSERT_RATE: &str = "INSERT INTO rates (bid, timestamp) VALUES (?, ?)";

const SELECT_RATES: &str = "SELECT bid, timestamp FROM rates ORDER BY rowid";

/// Append-only sink for relayed quotes.
#[async_trait]
pub trait RateStore: Send + Sync {
    /// Append one record for `quote`, giving up when `deadline` expires.
    async fn append(&self, quote: &Quote, deadline: Deadline) -> Result<(), PersistenceError>;
}

/// On-disk projection of a `Quote`.
#[derive(Debug, Clone, PartialEq, Eq, FromRow)]
pub struct PersistedRecord {
    /// Bid text exactly as relayed.
    pub bid: String,
    /// Observation time of the quote.
    #[sqlx(rename = "timestamp")]
    pub observed_at: DateTime<Utc>,
}

/// `RateStore` backed by a SQLite database.
#[derive(Debug, Clone)]
pub struct SqliteRateStore {
    pool: SqlitePool,
}

impl SqliteRateStore {
    /// Open the database at `url`, creating the file if it does not exist.
    ///
    /// The schema is not touched; call [`Self::init_schema`] once at startup.
    pub async fn connect(url: &str) -> Result<Self, sqlx::Error> {
        let options = SqliteConnectOptions::from_str(url)?.create_if_missing(true);
        let pool = SqlitePoolOptions::new().connect_with(options).await?;
        Ok(Self { pool })
    }

    /// Private in-memory database with the schema already in place.
    ///
    /// The pool is pinned to a single connection that never expires: every
    /// SQLite connection to `:memory:` sees its own database.
    pub async fn in_memory() -> Result<Self, sqlx::Error> {
        let options = SqliteConnectOptions::from_str("sqlite::memory:")?;
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .min_connections(1)
            .idle_timeout(None::<Duration>)
            .max_lifetime(None::<Duration>)
            .connect_with(options)
            .await?;
        let store = Self { pool };
        store.init_schema().await?;
        Ok(store)
    }

    /// Create the `rates` table if it is missing. Safe to call repeatedly.
    pub async fn init_schema(&self) -> Result<(), sqlx::Error> {
        sqlx::query(CREATE_RATES_TABLE).execute(&self.pool).await?;
        Ok(())
    }

    /// Every record in insertion order.
    pub async fn records(&self) -> Result<Vec<PersistedRecord>, sqlx::Error> {
        sqlx::query_as::<_, PersistedRecord>(SELECT_RATES)
            .fetch_all(&self.pool)
            .await
    }
}

#[async_trait]
impl RateStore for SqliteRateStore {
    /// The insert runs in its own transaction. When the deadline expires
    /// before COMMIT is issued, the dropped transaction rolls back and the row
    /// never lands; an expiry while COMMIT is already in flight may still
    /// leave it written.
    async fn append(&self, quote: &Quote, deadline: Deadline) -> Result<(), PersistenceError> {
        let insert = async {
            let mut tx = self.pool.begin().await?;
            sqlx::query(INSERT_RATE)
                .bind(quote.bid())
                .bind(quote.observed_at())
                .execute(&mut *tx)
                .await?;
            tx.commit().await
        };
        deadline.run(insert).await??;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use sqlx::{Connection, SqliteConnection};

    fn budget() -> Deadline {
        Deadline::after(Duration::from_secs(1))
    }

    #[tokio::test]
    async fn appends_are_read_back_in_order() {
        let store = SqliteRateStore::in_memory().await.unwrap();
        let first = Quote::new("5.10", Utc.with_ymd_and_hms(2024, 1, 2, 3, 4, 5).unwrap());
        let second = Quote::new("5.20", Utc.with_ymd_and_hms(2024, 1, 2, 3, 4, 6).unwrap());

        store.append(&first, budget()).await.unwrap();
        store.append(&second, budget()).await.unwrap();

        let records = store.records().await.unwrap();
        assert_eq!(
            records,
            vec![
                PersistedRecord {
                    bid: "5.10".into(),
                    observed_at: first.observed_at()
                },
                PersistedRecord {
                    bid: "5.20".into(),
                    observed_at: second.observed_at()
                },
            ]
        );
    }

    #[tokio::test]
    async fn duplicates_are_kept() {
        let store = SqliteRateStore::in_memory().await.unwrap();
        let quote = Quote::observed_now("5.4321");

        store.append(&quote, budget()).await.unwrap();
        store.append(&quote, budget()).await.unwrap();

        assert_eq!(store.records().await.unwrap().len(), 2);
    }

    #[tokio::test]
    async fn init_schema_is_idempotent() {
        let store = SqliteRateStore::in_memory().await.unwrap();
        store.append(&Quote::observed_now("1"), budget()).await.unwrap();
        store.init_schema().await.unwrap();
        assert_eq!(store.records().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn expired_append_leaves_no_row_behind() {
        let dir = tempfile::tempdir().unwrap();
        let url = format!("sqlite://{}", dir.path().join("rates.db").display());
        let store = SqliteRateStore::connect(&url).await.unwrap();
        store.init_schema().await.unwrap();

        // Hold the write lock so the insert blocks until its deadline expires.
        let mut writer = SqliteConnection::connect(&url).await.unwrap();
        sqlx::query("BEGIN IMMEDIATE").execute(&mut writer).await.unwrap();

        let result = store
            .append(
                &Quote::observed_now("5.4321"),
                Deadline::after(Duration::from_millis(50)),
            )
            .await;
        assert!(matches!(result, Err(PersistenceError::DeadlineExceeded(_))));

        sqlx::query("COMMIT").execute(&mut writer).await.unwrap();
        writer.close().await.unwrap();
        tokio::time::sleep(Duration::from_millis(200)).await;

        assert!(store.records().await.unwrap().is_empty());

        store.append(&Quote::observed_now("5.5"), budget()).await.unwrap();
        let records = store.records().await.unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].bid, "5.5");
    }

    #[tokio::test]
    async fn missing_table_is_a_database_error() {
        let store = SqliteRateStore::in_memory().await.unwrap();
        sqlx::query("DROP TABLE rates").execute(&store.pool).await.unwrap();
        let result = store.append(&Quote::observed_now("1"), budget()).await;
        assert!(matches!(result, Err(PersistenceError::Database(_))));
    }
}
