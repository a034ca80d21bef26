#[cfg(feature = "database")]
use async_trait::async_trait;
#[cfg(feature = "database")]
use chrono::{DateTime, Utc};
#[cfg(feature = "database")]
use sqlx::{migrate::MigrateDatabase, sqlite::SqlitePoolOptions, Row, SqlitePool};
#[cfg(feature = "database")]
use tracing::{debug, info};

#[cfg(feature = "database")]
use crate::workflows::{HistoryStore, PersistenceError, TransitionRecord};

#[cfg(feature = "database")]
/// SQLite-backed transition history; rows are only ever inserted
pub struct SqliteHistoryStore {
    pool: SqlitePool,
}

#[cfg(feature = "database")]
impl SqliteHistoryStore {
    /// Open the database, creating it and running migrations when asked
    pub async fn new(
        database_url: &str,
        max_connections: u32,
        auto_migrate: bool,
    ) -> Result<Self, PersistenceError> {
        if !sqlx::Sqlite::database_exists(database_url).await? {
            info!("Creating database at {}", database_url);
            sqlx::Sqlite::create_database(database_url).await?;
        }

        let pool = SqlitePoolOptions::new()
            .max_connections(max_connections.max(1))
            .connect(database_url)
            .await?;

        if auto_migrate {
            info!("Running database migrations...");
            sqlx::migrate!("./migrations").run(&pool).await?;
            info!("Database migrations completed");
        }

        Ok(Self { pool })
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    fn record_from_row(row: &sqlx::sqlite::SqliteRow) -> Result<TransitionRecord, PersistenceError> {
        let id: String = row.try_get("id")?;
        let invalid = |reason: String| PersistenceError::InvalidRow {
            id: id.clone(),
            reason,
        };

        let uuid = uuid::Uuid::parse_str(&id).map_err(|e| invalid(e.to_string()))?;
        let action: String = row.try_get("action")?;
        let prior: String = row.try_get("prior_status")?;
        let resulting: String = row.try_get("resulting_status")?;
        let recorded_at: String = row.try_get("recorded_at")?;
        let timestamp = DateTime::parse_from_rfc3339(&recorded_at)
            .map_err(|e| invalid(e.to_string()))?
            .with_timezone(&Utc);

        let record = TransitionRecord::from_parts(
            uuid,
            row.try_get("document_id")?,
            action.parse().map_err(|e: crate::workflows::WorkflowError| invalid(e.to_string()))?,
            prior.parse().map_err(|e: crate::workflows::WorkflowError| invalid(e.to_string()))?,
            resulting
                .parse()
                .map_err(|e: crate::workflows::WorkflowError| invalid(e.to_string()))?,
            row.try_get("user_id")?,
            row.try_get("comment")?,
            timestamp,
        );
        record.check_consistency().map_err(invalid)?;
        Ok(record)
    }
}

#[cfg(feature = "database")]
#[async_trait]
impl HistoryStore for SqliteHistoryStore {
    async fn append(&self, record: &TransitionRecord) -> Result<(), PersistenceError> {
        sqlx::query(
            r#"
            INSERT INTO transition_history
                (id, document_id, action, prior_status, resulting_status, user_id, comment, recorded_at)
            VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)
            "#,
        )
        .bind(record.id().to_string())
        .bind(record.document_id())
        .bind(record.action().as_str())
        .bind(record.prior_status().as_str())
        .bind(record.resulting_status().as_str())
        .bind(record.user_id())
        .bind(record.comment())
        .bind(record.timestamp().to_rfc3339())
        .execute(&self.pool)
        .await?;

        debug!(record_id = %record.id(), document_id = %record.document_id(), "Inserted history row");
        Ok(())
    }

    async fn records_for(&self, document_id: &str) -> Result<Vec<TransitionRecord>, PersistenceError> {
        let rows = sqlx::query(
            r#"
            SELECT id, document_id, action, prior_status, resulting_status, user_id, comment, recorded_at
            FROM transition_history
            WHERE document_id = ?1
            ORDER BY rowid ASC
            "#,
        )
        .bind(document_id)
        .fetch_all(&self.pool)
        .await?;

        rows.iter().map(Self::record_from_row).collect()
    }

    /// Close database connections gracefully
    async fn close(&self) {
        info!("Shutting down database connections...");
        self.pool.close().await;
        info!("Database connections closed");
    }
}
