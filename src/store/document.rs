//! Embedded document store.
//!
//! Documents are JSON bodies in a single SQLite table keyed by
//! `(collection, id)`. The pool is opened lazily on first use and shared by
//! all requests for the lifetime of the process.

use std::path::{Path, PathBuf};
use std::str::FromStr;

use async_trait::async_trait;
use chrono::Utc;
use serde_json::Value;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};
use sqlx::Row;
use tokio::sync::OnceCell;

use super::{backend_error, RawRecord, RecordStore};
use crate::errors::AppError;

pub struct DocumentStore {
    db_path: PathBuf,
    pool: OnceCell<SqlitePool>,
}

impl DocumentStore {
    pub fn new(db_path: PathBuf) -> Self {
        Self {
            db_path,
            pool: OnceCell::new(),
        }
    }

    async fn pool(&self) -> Result<&SqlitePool, AppError> {
        self.pool
            .get_or_try_init(|| init_pool(&self.db_path))
            .await
            .map_err(|e| {
                tracing::error!("document store unavailable: {}", e);
                AppError::Configuration(format!("document store unavailable: {}", e))
            })
    }
}

async fn init_pool(db_path: &Path) -> Result<SqlitePool, sqlx::Error> {
    if let Some(parent) = db_path.parent() {
        tokio::fs::create_dir_all(parent).await.ok();
    }

    let db_url = format!("sqlite:{}?mode=rwc", db_path.display());

    let options = SqliteConnectOptions::from_str(&db_url)?
        .create_if_missing(true)
        .journal_mode(sqlx::sqlite::SqliteJournalMode::Wal)
        .synchronous(sqlx::sqlite::SqliteSynchronous::Normal)
        .busy_timeout(std::time::Duration::from_secs(30));

    let pool = SqlitePoolOptions::new()
        .max_connections(5)
        .connect_with(options)
        .await?;

    run_migrations(&pool).await?;

    Ok(pool)
}

async fn run_migrations(pool: &SqlitePool) -> Result<(), sqlx::Error> {
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS documents (
            collection TEXT NOT NULL,
            id TEXT NOT NULL,
            body TEXT NOT NULL,
            created_at INTEGER NOT NULL,
            updated_at INTEGER NOT NULL,
            PRIMARY KEY (collection, id)
        );
        "#,
    )
    .execute(pool)
    .await?;

    // networkId is unique within a collection wherever a document carries one
    sqlx::query(
        r#"
        CREATE UNIQUE INDEX IF NOT EXISTS idx_documents_network_id
            ON documents(collection, json_extract(body, '$.networkId'))
            WHERE json_extract(body, '$.networkId') IS NOT NULL;
        "#,
    )
    .execute(pool)
    .await?;

    Ok(())
}

#[async_trait]
impl RecordStore for DocumentStore {
    async fn create(&self, location: &str, fields: RawRecord) -> Result<RawRecord, AppError> {
        let pool = self.pool().await?;
        let id = uuid::Uuid::new_v4().to_string();
        let now = Utc::now().timestamp_millis();
        let body = serde_json::to_string(&fields)?;

        sqlx::query(
            "INSERT INTO documents (collection, id, body, created_at, updated_at) VALUES (?, ?, ?, ?, ?)",
        )
        .bind(location)
        .bind(&id)
        .bind(&body)
        .bind(now)
        .bind(now)
        .execute(pool)
        .await
        .map_err(|e| match &e {
            sqlx::Error::Database(db) if db.is_unique_violation() => {
                tracing::error!("document store insert rejected: {}", db);
                AppError::Backend("a record with the same unique value already exists".to_string())
            }
            _ => backend_error("document store insert failed", e),
        })?;

        Ok(raw_document(&id, fields, now, now))
    }

    async fn find_by_id(&self, location: &str, id: &str) -> Result<Option<RawRecord>, AppError> {
        let pool = self.pool().await?;
        let row = sqlx::query(
            "SELECT body, created_at, updated_at FROM documents WHERE collection = ? AND id = ?",
        )
        .bind(location)
        .bind(id)
        .fetch_optional(pool)
        .await
        .map_err(|e| backend_error("document store read failed", e))?;

        let Some(row) = row else {
            return Ok(None);
        };

        let body: String = row.get("body");
        let fields: RawRecord = serde_json::from_str(&body)?;
        Ok(Some(raw_document(
            id,
            fields,
            row.get("created_at"),
            row.get("updated_at"),
        )))
    }

    async fn update_by_id(
        &self,
        location: &str,
        id: &str,
        fields: RawRecord,
    ) -> Result<RawRecord, AppError> {
        let pool = self.pool().await?;
        let row = sqlx::query(
            "SELECT body, created_at FROM documents WHERE collection = ? AND id = ?",
        )
        .bind(location)
        .bind(id)
        .fetch_optional(pool)
        .await
        .map_err(|e| backend_error("document store read failed", e))?;

        let Some(row) = row else {
            return Err(AppError::NotFound(format!("document {} not found", id)));
        };

        let body: String = row.get("body");
        let mut document: RawRecord = serde_json::from_str(&body)?;
        for (key, value) in fields {
            document.insert(key, value);
        }

        let now = Utc::now().timestamp_millis();
        let body = serde_json::to_string(&document)?;
        let result = sqlx::query(
            "UPDATE documents SET body = ?, updated_at = ? WHERE collection = ? AND id = ?",
        )
        .bind(&body)
        .bind(now)
        .bind(location)
        .bind(id)
        .execute(pool)
        .await
        .map_err(|e| backend_error("document store update failed", e))?;

        if result.rows_affected() == 0 {
            // deleted between the read and the write
            return Err(AppError::NotFound(format!("document {} not found", id)));
        }

        Ok(raw_document(id, document, row.get("created_at"), now))
    }

    async fn delete_by_id(&self, location: &str, id: &str) -> Result<(), AppError> {
        let pool = self.pool().await?;
        let result = sqlx::query("DELETE FROM documents WHERE collection = ? AND id = ?")
            .bind(location)
            .bind(id)
            .execute(pool)
            .await
            .map_err(|e| backend_error("document store delete failed", e))?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!("document {} not found", id)));
        }

        Ok(())
    }
}

/// Assemble the raw wire shape: body fields plus the native identifier and
/// epoch-millisecond timestamps.
fn raw_document(id: &str, mut body: RawRecord, created_at: i64, updated_at: i64) -> RawRecord {
    body.insert("_id".to_string(), Value::String(id.to_string()));
    body.insert("createdAt".to_string(), Value::from(created_at));
    body.insert("updatedAt".to_string(), Value::from(updated_at));
    body
}
