//! Repository for import history entries

use anyhow::{Context, Result};
use async_trait::async_trait;
use chrono::{DateTime, SecondsFormat, Utc};
use sqlx::sqlite::SqliteRow;
use sqlx::{Row, SqlitePool};
use uuid::Uuid;

use crate::import::{HistoryStore, ImportHistoryEntry, ImportStatus};

pub const DEFAULT_PAGE_SIZE: u32 = 20;

/// Filter and paging for history listings
#[derive(Debug, Clone)]
pub struct HistoryQuery {
    pub status: Option<ImportStatus>,
    pub limit: u32,
    pub offset: u32,
}

impl Default for HistoryQuery {
    fn default() -> Self {
        Self {
            status: None,
            limit: DEFAULT_PAGE_SIZE,
            offset: 0,
        }
    }
}

/// Insert one history entry
pub async fn insert_import_history(pool: &SqlitePool, entry: &ImportHistoryEntry) -> Result<i64> {
    let result = sqlx::query(
        r#"
        INSERT INTO import_history (
            run_id, file_name, file_size,
            records_processed, records_created, records_skipped, records_failed,
            status, error_message, created_at
        )
        VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
        "#,
    )
    .bind(entry.run_id.to_string())
    .bind(&entry.file_name)
    .bind(entry.file_size as i64)
    .bind(entry.records_processed.map(i64::from))
    .bind(entry.records_created.map(i64::from))
    .bind(entry.records_skipped.map(i64::from))
    .bind(entry.records_failed.map(i64::from))
    .bind(entry.status.as_str())
    .bind(&entry.error_message)
    .bind(entry.created_at.to_rfc3339_opts(SecondsFormat::Micros, true))
    .execute(pool)
    .await
    .context("Failed to insert import history")?;

    Ok(result.last_insert_rowid())
}

/// List entries newest first
pub async fn list_import_history(
    pool: &SqlitePool,
    query: &HistoryQuery,
) -> Result<Vec<ImportHistoryEntry>> {
    let status = query.status.map(|s| s.as_str());

    let rows = sqlx::query(
        r#"
        SELECT run_id, file_name, file_size,
               records_processed, records_created, records_skipped, records_failed,
               status, error_message, created_at
        FROM import_history
        WHERE (? IS NULL OR status = ?)
        ORDER BY created_at DESC, id DESC
        LIMIT ? OFFSET ?
        "#,
    )
    .bind(status)
    .bind(status)
    .bind(query.limit as i64)
    .bind(query.offset as i64)
    .fetch_all(pool)
    .await
    .context("Failed to list import history")?;

    rows.iter().map(entry_from_row).collect()
}

/// Number of entries, optionally restricted to one status
pub async fn count_import_history(pool: &SqlitePool, status: Option<ImportStatus>) -> Result<i64> {
    let status = status.map(|s| s.as_str());
    let count: i64 = sqlx::query_scalar(
        "SELECT COUNT(*) FROM import_history WHERE (? IS NULL OR status = ?)",
    )
    .bind(status)
    .bind(status)
    .fetch_one(pool)
    .await
    .context("Failed to count import history")?;

    Ok(count)
}

fn entry_from_row(row: &SqliteRow) -> Result<ImportHistoryEntry> {
    let run_id: String = row.try_get("run_id")?;
    let status: String = row.try_get("status")?;
    let created_at: String = row.try_get("created_at")?;

    Ok(ImportHistoryEntry {
        run_id: Uuid::parse_str(&run_id)
            .with_context(|| format!("Invalid run id in history: {}", run_id))?,
        file_name: row.try_get("file_name")?,
        file_size: row.try_get::<i64, _>("file_size")? as u64,
        records_processed: count_column(row, "records_processed")?,
        records_created: count_column(row, "records_created")?,
        records_skipped: count_column(row, "records_skipped")?,
        records_failed: count_column(row, "records_failed")?,
        status: status.parse().map_err(anyhow::Error::msg)?,
        error_message: row.try_get("error_message")?,
        created_at: DateTime::parse_from_rfc3339(&created_at)
            .with_context(|| format!("Invalid timestamp in history: {}", created_at))?
            .with_timezone(&Utc),
    })
}

fn count_column(row: &SqliteRow, column: &str) -> Result<Option<u32>> {
    let value: Option<i64> = row.try_get(column)?;
    Ok(value.map(|v| v as u32))
}

/// History store backed by the local SQLite database
#[derive(Debug, Clone)]
pub struct SqliteHistoryStore {
    pool: SqlitePool,
}

impl SqliteHistoryStore {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    pub async fn list(&self, query: &HistoryQuery) -> Result<Vec<ImportHistoryEntry>> {
        list_import_history(&self.pool, query).await
    }

    pub async fn count(&self, status: Option<ImportStatus>) -> Result<i64> {
        count_import_history(&self.pool, status).await
    }
}

#[async_trait]
impl HistoryStore for SqliteHistoryStore {
    async fn record(&self, entry: &ImportHistoryEntry) -> Result<()> {
        insert_import_history(&self.pool, entry).await?;
        Ok(())
    }
}
