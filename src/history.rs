use crate::error::{Error, Result};
use crate::models::{AnalysisRecord, AnalysisReport, HistorySummary};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::{Row, SqlitePool};
use std::str::FromStr;
use uuid::Uuid;

/// Persistence contract for analysis records. Records are append-only and
/// owner-scoped: listing only ever returns the caller's own records, and a
/// record owned by someone else is indistinguishable from an absent one.
#[async_trait]
pub trait HistoryStore: Send + Sync {
    async fn append(&self, owner_id: &str, url: &str, report: &AnalysisReport) -> Result<String>;

    /// The caller's records, ascending by creation time.
    async fn list_by_owner(&self, owner_id: &str) -> Result<Vec<HistorySummary>>;

    /// Fails with `NotFound` when the id is absent or owned by a different
    /// caller.
    async fn get_by_id(&self, owner_id: &str, id: &str) -> Result<AnalysisRecord>;
}

const SCHEMA: &str = "CREATE TABLE IF NOT EXISTS analyses (
    id TEXT PRIMARY KEY,
    owner_id TEXT NOT NULL,
    url TEXT NOT NULL,
    time_stamp TEXT NOT NULL,
    result TEXT NOT NULL
)";

pub struct SqliteHistoryStore {
    pool: SqlitePool,
}

impl SqliteHistoryStore {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Opens (creating if missing) the database at `database_url` and ensures
    /// the schema exists.
    pub async fn connect(database_url: &str) -> Result<Self> {
        let options = SqliteConnectOptions::from_str(database_url)
            .map_err(|e| Error::Persistence(format!("invalid database url: {e}")))?
            .create_if_missing(true);

        let pool = SqlitePoolOptions::new()
            .max_connections(5)
            .connect_with(options)
            .await?;

        let store = Self::new(pool);
        store.migrate().await?;
        Ok(store)
    }

    pub async fn migrate(&self) -> Result<()> {
        sqlx::query(SCHEMA).execute(&self.pool).await?;
        Ok(())
    }
}

#[async_trait]
impl HistoryStore for SqliteHistoryStore {
    async fn append(&self, owner_id: &str, url: &str, report: &AnalysisReport) -> Result<String> {
        let id = Uuid::new_v4().to_string();
        let time_stamp = Utc::now().to_rfc3339();
        let result = serde_json::to_string(report)
            .map_err(|e| Error::Persistence(format!("failed to encode report: {e}")))?;

        sqlx::query(
            "INSERT INTO analyses (id, owner_id, url, time_stamp, result) VALUES (?, ?, ?, ?, ?)",
        )
        .bind(&id)
        .bind(owner_id)
        .bind(url)
        .bind(&time_stamp)
        .bind(&result)
        .execute(&self.pool)
        .await?;

        tracing::debug!(id = %id, owner_id = %owner_id, "analysis record appended");

        Ok(id)
    }

    async fn list_by_owner(&self, owner_id: &str) -> Result<Vec<HistorySummary>> {
        let rows = sqlx::query(
            "SELECT id, url, time_stamp, result FROM analyses \
             WHERE owner_id = ? ORDER BY time_stamp ASC",
        )
        .bind(owner_id)
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter()
            .map(|row| {
                let report = decode_report(row.get("result"))?;
                Ok(HistorySummary {
                    id: row.get("id"),
                    url: row.get("url"),
                    time_stamp: parse_timestamp(row.get("time_stamp"))?,
                    seo_score: report.seo_score,
                    performance_score: report.performance_score,
                    overall_score: report.overall_score,
                })
            })
            .collect()
    }

    async fn get_by_id(&self, owner_id: &str, id: &str) -> Result<AnalysisRecord> {
        let row = sqlx::query(
            "SELECT id, owner_id, url, time_stamp, result FROM analyses WHERE id = ?",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or(Error::NotFound)?;

        let record_owner: String = row.get("owner_id");
        if record_owner != owner_id {
            // Foreign records are reported as absent, never as forbidden.
            return Err(Error::NotFound);
        }

        Ok(AnalysisRecord {
            id: row.get("id"),
            owner_id: record_owner,
            url: row.get("url"),
            time_stamp: parse_timestamp(row.get("time_stamp"))?,
            result: decode_report(row.get("result"))?,
        })
    }
}

fn decode_report(raw: String) -> Result<AnalysisReport> {
    serde_json::from_str(&raw)
        .map_err(|e| Error::Persistence(format!("failed to decode stored report: {e}")))
}

fn parse_timestamp(raw: String) -> Result<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(&raw)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| Error::Persistence(format!("invalid stored timestamp: {e}")))
}
