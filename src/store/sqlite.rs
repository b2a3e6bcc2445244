//! SQLite-backed rate store.

use crate::core::error::Result;
use crate::core::store::{RateRecord, RateStore};
use async_trait::async_trait;
use chrono::NaiveDateTime;
use sqlx::sqlite::SqliteConnectOptions;
use sqlx::{Connection, FromRow, SqliteConnection};
use std::path::{Path, PathBuf};
use tracing::debug;

const CREATE_RATES_TABLE: &str = include_str!("../../migrations/0001_create_rates.sql");

const UPSERT_RATE: &str = r#"
    INSERT INTO rates (id, target_currency, rate, updated_at)
    VALUES (?, ?, ?, CURRENT_TIMESTAMP)
    ON CONFLICT(target_currency) DO UPDATE SET
        rate = excluded.rate,
        updated_at = CURRENT_TIMESTAMP
"#;

/// `CURRENT_TIMESTAMP` format.
const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

#[derive(FromRow)]
struct DbRate {
    id: i64,
    target_currency: String,
    rate: f64,
    updated_at: String,
}

impl DbRate {
    fn into_domain(self) -> Result<RateRecord> {
        let updated_at = NaiveDateTime::parse_from_str(&self.updated_at, TIMESTAMP_FORMAT)
            .map_err(|e| sqlx::Error::Decode(Box::new(e)))?;
        Ok(RateRecord {
            id: self.id,
            currency_code: self.target_currency,
            rate: self.rate,
            updated_at,
        })
    }
}

/// Rate store over a single SQLite file. Every operation opens its own
/// connection and closes it before returning.
pub struct SqliteRateStore {
    path: PathBuf,
    options: SqliteConnectOptions,
}

impl SqliteRateStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let options = SqliteConnectOptions::new()
            .filename(&path)
            .create_if_missing(true);
        Self { path, options }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    async fn connect(&self) -> Result<SqliteConnection> {
        Ok(SqliteConnection::connect_with(&self.options).await?)
    }
}

#[async_trait]
impl RateStore for SqliteRateStore {
    async fn init(&self) -> Result<()> {
        if let Some(parent) = self.path.parent()
            && !parent.as_os_str().is_empty()
        {
            tokio::fs::create_dir_all(parent)
                .await
                .map_err(sqlx::Error::Io)?;
        }

        let mut conn = self.connect().await?;
        sqlx::query(CREATE_RATES_TABLE).execute(&mut conn).await?;
        conn.close().await?;
        debug!(path = %self.path.display(), "Rate store ready");
        Ok(())
    }

    async fn save_rate(&self, id: i64, currency_code: &str, rate: f64) -> Result<()> {
        let mut conn = self.connect().await?;
        let mut tx = conn.begin().await?;
        sqlx::query(UPSERT_RATE)
            .bind(id)
            .bind(currency_code)
            .bind(rate)
            .execute(&mut *tx)
            .await?;
        tx.commit().await?;
        conn.close().await?;
        debug!(id, currency_code, rate, "Saved rate");
        Ok(())
    }

    async fn get_saved_rate(&self, currency_code: &str) -> Result<Option<f64>> {
        let mut conn = self.connect().await?;
        let rate: Option<f64> =
            sqlx::query_scalar(r#"SELECT rate FROM rates WHERE target_currency = ?"#)
                .bind(currency_code)
                .fetch_optional(&mut conn)
                .await?;
        conn.close().await?;
        debug!(currency_code, found = rate.is_some(), "Looked up rate");
        Ok(rate)
    }

    async fn list_rates(&self) -> Result<Vec<RateRecord>> {
        let mut conn = self.connect().await?;
        let rows: Vec<DbRate> = sqlx::query_as(
            r#"SELECT id, target_currency, rate, updated_at FROM rates ORDER BY id, target_currency"#,
        )
        .fetch_all(&mut conn)
        .await?;
        conn.close().await?;

        rows.into_iter().map(DbRate::into_domain).collect()
    }
}
