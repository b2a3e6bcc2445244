//! Rate persistence abstractions

use crate::core::error::Result;
use async_trait::async_trait;
use chrono::NaiveDateTime;

/// A stored rate. `currency_code` is the key; `id` is informational.
#[derive(Debug, Clone, PartialEq)]
pub struct RateRecord {
    pub id: i64,
    pub currency_code: String,
    pub rate: f64,
    pub updated_at: NaiveDateTime,
}

#[async_trait]
pub trait RateStore: Send + Sync {
    /// Creates the rates table if it does not exist yet.
    async fn init(&self) -> Result<()>;

    /// Inserts `currency_code` or, when present, overwrites its rate and timestamp.
    async fn save_rate(&self, id: i64, currency_code: &str, rate: f64) -> Result<()>;

    /// Exact, case-sensitive lookup. `Ok(None)` when nothing is stored.
    async fn get_saved_rate(&self, currency_code: &str) -> Result<Option<f64>>;

    async fn list_rates(&self) -> Result<Vec<RateRecord>>;
}
