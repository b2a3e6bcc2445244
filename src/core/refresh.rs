//! Pulls the latest rates from a [`RateSource`] into a [`RateStore`].

use crate::core::error::Result;
use crate::core::rate::RateSource;
use crate::core::store::RateStore;
use tracing::{debug, info};

pub struct RefreshWorkflow<'a> {
    source: &'a dyn RateSource,
    store: &'a dyn RateStore,
}

impl<'a> RefreshWorkflow<'a> {
    pub fn new(source: &'a dyn RateSource, store: &'a dyn RateStore) -> Self {
        Self { source, store }
    }

    /// Fetches and saves every rate, returning the currency codes in feed order.
    pub async fn refresh(&self) -> Result<Vec<String>> {
        self.refresh_with_progress(&|_, _| {}).await
    }

    /// Like [`refresh`](Self::refresh), calling `on_saved(saved, total)` after each save.
    ///
    /// Ids are 1-based positions in the feed. The first failing save stops the
    /// refresh; rates saved before it stay committed.
    pub async fn refresh_with_progress(
        &self,
        on_saved: &(dyn Fn(usize, usize) + Sync),
    ) -> Result<Vec<String>> {
        let rates = self.source.fetch_rates().await?;
        let total = rates.len();
        debug!(total, "Fetched rates");

        let mut codes = Vec::with_capacity(total);
        for (index, (code, info)) in rates.iter().enumerate() {
            self.store.save_rate(index as i64 + 1, code, info.value).await?;
            codes.push(code.to_string());
            on_saved(index + 1, total);
        }

        info!(count = codes.len(), "Exchange rates refreshed");
        Ok(codes)
    }
}
