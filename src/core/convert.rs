//! Converts an amount using a rate already saved in a [`RateStore`].

use crate::core::error::{Error, Result};
use crate::core::store::RateStore;
use tracing::debug;

#[derive(Debug, Clone, PartialEq)]
pub struct Conversion {
    /// `source_amount * rate`, unrounded.
    pub amount: f64,
    pub code: String,
    pub rate: f64,
    pub source_amount: f64,
}

pub struct ConversionWorkflow<'a> {
    store: &'a dyn RateStore,
}

impl<'a> ConversionWorkflow<'a> {
    pub fn new(store: &'a dyn RateStore) -> Self {
        Self { store }
    }

    pub async fn convert(&self, amount: f64, currency_code: &str) -> Result<Conversion> {
        if currency_code.is_empty() {
            return Err(Error::invalid_input("currency", "no currency selected"));
        }

        let rate = self
            .store
            .get_saved_rate(currency_code)
            .await?
            .ok_or_else(|| Error::NotFound(currency_code.to_string()))?;
        debug!(currency_code, rate, "Using saved rate");

        Ok(Conversion {
            amount: amount * rate,
            code: currency_code.to_string(),
            rate,
            source_amount: amount,
        })
    }
}
