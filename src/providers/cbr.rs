use crate::core::error::{Error, Result};
use crate::core::rate::{RateInfo, RateMap, RateSource};
use async_trait::async_trait;
use serde::Deserialize;
use std::time::Duration;
use tracing::{debug, instrument};

pub const DEFAULT_BASE_URL: &str = "https://www.cbr-xml-daily.ru";
const DAILY_RATES_PATH: &str = "/daily_json.js";

#[derive(Deserialize, Debug)]
struct DailyRatesResponse {
    #[serde(rename = "Valute", default)]
    valute: Option<serde_json::Map<String, serde_json::Value>>,
}

/// Daily RUB exchange rates published by the Central Bank of Russia.
pub struct CbrRateSource {
    url: String,
    client: reqwest::Client,
}

impl CbrRateSource {
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self> {
        let client = reqwest::Client::builder()
            .user_agent(concat!("rubcalc/", env!("CARGO_PKG_VERSION")))
            .timeout(timeout)
            .build()
            .map_err(Error::network)?;

        Ok(CbrRateSource {
            url: format!("{}{}", base_url.trim_end_matches('/'), DAILY_RATES_PATH),
            client,
        })
    }

    pub fn url(&self) -> &str {
        &self.url
    }
}

#[async_trait]
impl RateSource for CbrRateSource {
    #[instrument(name = "CbrRatesFetch", skip(self), fields(url = %self.url))]
    async fn fetch_rates(&self) -> Result<RateMap> {
        debug!("Requesting exchange rates");

        let response = self
            .client
            .get(&self.url)
            .send()
            .await
            .map_err(Error::network)?;

        let status = response.status();
        if !status.is_success() {
            return Err(Error::RemoteError {
                status,
                url: self.url.clone(),
            });
        }

        let text = response.text().await.map_err(Error::network)?;

        let data: DailyRatesResponse =
            serde_json::from_str(&text).map_err(|source| Error::MalformedResponse {
                context: "response body is not a rate document".to_string(),
                source,
            })?;

        let rates = data
            .valute
            .unwrap_or_default()
            .into_iter()
            .map(|(code, entry)| {
                let info: RateInfo =
                    serde_json::from_value(entry).map_err(|source| Error::MalformedResponse {
                        context: format!("invalid entry for {code}"),
                        source,
                    })?;
                Ok((code, info))
            })
            .collect::<Result<RateMap>>()?;

        debug!(count = rates.len(), "Parsed exchange rates");
        Ok(rates)
    }
}
