//! Exchange rate feed abstractions

use crate::core::error::Result;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// Every feed rate is quoted in RUB per unit of the listed currency.
pub const BASE_CURRENCY: &str = "RUB";

/// One entry of the feed's `Valute` mapping. Only `Value` is required.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RateInfo {
    #[serde(rename = "Value")]
    pub value: f64,
    #[serde(rename = "CharCode", default)]
    pub char_code: Option<String>,
    #[serde(rename = "Name", default)]
    pub name: Option<String>,
    #[serde(rename = "Nominal", default)]
    pub nominal: Option<u32>,
    #[serde(rename = "Previous", default)]
    pub previous: Option<f64>,
}

impl RateInfo {
    pub fn new(value: f64) -> Self {
        Self {
            value,
            char_code: None,
            name: None,
            nominal: None,
            previous: None,
        }
    }
}

/// Currency code to rate mapping that keeps the order the feed listed them in.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RateMap {
    entries: Vec<(String, RateInfo)>,
}

impl RateMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts or replaces `code`. A replaced entry keeps its position.
    pub fn insert(&mut self, code: impl Into<String>, info: RateInfo) {
        let code = code.into();
        match self.entries.iter_mut().find(|(c, _)| *c == code) {
            Some((_, existing)) => *existing = info,
            None => self.entries.push((code, info)),
        }
    }

    pub fn get(&self, code: &str) -> Option<&RateInfo> {
        self.entries
            .iter()
            .find(|(c, _)| c == code)
            .map(|(_, info)| info)
    }

    pub fn contains_key(&self, code: &str) -> bool {
        self.get(code).is_some()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &RateInfo)> {
        self.entries.iter().map(|(c, info)| (c.as_str(), info))
    }

    pub fn codes(&self) -> Vec<String> {
        self.entries.iter().map(|(c, _)| c.clone()).collect()
    }
}

impl FromIterator<(String, RateInfo)> for RateMap {
    fn from_iter<I: IntoIterator<Item = (String, RateInfo)>>(iter: I) -> Self {
        let mut map = RateMap::new();
        for (code, info) in iter {
            map.insert(code, info);
        }
        map
    }
}

#[async_trait]
pub trait RateSource: Send + Sync {
    async fn fetch_rates(&self) -> Result<RateMap>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rate_map_keeps_insertion_order() {
        let map: RateMap = [
            ("USD".to_string(), RateInfo::new(89.0)),
            ("EUR".to_string(), RateInfo::new(97.5)),
            ("AUD".to_string(), RateInfo::new(58.1)),
        ]
        .into_iter()
        .collect();

        assert_eq!(map.codes(), vec!["USD", "EUR", "AUD"]);
        assert_eq!(map.get("EUR").map(|i| i.value), Some(97.5));
        assert!(!map.contains_key("usd"));
    }

    #[test]
    fn test_rate_map_replace_keeps_position() {
        let mut map = RateMap::new();
        map.insert("USD", RateInfo::new(89.0));
        map.insert("EUR", RateInfo::new(97.5));
        map.insert("USD", RateInfo::new(90.0));

        assert_eq!(map.len(), 2);
        assert_eq!(map.codes(), vec!["USD", "EUR"]);
        assert_eq!(map.get("USD").unwrap().value, 90.0);
    }

    #[test]
    fn test_rate_info_ignores_unknown_fields() {
        let info: RateInfo = serde_json::from_str(
            r#"{"ID": "R01235", "NumCode": "840", "CharCode": "USD", "Nominal": 1,
                "Name": "Доллар США", "Value": 89.0, "Previous": 88.5}"#,
        )
        .unwrap();

        assert_eq!(info.value, 89.0);
        assert_eq!(info.char_code.as_deref(), Some("USD"));
        assert_eq!(info.nominal, Some(1));
        assert_eq!(info.previous, Some(88.5));
    }
}
