use crate::providers::cbr::DEFAULT_BASE_URL;
use anyhow::{Context, Result};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use std::{fs, path::Path, path::PathBuf};
use tracing::debug;

const DEFAULT_TIMEOUT_SECS: u64 = 10;
const DATABASE_FILE: &str = "currency_rates.db";

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct ProviderConfig {
    #[serde(default = "default_base_url")]
    pub base_url: String,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl ProviderConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

impl Default for ProviderConfig {
    fn default() -> Self {
        ProviderConfig {
            base_url: default_base_url(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

fn default_timeout_secs() -> u64 {
    DEFAULT_TIMEOUT_SECS
}

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct AppConfig {
    #[serde(default)]
    pub provider: ProviderConfig,
    /// Rate database file. Defaults to the project data directory.
    pub database_path: Option<String>,
}

impl Default for AppConfig {
    fn default() -> Self {
        AppConfig {
            provider: ProviderConfig::default(),
            database_path: None,
        }
    }
}

impl AppConfig {
    /// Loads the default config file, or built-in defaults if none was created yet.
    pub fn load() -> Result<Self> {
        debug!("Loading default config");
        let config_path = Self::default_config_path()?;
        if !config_path.exists() {
            debug!(
                "No config at {}, using built-in defaults",
                config_path.display()
            );
            return Ok(Self::default());
        }
        Self::load_from_path(&config_path)
    }

    pub fn default_config_path() -> Result<PathBuf> {
        let proj_dirs = project_dirs()?;
        Ok(proj_dirs.config_dir().join("config.yaml"))
    }

    pub fn database_path(&self) -> Result<PathBuf> {
        if let Some(custom_path) = &self.database_path {
            return Ok(PathBuf::from(custom_path));
        }
        let proj_dirs = project_dirs()?;
        Ok(proj_dirs.data_dir().join(DATABASE_FILE))
    }

    pub fn load_from_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        let config_str = fs::read_to_string(path.as_ref())
            .with_context(|| format!("Failed to read config file: {}", path.as_ref().display()))?;

        let config: Self = serde_yaml::from_str(&config_str)
            .with_context(|| format!("Failed to parse config file: {}", path.as_ref().display()))?;
        debug!("Successfully loaded config");
        Ok(config)
    }
}

fn project_dirs() -> Result<ProjectDirs> {
    ProjectDirs::from("ru", "rubcalc", "rubcalc").context("Could not determine project directories")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_deserialization() {
        let yaml_str = r#"
provider:
  base_url: "http://example.com/cbr"
  timeout_secs: 3
database_path: "/tmp/rates.db"
"#;

        let config: AppConfig = serde_yaml::from_str(yaml_str).expect("Failed to deserialize");
        assert_eq!(config.provider.base_url, "http://example.com/cbr");
        assert_eq!(config.provider.timeout(), Duration::from_secs(3));
        assert_eq!(config.database_path.as_deref(), Some("/tmp/rates.db"));
        assert_eq!(
            config.database_path().unwrap(),
            PathBuf::from("/tmp/rates.db")
        );
    }

    #[test]
    fn test_config_defaults_for_missing_fields() {
        let config: AppConfig = serde_yaml::from_str("provider:\n  timeout_secs: 1\n").unwrap();
        assert_eq!(config.provider.base_url, DEFAULT_BASE_URL);
        assert_eq!(config.provider.timeout_secs, 1);
        assert!(config.database_path.is_none());

        let config: AppConfig = serde_yaml::from_str("{}").unwrap();
        assert_eq!(config, AppConfig::default());
        assert_eq!(config.provider.timeout_secs, DEFAULT_TIMEOUT_SECS);
    }

    #[test]
    fn test_config_ignores_retired_base_currency() {
        // Older config files carried a base currency; rates are always RUB.
        let config: AppConfig = serde_yaml::from_str("base_currency: \"USD\"\n").unwrap();
        assert_eq!(config, AppConfig::default());
    }

    #[test]
    fn test_default_database_path_uses_data_dir() {
        let config = AppConfig::default();
        // Fails only on hosts without a home directory.
        if let Ok(path) = config.database_path() {
            assert!(path.ends_with(DATABASE_FILE));
        }
    }

    #[test]
    fn test_load_from_path_reports_bad_yaml() {
        let file = tempfile::NamedTempFile::new().unwrap();
        fs::write(file.path(), "provider: [not, a, map]").unwrap();

        let err = AppConfig::load_from_path(file.path()).unwrap_err();

        assert!(err.to_string().contains("Failed to parse config file"));
    }
}
