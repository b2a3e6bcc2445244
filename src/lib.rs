pub mod cli;
pub mod core;
pub mod providers;
pub mod store;

use crate::core::RateStore;
use crate::core::config::AppConfig;
use crate::providers::CbrRateSource;
use crate::store::SqliteRateStore;
use anyhow::{Context, Result};
use tracing::{debug, info};

#[derive(Debug, Clone, PartialEq)]
pub enum AppCommand {
    Loan {
        principal: f64,
        months: u32,
        annual_rate: f64,
        schedule: bool,
    },
    Convert {
        amount: f64,
        currency: String,
    },
    Refresh,
    Rates,
}

pub async fn run_command(command: AppCommand, config_path: Option<&str>) -> Result<()> {
    info!("rubcalc starting...");

    // Loan math needs neither configuration nor storage.
    if let AppCommand::Loan {
        principal,
        months,
        annual_rate,
        schedule,
    } = command
    {
        return cli::loan::run(principal, months, annual_rate, schedule);
    }

    let config = match config_path {
        Some(path) => AppConfig::load_from_path(path)?,
        None => AppConfig::load()?,
    };
    debug!("Loaded config: {config:#?}");

    let store = open_store(&config).await?;

    match command {
        AppCommand::Convert { amount, currency } => {
            cli::convert::run(&store, amount, &currency).await
        }
        AppCommand::Refresh => {
            let source = CbrRateSource::new(&config.provider.base_url, config.provider.timeout())?;
            cli::refresh::run(&source, &store).await.map(|_| ())
        }
        AppCommand::Rates => cli::rates::run(&store).await,
        AppCommand::Loan { .. } => unreachable!("Loan command handled above"),
    }
}

async fn open_store(config: &AppConfig) -> Result<SqliteRateStore> {
    let path = config.database_path()?;
    let store = SqliteRateStore::new(&path);
    store
        .init()
        .await
        .with_context(|| format!("Failed to open rate store at {}", path.display()))?;
    Ok(store)
}
