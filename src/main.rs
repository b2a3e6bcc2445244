use anyhow::Result;
use clap::{CommandFactory, Parser, Subcommand};
use rubcalc::core::log::init_logging;

#[derive(Parser)]
#[command(version, about)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Path to optional configuration file
    #[arg(short, long, global = true)]
    config_path: Option<String>,

    #[command(subcommand)]
    command: Option<Commands>,
}

impl From<Commands> for rubcalc::AppCommand {
    fn from(cmd: Commands) -> rubcalc::AppCommand {
        match cmd {
            Commands::Loan {
                principal,
                months,
                rate,
                schedule,
            } => rubcalc::AppCommand::Loan {
                principal,
                months,
                annual_rate: rate,
                schedule,
            },
            Commands::Convert { amount, currency } => {
                rubcalc::AppCommand::Convert { amount, currency }
            }
            Commands::Refresh => rubcalc::AppCommand::Refresh,
            Commands::Rates => rubcalc::AppCommand::Rates,
            Commands::Setup => unreachable!("Setup command should be handled separately"),
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Create default configuration
    Setup,
    /// Calculate monthly payment, total payment and interest for a loan
    Loan {
        /// Loan amount in RUB
        #[arg(short, long, allow_negative_numbers = true)]
        principal: f64,
        /// Loan term in months
        #[arg(short, long)]
        months: u32,
        /// Annual interest rate in percent
        #[arg(short, long, allow_negative_numbers = true)]
        rate: f64,
        /// Also print the month-by-month amortization schedule
        #[arg(long)]
        schedule: bool,
    },
    /// Convert an amount in RUB using a saved exchange rate
    Convert {
        /// Amount in RUB
        #[arg(short, long, allow_negative_numbers = true)]
        amount: f64,
        /// Currency code, e.g. USD
        #[arg(long)]
        currency: String,
    },
    /// Download the latest exchange rates and save them
    Refresh,
    /// List saved exchange rates
    Rates,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    init_logging(cli.verbose);

    let result = match cli.command {
        Some(Commands::Setup) => rubcalc::cli::setup::setup(),
        Some(cmd) => rubcalc::run_command(cmd.into(), cli.config_path.as_deref()).await,
        None => {
            Cli::command().print_help()?;
            Ok(())
        }
    };

    if let Err(e) = &result {
        tracing::error!(error = %e, "Application failed");
    }
    result
}
