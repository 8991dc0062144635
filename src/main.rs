use anyhow::Result;
use chrono::NaiveDate;
use clap::{CommandFactory, Parser, Subcommand};
use fiquote::core::log::init_logging;

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

#[derive(Subcommand)]
enum Commands {
    /// Create default configuration
    Setup,
    /// Price one instrument from the registry
    Price {
        /// Ticker of the instrument
        ticker: String,
        /// Historical date (YYYY-MM-DD), defaults to today
        #[arg(short, long)]
        date: Option<NaiveDate>,
        /// Print the quote as JSON
        #[arg(long)]
        json: bool,
    },
    /// Price every instrument in the registry, skipping failures
    Batch {
        /// Historical date (YYYY-MM-DD), defaults to today
        #[arg(short, long)]
        date: Option<NaiveDate>,
    },
    /// Display the coupon period schedule of a fixed-income instrument
    Schedule {
        /// Ticker of the instrument
        ticker: String,
    },
}

impl From<Commands> for fiquote::AppCommand {
    fn from(cmd: Commands) -> fiquote::AppCommand {
        match cmd {
            Commands::Price { ticker, date, json } => {
                fiquote::AppCommand::Price { ticker, date, json }
            }
            Commands::Batch { date } => fiquote::AppCommand::Batch { date },
            Commands::Schedule { ticker } => fiquote::AppCommand::Schedule { ticker },
            Commands::Setup => unreachable!("Setup command should be handled separately"),
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    init_logging(cli.verbose);

    let result = match cli.command {
        Some(Commands::Setup) => fiquote::cli::setup::setup(),
        Some(cmd) => fiquote::run_command(cmd.into(), cli.config_path.as_deref()).await,
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
