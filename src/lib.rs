pub mod cli;
pub mod core;
pub mod fixed_income;

use crate::core::config::AppConfig;
use crate::core::{Clock, SourceRegistry, SystemClock};
use crate::fixed_income::FixedIncomeSource;
use anyhow::Result;
use chrono::NaiveDate;
use std::sync::Arc;
use tracing::{debug, info};

/// Commands that run against a loaded configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AppCommand {
    Price {
        ticker: String,
        date: Option<NaiveDate>,
        json: bool,
    },
    Batch {
        date: Option<NaiveDate>,
    },
    Schedule {
        ticker: String,
    },
}

/// Registers every source available to the application.
///
/// Network-backed sources plug in here through the same `PriceSource` trait.
pub fn build_registry(config: &AppConfig, clock: Arc<dyn Clock>) -> SourceRegistry {
    let mut registry = SourceRegistry::new();
    registry.register(Arc::new(FixedIncomeSource::new(
        config.fixed_income.clone(),
        clock,
    )));
    registry
}

pub async fn run_command(command: AppCommand, config_path: Option<&str>) -> Result<()> {
    info!("fiquote starting...");

    let config = match config_path {
        Some(path) => AppConfig::load_from_path(path)?,
        None => AppConfig::load()?,
    };
    debug!("Loaded config: {config:#?}");

    run_with_config(command, &config, Arc::new(SystemClock)).await
}

pub async fn run_with_config(
    command: AppCommand,
    config: &AppConfig,
    clock: Arc<dyn Clock>,
) -> Result<()> {
    let registry = build_registry(config, Arc::clone(&clock));
    match command {
        AppCommand::Price { ticker, date, json } => {
            cli::price::run(config, &registry, &ticker, date, json).await
        }
        AppCommand::Batch { date } => cli::batch::run(config, &registry, date).await,
        AppCommand::Schedule { ticker } => cli::schedule::run(config, clock, &ticker),
    }
}
