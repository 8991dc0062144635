use crate::core::metadata::Metadata;
use crate::fixed_income::{FixedIncomeSettings, SOURCE_NAME};
use anyhow::{Context, Result, anyhow};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::{fs, path::PathBuf};
use tracing::debug;

/// One entry of the instrument registry.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct Instrument {
    pub ticker: String,
    #[serde(default = "default_source")]
    pub source: String,
    #[serde(default)]
    pub metadata: Metadata,
}

fn default_source() -> String {
    SOURCE_NAME.to_string()
}

#[derive(Debug, Deserialize, Serialize, Clone, Default)]
pub struct AppConfig {
    #[serde(default)]
    pub fixed_income: FixedIncomeSettings,
    #[serde(default)]
    pub instruments: Vec<Instrument>,
}

impl AppConfig {
    pub fn load() -> Result<Self> {
        debug!("Loading default config");
        let config_path = Self::default_config_path()?;
        Self::load_from_path(&config_path)
    }

    pub fn default_config_path() -> Result<PathBuf> {
        let proj_dirs = ProjectDirs::from("org", "fiquote", "fiquote")
            .context("Could not determine project directories")?;
        Ok(proj_dirs.config_dir().join("config.yaml"))
    }

    pub fn load_from_path<P: AsRef<std::path::Path>>(path: P) -> Result<Self> {
        let config_str = fs::read_to_string(path.as_ref())
            .with_context(|| format!("Failed to read config file: {}", path.as_ref().display()))?;

        let config: Self = serde_yaml::from_str(&config_str)
            .with_context(|| format!("Failed to parse config file: {}", path.as_ref().display()))?;
        debug!(
            instruments = config.instruments.len(),
            "Successfully loaded config"
        );
        Ok(config)
    }

    pub fn instrument(&self, ticker: &str) -> Result<&Instrument> {
        self.instruments
            .iter()
            .find(|i| i.ticker == ticker)
            .ok_or_else(|| anyhow!("Instrument not found in registry: {}", ticker))
    }
}
