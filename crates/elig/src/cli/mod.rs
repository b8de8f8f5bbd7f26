//! Command-line interface
//!
//! Loads a TOML configuration file (trading-partner identity plus an
//! optional plan registry), runs one check, and prints the outcome as a
//! colored summary or JSON.

pub mod check;
pub mod output;

use anyhow::{Context, Result};
use elig_types::{PlanRegistry, TradingPartnerConfig};
use serde::Deserialize;
use std::path::Path;

/// The on-disk configuration file
#[derive(Debug, Deserialize)]
pub struct CliConfig {
    /// Trading-partner identity and endpoint
    pub partner: TradingPartnerConfig,
    /// Plan registry; omitted means the Utah Medicaid defaults
    #[serde(default)]
    pub registry: Option<PlanRegistry>,
    /// Per-request HTTP timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_timeout_secs() -> u64 {
    60
}

/// Read and parse a configuration file
pub fn load_config(path: &Path) -> Result<CliConfig> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("cannot read config file {}", path.display()))?;
    toml::from_str(&text).with_context(|| format!("invalid config file {}", path.display()))
}
