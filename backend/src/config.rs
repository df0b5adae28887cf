//! Configuration for the chart console.
//!
//! Every field has a default, so an empty or partial YAML file is valid.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use tracing::info;

/// Default upper bound on the digits of a full account code
pub const MAX_ACCOUNT_CODE_DIGITS: usize = 8;

/// Environment variable holding the path of the YAML configuration file
pub const CONFIG_PATH_ENV: &str = "CHART_CONSOLE_CONFIG";

/// Settings for account code allocation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AccountCodeConfig {
    /// Maximum number of digit characters across a full code, separators excluded
    pub max_account_code_digits: usize,
}

impl Default for AccountCodeConfig {
    fn default() -> Self {
        Self {
            max_account_code_digits: MAX_ACCOUNT_CODE_DIGITS,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChartConsoleConfig {
    pub account_code: AccountCodeConfig,
    /// Route prefix of the ledger account page, the full code is appended
    pub ledger_account_path_prefix: String,
    /// Name given to the chart seeded by the console
    pub chart_name: String,
}

impl Default for ChartConsoleConfig {
    fn default() -> Self {
        Self {
            account_code: AccountCodeConfig::default(),
            ledger_account_path_prefix: "/ledger-accounts".to_string(),
            chart_name: "Chart of Accounts".to_string(),
        }
    }
}

impl ChartConsoleConfig {
    pub fn from_yaml_str(yaml: &str) -> Result<Self> {
        if yaml.trim().is_empty() {
            return Ok(Self::default());
        }
        let config: Self = serde_yaml::from_str(yaml).context("Failed to parse chart console config")?;
        Ok(config)
    }

    /// Load configuration from a YAML file
    pub fn load(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        let config = Self::from_yaml_str(&contents)?;
        info!(
            "Loaded config from {} (max account code digits: {})",
            path.display(),
            config.account_code.max_account_code_digits
        );
        Ok(config)
    }

    /// Load from the path in `CHART_CONSOLE_CONFIG`, or use defaults when unset
    pub fn from_env() -> Result<Self> {
        match std::env::var_os(CONFIG_PATH_ENV) {
            Some(path) => Self::load(Path::new(&path)),
            None => {
                info!("{} not set, using default configuration", CONFIG_PATH_ENV);
                Ok(Self::default())
            }
        }
    }
}
