//! Allocation configuration: which strategy serves which table.

use crate::error::{ConfigError, ConfigResult};
use crate::table::TableName;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::env;
use std::fmt;
use std::path::Path;
use std::str::FromStr;

/// Identifier allocation policy for a table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AllocationStrategy {
    /// Strictly increasing, never reused
    #[default]
    Counter,
    /// Lowest available identifier, possibly recycled
    Available,
}

impl FromStr for AllocationStrategy {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "counter" => Ok(AllocationStrategy::Counter),
            "available" => Ok(AllocationStrategy::Available),
            other => Err(ConfigError::InvalidStrategy(other.to_string())),
        }
    }
}

impl fmt::Display for AllocationStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AllocationStrategy::Counter => write!(f, "counter"),
            AllocationStrategy::Available => write!(f, "available"),
        }
    }
}

/// Strategy per table, with a fallback for tables not listed.
///
/// TOML layout:
///
/// ```toml
/// default_strategy = "counter"
///
/// [tables]
/// flags = "available"
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AllocationConfig {
    /// Strategy for tables without an explicit entry
    pub default_strategy: AllocationStrategy,

    /// Per-table overrides
    pub tables: HashMap<TableName, AllocationStrategy>,
}

impl AllocationConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the fallback strategy.
    pub fn with_default_strategy(mut self, strategy: AllocationStrategy) -> Self {
        self.default_strategy = strategy;
        self
    }

    /// Pin a table to a strategy.
    pub fn with_table(mut self, table: TableName, strategy: AllocationStrategy) -> Self {
        self.tables.insert(table, strategy);
        self
    }

    /// Strategy that serves `table`.
    pub fn strategy_for(&self, table: &TableName) -> AllocationStrategy {
        self.tables
            .get(table)
            .copied()
            .unwrap_or(self.default_strategy)
    }

    /// Parse a TOML document.
    ///
    /// ```
    /// use flagpole_ids::{AllocationConfig, AllocationStrategy, TableName};
    ///
    /// let config = AllocationConfig::from_toml_str(r#"
    ///     [tables]
    ///     flags = "available"
    /// "#).unwrap();
    ///
    /// assert_eq!(config.strategy_for(&TableName::flags()), AllocationStrategy::Available);
    /// ```
    pub fn from_toml_str(content: &str) -> ConfigResult<Self> {
        Ok(toml::from_str(content)?)
    }

    /// Load a TOML file.
    pub fn from_file(path: impl AsRef<Path>) -> ConfigResult<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    /// Load from `FLAGPOLE_ID_STRATEGY` and `FLAGPOLE_ID_TABLES`, reading a
    /// `.env` file first when one exists.
    ///
    /// `FLAGPOLE_ID_TABLES` is a comma separated list such as
    /// `flags=available,environments=counter`.
    pub fn from_env() -> ConfigResult<Self> {
        dotenvy::dotenv().ok();

        let default_strategy = env::var("FLAGPOLE_ID_STRATEGY").ok();
        let tables = env::var("FLAGPOLE_ID_TABLES").ok();
        Self::from_parts(default_strategy.as_deref(), tables.as_deref())
    }

    fn from_parts(default_strategy: Option<&str>, tables: Option<&str>) -> ConfigResult<Self> {
        let mut config = Self::new();

        if let Some(strategy) = default_strategy {
            config.default_strategy = strategy.parse()?;
        }

        for entry in tables.unwrap_or_default().split(',') {
            let entry = entry.trim();
            if entry.is_empty() {
                continue;
            }

            let (name, strategy) = entry
                .split_once('=')
                .ok_or_else(|| ConfigError::InvalidTable(entry.to_string()))?;
            let table =
                TableName::new(name).map_err(|_| ConfigError::InvalidTable(entry.to_string()))?;
            config.tables.insert(table, strategy.parse()?);
        }

        Ok(config)
    }
}
