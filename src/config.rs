//! Engine configuration.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::Result;

/// Tunables for a [`Database`](crate::db::database::Database) and the
/// sessions opened on it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EngineConfig {
    /// Prepared statements each session keeps, keyed by SQL text. 0 disables
    /// the cache.
    #[serde(default = "default_statement_cache_capacity")]
    pub statement_cache_capacity: usize,

    /// Upper bound on rows a single query returns. Extra rows are dropped.
    #[serde(default)]
    pub max_result_rows: Option<usize>,

    /// Log every statement at debug level.
    #[serde(default)]
    pub log_statements: bool,

    /// Statements slower than this are logged as warnings.
    #[serde(default = "default_slow_statement_threshold")]
    pub slow_statement_threshold_ms: u64,
}

fn default_statement_cache_capacity() -> usize {
    64
}

fn default_slow_statement_threshold() -> u64 {
    100
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            statement_cache_capacity: default_statement_cache_capacity(),
            max_result_rows: None,
            log_statements: false,
            slow_statement_threshold_ms: default_slow_statement_threshold(),
        }
    }
}

impl EngineConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads configuration from a TOML file. Missing keys take their defaults.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml(&content)
    }

    pub fn from_toml(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }

    /// Saves configuration to a file.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, self.to_toml()?)?;
        Ok(())
    }

    pub fn to_toml(&self) -> Result<String> {
        Ok(toml::to_string_pretty(self)?)
    }

    pub fn builder() -> EngineConfigBuilder {
        EngineConfigBuilder::new()
    }
}

/// Builder for [`EngineConfig`].
#[derive(Debug, Default)]
pub struct EngineConfigBuilder {
    config: EngineConfig,
}

impl EngineConfigBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn statement_cache_capacity(mut self, capacity: usize) -> Self {
        self.config.statement_cache_capacity = capacity;
        self
    }

    pub fn max_result_rows(mut self, max: usize) -> Self {
        self.config.max_result_rows = Some(max);
        self
    }

    pub fn log_statements(mut self, enabled: bool) -> Self {
        self.config.log_statements = enabled;
        self
    }

    pub fn slow_statement_threshold_ms(mut self, threshold: u64) -> Self {
        self.config.slow_statement_threshold_ms = threshold;
        self
    }

    pub fn build(self) -> EngineConfig {
        self.config
    }
}
