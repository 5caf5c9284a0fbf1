/*
[INPUT]:  Optional YAML configuration file and CLI overrides
[OUTPUT]: Resolved runner configuration and the client configuration
[POS]:    Configuration layer - session setup
[UPDATE]: When adding new configuration options
*/

use std::path::Path;

use anyhow::Context;
use serde::{Deserialize, Serialize};
use stock_ticker_client::{ClientConfig, DEFAULT_ENDPOINT, DEFAULT_SYMBOLS};

/// Top-level configuration for the ticker runner
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct TickerConfig {
    /// WebSocket endpoint of the ticker server
    #[serde(default = "default_endpoint")]
    pub endpoint: String,
    /// Symbols subscribed to as soon as the connection opens
    #[serde(default = "default_symbols")]
    pub symbols: Vec<String>,
    /// Prefix rendered lines with their time
    #[serde(default)]
    pub timestamps: bool,
}

impl Default for TickerConfig {
    fn default() -> Self {
        Self {
            endpoint: default_endpoint(),
            symbols: default_symbols(),
            timestamps: false,
        }
    }
}

fn default_endpoint() -> String {
    DEFAULT_ENDPOINT.to_string()
}

fn default_symbols() -> Vec<String> {
    DEFAULT_SYMBOLS.iter().map(|s| s.to_string()).collect()
}

impl TickerConfig {
    /// Load configuration from YAML file
    pub fn from_file(path: &Path) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("read config file {}", path.display()))?;
        Self::from_yaml_str(&content)
    }

    pub fn from_yaml_str(content: &str) -> anyhow::Result<Self> {
        if content.trim().is_empty() {
            return Ok(Self::default());
        }
        let config: Self = serde_yaml::from_str(content).context("parse yaml config")?;
        Ok(config)
    }

    /// Command line values win over file values. An empty `symbols` keeps
    /// the configured list.
    pub fn apply_overrides(
        &mut self,
        endpoint: Option<String>,
        symbols: Vec<String>,
        timestamps: bool,
    ) {
        if let Some(endpoint) = endpoint {
            self.endpoint = endpoint;
        }
        if !symbols.is_empty() {
            self.symbols = symbols;
        }
        self.timestamps |= timestamps;
    }

    pub fn client_config(&self) -> ClientConfig {
        ClientConfig::new(self.endpoint.clone()).with_symbols(self.symbols.iter().cloned())
    }
}
