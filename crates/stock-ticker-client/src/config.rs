/*
[INPUT]:  Endpoint address and initial subscriptions
[OUTPUT]: Validated client configuration
[POS]:    Configuration layer - connection setup
[UPDATE]: When adding new client options
*/

use serde::{Deserialize, Serialize};
use url::Url;

use crate::error::{Result, TickerError};
use crate::types::TickerRequest;

pub const DEFAULT_ENDPOINT: &str = "ws://localhost:8080/wsticker";
pub const DEFAULT_SYMBOLS: [&str; 2] = ["GOOG", "F"];

/// Configuration for a ticker client session
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClientConfig {
    /// WebSocket endpoint (`ws://` or `wss://`)
    pub endpoint: String,
    /// Requests sent, in order, as soon as the connection opens
    pub subscriptions: Vec<TickerRequest>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            subscriptions: DEFAULT_SYMBOLS.iter().map(|s| TickerRequest::add(*s)).collect(),
        }
    }
}

impl ClientConfig {
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            endpoint: endpoint.into(),
            ..Self::default()
        }
    }

    /// Replace the initial subscriptions with `add` requests for `symbols`.
    pub fn with_symbols<I, S>(mut self, symbols: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.subscriptions = symbols.into_iter().map(TickerRequest::add).collect();
        self
    }

    pub fn validate(&self) -> Result<()> {
        let url = Url::parse(&self.endpoint)?;
        match url.scheme() {
            "ws" | "wss" => {}
            other => {
                return Err(TickerError::Config(format!(
                    "endpoint scheme must be ws or wss, got {other}"
                )));
            }
        }
        if let Some(request) = self
            .subscriptions
            .iter()
            .find(|request| request.ticker_symbol.trim().is_empty())
        {
            return Err(TickerError::Config(format!(
                "empty ticker symbol in {} subscription",
                request.command
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = ClientConfig::default();
        assert_eq!(config.endpoint, DEFAULT_ENDPOINT);
        assert_eq!(
            config.subscriptions,
            vec![TickerRequest::add("GOOG"), TickerRequest::add("F")]
        );
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_with_symbols_replaces_subscriptions() {
        let config = ClientConfig::new("wss://example.com/ticker").with_symbols(["AAPL"]);
        assert_eq!(config.subscriptions, vec![TickerRequest::add("AAPL")]);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_bad_endpoints() {
        assert!(matches!(
            ClientConfig::new("localhost:8080").validate(),
            Err(TickerError::Config(_))
        ));
        assert!(matches!(
            ClientConfig::new("not a url").validate(),
            Err(TickerError::UrlParse(_))
        ));
    }

    #[test]
    fn test_validate_rejects_blank_symbol() {
        let config = ClientConfig::default().with_symbols(["GOOG", " "]);
        assert!(matches!(config.validate(), Err(TickerError::Config(_))));
    }
}
