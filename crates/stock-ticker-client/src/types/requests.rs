/*
[INPUT]:  Ticker server request schema and serde requirements
[OUTPUT]: Typed subscription request serialized through serde_json
[POS]:    Data layer - outbound frame definitions
[UPDATE]: When the request schema changes
*/

use serde::{Deserialize, Serialize};

use super::enums::Command;
use crate::error::Result;

/// Subscription request sent as a single text frame.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TickerRequest {
    pub command: Command,
    #[serde(rename = "tickerSymbol")]
    pub ticker_symbol: String,
}

impl TickerRequest {
    pub fn new(command: Command, ticker_symbol: impl Into<String>) -> Self {
        Self {
            command,
            ticker_symbol: ticker_symbol.into(),
        }
    }

    pub fn add(ticker_symbol: impl Into<String>) -> Self {
        Self::new(Command::Add, ticker_symbol)
    }

    pub fn remove(ticker_symbol: impl Into<String>) -> Self {
        Self::new(Command::Remove, ticker_symbol)
    }

    /// JSON text of the frame.
    pub fn to_payload(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }
}
