/*
[INPUT]:  Text frames pushed by the ticker server
[OUTPUT]: Best-effort typed view used for diagnostics only
[POS]:    Data layer - inbound frame definitions
[UPDATE]: When the server response schema changes
*/

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Server acknowledgement or price update,
/// e.g. `{"result":"success","tickerData":{"GOOG":"540.11"}}`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TickerResponse {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub result: Option<String>,
    #[serde(rename = "tickerData", default, skip_serializing_if = "Option::is_none")]
    pub ticker_data: Option<BTreeMap<String, String>>,
}

impl TickerResponse {
    /// Parse a frame if it looks like a ticker response. Never used to decide
    /// whether a frame is displayed.
    pub fn peek(text: &str) -> Option<Self> {
        serde_json::from_str(text).ok()
    }

    pub fn is_success(&self) -> bool {
        self.result.as_deref() == Some("success")
    }

    pub fn quote_count(&self) -> usize {
        self.ticker_data.as_ref().map_or(0, BTreeMap::len)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_peek_price_update() {
        let text = r#"{"result":"success","tickerData":{"GOOG":"540.11","F":"15.02"}}"#;
        let response = TickerResponse::peek(text).unwrap();
        assert!(response.is_success());
        assert_eq!(response.quote_count(), 2);
        assert_eq!(
            response.ticker_data.unwrap().get("F").map(String::as_str),
            Some("15.02")
        );
    }

    #[test]
    fn test_peek_failure_result() {
        let text = r#"{"result":"Failed. Command not recognized."}"#;
        let response = TickerResponse::peek(text).unwrap();
        assert!(!response.is_success());
        assert_eq!(response.quote_count(), 0);
    }

    #[test]
    fn test_peek_rejects_non_json() {
        assert!(TickerResponse::peek("not json {").is_none());
        assert!(TickerResponse::peek("[1,2]").is_none());
    }
}
