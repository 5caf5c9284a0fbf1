/*
[INPUT]:  Error sources (WebSocket transport, serialization, configuration)
[OUTPUT]: Structured error type shared by the whole crate
[POS]:    Error handling layer - unified error types for entire crate
[UPDATE]: When adding new error sources or improving error messages
*/

use thiserror::Error;

/// Main error type for the ticker client
#[derive(Error, Debug)]
pub enum TickerError {
    /// WebSocket transport error
    #[error("WebSocket error: {0}")]
    WebSocket(String),

    /// A frame was offered while the connection is not open
    #[error("WebSocket not connected")]
    NotConnected,

    /// `start` was called on a client that already owns a connection task
    #[error("WebSocket client already started")]
    AlreadyStarted,

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// URL parsing failed
    #[error("Invalid URL: {0}")]
    UrlParse(#[from] url::ParseError),

    /// Serialization/deserialization failed
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Unknown subscription command
    #[error("Unknown command: {0}")]
    InvalidCommand(String),
}

impl From<tokio_tungstenite::tungstenite::Error> for TickerError {
    fn from(err: tokio_tungstenite::tungstenite::Error) -> Self {
        TickerError::WebSocket(err.to_string())
    }
}

/// Result type alias for ticker client operations
pub type Result<T> = std::result::Result<T, TickerError>;
