/*
[INPUT]:  Crate modules and public type definitions
[OUTPUT]: Public stock ticker client crate surface
[POS]:    Crate root - module wiring
[UPDATE]: When public modules or exports change
*/

pub mod config;
pub mod error;
pub mod session;
pub mod types;
pub mod ws;

pub use config::{ClientConfig, DEFAULT_ENDPOINT, DEFAULT_SYMBOLS};
pub use error::{Result, TickerError};

pub use session::{
    ConnectionMachine,
    LineKind,
    LogLine,
    LogSink,
    StateError,
    TickerLog,
    TickerSession,
    Tone,
};

// Re-export all types
pub use types::*;

pub use ws::{ConnectionEvent, ConnectionState, TickerClient};
