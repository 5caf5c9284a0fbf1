/*
[INPUT]:  Endpoint configuration and outbound ticker requests
[OUTPUT]: Connection task handle and its event vocabulary
[POS]:    WebSocket layer - real-time data stream
[UPDATE]: When changing connection logic or published events
*/

pub mod client;
pub mod event;

pub use client::TickerClient;
pub use event::{ConnectionEvent, ConnectionState};
