/*
[INPUT]:  Socket lifecycle observed by the connection task
[OUTPUT]: ConnectionState and ConnectionEvent published to the consumer
[POS]:    WebSocket layer - task boundary vocabulary
[UPDATE]: When the connection task publishes new kinds of events
*/

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConnectionState {
    Connecting,
    Open,
    Closed,
}

/// Events published by the connection task, in the order they happened.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConnectionEvent {
    Opened,
    Message(String),
    Error(String),
    Closed,
}

impl ConnectionEvent {
    pub fn name(&self) -> &'static str {
        match self {
            ConnectionEvent::Opened => "opened",
            ConnectionEvent::Message(_) => "message",
            ConnectionEvent::Error(_) => "error",
            ConnectionEvent::Closed => "closed",
        }
    }
}
