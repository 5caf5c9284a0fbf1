/*
[INPUT]:  ConnectionEvent stream, runtime ticker requests, a LogSink
[OUTPUT]: One display line per lifecycle event or message, in arrival order
[POS]:    Session layer - consumer side of the connection task
[UPDATE]: When changing what gets rendered for an event
*/

use tokio::sync::mpsc;
use tracing::{debug, warn};

use super::log::{LogLine, LogSink};
use super::state_machine::{ConnectionMachine, StateError};
use crate::error::{Result, TickerError};
use crate::types::{TickerRequest, TickerResponse};
use crate::ws::{ConnectionEvent, ConnectionState, TickerClient};

const RAW_LOG_MAX_BYTES: usize = 256;

/// Renders the events of one connection into a sink.
pub struct TickerSession<S> {
    client: TickerClient,
    subscriptions: Vec<TickerRequest>,
    machine: ConnectionMachine,
    sink: S,
}

impl<S: LogSink> TickerSession<S> {
    /// `subscriptions` go out in order when the connection opens.
    pub fn new(client: TickerClient, subscriptions: Vec<TickerRequest>, sink: S) -> Self {
        Self {
            client,
            subscriptions,
            machine: ConnectionMachine::new(),
            sink,
        }
    }

    pub fn state(&self) -> ConnectionState {
        self.machine.state()
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }

    pub fn into_sink(self) -> S {
        self.sink
    }

    /// Render one event. Events the state machine rejects (anything after
    /// `Closed`, a message before `Opened`) are dropped.
    pub async fn handle_event(
        &mut self,
        event: ConnectionEvent,
    ) -> std::result::Result<(), StateError> {
        if let Err(err) = self.machine.apply(&event) {
            warn!(error = %err, "ws event ignored");
            return Err(err);
        }

        match event {
            ConnectionEvent::Opened => {
                self.sink.append(LogLine::connected());
                let subscriptions = std::mem::take(&mut self.subscriptions);
                for request in &subscriptions {
                    if let Err(err) = self.request(request).await {
                        warn!(
                            error = %err,
                            symbol = %request.ticker_symbol,
                            "subscription not sent"
                        );
                    }
                }
            }
            ConnectionEvent::Message(payload) => {
                trace_response(&payload);
                self.sink.append(LogLine::response(&payload));
            }
            ConnectionEvent::Error(detail) => {
                self.sink.append(LogLine::error(&detail));
            }
            ConnectionEvent::Closed => {
                self.sink.append(LogLine::disconnected());
            }
        }
        Ok(())
    }

    /// Send a request and append its `SENT:` line once it is on the wire.
    pub async fn request(&mut self, request: &TickerRequest) -> Result<()> {
        if self.machine.state() != ConnectionState::Open {
            return Err(TickerError::NotConnected);
        }
        let payload = self.client.send(request).await?;
        self.sink.append(LogLine::sent(&payload));
        Ok(())
    }

    /// Drive the session until the connection closes.
    pub async fn run(self, events: mpsc::UnboundedReceiver<ConnectionEvent>) -> S {
        let (requests_tx, requests_rx) = mpsc::unbounded_channel();
        drop(requests_tx);
        self.run_with_requests(events, requests_rx).await
    }

    /// Like `run`, also sending requests from `requests` as they arrive.
    pub async fn run_with_requests(
        mut self,
        mut events: mpsc::UnboundedReceiver<ConnectionEvent>,
        mut requests: mpsc::UnboundedReceiver<TickerRequest>,
    ) -> S {
        let mut requests_open = true;

        while self.machine.state() != ConnectionState::Closed {
            tokio::select! {
                biased;
                event = events.recv() => {
                    match event {
                        Some(event) => {
                            let _ = self.handle_event(event).await;
                        }
                        None => {
                            warn!("ws event stream ended without close");
                            let _ = self.handle_event(ConnectionEvent::Closed).await;
                        }
                    }
                }
                request = requests.recv(), if requests_open => {
                    match request {
                        Some(request) => {
                            if let Err(err) = self.request(&request).await {
                                warn!(
                                    error = %err,
                                    command = %request.command,
                                    symbol = %request.ticker_symbol,
                                    "request not sent"
                                );
                            }
                        }
                        None => requests_open = false,
                    }
                }
            }
        }

        self.sink
    }
}

fn trace_response(payload: &str) {
    match TickerResponse::peek(payload) {
        Some(response) => {
            debug!(
                success = response.is_success(),
                result = response.result.as_deref().unwrap_or("-"),
                quotes = response.quote_count(),
                "ws response"
            );
        }
        None => {
            debug!(
                bytes = payload.len(),
                message = %truncate_for_log(payload, RAW_LOG_MAX_BYTES),
                "ws response is not a ticker response"
            );
        }
    }
}

fn truncate_for_log(value: &str, max_len: usize) -> String {
    if value.len() <= max_len {
        return value.to_string();
    }
    let mut end = max_len;
    while !value.is_char_boundary(end) {
        end -= 1;
    }
    let mut out = String::with_capacity(end + 3);
    out.push_str(&value[..end]);
    out.push_str("...");
    out
}
