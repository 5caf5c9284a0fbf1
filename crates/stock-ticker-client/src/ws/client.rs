/*
[INPUT]:  Endpoint URL and outbound ticker requests
[OUTPUT]: Connection lifecycle events via channels, connection state via watch
[POS]:    WebSocket layer - single connection owned by one task
[UPDATE]: When changing connection, close or frame handling logic
*/

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use futures_util::{SinkExt, StreamExt};
use tokio::sync::{Mutex, mpsc, oneshot, watch};
use tokio_tungstenite::connect_async;
use tokio_tungstenite::tungstenite::{Error as WsError, Message as WsMessage};
use tracing::{debug, info, warn};

use super::event::{ConnectionEvent, ConnectionState};
use crate::config::ClientConfig;
use crate::error::{Result, TickerError};
use crate::types::TickerRequest;

const OUTBOUND_BUFFER: usize = 100;

#[derive(Debug)]
enum Outbound {
    Frame {
        text: String,
        ack: oneshot::Sender<Result<()>>,
    },
    Close,
}

/// Handle to one ticker server connection.
///
/// Cloning is cheap; all clones talk to the same connection task. The
/// connection itself is never re-established once closed.
#[derive(Debug, Clone)]
pub struct TickerClient {
    endpoint: String,
    started: Arc<AtomicBool>,
    state: Arc<watch::Sender<ConnectionState>>,
    outbound_tx: Arc<Mutex<Option<mpsc::Sender<Outbound>>>>,
}

impl TickerClient {
    /// Create a client for the configured endpoint. Nothing is connected yet.
    pub fn new(config: &ClientConfig) -> Result<Self> {
        config.validate()?;
        let (state, _rx) = watch::channel(ConnectionState::Connecting);
        Ok(Self {
            endpoint: config.endpoint.clone(),
            started: Arc::new(AtomicBool::new(false)),
            state: Arc::new(state),
            outbound_tx: Arc::new(Mutex::new(None)),
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    pub fn state(&self) -> ConnectionState {
        *self.state.borrow()
    }

    pub fn subscribe_state(&self) -> watch::Receiver<ConnectionState> {
        self.state.subscribe()
    }

    /// Spawn the connection task and return its event stream.
    ///
    /// Returns immediately; the handshake happens inside the task. A failed
    /// handshake shows up as `Error` followed by `Closed`.
    pub async fn start(&self) -> Result<mpsc::UnboundedReceiver<ConnectionEvent>> {
        if self.started.swap(true, Ordering::SeqCst) {
            return Err(TickerError::AlreadyStarted);
        }

        let (event_tx, event_rx) = mpsc::unbounded_channel();
        let (outbound_tx, outbound_rx) = mpsc::channel(OUTBOUND_BUFFER);
        *self.outbound_tx.lock().await = Some(outbound_tx);

        let endpoint = self.endpoint.clone();
        let state = self.state.clone();
        let outbound_state = self.outbound_tx.clone();

        tokio::spawn(async move {
            run_connection(&endpoint, &state, &event_tx, outbound_rx).await;

            outbound_state.lock().await.take();
            state.send_replace(ConnectionState::Closed);
            info!(endpoint = %endpoint, "ws disconnected");
            let _ = event_tx.send(ConnectionEvent::Closed);
        });

        Ok(event_rx)
    }

    /// Transmit one request as a text frame.
    ///
    /// Resolves after the frame was written and returns the payload that went
    /// out. Fails with `NotConnected` unless the connection is open.
    pub async fn send(&self, request: &TickerRequest) -> Result<String> {
        if self.state() != ConnectionState::Open {
            return Err(TickerError::NotConnected);
        }

        let payload = request.to_payload()?;
        let sender = {
            let guard = self.outbound_tx.lock().await;
            guard.clone().ok_or(TickerError::NotConnected)?
        };

        let (ack_tx, ack_rx) = oneshot::channel();
        sender
            .send(Outbound::Frame {
                text: payload.clone(),
                ack: ack_tx,
            })
            .await
            .map_err(|_| TickerError::NotConnected)?;
        ack_rx.await.map_err(|_| TickerError::NotConnected)??;

        info!(
            command = %request.command,
            symbol = %request.ticker_symbol,
            "ws request sent"
        );
        Ok(payload)
    }

    /// Start the close handshake. A no-op once the connection is gone.
    pub async fn close(&self) -> Result<()> {
        if !self.started.load(Ordering::SeqCst) {
            return Err(TickerError::NotConnected);
        }

        let sender = self.outbound_tx.lock().await.clone();
        if let Some(sender) = sender {
            // the task may finish between the lock and the send
            let _ = sender.send(Outbound::Close).await;
        }
        Ok(())
    }
}

async fn run_connection(
    endpoint: &str,
    state: &watch::Sender<ConnectionState>,
    events: &mpsc::UnboundedSender<ConnectionEvent>,
    mut outbound_rx: mpsc::Receiver<Outbound>,
) {
    info!(endpoint, "ws connecting");
    let ws_stream = match connect_async(endpoint).await {
        Ok((stream, response)) => {
            debug!(status = %response.status(), "ws handshake complete");
            stream
        }
        Err(err) => {
            warn!(endpoint, error = %err, "ws connect failed");
            let _ = events.send(ConnectionEvent::Error(err.to_string()));
            return;
        }
    };

    let (mut write, mut read) = ws_stream.split();
    state.send_replace(ConnectionState::Open);
    info!(endpoint, "ws connected");
    if events.send(ConnectionEvent::Opened).is_err() {
        return;
    }

    let mut closing = false;
    loop {
        tokio::select! {
            outbound = outbound_rx.recv(), if !closing => {
                match outbound {
                    Some(Outbound::Frame { text, ack }) => {
                        let result = write
                            .send(WsMessage::Text(text.into()))
                            .await
                            .map_err(TickerError::from);
                        let failure = result.as_ref().err().map(ToString::to_string);
                        let _ = ack.send(result);
                        if let Some(detail) = failure {
                            warn!(error = %detail, "ws write failed");
                            let _ = events.send(ConnectionEvent::Error(detail));
                            break;
                        }
                    }
                    Some(Outbound::Close) | None => {
                        closing = true;
                        outbound_rx.close();
                        debug!("ws close requested");
                        if let Err(err) = write.send(WsMessage::Close(None)).await {
                            debug!(error = %err, "ws close frame not sent");
                            break;
                        }
                    }
                }
            }
            incoming = read.next() => {
                match incoming {
                    Some(Ok(WsMessage::Text(text))) => {
                        let text = text.as_str().to_owned();
                        if events.send(ConnectionEvent::Message(text)).is_err() {
                            break;
                        }
                    }
                    Some(Ok(WsMessage::Binary(bytes))) => {
                        let text = String::from_utf8_lossy(&bytes).into_owned();
                        if events.send(ConnectionEvent::Message(text)).is_err() {
                            break;
                        }
                    }
                    Some(Ok(WsMessage::Close(frame))) => {
                        let close_code = frame.as_ref().map(|frame| u16::from(frame.code));
                        info!(?close_code, initiated_locally = closing, "ws close frame received");
                        if !closing {
                            // flushes the queued close reply
                            let _ = write.send(WsMessage::Close(None)).await;
                        }
                        break;
                    }
                    Some(Ok(_)) => {}
                    Some(Err(WsError::ConnectionClosed | WsError::AlreadyClosed)) | None => {
                        break;
                    }
                    Some(Err(err)) => {
                        warn!(error = %err, "ws read failed");
                        let _ = events.send(ConnectionEvent::Error(err.to_string()));
                        break;
                    }
                }
            }
        }
    }
}
