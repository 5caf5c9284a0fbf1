/*
[INPUT]:  Scripted server behaviour for a single test connection
[OUTPUT]: In-process WebSocket peer and session helpers
[POS]:    Test infrastructure - shared across all test modules
[UPDATE]: When adding new test patterns or fixtures
*/

//! Common test utilities for stock-ticker-client tests

use std::future::Future;

use futures_util::StreamExt;
use stock_ticker_client::{ClientConfig, TickerClient, TickerLog, TickerSession};
use tokio::net::{TcpListener, TcpStream};
use tokio::task::JoinHandle;
use tokio_tungstenite::tungstenite::Message;
use tokio_tungstenite::{WebSocketStream, accept_async};

pub type ServerStream = WebSocketStream<TcpStream>;

/// Accept exactly one WebSocket connection and hand it to `script`.
pub async fn spawn_server<F, Fut, T>(script: F) -> (String, JoinHandle<T>)
where
    F: FnOnce(ServerStream) -> Fut + Send + 'static,
    Fut: Future<Output = T> + Send + 'static,
    T: Send + 'static,
{
    let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind test listener");
    let addr = listener.local_addr().expect("listener address");
    let handle = tokio::spawn(async move {
        let (stream, _) = listener.accept().await.expect("accept test connection");
        let ws = accept_async(stream).await.expect("server handshake");
        script(ws).await
    });
    (format!("ws://{addr}/wsticker"), handle)
}

/// Read `count` text frames, skipping control frames.
pub async fn read_text_frames(ws: &mut ServerStream, count: usize) -> Vec<String> {
    let mut frames = Vec::with_capacity(count);
    while frames.len() < count {
        match ws.next().await {
            Some(Ok(Message::Text(text))) => frames.push(text.as_str().to_owned()),
            Some(Ok(_)) => {}
            other => panic!("connection ended after {} frames: {other:?}", frames.len()),
        }
    }
    frames
}

/// Keep reading until the peer goes away so close handshakes complete.
pub async fn drain(ws: &mut ServerStream) {
    while let Some(Ok(_)) = ws.next().await {}
}

/// An address nothing listens on.
pub fn refused_endpoint() -> String {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").expect("bind throwaway listener");
    let addr = listener.local_addr().expect("listener address");
    drop(listener);
    format!("ws://{addr}/wsticker")
}

#[allow(dead_code)]
pub fn session_for(endpoint: &str) -> (TickerClient, TickerSession<TickerLog>) {
    let config = ClientConfig::new(endpoint);
    let client = TickerClient::new(&config).expect("valid test config");
    let session = TickerSession::new(client.clone(), config.subscriptions, TickerLog::new());
    (client, session)
}

pub fn add_payload(symbol: &str) -> String {
    format!(r#"{{"command":"add","tickerSymbol":"{symbol}"}}"#)
}

#[allow(dead_code)]
pub fn remove_payload(symbol: &str) -> String {
    format!(r#"{{"command":"remove","tickerSymbol":"{symbol}"}}"#)
}
