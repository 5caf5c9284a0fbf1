/*
[INPUT]:  TickerClient lifecycle scenarios
[OUTPUT]: Test results for the connection task handle
[POS]:    Integration tests - WebSocket client
[UPDATE]: When the WebSocket client changes
*/

mod common;

use common::{add_payload, drain, read_text_frames, spawn_server};
use stock_ticker_client::{
    ClientConfig, ConnectionEvent, ConnectionState, TickerClient, TickerError, TickerRequest,
};
use tokio_test::assert_ok;

#[tokio::test]
async fn test_start_twice_is_rejected() {
    let client = assert_ok!(TickerClient::new(&ClientConfig::new(common::refused_endpoint())));
    let _events = assert_ok!(client.start().await);
    assert!(matches!(client.start().await, Err(TickerError::AlreadyStarted)));
}

#[tokio::test]
async fn test_client_publishes_lifecycle_events() {
    let (endpoint, server) = spawn_server(|mut ws| async move {
        let received = read_text_frames(&mut ws, 1).await;
        drain(&mut ws).await;
        received
    })
    .await;

    let client = assert_ok!(TickerClient::new(&ClientConfig::new(endpoint)));
    let mut state = client.subscribe_state();
    let mut events = assert_ok!(client.start().await);

    assert_eq!(events.recv().await, Some(ConnectionEvent::Opened));
    assert_ok!(state.wait_for(|state| *state == ConnectionState::Open).await);

    let payload = assert_ok!(client.send(&TickerRequest::add("GOOG")).await);
    assert_eq!(payload, add_payload("GOOG"));

    assert_ok!(client.close().await);
    assert_eq!(events.recv().await, Some(ConnectionEvent::Closed));
    assert_eq!(events.recv().await, None);
    assert_eq!(client.state(), ConnectionState::Closed);

    assert_eq!(assert_ok!(server.await), vec![add_payload("GOOG")]);
}

#[tokio::test]
async fn test_send_escapes_symbol() {
    let (endpoint, server) = spawn_server(|mut ws| async move {
        let received = read_text_frames(&mut ws, 1).await;
        drain(&mut ws).await;
        received
    })
    .await;

    let client = assert_ok!(TickerClient::new(&ClientConfig::new(endpoint)));
    let mut events = assert_ok!(client.start().await);
    assert_eq!(events.recv().await, Some(ConnectionEvent::Opened));

    assert_ok!(client.send(&TickerRequest::add(r#"GO"OG"#)).await);
    assert_ok!(client.close().await);
    assert_eq!(events.recv().await, Some(ConnectionEvent::Closed));

    let received = assert_ok!(server.await);
    let value: serde_json::Value = assert_ok!(serde_json::from_str(&received[0]));
    assert_eq!(value["tickerSymbol"], r#"GO"OG"#);
}
