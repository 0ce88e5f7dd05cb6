//! Transport tests against a local WebSocket server.
//!
//! Each test binds a listener on an ephemeral port, accepts one socket with
//! `tokio_tungstenite`, and scripts the server side by hand.

use std::time::Duration;

use dropfour_client::{
    ConnectRequest, Endpoint,
    transport::{self, TransportError},
};
use dropfour_proto::{ClientMessage, GameId, ServerMessage};
use futures::{SinkExt, StreamExt};
use tokio::{net::TcpListener, sync::oneshot};
use tokio_tungstenite::tungstenite::{
    Message,
    handshake::server::{Request, Response},
};

const TIMEOUT: Duration = Duration::from_secs(5);

async fn listener() -> (TcpListener, Endpoint) {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let endpoint = Endpoint::parse(&format!("http://{addr}")).unwrap();
    (listener, endpoint)
}

fn request(game_id: Option<&str>) -> ConnectRequest {
    ConnectRequest { username: "alice".into(), game_id: game_id.map(GameId::new) }
}

#[tokio::test]
async fn handshake_carries_path_and_query() {
    let (listener, endpoint) = listener().await;
    let (uri_tx, uri_rx) = oneshot::channel();

    let server = tokio::spawn(async move {
        let (stream, _) = listener.accept().await.unwrap();
        let callback = |req: &Request, resp: Response| {
            let _ = uri_tx.send(req.uri().to_string());
            Ok(resp)
        };
        let _ws = tokio_tungstenite::accept_hdr_async(stream, callback).await.unwrap();
    });

    let _client = transport::connect(&endpoint, &request(Some("g1"))).await.unwrap();
    let uri = tokio::time::timeout(TIMEOUT, uri_rx).await.unwrap().unwrap();
    assert_eq!(uri, "/ws?username=alice&gameId=g1");
    server.await.unwrap();
}

#[tokio::test]
async fn messages_flow_both_ways() {
    let (listener, endpoint) = listener().await;

    let server = tokio::spawn(async move {
        let (stream, _) = listener.accept().await.unwrap();
        let mut ws = tokio_tungstenite::accept_async(stream).await.unwrap();

        ws.send(Message::text(r#"{"type":"queued","message":"Waiting for opponent..."}"#))
            .await
            .unwrap();

        // Client move arrives as a text frame
        let frame = ws.next().await.unwrap().unwrap();
        let text = frame.into_text().unwrap();
        assert_eq!(ClientMessage::decode(text.as_str()).unwrap(), ClientMessage::Move { col: 4 });

        ws.send(Message::text(r#"{"type":"info","message":"ok"}"#)).await.unwrap();
        let _ = ws.close(None).await;
    });

    let mut client = transport::connect(&endpoint, &request(None)).await.unwrap();

    let first = tokio::time::timeout(TIMEOUT, client.from_server.recv()).await.unwrap();
    let queued = ServerMessage::Queued { message: Some("Waiting for opponent...".into()) };
    assert_eq!(first, Some(queued));

    client.to_server.send(ClientMessage::Move { col: 4 }).await.unwrap();

    let second = tokio::time::timeout(TIMEOUT, client.from_server.recv()).await.unwrap();
    assert_eq!(second, Some(ServerMessage::Info { message: "ok".into() }));

    // Server close ends the receive side
    let closed = tokio::time::timeout(TIMEOUT, client.from_server.recv()).await.unwrap();
    assert_eq!(closed, None);

    server.await.unwrap();
}

#[tokio::test]
async fn malformed_frames_are_dropped() {
    let (listener, endpoint) = listener().await;

    let server = tokio::spawn(async move {
        let (stream, _) = listener.accept().await.unwrap();
        let mut ws = tokio_tungstenite::accept_async(stream).await.unwrap();
        ws.send(Message::text("not json")).await.unwrap();
        ws.send(Message::text(r#"{"type":"emote"}"#)).await.unwrap();
        ws.send(Message::text(r#"{"type":"gameOver","result":"Draw"}"#)).await.unwrap();
        let _ = ws.close(None).await;
    });

    let mut client = transport::connect(&endpoint, &request(None)).await.unwrap();

    let first = tokio::time::timeout(TIMEOUT, client.from_server.recv()).await.unwrap();
    assert_eq!(first, Some(ServerMessage::Unknown));
    let second = tokio::time::timeout(TIMEOUT, client.from_server.recv()).await.unwrap();
    assert_eq!(second, Some(ServerMessage::GameOver { result: "Draw".into() }));

    server.await.unwrap();
}

#[tokio::test]
async fn dropping_sender_closes_socket() {
    let (listener, endpoint) = listener().await;

    let server = tokio::spawn(async move {
        let (stream, _) = listener.accept().await.unwrap();
        let mut ws = tokio_tungstenite::accept_async(stream).await.unwrap();
        loop {
            match ws.next().await {
                Some(Ok(Message::Close(_))) | None => return true,
                Some(Ok(_)) => {},
                Some(Err(_)) => return false,
            }
        }
    });

    let client = transport::connect(&endpoint, &request(None)).await.unwrap();
    drop(client.to_server);

    let saw_close = tokio::time::timeout(TIMEOUT, server).await.unwrap().unwrap();
    assert!(saw_close);
}

#[tokio::test]
async fn refused_connection_is_an_error() {
    let (listener, endpoint) = listener().await;
    drop(listener);

    let result = transport::connect(&endpoint, &request(None)).await;
    assert!(matches!(result, Err(TransportError::Connection(_))));
}

#[tokio::test(start_paused = true)]
async fn silent_server_times_out() {
    // Accepted by the kernel backlog, never answered.
    let (_listener, endpoint) = listener().await;

    let result = transport::connect(&endpoint, &request(None)).await;
    match result {
        Err(TransportError::Connection(message)) => assert!(message.contains("timed out")),
        other => panic!("expected a timeout, got {:?}", other.map(|_| ())),
    }
}
