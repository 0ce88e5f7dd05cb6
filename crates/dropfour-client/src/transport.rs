//! WebSocket transport for the client.
//!
//! Provides [`ConnectedClient`] which handles socket I/O for message
//! transport. This is a thin layer that only moves messages: protocol logic
//! remains in the Sans-IO [`Session`](crate::Session).

use std::time::Duration;

use dropfour_proto::{ClientMessage, ServerMessage};
use futures::{SinkExt, StreamExt};
use thiserror::Error;
use tokio::{net::TcpStream, sync::mpsc};
use tokio_tungstenite::{MaybeTlsStream, WebSocketStream, connect_async, tungstenite::Message};

use crate::{ConnectRequest, Endpoint};

type Socket = WebSocketStream<MaybeTlsStream<TcpStream>>;

/// Upper bound on the TCP connect plus websocket handshake.
pub const CONNECT_TIMEOUT: Duration = Duration::from_secs(10);

/// Transport errors.
#[derive(Debug, Error)]
pub enum TransportError {
    /// Connection failed.
    #[error("connection failed: {0}")]
    Connection(String),

    /// Stream error.
    #[error("stream error: {0}")]
    Stream(String),

    /// Server address could not be used.
    #[error("invalid server url: {0}")]
    InvalidUrl(String),

    /// HTTP request failed.
    #[error("http request failed: {0}")]
    Http(#[from] reqwest::Error),
}

/// Handle to a connected client with WebSocket transport.
///
/// Messages are sent/received via the channels, and an internal task handles
/// the socket I/O. Dropping `to_server` closes the socket gracefully; the
/// task then drops its end of `from_server`, so `recv` returning `None`
/// means the connection is gone.
pub struct ConnectedClient {
    /// Send messages to the server.
    pub to_server: mpsc::Sender<ClientMessage>,
    /// Receive decoded messages from the server.
    pub from_server: mpsc::Receiver<ServerMessage>,
    /// Abort handle to stop the connection task.
    abort_handle: tokio::task::AbortHandle,
}

impl ConnectedClient {
    /// Stop the connection without a close handshake.
    pub fn stop(&self) {
        self.abort_handle.abort();
    }
}

/// Open a WebSocket to the server for `request`.
///
/// Returns once the handshake has completed, i.e. the socket is open.
pub async fn connect(
    endpoint: &Endpoint,
    request: &ConnectRequest,
) -> Result<ConnectedClient, TransportError> {
    let url = endpoint.socket_url(request)?;
    tracing::debug!(%url, "opening websocket");

    let (socket, _response) = tokio::time::timeout(CONNECT_TIMEOUT, connect_async(url.as_str()))
        .await
        .map_err(|_| TransportError::Connection(format!("{url}: handshake timed out")))?
        .map_err(|e| TransportError::Connection(format!("{url}: {e}")))?;

    let (to_server_tx, to_server_rx) = mpsc::channel::<ClientMessage>(32);
    let (from_server_tx, from_server_rx) = mpsc::channel::<ServerMessage>(32);

    let handle = tokio::spawn(run_connection(socket, to_server_rx, from_server_tx));

    Ok(ConnectedClient {
        to_server: to_server_tx,
        from_server: from_server_rx,
        abort_handle: handle.abort_handle(),
    })
}

/// Run the connection, bridging between channels and the socket.
async fn run_connection(
    socket: Socket,
    mut to_server: mpsc::Receiver<ClientMessage>,
    from_server: mpsc::Sender<ServerMessage>,
) {
    let (mut sink, mut source) = socket.split();

    loop {
        tokio::select! {
            outgoing = to_server.recv() => {
                let Some(message) = outgoing else {
                    let _ = sink.send(Message::Close(None)).await;
                    break;
                };
                if let Err(e) = send_message(&mut sink, &message).await {
                    tracing::warn!(error = %e, "send failed");
                    break;
                }
            },
            incoming = source.next() => match incoming {
                Some(Ok(Message::Text(text))) => match ServerMessage::decode(text.as_str()) {
                    Ok(message) => {
                        if from_server.send(message).await.is_err() {
                            break;
                        }
                    },
                    Err(e) => tracing::debug!(error = %e, "dropping malformed frame"),
                },
                Some(Ok(Message::Close(frame))) => {
                    tracing::debug!(?frame, "server closed socket");
                    break;
                },
                Some(Ok(_)) => {},
                Some(Err(e)) => {
                    tracing::warn!(error = %e, "socket error");
                    break;
                },
                None => break,
            },
        }
    }

    tracing::info!("connection closed");
}

async fn send_message<S>(sink: &mut S, message: &ClientMessage) -> Result<(), TransportError>
where
    S: futures::Sink<Message, Error = tokio_tungstenite::tungstenite::Error> + Unpin,
{
    let text = message
        .encode()
        .map_err(|e| TransportError::Stream(format!("encode failed: {e}")))?;

    sink.send(Message::Text(text.into()))
        .await
        .map_err(|e| TransportError::Stream(format!("write failed: {e}")))
}
