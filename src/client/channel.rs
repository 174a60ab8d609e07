//! Duplex text-channel abstraction over the WebSocket transport.

use async_trait::async_trait;
use futures_util::{SinkExt, StreamExt};
use tokio::net::TcpStream;
use tokio_tungstenite::{
    MaybeTlsStream, WebSocketStream, connect_async, tungstenite::protocol::Message,
};

use super::{config::ClientConfig, error::ClientError};

/// A duplex channel carrying text frames.
///
/// The production implementation wraps a WebSocket stream; tests substitute
/// a mock so session logic runs without a real socket.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait TextChannel: Send {
    /// Transmit one text frame.
    async fn send(&mut self, text: String) -> Result<(), ClientError>;

    /// Wait for the next inbound text frame.
    ///
    /// Returns `None` once the peer has closed the connection.
    async fn recv(&mut self) -> Option<Result<String, ClientError>>;
}

/// WebSocket-backed [`TextChannel`].
pub struct WsChannel {
    stream: WebSocketStream<MaybeTlsStream<TcpStream>>,
}

/// Open the WebSocket connection addressed by the client configuration.
pub async fn connect(config: &ClientConfig) -> Result<WsChannel, ClientError> {
    let url = config.url();
    let (stream, _response) = connect_async(&url)
        .await
        .map_err(|e| ClientError::Connect {
            url: url.clone(),
            reason: e.to_string(),
        })?;
    tracing::info!("connected to {}", url);
    Ok(WsChannel { stream })
}

#[async_trait]
impl TextChannel for WsChannel {
    async fn send(&mut self, text: String) -> Result<(), ClientError> {
        self.stream
            .send(Message::Text(text.into()))
            .await
            .map_err(|e| ClientError::Send(e.to_string()))
    }

    async fn recv(&mut self) -> Option<Result<String, ClientError>> {
        while let Some(message) = self.stream.next().await {
            match message {
                Ok(Message::Text(text)) => return Some(Ok(text.as_str().to_string())),
                Ok(Message::Close(_)) => {
                    tracing::info!("server closed the connection");
                    return None;
                }
                Ok(Message::Binary(data)) => {
                    tracing::debug!("ignoring {} bytes of binary data", data.len());
                }
                // ping/pong is handled by the protocol layer
                Ok(_) => {}
                Err(e) => return Some(Err(ClientError::Transport(e.to_string()))),
            }
        }
        None
    }
}
