//! Error types for the chat client.

use thiserror::Error;

use crate::{domain::RoomNameError, protocol::ProtocolError};

/// Client-specific errors
#[derive(Debug, Error)]
pub enum ClientError {
    /// The configured room identifier is not a valid room name
    #[error("invalid room name: {0}")]
    InvalidRoom(#[from] RoomNameError),

    /// Opening the WebSocket connection failed
    #[error("failed to connect to {url}: {reason}")]
    Connect { url: String, reason: String },

    /// The server closed the connection
    #[error("connection closed by server")]
    ConnectionClosed,

    /// The transport failed mid-session
    #[error("transport error: {0}")]
    Transport(String),

    /// Transmitting a frame over the open connection failed
    #[error("failed to send frame: {0}")]
    Send(String),

    /// An outbound frame could not be encoded
    #[error(transparent)]
    Protocol(#[from] ProtocolError),
}
