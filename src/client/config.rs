//! Client configuration.

use crate::domain::{RoomName, RoomNameError};

/// Configuration for one chat client instance.
///
/// Everything the client needs is passed in explicitly and stays fixed for
/// the life of the session: the host authority of the chat server, the room
/// to join, and the sender label attached to rendered messages.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    host: String,
    room: RoomName,
    sender: String,
}

impl ClientConfig {
    pub fn new(
        host: impl Into<String>,
        room: &str,
        sender: impl Into<String>,
    ) -> Result<Self, RoomNameError> {
        Ok(Self {
            host: host.into(),
            room: RoomName::new(room)?,
            sender: sender.into(),
        })
    }

    /// Connection target for this configuration.
    ///
    /// Plaintext WebSocket, room embedded in the path, trailing slash
    /// included: `ws://<host>/ws/chat/<room>/`.
    pub fn url(&self) -> String {
        format!("ws://{}/ws/chat/{}/", self.host, self.room)
    }

    pub fn host(&self) -> &str {
        &self.host
    }

    pub fn room(&self) -> &RoomName {
        &self.room
    }

    pub fn sender(&self) -> &str {
        &self.sender
    }
}
