//! Server state: rooms, their members, and message history.

use std::collections::HashMap;

use tokio::sync::{Mutex, mpsc};
use uuid::Uuid;

use crate::{common::time::Clock, domain::RoomName};

/// One message recorded in a room's history.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredMessage {
    pub id: Uuid,
    pub text: String,
    pub sent_at: i64,
}

/// A chat room: its members' outbound channels and the message history.
///
/// Members are keyed by a per-connection id; the protocol carries no
/// client identity.
#[derive(Debug)]
pub struct Room {
    created_at: i64,
    members: HashMap<Uuid, mpsc::UnboundedSender<String>>,
    messages: Vec<StoredMessage>,
}

impl Room {
    pub fn new(created_at: i64) -> Self {
        Self {
            created_at,
            members: HashMap::new(),
            messages: Vec::new(),
        }
    }

    pub fn created_at(&self) -> i64 {
        self.created_at
    }

    pub fn member_count(&self) -> usize {
        self.members.len()
    }

    pub fn messages(&self) -> &[StoredMessage] {
        &self.messages
    }

    /// Register a member's outbound channel.
    pub fn join(&mut self, connection_id: Uuid, sender: mpsc::UnboundedSender<String>) {
        self.members.insert(connection_id, sender);
    }

    /// Remove a member; unknown ids are a no-op.
    pub fn leave(&mut self, connection_id: &Uuid) {
        self.members.remove(connection_id);
    }

    /// Append a message to the room history.
    pub fn record(&mut self, message: StoredMessage) {
        self.messages.push(message);
    }

    /// Deliver a payload to every member, sender included.
    ///
    /// Individual delivery failures are logged and skipped.
    pub fn broadcast(&self, payload: &str) {
        for (connection_id, sender) in &self.members {
            if sender.send(payload.to_string()).is_err() {
                tracing::warn!("failed to deliver to connection {}", connection_id);
            }
        }
    }
}

/// Shared application state.
pub struct AppState {
    /// Rooms keyed by name, created on first join and retained afterwards
    /// so history and listings survive an empty room.
    pub rooms: Mutex<HashMap<RoomName, Room>>,
    /// Clock used to stamp rooms and messages.
    pub clock: Box<dyn Clock>,
}

impl AppState {
    pub fn new(clock: Box<dyn Clock>) -> Self {
        Self {
            rooms: Mutex::new(HashMap::new()),
            clock,
        }
    }
}
