//! Room-based WebSocket chat server.

mod handler;
mod runner;
mod signal;
mod state;

pub use runner::run_server;
pub use state::{AppState, Room, StoredMessage};
