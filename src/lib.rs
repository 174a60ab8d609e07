//! Room-based WebSocket chat: terminal client and broadcast server.
//!
//! The client opens one WebSocket connection to a room endpoint, renders
//! incoming messages into a transcript, and sends typed text on submit.
//! The server keeps per-room membership and message history in memory and
//! fans each received message out to every member of the room.

pub mod client;
pub mod domain;
pub mod protocol;
pub mod server;

// shared library
pub mod common;
