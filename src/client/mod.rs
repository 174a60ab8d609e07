//! Terminal chat client: one WebSocket connection bridged to terminal
//! input and a rendered transcript.

mod channel;
mod config;
mod error;
mod render;
mod runner;
mod session;

pub use channel::{TextChannel, WsChannel, connect};
pub use config::ClientConfig;
pub use error::ClientError;
pub use render::{RenderedMessage, Transcript, escape_markup};
pub use runner::run_client;
pub use session::{ChatClient, InputBuffer};
