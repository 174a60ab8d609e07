//! Terminal chat client for room-based WebSocket chat.
//!
//! Connects to one room on a chat server, renders incoming messages with
//! the configured sender label, and sends each typed line as a message.
//!
//! Run with:
//! ```not_rust
//! cargo run --bin client -- --sender alice
//! cargo run --bin client -- -s bob -r pet-owners -H 127.0.0.1:8080
//! ```

use clap::Parser;

use petchat::client::{ClientConfig, run_client};
use petchat::common::logger;

#[derive(Parser, Debug)]
#[command(name = "client")]
#[command(about = "Terminal chat client for room-based WebSocket chat", long_about = None)]
struct Args {
    /// Label attached to every rendered incoming message
    #[arg(short = 's', long)]
    sender: String,

    /// Room to join
    #[arg(short = 'r', long, default_value = "lobby")]
    room: String,

    /// Host authority of the chat server
    #[arg(short = 'H', long, default_value = "127.0.0.1:8080")]
    host: String,
}

#[tokio::main]
async fn main() {
    // Initialize tracing
    logger::init(env!("CARGO_BIN_NAME"), "info");

    let args = Args::parse();

    let config = match ClientConfig::new(args.host, &args.room, args.sender) {
        Ok(config) => config,
        Err(e) => {
            tracing::error!("invalid configuration: {}", e);
            std::process::exit(2);
        }
    };

    if let Err(e) = run_client(config).await {
        tracing::error!("client error: {}", e);
        std::process::exit(1);
    }
}
