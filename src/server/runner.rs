//! Server startup and routing.

use std::sync::Arc;

use axum::{Router, routing::get};
use tower_http::trace::TraceLayer;

use crate::common::time::SystemClock;

use super::{
    handler::{health_check, list_rooms, room_detail, websocket_handler},
    signal::shutdown_signal,
    state::AppState,
};

/// Run the chat server until a shutdown signal arrives.
///
/// # Arguments
///
/// * `host` - The host address to bind to (e.g., "127.0.0.1")
/// * `port` - The port number to bind to (e.g., 8080)
pub async fn run_server(host: String, port: u16) -> Result<(), Box<dyn std::error::Error>> {
    let app_state = Arc::new(AppState::new(Box::new(SystemClock)));

    let app = Router::new()
        .route("/ws/chat/{room}/", get(websocket_handler))
        .route("/api/health", get(health_check))
        .route("/api/rooms", get(list_rooms))
        .route("/api/rooms/{room}", get(room_detail))
        .layer(TraceLayer::new_for_http())
        .with_state(app_state);

    let bind_addr = format!("{}:{}", host, port);
    let listener = tokio::net::TcpListener::bind(&bind_addr).await?;

    tracing::info!("chat server listening on {}", listener.local_addr()?);
    tracing::info!("room endpoint: ws://{}/ws/chat/<room>/", bind_addr);
    tracing::info!("Press Ctrl+C to shutdown gracefully");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("server shutdown complete");

    Ok(())
}
