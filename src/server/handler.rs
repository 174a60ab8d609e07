//! WebSocket and HTTP handlers.

use std::sync::Arc;

use axum::{
    Json,
    extract::{
        Path, State,
        ws::{Message, WebSocket, WebSocketUpgrade},
    },
    http::StatusCode,
    response::IntoResponse,
};
use futures_util::{sink::SinkExt, stream::StreamExt};
use serde::Serialize;
use tokio::sync::mpsc;
use uuid::Uuid;

use crate::{
    common::time::timestamp_to_rfc3339,
    domain::RoomName,
    protocol::{ServerFrame, decode_client_frame, encode_server_frame},
};

use super::state::{AppState, Room, StoredMessage};

pub async fn websocket_handler(
    ws: WebSocketUpgrade,
    State(state): State<Arc<AppState>>,
    Path(room): Path<String>,
) -> Result<impl IntoResponse, StatusCode> {
    let room_name = match RoomName::new(room) {
        Ok(name) => name,
        Err(e) => {
            tracing::warn!("rejecting upgrade, invalid room name: {}", e);
            return Err(StatusCode::BAD_REQUEST);
        }
    };

    Ok(ws.on_upgrade(move |socket| handle_socket(socket, state, room_name)))
}

async fn handle_socket(socket: WebSocket, state: Arc<AppState>, room_name: RoomName) {
    let connection_id = Uuid::new_v4();
    let (tx, mut rx) = mpsc::unbounded_channel::<String>();

    {
        let mut rooms = state.rooms.lock().await;
        let room = rooms.entry(room_name.clone()).or_insert_with(|| {
            tracing::info!("room '{}' created", room_name);
            Room::new(state.clock.now_millis())
        });
        room.join(connection_id, tx);
    }
    tracing::info!("connection {} joined room '{}'", connection_id, room_name);

    let (mut ws_sender, mut ws_receiver) = socket.split();

    // outbound: room broadcasts queued on rx are written to this socket
    let mut send_task = tokio::spawn(async move {
        while let Some(payload) = rx.recv().await {
            if ws_sender.send(Message::Text(payload.into())).await.is_err() {
                break;
            }
        }
    });

    // inbound: frames from this member are recorded and fanned out
    let recv_state = state.clone();
    let recv_room = room_name.clone();
    let mut recv_task = tokio::spawn(async move {
        while let Some(message) = ws_receiver.next().await {
            let message = match message {
                Ok(message) => message,
                Err(e) => {
                    tracing::warn!("websocket error on connection {}: {}", connection_id, e);
                    break;
                }
            };

            match message {
                Message::Text(text) => {
                    handle_text_frame(&recv_state, &recv_room, text.as_str()).await;
                }
                Message::Close(_) => {
                    tracing::info!("connection {} requested close", connection_id);
                    break;
                }
                _ => {}
            }
        }
    });

    // if either direction ends, tear down the other
    tokio::select! {
        _ = &mut recv_task => send_task.abort(),
        _ = &mut send_task => recv_task.abort(),
    }

    let mut rooms = state.rooms.lock().await;
    if let Some(room) = rooms.get_mut(&room_name) {
        room.leave(&connection_id);
    }
    tracing::info!("connection {} left room '{}'", connection_id, room_name);
}

/// Decode, stamp, record, and fan out one text frame.
///
/// Undecodable input is dropped with a warning; the connection stays up.
async fn handle_text_frame(state: &AppState, room_name: &RoomName, raw: &str) {
    let frame = match decode_client_frame(raw) {
        Ok(frame) => frame,
        Err(e) => {
            tracing::warn!("dropping undecodable frame in room '{}': {}", room_name, e);
            return;
        }
    };

    let stored = StoredMessage {
        id: Uuid::new_v4(),
        text: frame.message,
        sent_at: state.clock.now_millis(),
    };
    let outbound = ServerFrame::ChatMessage {
        id: Some(stored.id),
        text: stored.text.clone(),
        sent_at: Some(stored.sent_at),
    };
    let payload = match encode_server_frame(&outbound) {
        Ok(payload) => payload,
        Err(e) => {
            tracing::error!("failed to encode broadcast frame: {}", e);
            return;
        }
    };

    let mut rooms = state.rooms.lock().await;
    if let Some(room) = rooms.get_mut(room_name) {
        room.record(stored);
        room.broadcast(&payload);
    }
}

/// Summary of one room for the listing endpoint.
#[derive(Debug, Serialize)]
pub struct RoomSummary {
    pub name: String,
    pub members: usize,
    pub messages: usize,
    pub created_at: String,
}

#[derive(Debug, Serialize)]
pub struct MessageDetail {
    pub id: Uuid,
    pub text: String,
    pub sent_at: String,
}

#[derive(Debug, Serialize)]
pub struct RoomDetail {
    pub name: String,
    pub members: usize,
    pub created_at: String,
    pub messages: Vec<MessageDetail>,
}

/// Health check endpoint
pub async fn health_check() -> Json<serde_json::Value> {
    Json(serde_json::json!({"status": "ok"}))
}

/// List all rooms, sorted by name.
pub async fn list_rooms(State(state): State<Arc<AppState>>) -> Json<Vec<RoomSummary>> {
    let rooms = state.rooms.lock().await;

    let mut summaries: Vec<RoomSummary> = rooms
        .iter()
        .map(|(name, room)| RoomSummary {
            name: name.as_str().to_string(),
            members: room.member_count(),
            messages: room.messages().len(),
            created_at: timestamp_to_rfc3339(room.created_at()),
        })
        .collect();
    summaries.sort_by(|a, b| a.name.cmp(&b.name));

    Json(summaries)
}

/// Room detail by name, including its message history.
pub async fn room_detail(
    State(state): State<Arc<AppState>>,
    Path(room): Path<String>,
) -> Result<Json<RoomDetail>, StatusCode> {
    let room_name = RoomName::new(room).map_err(|_| StatusCode::NOT_FOUND)?;

    let rooms = state.rooms.lock().await;
    let room = rooms.get(&room_name).ok_or(StatusCode::NOT_FOUND)?;

    Ok(Json(RoomDetail {
        name: room_name.as_str().to_string(),
        members: room.member_count(),
        created_at: timestamp_to_rfc3339(room.created_at()),
        messages: room
            .messages()
            .iter()
            .map(|message| MessageDetail {
                id: message.id,
                text: message.text.clone(),
                sent_at: timestamp_to_rfc3339(message.sent_at),
            })
            .collect(),
    }))
}
