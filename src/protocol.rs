//! Wire frames for the chat protocol.
//!
//! Client to server: `{"message": "<text>"}`. Server to client: a tagged
//! frame `{"kind": "chat_message", ...}`; the bare legacy form
//! `{"text": "<text>"}` is still accepted on receipt. The field asymmetry
//! between the two directions is part of the observed wire contract and is
//! kept as-is.

use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

/// Frame encode/decode errors.
#[derive(Debug, Error)]
pub enum ProtocolError {
    /// The frame matches no known shape; receivers drop it instead of faulting
    #[error("undecodable frame: {0}")]
    Decode(serde_json::Error),

    #[error("failed to encode frame: {0}")]
    Encode(serde_json::Error),
}

/// Client-to-server frame: one message of typed text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClientFrame {
    pub message: String,
}

/// Server-to-client frame, tagged by kind and validated on receipt.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ServerFrame {
    ChatMessage {
        /// Server-assigned message id; absent on legacy frames.
        #[serde(default, skip_serializing_if = "Option::is_none")]
        id: Option<Uuid>,

        text: String,

        /// Unix timestamp in milliseconds; absent on legacy frames.
        #[serde(default, skip_serializing_if = "Option::is_none")]
        sent_at: Option<i64>,
    },
}

/// Bare untagged server frame; superseded by the tagged form.
#[derive(Debug, Deserialize)]
struct LegacyServerFrame {
    text: String,
}

pub fn encode_client_frame(message: &str) -> Result<String, ProtocolError> {
    serde_json::to_string(&ClientFrame {
        message: message.to_string(),
    })
    .map_err(ProtocolError::Encode)
}

pub fn decode_client_frame(raw: &str) -> Result<ClientFrame, ProtocolError> {
    serde_json::from_str(raw).map_err(ProtocolError::Decode)
}

pub fn encode_server_frame(frame: &ServerFrame) -> Result<String, ProtocolError> {
    serde_json::to_string(frame).map_err(ProtocolError::Encode)
}

/// Decode a server frame.
///
/// A frame carrying a `kind` tag must decode as the tagged form; a frame
/// without one is tried as the bare legacy `{"text": ...}` form. Anything
/// else fails closed.
pub fn decode_server_frame(raw: &str) -> Result<ServerFrame, ProtocolError> {
    let value: serde_json::Value = serde_json::from_str(raw).map_err(ProtocolError::Decode)?;
    if value.get("kind").is_some() {
        serde_json::from_value(value).map_err(ProtocolError::Decode)
    } else {
        let legacy: LegacyServerFrame =
            serde_json::from_value(value).map_err(ProtocolError::Decode)?;
        Ok(ServerFrame::ChatMessage {
            id: None,
            text: legacy.text,
            sent_at: None,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_encode_client_frame_produces_single_message_field() {
        // given:
        let message = "hello";

        // when:
        let encoded = encode_client_frame(message).unwrap();

        // then:
        assert_eq!(encoded, r#"{"message":"hello"}"#);
    }

    #[test]
    fn test_decode_client_frame_reads_message_field() {
        // given:
        let raw = r#"{"message":"feeding time"}"#;

        // when:
        let frame = decode_client_frame(raw).unwrap();

        // then:
        assert_eq!(frame.message, "feeding time");
    }

    #[test]
    fn test_decode_client_frame_rejects_malformed_json() {
        // given:
        let raw = "{not json";

        // when:
        let result = decode_client_frame(raw);

        // then:
        assert!(matches!(result, Err(ProtocolError::Decode(_))));
    }

    #[test]
    fn test_decode_server_frame_reads_tagged_form() {
        // given:
        let id = Uuid::new_v4();
        let raw = format!(
            r#"{{"kind":"chat_message","id":"{}","text":"hi","sent_at":1700000000000}}"#,
            id
        );

        // when:
        let frame = decode_server_frame(&raw).unwrap();

        // then:
        assert_eq!(
            frame,
            ServerFrame::ChatMessage {
                id: Some(id),
                text: "hi".to_string(),
                sent_at: Some(1_700_000_000_000),
            }
        );
    }

    #[test]
    fn test_decode_server_frame_accepts_tagged_form_without_stamps() {
        // given:
        let raw = r#"{"kind":"chat_message","text":"hi"}"#;

        // when:
        let frame = decode_server_frame(raw).unwrap();

        // then:
        assert_eq!(
            frame,
            ServerFrame::ChatMessage {
                id: None,
                text: "hi".to_string(),
                sent_at: None,
            }
        );
    }

    #[test]
    fn test_decode_server_frame_falls_back_to_bare_text_form() {
        // given:
        let raw = r#"{"text":"hi"}"#;

        // when:
        let frame = decode_server_frame(raw).unwrap();

        // then:
        assert_eq!(
            frame,
            ServerFrame::ChatMessage {
                id: None,
                text: "hi".to_string(),
                sent_at: None,
            }
        );
    }

    #[test]
    fn test_decode_server_frame_ignores_unknown_fields_on_bare_form() {
        // given:
        let raw = r#"{"text":"hi","from":"somewhere","ttl":3}"#;

        // when:
        let frame = decode_server_frame(raw).unwrap();

        // then:
        assert_eq!(
            frame,
            ServerFrame::ChatMessage {
                id: None,
                text: "hi".to_string(),
                sent_at: None,
            }
        );
    }

    #[test]
    fn test_decode_server_frame_fails_closed_on_unknown_kind() {
        // given: an unknown kind, even though a text field is present
        let raw = r#"{"kind":"presence","text":"hi"}"#;

        // when:
        let result = decode_server_frame(raw);

        // then:
        assert!(matches!(result, Err(ProtocolError::Decode(_))));
    }

    #[test]
    fn test_decode_server_frame_fails_closed_on_missing_text() {
        // given:
        let raw = r#"{"kind":"chat_message"}"#;

        // when:
        let result = decode_server_frame(raw);

        // then:
        assert!(matches!(result, Err(ProtocolError::Decode(_))));
    }

    #[test]
    fn test_decode_server_frame_fails_closed_on_non_object_payload() {
        // given:
        let raw = "42";

        // when:
        let result = decode_server_frame(raw);

        // then:
        assert!(matches!(result, Err(ProtocolError::Decode(_))));
    }

    #[test]
    fn test_encode_server_frame_omits_absent_stamps() {
        // given:
        let frame = ServerFrame::ChatMessage {
            id: None,
            text: "hi".to_string(),
            sent_at: None,
        };

        // when:
        let encoded = encode_server_frame(&frame).unwrap();

        // then:
        assert_eq!(encoded, r#"{"kind":"chat_message","text":"hi"}"#);
    }

    #[test]
    fn test_server_frame_round_trips_through_encoding() {
        // given:
        let frame = ServerFrame::ChatMessage {
            id: Some(Uuid::new_v4()),
            text: "walk at 5?".to_string(),
            sent_at: Some(1_700_000_000_000),
        };

        // when:
        let encoded = encode_server_frame(&frame).unwrap();
        let decoded = decode_server_frame(&encoded).unwrap();

        // then:
        assert_eq!(decoded, frame);
    }
}
