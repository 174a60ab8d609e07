//! Domain value types shared by client and server.

use std::fmt;

use serde::Serialize;
use thiserror::Error;

/// Maximum accepted room name length, in characters.
pub const MAX_ROOM_NAME_LEN: usize = 100;

/// Reasons a raw string is not a valid room name.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum RoomNameError {
    #[error("room name must not be empty")]
    Empty,

    #[error("room name must be at most {MAX_ROOM_NAME_LEN} characters")]
    TooLong,

    #[error("room name contains invalid character {0:?}")]
    InvalidCharacter(char),
}

/// A validated chat room identifier.
///
/// Room names are slugs: ASCII alphanumerics plus `-` and `_`, at most
/// [`MAX_ROOM_NAME_LEN`] characters. The name is embedded in the connection
/// path, so anything a URL path would mangle is rejected outright.
/// Immutable once constructed.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct RoomName(String);

impl RoomName {
    pub fn new(raw: impl Into<String>) -> Result<Self, RoomNameError> {
        let raw = raw.into();
        if raw.is_empty() {
            return Err(RoomNameError::Empty);
        }
        if raw.chars().count() > MAX_ROOM_NAME_LEN {
            return Err(RoomNameError::TooLong);
        }
        if let Some(c) = raw
            .chars()
            .find(|c| !c.is_ascii_alphanumeric() && *c != '-' && *c != '_')
        {
            return Err(RoomNameError::InvalidCharacter(c));
        }
        Ok(Self(raw))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for RoomName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_room_name_accepts_slug_forms() {
        // given:
        let candidates = ["lobby", "pet-owners", "room_42", "A1"];

        // when / then:
        for candidate in candidates {
            let name = RoomName::new(candidate).unwrap();
            assert_eq!(name.as_str(), candidate);
        }
    }

    #[test]
    fn test_room_name_rejects_empty_string() {
        // given:
        let raw = "";

        // when:
        let result = RoomName::new(raw);

        // then:
        assert_eq!(result, Err(RoomNameError::Empty));
    }

    #[test]
    fn test_room_name_rejects_path_separator() {
        // given:
        let raw = "lobby/other";

        // when:
        let result = RoomName::new(raw);

        // then:
        assert_eq!(result, Err(RoomNameError::InvalidCharacter('/')));
    }

    #[test]
    fn test_room_name_rejects_whitespace() {
        // given:
        let raw = "pet owners";

        // when:
        let result = RoomName::new(raw);

        // then:
        assert_eq!(result, Err(RoomNameError::InvalidCharacter(' ')));
    }

    #[test]
    fn test_room_name_rejects_over_length() {
        // given:
        let raw = "a".repeat(MAX_ROOM_NAME_LEN + 1);

        // when:
        let result = RoomName::new(raw);

        // then:
        assert_eq!(result, Err(RoomNameError::TooLong));
    }

    #[test]
    fn test_room_name_accepts_exact_length_limit() {
        // given:
        let raw = "a".repeat(MAX_ROOM_NAME_LEN);

        // when:
        let result = RoomName::new(raw.clone());

        // then:
        assert_eq!(result.unwrap().as_str(), raw);
    }

    #[test]
    fn test_room_name_displays_as_raw_slug() {
        // given:
        let name = RoomName::new("lobby").unwrap();

        // when:
        let displayed = name.to_string();

        // then:
        assert_eq!(displayed, "lobby");
    }
}
