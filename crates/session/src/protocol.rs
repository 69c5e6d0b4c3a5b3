//! Protocol module - JSON message types exchanged with clients
//!
//! Client -> server: `{"action": "<name>"}` where name is one of the
//! [`GameAction`] wire names.
//!
//! Server -> client: one object per event, discriminated by `type`
//! (`init`, `state_update`, `game_over`, `paused`, `error`).

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::core::GameSnapshot;
use crate::types::GameAction;

// ============== Server -> Client Messages ==============

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ServerEvent {
    /// First message on every connection
    Init {
        #[serde(rename = "playerId")]
        player_id: String,
        state: GameSnapshot,
    },
    StateUpdate {
        state: GameSnapshot,
    },
    GameOver {
        state: GameSnapshot,
    },
    Paused,
    Error {
        message: String,
    },
}

impl ServerEvent {
    /// Wire `type` tag
    pub fn kind(&self) -> &'static str {
        match self {
            ServerEvent::Init { .. } => "init",
            ServerEvent::StateUpdate { .. } => "state_update",
            ServerEvent::GameOver { .. } => "game_over",
            ServerEvent::Paused => "paused",
            ServerEvent::Error { .. } => "error",
        }
    }

    /// Snapshot carried by the event, if any
    pub fn state(&self) -> Option<&GameSnapshot> {
        match self {
            ServerEvent::Init { state, .. }
            | ServerEvent::StateUpdate { state }
            | ServerEvent::GameOver { state } => Some(state),
            ServerEvent::Paused | ServerEvent::Error { .. } => None,
        }
    }
}

// ============== Client -> Server Messages ==============

/// Why an inbound line did not produce an action
#[derive(Debug)]
pub enum ProtocolError {
    /// Not valid JSON (including bytes that are not UTF-8)
    Malformed(serde_json::Error),
    /// Line longer than the transport accepts; carries the limit in bytes
    TooLong(usize),
    /// Valid JSON without a recognized `action`
    UnknownAction(Option<String>),
}

impl fmt::Display for ProtocolError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProtocolError::Malformed(e) => write!(f, "Invalid message format: {}", e),
            ProtocolError::TooLong(limit) => {
                write!(f, "Invalid message format: message exceeds {} bytes", limit)
            }
            ProtocolError::UnknownAction(_) => write!(f, "Unknown action"),
        }
    }
}

impl std::error::Error for ProtocolError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ProtocolError::Malformed(e) => Some(e),
            ProtocolError::TooLong(_) | ProtocolError::UnknownAction(_) => None,
        }
    }
}

/// Parse one inbound message into an action.
///
/// Input is raw bytes as read off the wire; invalid UTF-8 is malformed.
/// Anything that is valid JSON but lacks a string `action` naming a known
/// action (arrays, numbers, objects without the key) is an unknown action.
pub fn parse_action(line: impl AsRef<[u8]>) -> Result<GameAction, ProtocolError> {
    let value: serde_json::Value =
        serde_json::from_slice(line.as_ref()).map_err(ProtocolError::Malformed)?;
    let name = value.get("action").and_then(serde_json::Value::as_str);
    match name.and_then(GameAction::from_str) {
        Some(action) => Ok(action),
        None => Err(ProtocolError::UnknownAction(name.map(str::to_string))),
    }
}

/// Build the `error` event reported for a rejected message
pub fn create_error(err: &ProtocolError) -> ServerEvent {
    ServerEvent::Error {
        message: err.to_string(),
    }
}
