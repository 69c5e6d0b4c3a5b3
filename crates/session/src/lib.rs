//! Session layer - connects clients to games
//!
//! Each connected client owns exactly one [`GameEngine`](tetris_server_core::GameEngine)
//! and at most one automatic drop timer. The transport hands the
//! [`SessionManager`] an outbound channel per client and forwards raw inbound
//! lines; everything in between lives here.
//!
//! # Protocol Overview
//!
//! ```text
//! Server -> Client: {"type":"init","playerId":"player_1700000000000_k3j9x0a1b","state":{...}}
//! Client -> Server: {"action":"start"}
//! Server -> Client: {"type":"state_update","state":{...}}
//! Client -> Server: {"action":"pause"}
//! Server -> Client: {"type":"paused"}
//! Client -> Server: {"action":"fly"}
//! Server -> Client: {"type":"error","message":"Unknown action"}
//! ```
//!
//! See [`protocol`] for message definitions and [`session`] for lifecycle
//! and timer rules.

pub mod protocol;
pub mod session;

pub use tetris_server_core as core;
pub use tetris_server_types as types;

pub use protocol::{create_error, parse_action, ProtocolError, ServerEvent};
pub use session::{EventSender, SessionConfig, SessionId, SessionManager};
