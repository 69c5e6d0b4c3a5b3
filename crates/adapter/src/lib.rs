//! Adapter module - TCP transport for game clients
//!
//! This crate puts the session layer on the network. Every accepted TCP
//! connection becomes one session; messages are **line-delimited JSON** in
//! both directions.
//!
//! # Connection Lifecycle
//!
//! 1. **Accept**: the server creates an event channel and registers a session
//! 2. **Init**: the client immediately receives `init` with its `playerId`
//! 3. **Commands**: each inbound line is parsed and dispatched to the session;
//!    undecodable or oversized lines (over [`MAX_LINE_BYTES`]) get an `error` event
//! 4. **Disconnect**: EOF or a read error removes the session and stops its timer
//!
//! # Environment Variables
//!
//! - `TETRIS_HOST`: Bind address (default: "0.0.0.0")
//! - `PORT` / `TETRIS_PORT`: Port number (default: 3000)
//! - `TETRIS_BOARD_WIDTH` / `TETRIS_BOARD_HEIGHT`: Board size (default: 10x20)
//!
//! # Testing
//!
//! Connect with netcat for manual testing:
//!
//! ```bash
//! nc 127.0.0.1 3000
//! {"action":"start"}
//! {"action":"hard_drop"}
//! ```

pub mod server;

pub use tetris_server_session as session;
pub use tetris_server_types as types;

pub use server::{check_tcp_listen_available, run_server, ServerConfig, MAX_LINE_BYTES};
