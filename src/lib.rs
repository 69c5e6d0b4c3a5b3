//! Tetris server (workspace facade crate).
//!
//! Re-exports the workspace crates as `tetris_server::{types,core,session,adapter}`
//! so the binary, tests and benches share one import surface.

pub use tetris_server_adapter as adapter;
pub use tetris_server_core as core;
pub use tetris_server_session as session;
pub use tetris_server_types as types;
