//! Core game logic - pure, synchronous, and testable
//!
//! This crate contains the game rules and per-session state machine. It has
//! no dependencies on networking, timers or I/O, so a session layer can drive
//! many engines independently.
//!
//! # Module Structure
//!
//! - [`board`]: fixed-size grid with collision detection and line clearing
//! - [`pieces`]: tetromino shape matrices, matrix rotation, piece values
//! - [`rng`]: uniform random piece generation (no 7-bag)
//! - [`scoring`]: line clear points, level progression, drop cadence
//! - [`engine`]: the movement/rotation/drop/lock/clear state machine
//! - [`snapshot`]: serializable read view sent to clients
//!
//! # Example
//!
//! ```
//! use tetris_server_core::{GameEngine, PieceSource};
//! use tetris_server_core::types::PieceKind;
//!
//! let source = PieceSource::scripted(10, vec![PieceKind::O]);
//! let mut game = GameEngine::with_source(10, 20, source);
//!
//! game.move_right();
//! game.rotate();
//! game.hard_drop();
//!
//! let snap = game.snapshot();
//! assert_eq!(snap.board[19][5], 2);
//! assert!(!snap.game_over);
//! ```

pub mod board;
pub mod engine;
pub mod pieces;
pub mod rng;
pub mod scoring;
pub mod snapshot;

pub use tetris_server_types as types;

pub use board::Board;
pub use engine::GameEngine;
pub use pieces::{Piece, Shape};
pub use rng::PieceSource;
pub use scoring::{calculate_line_score, drop_interval, level_for_lines};
pub use snapshot::{GameSnapshot, PieceSnapshot};
