//! Core types module - shared data structures and constants
//!
//! This module defines the fundamental types used throughout the server:
//! piece kinds and their wire color ids, player actions, and the board,
//! scoring and timing constants. Everything here is plain data so it can be
//! shared by the engine, the session layer and the transport.
//!
//! # Board Dimensions
//!
//! - **Width**: 10 columns by default (indexed 0-9)
//! - **Height**: 20 rows by default (indexed 0-19)
//! - **Spawn position**: `x = width / 2 - 1`, `y = 0`
//!
//! # Drop Cadence by Level
//!
//! | Level | Interval |
//! |-------|----------|
//! | 1 | 1000ms |
//! | 2 | 900ms |
//! | 5 | 600ms |
//! | 9+ | 200ms |
//!
//! # Examples
//!
//! ```
//! use tetris_server_types::{GameAction, PieceKind, DEFAULT_BOARD_HEIGHT, DEFAULT_BOARD_WIDTH};
//!
//! let piece = PieceKind::T;
//! assert_eq!(piece.color_id(), 3);
//! assert_eq!(PieceKind::ALL[2], piece);
//!
//! let action = GameAction::from_str("hard_drop").unwrap();
//! assert_eq!(action, GameAction::HardDrop);
//!
//! assert_eq!(DEFAULT_BOARD_WIDTH, 10);
//! assert_eq!(DEFAULT_BOARD_HEIGHT, 20);
//! ```

use serde::{Deserialize, Serialize};

/// Default board width in cells (10 columns)
pub const DEFAULT_BOARD_WIDTH: usize = 10;

/// Default board height in cells (20 rows)
pub const DEFAULT_BOARD_HEIGHT: usize = 20;

/// Drop interval at level 1 (1000ms = 1 second per row)
pub const BASE_DROP_MS: u64 = 1000;

/// Interval reduction per level above 1
pub const DROP_STEP_MS: u64 = 100;

/// Fastest automatic drop interval
pub const MIN_DROP_MS: u64 = 200;

/// Cleared lines needed to advance one level
pub const LINES_PER_LEVEL: u32 = 10;

/// Line clear scoring table
///
/// Base points for clearing N lines at once, multiplied by the current level:
/// - 1 line: 100
/// - 2 lines: 300
/// - 3 lines: 500
/// - 4 lines: 800 (Tetris!)
pub const LINE_SCORES: [u32; 5] = [0, 100, 300, 500, 800];

/// The seven tetromino piece kinds
///
/// Each kind has a fixed color id shared with every client renderer:
/// - **I**: 1, cyan
/// - **O**: 2, yellow
/// - **T**: 3, purple
/// - **S**: 4, green
/// - **Z**: 5, red
/// - **J**: 6, blue
/// - **L**: 7, orange
///
/// Color id 0 is reserved for empty cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PieceKind {
    I,
    O,
    T,
    S,
    Z,
    J,
    L,
}

impl PieceKind {
    /// All kinds in color-id order
    pub const ALL: [PieceKind; 7] = [
        PieceKind::I,
        PieceKind::O,
        PieceKind::T,
        PieceKind::S,
        PieceKind::Z,
        PieceKind::J,
        PieceKind::L,
    ];

    /// Wire color id (1-7)
    pub fn color_id(&self) -> u8 {
        match self {
            PieceKind::I => 1,
            PieceKind::O => 2,
            PieceKind::T => 3,
            PieceKind::S => 4,
            PieceKind::Z => 5,
            PieceKind::J => 6,
            PieceKind::L => 7,
        }
    }
}

/// Player actions accepted from a client
///
/// The wire names are snake_case (`"move_left"`, `"hard_drop"`, ...).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GameAction {
    /// Arm the automatic drop timer
    Start,
    /// Move piece one cell left
    MoveLeft,
    /// Move piece one cell right
    MoveRight,
    /// Move piece one cell down, locking it if it cannot move
    MoveDown,
    /// Rotate piece 90° clockwise
    Rotate,
    /// Instantly drop piece to lowest valid position and lock it
    HardDrop,
    /// Stop the drop timer and start a fresh game
    Reset,
    /// Stop the drop timer
    Pause,
    /// Re-arm the drop timer (same as start)
    Resume,
}

impl GameAction {
    /// Parse action from its wire name (case-sensitive, as clients send it)
    ///
    /// # Examples
    ///
    /// ```
    /// use tetris_server_types::GameAction;
    ///
    /// assert_eq!(GameAction::from_str("move_left"), Some(GameAction::MoveLeft));
    /// assert_eq!(GameAction::from_str("rotate"), Some(GameAction::Rotate));
    /// assert_eq!(GameAction::from_str("moveLeft"), None);
    /// ```
    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "start" => Some(GameAction::Start),
            "move_left" => Some(GameAction::MoveLeft),
            "move_right" => Some(GameAction::MoveRight),
            "move_down" => Some(GameAction::MoveDown),
            "rotate" => Some(GameAction::Rotate),
            "hard_drop" => Some(GameAction::HardDrop),
            "reset" => Some(GameAction::Reset),
            "pause" => Some(GameAction::Pause),
            "resume" => Some(GameAction::Resume),
            _ => None,
        }
    }

    /// Wire name
    pub fn as_str(&self) -> &'static str {
        match self {
            GameAction::Start => "start",
            GameAction::MoveLeft => "move_left",
            GameAction::MoveRight => "move_right",
            GameAction::MoveDown => "move_down",
            GameAction::Rotate => "rotate",
            GameAction::HardDrop => "hard_drop",
            GameAction::Reset => "reset",
            GameAction::Pause => "pause",
            GameAction::Resume => "resume",
        }
    }
}

/// A cell on the game board
///
/// - `None`: Empty cell
/// - `Some(PieceKind)`: Cell filled with that kind's color
pub type Cell = Option<PieceKind>;

/// Wire value of a cell: 0 for empty, otherwise the kind's color id.
#[inline]
pub fn cell_color_id(cell: Cell) -> u8 {
    cell.map(|kind| kind.color_id()).unwrap_or(0)
}
