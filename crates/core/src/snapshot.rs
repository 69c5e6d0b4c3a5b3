//! Serializable read view of a game, the unit streamed to clients.

use serde::{Deserialize, Serialize};

use crate::board::Board;
use crate::pieces::Piece;
use crate::types::{cell_color_id, PieceKind};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PieceSnapshot {
    pub shape: Vec<Vec<u8>>,
    pub x: i32,
    pub y: i32,
    pub color: u8,
    #[serde(rename = "type")]
    pub kind: PieceKind,
}

impl From<&Piece> for PieceSnapshot {
    fn from(piece: &Piece) -> Self {
        Self {
            shape: piece.shape.to_rows(),
            x: piece.x,
            y: piece.y,
            color: piece.color(),
            kind: piece.kind,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GameSnapshot {
    /// Rows top to bottom, cells as color ids (0 = empty)
    pub board: Vec<Vec<u8>>,
    pub current_piece: Option<PieceSnapshot>,
    pub next_piece: Option<PieceSnapshot>,
    pub score: u32,
    pub level: u32,
    pub lines_cleared: u32,
    pub game_over: bool,
}

pub(crate) fn board_rows(board: &Board) -> Vec<Vec<u8>> {
    board
        .rows()
        .map(|row| row.iter().copied().map(cell_color_id).collect())
        .collect()
}
