//! Pieces module - tetromino shape matrices and the falling piece value
//!
//! A [`Shape`] is a small rectangular 0/1 matrix in its own local frame.
//! Rotation is derived from the matrix itself (transpose, then reverse the
//! row order), so there are no per-kind rotation tables and no wall kicks.

use crate::types::PieceKind;

/// Largest side of any tetromino matrix
const MAX_SIDE: usize = 4;

/// Rectangular occupancy matrix of a piece, `cells[row][col]`.
///
/// Only the top-left `height x width` region is meaningful; the rest stays
/// `false` so that equality compares the visible matrix only.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Shape {
    width: u8,
    height: u8,
    cells: [[bool; MAX_SIDE]; MAX_SIDE],
}

impl Shape {
    /// Build a shape from rows of 0/1 values.
    ///
    /// Returns `None` for empty, ragged, or oversized input.
    pub fn from_rows(rows: &[&[u8]]) -> Option<Self> {
        let height = rows.len();
        let width = rows.first().map(|r| r.len()).unwrap_or(0);
        if height == 0 || width == 0 || height > MAX_SIDE || width > MAX_SIDE {
            return None;
        }
        if rows.iter().any(|r| r.len() != width) {
            return None;
        }

        let mut cells = [[false; MAX_SIDE]; MAX_SIDE];
        for (r, row) in rows.iter().enumerate() {
            for (c, &v) in row.iter().enumerate() {
                cells[r][c] = v != 0;
            }
        }
        Some(Self {
            width: width as u8,
            height: height as u8,
            cells,
        })
    }

    /// Canonical spawn shape for a kind
    pub fn for_kind(kind: PieceKind) -> Self {
        let rows: &[&[u8]] = match kind {
            PieceKind::I => &[&[1, 1, 1, 1]],
            PieceKind::O => &[&[1, 1], &[1, 1]],
            PieceKind::T => &[&[0, 1, 0], &[1, 1, 1]],
            PieceKind::S => &[&[0, 1, 1], &[1, 1, 0]],
            PieceKind::Z => &[&[1, 1, 0], &[0, 1, 1]],
            PieceKind::J => &[&[1, 0, 0], &[1, 1, 1]],
            PieceKind::L => &[&[0, 0, 1], &[1, 1, 1]],
        };
        match Self::from_rows(rows) {
            Some(shape) => shape,
            None => unreachable!("canonical tetromino shapes are well-formed"),
        }
    }

    pub fn width(&self) -> usize {
        self.width as usize
    }

    pub fn height(&self) -> usize {
        self.height as usize
    }

    /// Whether the local cell (col, row) is filled
    pub fn is_filled(&self, col: usize, row: usize) -> bool {
        col < self.width() && row < self.height() && self.cells[row][col]
    }

    /// Local (col, row) of every filled cell, row-major
    pub fn occupied(&self) -> impl Iterator<Item = (i32, i32)> + '_ {
        (0..self.height()).flat_map(move |row| {
            (0..self.width())
                .filter(move |&col| self.cells[row][col])
                .map(move |col| (col as i32, row as i32))
        })
    }

    /// Clockwise rotation: transpose, then reverse row order.
    ///
    /// Width and height swap for non-square shapes.
    pub fn rotated_cw(&self) -> Self {
        let (w, h) = (self.width(), self.height());
        let mut cells = [[false; MAX_SIDE]; MAX_SIDE];
        for (r, row) in cells.iter_mut().enumerate().take(w) {
            for (c, cell) in row.iter_mut().enumerate().take(h) {
                *cell = self.cells[h - 1 - c][r];
            }
        }
        Self {
            width: self.height,
            height: self.width,
            cells,
        }
    }

    /// Matrix as rows of 0/1, for the wire
    pub fn to_rows(&self) -> Vec<Vec<u8>> {
        (0..self.height())
            .map(|row| {
                (0..self.width())
                    .map(|col| u8::from(self.cells[row][col]))
                    .collect()
            })
            .collect()
    }
}

/// A tetromino on the board.
///
/// Pieces are plain values: moves and rotations return a candidate that the
/// engine checks against the board before replacing the live piece.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Piece {
    pub kind: PieceKind,
    pub shape: Shape,
    pub x: i32,
    pub y: i32,
}

impl Piece {
    /// Piece of `kind` with its canonical shape at (x, y)
    pub fn new(kind: PieceKind, x: i32, y: i32) -> Self {
        Self {
            kind,
            shape: Shape::for_kind(kind),
            x,
            y,
        }
    }

    /// Color id written into the board when this piece locks
    pub fn color(&self) -> u8 {
        self.kind.color_id()
    }

    /// Same piece offset by (dx, dy)
    pub fn shifted(&self, dx: i32, dy: i32) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
            ..*self
        }
    }

    /// Same piece with its shape rotated clockwise in place
    pub fn rotated(&self) -> Self {
        Self {
            shape: self.shape.rotated_cw(),
            ..*self
        }
    }
}

/// Spawn column for a board of the given width
pub fn spawn_x(board_width: usize) -> i32 {
    (board_width / 2) as i32 - 1
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_kind_has_four_cells() {
        for kind in PieceKind::ALL {
            assert_eq!(Shape::for_kind(kind).occupied().count(), 4, "{:?}", kind);
        }
    }

    #[test]
    fn test_from_rows_rejects_bad_input() {
        assert!(Shape::from_rows(&[]).is_none());
        assert!(Shape::from_rows(&[&[1, 1], &[1]]).is_none());
        assert!(Shape::from_rows(&[&[1, 1, 1, 1, 1]]).is_none());
    }

    #[test]
    fn test_rotate_t_clockwise() {
        let t = Shape::for_kind(PieceKind::T);
        let r = t.rotated_cw();
        assert_eq!((r.width(), r.height()), (2, 3));
        assert_eq!(r.to_rows(), vec![vec![1, 0], vec![1, 1], vec![1, 0]]);
    }

    #[test]
    fn test_rotate_i_swaps_dimensions() {
        let i = Shape::for_kind(PieceKind::I);
        let r = i.rotated_cw();
        assert_eq!(r.to_rows(), vec![vec![1], vec![1], vec![1], vec![1]]);
        assert_eq!(r.rotated_cw(), i);
    }

    #[test]
    fn test_four_rotations_are_identity() {
        for kind in PieceKind::ALL {
            let s = Shape::for_kind(kind);
            assert_eq!(s.rotated_cw().rotated_cw().rotated_cw().rotated_cw(), s);
        }
    }

    #[test]
    fn test_piece_transforms_return_new_values() {
        let p = Piece::new(PieceKind::J, 4, 0);
        let moved = p.shifted(-1, 1);
        let turned = p.rotated();

        assert_eq!((p.x, p.y), (4, 0));
        assert_eq!(p.shape, Shape::for_kind(PieceKind::J));
        assert_eq!((moved.x, moved.y), (3, 1));
        assert_ne!(turned.shape, p.shape);
        assert_eq!(p.color(), 6);
    }

    #[test]
    fn test_spawn_x() {
        assert_eq!(spawn_x(10), 4);
        assert_eq!(spawn_x(7), 2);
    }
}
