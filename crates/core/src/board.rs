//! Board module - manages the game grid
//!
//! The board is a `width x height` grid where each cell is empty or holds a
//! piece kind (its color identity). Storage is a flat row-major vector whose
//! length never changes after construction.
//!
//! Coordinates: (x, y) where x grows left to right and y grows top to bottom.
//! Rows with `y < 0` are the hidden area above the visible board: pieces may
//! occupy them while spawning, but nothing is ever stored there.

use crate::pieces::Shape;
use crate::types::{Cell, PieceKind, DEFAULT_BOARD_HEIGHT, DEFAULT_BOARD_WIDTH};

/// The game board using flat array storage
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Board {
    width: usize,
    height: usize,
    /// Flat array of cells, row-major order (y * width + x)
    cells: Vec<Cell>,
}

impl Board {
    /// Create a new empty board.
    ///
    /// Zero dimensions are replaced with the 10x20 defaults.
    pub fn new(width: usize, height: usize) -> Self {
        let width = if width == 0 { DEFAULT_BOARD_WIDTH } else { width };
        let height = if height == 0 { DEFAULT_BOARD_HEIGHT } else { height };
        Self {
            width,
            height,
            cells: vec![None; width * height],
        }
    }

    /// Calculate flat index from (x, y) coordinates
    #[inline(always)]
    fn index(&self, x: i32, y: i32) -> Option<usize> {
        if x < 0 || y < 0 || x as usize >= self.width || y as usize >= self.height {
            return None;
        }
        Some(y as usize * self.width + x as usize)
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// Get cell at position (x, y)
    /// Returns None if out of bounds
    pub fn get(&self, x: i32, y: i32) -> Option<Cell> {
        self.index(x, y).map(|idx| self.cells[idx])
    }

    /// Set cell at position (x, y)
    /// Returns false if out of bounds
    pub fn set(&mut self, x: i32, y: i32, cell: Cell) -> bool {
        match self.index(x, y) {
            Some(idx) => {
                self.cells[idx] = cell;
                true
            }
            None => false,
        }
    }

    /// Check if position is occupied (within bounds and filled)
    pub fn is_occupied(&self, x: i32, y: i32) -> bool {
        matches!(self.get(x, y), Some(Some(_)))
    }

    /// Check whether `shape` placed with its top-left corner at
    /// (`origin_x`, `origin_y`) collides with a wall, the floor, or locked cells.
    ///
    /// Cells above the top edge only collide with the side walls.
    pub fn is_blocked(&self, shape: &Shape, origin_x: i32, origin_y: i32) -> bool {
        shape.occupied().any(|(col, row)| {
            let x = origin_x + col;
            let y = origin_y + row;
            if x < 0 || x >= self.width as i32 || y >= self.height as i32 {
                return true;
            }
            y >= 0 && self.is_occupied(x, y)
        })
    }

    /// Write `kind` into every occupied cell of `shape` at the given origin.
    ///
    /// Cells that land above the top edge are dropped; a piece locked partly
    /// off the board surfaces as a blocked spawn afterwards, not here.
    pub fn lock(&mut self, shape: &Shape, origin_x: i32, origin_y: i32, kind: PieceKind) {
        for (col, row) in shape.occupied() {
            let y = origin_y + row;
            if y >= 0 {
                self.set(origin_x + col, y, Some(kind));
            }
        }
    }

    /// Check if a row is completely filled
    pub fn is_row_full(&self, y: usize) -> bool {
        if y >= self.height {
            return false;
        }
        let start = y * self.width;
        self.cells[start..start + self.width]
            .iter()
            .all(|cell| cell.is_some())
    }

    /// Clear all full rows and return how many were cleared.
    ///
    /// Single compacting pass from the bottom up: surviving rows are copied
    /// down over cleared ones, then the freed rows at the top are emptied.
    pub fn clear_full_lines(&mut self) -> usize {
        let width = self.width;
        let mut write_y = self.height;
        let mut cleared = 0;

        for read_y in (0..self.height).rev() {
            if self.is_row_full(read_y) {
                cleared += 1;
            } else {
                write_y -= 1;
                if write_y != read_y {
                    let src_start = read_y * width;
                    self.cells
                        .copy_within(src_start..src_start + width, write_y * width);
                }
            }
        }

        for cell in &mut self.cells[..write_y * width] {
            *cell = None;
        }

        cleared
    }

    /// Iterate over rows, top to bottom
    pub fn rows(&self) -> impl Iterator<Item = &[Cell]> {
        self.cells.chunks(self.width)
    }

    /// Get a reference to the internal cells array
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    /// Clear the entire board
    pub fn clear(&mut self) {
        self.cells.fill(None);
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new(DEFAULT_BOARD_WIDTH, DEFAULT_BOARD_HEIGHT)
    }
}
