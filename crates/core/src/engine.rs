//! Game engine module - the per-session Tetris state machine
//!
//! Ties together the board, the falling piece, the piece source and scoring.
//! All operations are synchronous and in-memory. Blocked moves, full boards
//! and game over are ordinary outcomes reported through `bool` results and
//! the `game_over` flag, never errors.
//!
//! States:
//! - **Active**: a current piece exists and `game_over` is false.
//! - **GameOver**: entered only when a freshly spawned piece is blocked;
//!   every movement is a no-op until [`GameEngine::reset`].

use crate::board::Board;
use crate::pieces::Piece;
use crate::rng::PieceSource;
use crate::scoring::{calculate_line_score, level_for_lines};
use crate::snapshot::{board_rows, GameSnapshot, PieceSnapshot};
use crate::types::{DEFAULT_BOARD_HEIGHT, DEFAULT_BOARD_WIDTH};

/// Complete game state for one session
#[derive(Debug, Clone)]
pub struct GameEngine {
    board: Board,
    source: PieceSource,
    current: Option<Piece>,
    next: Option<Piece>,
    score: u32,
    level: u32,
    lines_cleared: u32,
    game_over: bool,
}

impl GameEngine {
    /// New game on a `width x height` board with an entropy-seeded source
    pub fn new(width: usize, height: usize) -> Self {
        let board = Board::new(width, height);
        let source = PieceSource::new(board.width());
        Self::from_parts(board, source)
    }

    /// New game drawing pieces from `source`.
    ///
    /// The source's spawn column follows its own board width, so callers
    /// should build it for the same width.
    pub fn with_source(width: usize, height: usize, source: PieceSource) -> Self {
        Self::from_parts(Board::new(width, height), source)
    }

    fn from_parts(board: Board, source: PieceSource) -> Self {
        let mut engine = Self {
            board,
            source,
            current: None,
            next: None,
            score: 0,
            level: 1,
            lines_cleared: 0,
            game_over: false,
        };
        engine.spawn_next();
        engine
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Mutable board access, for setting up positions
    pub fn board_mut(&mut self) -> &mut Board {
        &mut self.board
    }

    pub fn current_piece(&self) -> Option<&Piece> {
        self.current.as_ref()
    }

    pub fn next_piece(&self) -> Option<&Piece> {
        self.next.as_ref()
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn level(&self) -> u32 {
        self.level
    }

    pub fn lines_cleared(&self) -> u32 {
        self.lines_cleared
    }

    pub fn is_game_over(&self) -> bool {
        self.game_over
    }

    /// Promote the next piece (or a fresh one) to current, then draw a new
    /// next piece. A blocked spawn ends the game.
    pub fn spawn_next(&mut self) {
        let current = match self.next.take() {
            Some(piece) => piece,
            None => self.source.next_piece(),
        };
        self.next = Some(self.source.next_piece());

        if self.board.is_blocked(&current.shape, current.x, current.y) {
            self.game_over = true;
        }
        self.current = Some(current);
    }

    /// Commit `candidate` if it fits on the board
    fn try_commit(&mut self, candidate: Piece) -> bool {
        if self.board.is_blocked(&candidate.shape, candidate.x, candidate.y) {
            return false;
        }
        self.current = Some(candidate);
        true
    }

    fn active(&self) -> Option<Piece> {
        if self.game_over {
            return None;
        }
        self.current
    }

    pub fn move_left(&mut self) -> bool {
        match self.active() {
            Some(piece) => self.try_commit(piece.shifted(-1, 0)),
            None => false,
        }
    }

    pub fn move_right(&mut self) -> bool {
        match self.active() {
            Some(piece) => self.try_commit(piece.shifted(1, 0)),
            None => false,
        }
    }

    /// Move one row down. When blocked, the piece locks, lines clear and the
    /// next piece spawns; the return value is then `false`.
    pub fn move_down(&mut self) -> bool {
        let Some(piece) = self.active() else {
            return false;
        };
        if self.try_commit(piece.shifted(0, 1)) {
            return true;
        }
        self.lock_and_advance();
        false
    }

    /// Rotate clockwise in place. No wall kicks: a colliding rotation fails
    /// and the piece is left exactly as it was.
    pub fn rotate(&mut self) -> bool {
        match self.active() {
            Some(piece) => self.try_commit(piece.rotated()),
            None => false,
        }
    }

    /// Drop to the lowest free row and lock. Returns `false` only when the
    /// game is already over.
    pub fn hard_drop(&mut self) -> bool {
        let Some(mut piece) = self.active() else {
            return false;
        };
        while !self.board.is_blocked(&piece.shape, piece.x, piece.y + 1) {
            piece = piece.shifted(0, 1);
        }
        self.current = Some(piece);
        self.lock_and_advance();
        true
    }

    fn lock_and_advance(&mut self) {
        let Some(piece) = self.current else {
            return;
        };
        self.board.lock(&piece.shape, piece.x, piece.y, piece.kind);

        let cleared = self.board.clear_full_lines();
        if cleared > 0 {
            self.lines_cleared = self.lines_cleared.saturating_add(cleared as u32);
            self.score = self
                .score
                .saturating_add(calculate_line_score(cleared, self.level));
            self.level = level_for_lines(self.lines_cleared);
        }

        self.spawn_next();
    }

    /// Start over on an empty board with fresh current and next pieces
    pub fn reset(&mut self) {
        self.board.clear();
        self.score = 0;
        self.level = 1;
        self.lines_cleared = 0;
        self.game_over = false;
        self.current = None;
        self.next = None;
        self.spawn_next();
    }

    pub fn snapshot(&self) -> GameSnapshot {
        GameSnapshot {
            board: board_rows(&self.board),
            current_piece: self.current.as_ref().map(PieceSnapshot::from),
            next_piece: self.next.as_ref().map(PieceSnapshot::from),
            score: self.score,
            level: self.level,
            lines_cleared: self.lines_cleared,
            game_over: self.game_over,
        }
    }
}

impl Default for GameEngine {
    fn default() -> Self {
        Self::new(DEFAULT_BOARD_WIDTH, DEFAULT_BOARD_HEIGHT)
    }
}
