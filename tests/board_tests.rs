//! Board tests - collision, locking and line clearing

use tetris_server::core::{Board, Shape};
use tetris_server::types::{PieceKind, DEFAULT_BOARD_HEIGHT, DEFAULT_BOARD_WIDTH};

fn fill_row(board: &mut Board, y: i32, kind: PieceKind) {
    for x in 0..board.width() as i32 {
        board.set(x, y, Some(kind));
    }
}

fn color_rows(board: &Board) -> Vec<Vec<u8>> {
    board
        .rows()
        .map(|row| row.iter().map(|c| c.map(|k| k.color_id()).unwrap_or(0)).collect())
        .collect()
}

#[test]
fn test_board_new_empty() {
    let board = Board::default();
    assert_eq!(board.width(), DEFAULT_BOARD_WIDTH);
    assert_eq!(board.height(), DEFAULT_BOARD_HEIGHT);

    for y in 0..DEFAULT_BOARD_HEIGHT as i32 {
        for x in 0..DEFAULT_BOARD_WIDTH as i32 {
            assert_eq!(board.get(x, y), Some(None), "Cell ({}, {}) should be empty", x, y);
        }
    }
}

#[test]
fn test_board_custom_dimensions() {
    let board = Board::new(6, 12);
    assert_eq!(board.width(), 6);
    assert_eq!(board.height(), 12);
    assert_eq!(board.rows().count(), 12);
    assert!(board.rows().all(|r| r.len() == 6));
}

#[test]
fn test_board_get_out_of_bounds() {
    let board = Board::default();
    assert_eq!(board.get(-1, 0), None);
    assert_eq!(board.get(0, -1), None);
    assert_eq!(board.get(DEFAULT_BOARD_WIDTH as i32, 0), None);
    assert_eq!(board.get(0, DEFAULT_BOARD_HEIGHT as i32), None);
}

#[test]
fn test_board_set_out_of_bounds() {
    let mut board = Board::default();
    assert!(!board.set(-1, 0, Some(PieceKind::T)));
    assert!(!board.set(0, 20, Some(PieceKind::T)));
    assert!(board.set(0, 19, Some(PieceKind::T)));
}

#[test]
fn test_is_blocked_every_wall() {
    let board = Board::default();
    let i = Shape::for_kind(PieceKind::I);

    // Horizontal I is 4 wide: x in 0..=6 fits.
    for x in 0..=6 {
        assert!(!board.is_blocked(&i, x, 19), "x={}", x);
    }
    assert!(board.is_blocked(&i, -1, 5));
    assert!(board.is_blocked(&i, 7, 5));
    assert!(board.is_blocked(&i, 0, 20));
    // Far above the board is fine as long as it is within the walls.
    assert!(!board.is_blocked(&i, 3, -10));
}

#[test]
fn test_is_blocked_by_locked_cells() {
    let mut board = Board::default();
    board.set(5, 10, Some(PieceKind::Z));
    let t = Shape::for_kind(PieceKind::T);

    // T cells: (x+1, y), then (x, y+1), (x+1, y+1), (x+2, y+1).
    assert!(board.is_blocked(&t, 3, 9));
    assert!(board.is_blocked(&t, 4, 9));
    assert!(board.is_blocked(&t, 4, 10));
    assert!(!board.is_blocked(&t, 4, 8));
    assert!(!board.is_blocked(&t, 0, 9));
    // (5, 10) falls on T's empty top-left corner.
    assert!(!board.is_blocked(&t, 5, 10));
}

#[test]
fn test_empty_matrix_cells_do_not_collide() {
    let mut board = Board::default();
    board.set(0, 0, Some(PieceKind::I));
    let t = Shape::for_kind(PieceKind::T);
    // T at (0,-1): row 0 of T is [0,1,0] at y=-1, row 1 is [1,1,1] at y=0 -> hits (0,0).
    assert!(board.is_blocked(&t, 0, -1));
    // T at (0,0): cell (0,0) is T's empty corner.
    assert!(!board.is_blocked(&t, 0, 0));
}

#[test]
fn test_lock_writes_color_only_on_board() {
    let mut board = Board::default();
    let l = Shape::for_kind(PieceKind::L);
    board.lock(&l, 0, 18, PieceKind::L);

    let rows = color_rows(&board);
    assert_eq!(rows[18][..3], [0, 0, 7]);
    assert_eq!(rows[19][..3], [7, 7, 7]);

    let mut top = Board::default();
    top.lock(&l, 0, -1, PieceKind::L);
    assert_eq!(color_rows(&top)[0][..3], [7, 7, 7]);
    assert_eq!(top.cells().iter().filter(|c| c.is_some()).count(), 3);
}

#[test]
fn test_clear_rows_two_and_five() {
    let mut board = Board::new(4, 8);
    // Mixed rows get a unique marker so order can be checked.
    let markers = [
        PieceKind::I,
        PieceKind::O,
        PieceKind::T,
        PieceKind::S,
        PieceKind::Z,
        PieceKind::J,
        PieceKind::L,
        PieceKind::I,
    ];
    for y in 0..8 {
        board.set(0, y, Some(markers[y as usize]));
    }
    fill_row(&mut board, 2, PieceKind::T);
    fill_row(&mut board, 5, PieceKind::Z);
    let before = color_rows(&board);

    assert_eq!(board.clear_full_lines(), 2);

    let after = color_rows(&board);
    assert_eq!(after[0], vec![0, 0, 0, 0]);
    assert_eq!(after[1], vec![0, 0, 0, 0]);
    // Rows above both cleared rows shift by 2, rows between by 1, rows below stay.
    assert_eq!(after[2], before[0]);
    assert_eq!(after[3], before[1]);
    assert_eq!(after[4], before[3]);
    assert_eq!(after[5], before[4]);
    assert_eq!(after[6], before[6]);
    assert_eq!(after[7], before[7]);
}

#[test]
fn test_clear_adjacent_full_rows_at_bottom() {
    let mut board = Board::default();
    for y in 16..20 {
        fill_row(&mut board, y, PieceKind::I);
    }
    board.set(3, 15, Some(PieceKind::O));

    assert_eq!(board.clear_full_lines(), 4);
    assert_eq!(board.get(3, 19), Some(Some(PieceKind::O)));
    assert_eq!(board.cells().iter().filter(|c| c.is_some()).count(), 1);
}

#[test]
fn test_clear_matches_one_at_a_time_reference() {
    // Reference: remove one full row at a time, re-checking the same index.
    fn reference(mut rows: Vec<Vec<u8>>) -> (usize, Vec<Vec<u8>>) {
        let width = rows[0].len();
        let mut cleared = 0;
        let mut y = rows.len();
        while y > 0 {
            let row = y - 1;
            if rows[row].iter().all(|&c| c != 0) {
                rows.remove(row);
                rows.insert(0, vec![0; width]);
                cleared += 1;
            } else {
                y -= 1;
            }
        }
        (cleared, rows)
    }

    let mut board = Board::new(3, 6);
    let pattern: [[u8; 3]; 6] = [
        [0, 1, 0],
        [1, 1, 1],
        [1, 1, 1],
        [1, 0, 1],
        [1, 1, 1],
        [0, 0, 1],
    ];
    for (y, row) in pattern.iter().enumerate() {
        for (x, &v) in row.iter().enumerate() {
            if v != 0 {
                board.set(x as i32, y as i32, Some(PieceKind::J));
            }
        }
    }
    let (expected_count, expected_rows) = reference(color_rows(&board));

    assert_eq!(board.clear_full_lines(), expected_count);
    assert_eq!(color_rows(&board), expected_rows);
    assert_eq!(expected_count, 3);
}
