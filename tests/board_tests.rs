//! Board tests - gravity and bounds

use puyo_tui::core::Board;
use puyo_tui::types::{Cell, PuyoColor, BOARD_HEIGHT, BOARD_WIDTH};

const RED: Cell = Cell::Colored(PuyoColor::Red);
const BLUE: Cell = Cell::Colored(PuyoColor::Blue);

fn column(board: &Board, x: u8) -> Vec<Cell> {
    (0..BOARD_HEIGHT).map(|y| board.get(x, y)).collect()
}

#[test]
fn test_board_new_empty() {
    let board = Board::new();
    assert_eq!(board.width(), BOARD_WIDTH);
    assert_eq!(board.height(), BOARD_HEIGHT);

    for y in 0..BOARD_HEIGHT {
        for x in 0..BOARD_WIDTH {
            assert_eq!(board.get(x, y), Cell::Empty, "cell ({x}, {y}) should be empty");
        }
    }
    assert!(board.is_clear());
}

#[test]
fn test_lookups_outside_the_board() {
    let board = Board::new();
    assert_eq!(board.cell_at(-1, 0), None);
    assert_eq!(board.cell_at(0, -1), None);
    assert_eq!(board.cell_at(BOARD_WIDTH as i8, 0), None);
    assert_eq!(board.cell_at(0, BOARD_HEIGHT as i8), None);
    assert!(!board.is_vacant(0, -1));
    assert!(board.is_vacant(0, 0));
}

#[test]
#[should_panic(expected = "out of bounds")]
fn test_set_outside_panics() {
    let mut board = Board::new();
    board.set(BOARD_WIDTH, 0, RED);
}

#[test]
#[should_panic(expected = "out of bounds")]
fn test_get_outside_panics() {
    let board = Board::new();
    board.get(0, BOARD_HEIGHT);
}

#[test]
fn test_collapse_preserves_order_and_count() {
    let mut board = Board::new();
    board.set(0, 1, RED);
    board.set(0, 4, Cell::Garbage);
    board.set(0, 7, BLUE);

    board.collapse_column(0);

    let col = column(&board, 0);
    assert_eq!(&col[9..], &[RED, Cell::Garbage, BLUE]);
    assert!(col[..9].iter().all(|c| c.is_empty()));
}

#[test]
fn test_collapse_is_idempotent() {
    let mut board = Board::from_rows(&["R.B...", "......", "G.#.Y.", "......"]);
    board.collapse_all();
    let once = board.clone();
    board.collapse_all();
    assert_eq!(board, once);
    assert_eq!(board.occupied_count(), 5);
}

#[test]
fn test_collapse_touches_only_its_column() {
    let mut board = Board::from_rows(&["RB....", "......"]);
    board.collapse_column(0);
    assert_eq!(board.get(0, 11), RED);
    assert_eq!(board.get(1, 10), BLUE);
}

#[test]
fn test_top_vacant_row() {
    let board = Board::from_rows(&["......", "R....."]);
    assert_eq!(board.top_vacant_row(0), Some(0));

    let mut full = Board::new();
    for y in 0..BOARD_HEIGHT {
        full.set(4, y, Cell::Garbage);
    }
    assert_eq!(full.top_vacant_row(4), None);
}

#[test]
fn test_write_grid_matches_cells() {
    let board = Board::from_rows(&["Y....#"]);
    let mut grid = [[Cell::Empty; BOARD_WIDTH as usize]; BOARD_HEIGHT as usize];
    board.write_grid(&mut grid);
    assert_eq!(grid[11][0], Cell::Colored(PuyoColor::Yellow));
    assert_eq!(grid[11][5], Cell::Garbage);
}
