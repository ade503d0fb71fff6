//! Board module - manages the game grid
//!
//! The board is a 6x12 grid where each cell is empty, a colored puyo, or garbage.
//! Uses a flat array for better cache locality and zero-allocation.
//! Coordinates: (x, y) where x ranges 0..5 (left to right), y ranges 0..11 (top to bottom)
//!
//! Gravity is column based: [`Board::collapse_column`] packs every non-empty cell
//! of a column against the floor while keeping their order. It is the only way
//! cells move vertically.

use arrayvec::ArrayVec;

use crate::types::{Cell, BOARD_HEIGHT, BOARD_SIZE, BOARD_WIDTH};

/// The game board - 6 columns x 12 rows using flat array storage
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Board {
    /// Flat array of cells, row-major order (y * WIDTH + x)
    cells: [Cell; BOARD_SIZE],
}

impl Board {
    /// Create a new empty board
    pub fn new() -> Self {
        Self {
            cells: [Cell::Empty; BOARD_SIZE],
        }
    }

    /// Calculate flat index from (x, y) coordinates
    #[inline(always)]
    fn index(x: i8, y: i8) -> Option<usize> {
        if x < 0 || x >= BOARD_WIDTH as i8 || y < 0 || y >= BOARD_HEIGHT as i8 {
            return None;
        }
        Some((y as usize) * (BOARD_WIDTH as usize) + (x as usize))
    }

    #[inline(always)]
    fn checked_index(x: u8, y: u8) -> usize {
        assert!(
            x < BOARD_WIDTH && y < BOARD_HEIGHT,
            "board access out of bounds: ({x}, {y})"
        );
        (y as usize) * (BOARD_WIDTH as usize) + (x as usize)
    }

    pub fn width(&self) -> u8 {
        BOARD_WIDTH
    }

    pub fn height(&self) -> u8 {
        BOARD_HEIGHT
    }

    /// Get cell at position (x, y)
    ///
    /// # Panics
    ///
    /// Panics when (x, y) is outside the board.
    pub fn get(&self, x: u8, y: u8) -> Cell {
        self.cells[Self::checked_index(x, y)]
    }

    /// Set cell at position (x, y)
    ///
    /// # Panics
    ///
    /// Panics when (x, y) is outside the board.
    pub fn set(&mut self, x: u8, y: u8, cell: Cell) {
        self.cells[Self::checked_index(x, y)] = cell;
    }

    /// Look up a cell with signed coordinates.
    /// Returns None if out of bounds
    pub fn cell_at(&self, x: i8, y: i8) -> Option<Cell> {
        Self::index(x, y).map(|idx| self.cells[idx])
    }

    /// Check if position is within bounds and empty
    pub fn is_vacant(&self, x: i8, y: i8) -> bool {
        matches!(self.cell_at(x, y), Some(Cell::Empty))
    }

    pub fn is_out_of_bounds(&self, x: i8, y: i8) -> bool {
        Self::index(x, y).is_none()
    }

    /// Apply gravity to one column.
    ///
    /// Non-empty cells are read top to bottom and rewritten against the floor in
    /// the same order. Running it on an already packed column changes nothing.
    pub fn collapse_column(&mut self, x: u8) {
        assert!(x < BOARD_WIDTH, "column {x} out of bounds");

        let mut stack = ArrayVec::<Cell, { BOARD_HEIGHT as usize }>::new();
        for y in 0..BOARD_HEIGHT {
            let cell = self.get(x, y);
            if !cell.is_empty() {
                stack.push(cell);
            }
        }

        let first_filled = BOARD_HEIGHT as usize - stack.len();
        for y in 0..BOARD_HEIGHT as usize {
            let cell = if y < first_filled {
                Cell::Empty
            } else {
                stack[y - first_filled]
            };
            self.set(x, y as u8, cell);
        }
    }

    /// Apply gravity to every column.
    pub fn collapse_all(&mut self) {
        for x in 0..BOARD_WIDTH {
            self.collapse_column(x);
        }
    }

    /// Topmost empty row of a column, if any.
    pub fn top_vacant_row(&self, x: u8) -> Option<u8> {
        (0..BOARD_HEIGHT).find(|&y| self.get(x, y).is_empty())
    }

    /// Number of non-empty cells on the board.
    pub fn occupied_count(&self) -> usize {
        self.cells.iter().filter(|cell| !cell.is_empty()).count()
    }

    pub fn is_clear(&self) -> bool {
        self.cells.iter().all(Cell::is_empty)
    }

    /// Copy the board into a row-major 2D grid.
    pub fn write_grid(&self, out: &mut [[Cell; BOARD_WIDTH as usize]; BOARD_HEIGHT as usize]) {
        let width = BOARD_WIDTH as usize;
        for (y, row) in out.iter_mut().enumerate() {
            row.copy_from_slice(&self.cells[y * width..(y + 1) * width]);
        }
    }

    /// Get a reference to the internal cells array
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    /// Clear the entire board
    pub fn clear(&mut self) {
        self.cells.fill(Cell::Empty);
    }

    /// Build a board from text rows, top row first.
    ///
    /// `.` is empty, `#` is garbage and `R`/`B`/`G`/`Y` are colors. Missing rows
    /// at the top are treated as empty, so callers only spell out the stack.
    ///
    /// # Panics
    ///
    /// Panics on unknown characters, rows of the wrong width, or too many rows.
    pub fn from_rows(rows: &[&str]) -> Self {
        use crate::types::PuyoColor;

        assert!(rows.len() <= BOARD_HEIGHT as usize, "too many rows");
        let mut board = Self::new();
        let offset = BOARD_HEIGHT as usize - rows.len();
        for (i, row) in rows.iter().enumerate() {
            assert_eq!(row.chars().count(), BOARD_WIDTH as usize, "bad row width: {row:?}");
            for (x, ch) in row.chars().enumerate() {
                let cell = match ch {
                    '.' => Cell::Empty,
                    '#' => Cell::Garbage,
                    'R' => Cell::Colored(PuyoColor::Red),
                    'B' => Cell::Colored(PuyoColor::Blue),
                    'G' => Cell::Colored(PuyoColor::Green),
                    'Y' => Cell::Colored(PuyoColor::Yellow),
                    other => panic!("unknown board character {other:?}"),
                };
                board.set(x as u8, (offset + i) as u8, cell);
            }
        }
        board
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::PuyoColor;

    const RED: Cell = Cell::Colored(PuyoColor::Red);
    const BLUE: Cell = Cell::Colored(PuyoColor::Blue);

    #[test]
    fn test_board_index_calculation() {
        assert_eq!(Board::index(0, 0), Some(0));
        assert_eq!(Board::index(5, 0), Some(5));
        assert_eq!(Board::index(0, 1), Some(6));
        assert_eq!(Board::index(5, 11), Some(71));
        assert_eq!(Board::index(-1, 0), None);
        assert_eq!(Board::index(6, 0), None);
        assert_eq!(Board::index(0, 12), None);
    }

    #[test]
    fn test_board_flat_array() {
        let mut board = Board::new();
        board.set(0, 0, RED);
        board.set(3, 10, Cell::Garbage);

        assert_eq!(board.get(0, 0), RED);
        assert_eq!(board.cells[10 * 6 + 3], Cell::Garbage);
    }

    #[test]
    #[should_panic(expected = "out of bounds")]
    fn test_get_out_of_bounds_panics() {
        let board = Board::new();
        board.get(6, 0);
    }

    #[test]
    #[should_panic(expected = "out of bounds")]
    fn test_set_out_of_bounds_panics() {
        let mut board = Board::new();
        board.set(0, 12, RED);
    }

    #[test]
    fn test_collapse_column_keeps_order() {
        let mut board = Board::new();
        board.set(1, 2, RED);
        board.set(1, 5, Cell::Garbage);
        board.set(1, 9, BLUE);

        board.collapse_column(1);

        assert_eq!(board.get(1, 9), RED);
        assert_eq!(board.get(1, 10), Cell::Garbage);
        assert_eq!(board.get(1, 11), BLUE);
        assert_eq!(board.occupied_count(), 3);
        for y in 0..9 {
            assert!(board.get(1, y).is_empty());
        }
    }

    #[test]
    fn test_collapse_column_leaves_other_columns_alone() {
        let mut board = Board::new();
        board.set(0, 0, RED);
        board.set(1, 0, BLUE);

        board.collapse_column(0);

        assert_eq!(board.get(0, 11), RED);
        assert_eq!(board.get(1, 0), BLUE);
    }

    #[test]
    fn test_top_vacant_row() {
        let mut board = Board::from_rows(&["R.....", "R....."]);
        assert_eq!(board.top_vacant_row(0), Some(0));
        for y in 0..12 {
            board.set(0, y, RED);
        }
        assert_eq!(board.top_vacant_row(0), None);
        assert_eq!(board.top_vacant_row(1), Some(0));
    }

    #[test]
    fn test_from_rows_bottom_aligned() {
        let board = Board::from_rows(&["#.....", "RBGY.."]);
        assert_eq!(board.get(0, 10), Cell::Garbage);
        assert_eq!(board.get(0, 11), RED);
        assert_eq!(board.get(1, 11), BLUE);
        assert_eq!(board.occupied_count(), 5);
    }
}
