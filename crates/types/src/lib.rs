//! Core types module - shared data structures and constants
//!
//! This module defines the fundamental types used throughout the application.
//! All types are pure data structures with no external dependencies, making them
//! usable in any context (core simulation, terminal rendering, input mapping).
//!
//! # Board Dimensions
//!
//! - **Width**: 6 columns (indexed 0-5)
//! - **Height**: 12 rows (indexed 0-11, row 0 is the top)
//! - **Spawn position**: pivot at (2, 0), satellite pointing up
//!
//! # Game Timing Constants
//!
//! Timing values are in milliseconds of simulated time:
//!
//! | Constant | Value | Description |
//! |----------|-------|-------------|
//! | `TICK_MS` | 16 | Fixed timestep interval (~60 FPS) |
//! | `FALL_INTERVAL_MS` | 500 | Gravity step for the active pair |
//! | `GARBAGE_INTERVAL_MS` | 30000 | Period of the garbage timer |
//! | `GARBAGE_COLLAPSE_DELAY_MS` | 100 | Delay before a landed garbage cell settles |
//!
//! # Examples
//!
//! ```
//! use puyo_tui_types::{Cell, PuyoColor, Rotation, BOARD_HEIGHT, BOARD_WIDTH};
//!
//! let cell = Cell::Colored(PuyoColor::Red);
//! assert!(cell.is_colored());
//!
//! assert_eq!(Rotation::Up.rotate_cw(), Rotation::Right);
//! assert_eq!(Rotation::Right.satellite_offset(), (1, 0));
//!
//! assert_eq!(BOARD_WIDTH, 6);
//! assert_eq!(BOARD_HEIGHT, 12);
//! ```

/// Board width in cells (6 columns)
pub const BOARD_WIDTH: u8 = 6;

/// Board height in cells (12 rows)
pub const BOARD_HEIGHT: u8 = 12;

/// Total number of cells on the board
pub const BOARD_SIZE: usize = (BOARD_WIDTH as usize) * (BOARD_HEIGHT as usize);

/// Pivot column for every new pair.
pub const SPAWN_X: i8 = (BOARD_WIDTH / 2) as i8 - 1;

/// Pivot row for every new pair.
pub const SPAWN_Y: i8 = 0;

/// Row tested by the game-over check.
///
/// Deliberately one row below `SPAWN_Y`; the two must stay distinct.
pub const GAME_OVER_CHECK_Y: i8 = 1;

/// Minimum size of a same-color group that gets cleared.
pub const CLEAR_GROUP_MIN: usize = 4;

/// Points per cleared colored cell.
pub const SCORE_PER_CELL: u32 = 10;

/// Points per chain step (multiplied by the pass index).
pub const SCORE_PER_CHAIN: u32 = 50;

/// Chains needed per level step.
pub const CHAINS_PER_LEVEL: u32 = 10;

/// Level at the start of every game.
pub const START_LEVEL: u32 = 1;

/// Fixed timestep interval in milliseconds (16ms ≈ 60 FPS)
pub const TICK_MS: u32 = 16;

/// Time between gravity steps of the active pair.
pub const FALL_INTERVAL_MS: u32 = 500;

/// Period of the garbage timer (30 seconds).
pub const GARBAGE_INTERVAL_MS: u32 = 30_000;

/// Delay between a garbage landing and its board collapse.
pub const GARBAGE_COLLAPSE_DELAY_MS: u32 = 100;

/// Vertical resolution of falling garbage: one row is this many units.
pub const GARBAGE_UNITS_PER_ROW: i32 = 40;

/// Start position of a falling garbage unit, three rows above the board.
pub const GARBAGE_START_PROGRESS: i32 = -3 * GARBAGE_UNITS_PER_ROW;

/// Units a falling garbage unit descends per tick.
pub const GARBAGE_FALL_STEP: i32 = 2;

/// Landing tolerance in units.
pub const GARBAGE_LANDING_TOLERANCE: i32 = 5;

/// Progress past which an undelivered unit is discarded.
pub const GARBAGE_LOST_PROGRESS: i32 = BOARD_HEIGHT as i32 * GARBAGE_UNITS_PER_ROW + 50;

/// Default DAS (Delayed Auto Shift) delay in milliseconds.
pub const DEFAULT_DAS_MS: u32 = 150;

/// Default ARR (Auto Repeat Rate) in milliseconds.
pub const DEFAULT_ARR_MS: u32 = 50;

/// Soft drop DAS in milliseconds.
pub const SOFT_DROP_DAS_MS: u32 = 0;

/// Soft drop ARR in milliseconds.
pub const SOFT_DROP_ARR_MS: u32 = 50;


/// The four puyo colors
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PuyoColor {
    Red,
    Blue,
    Green,
    Yellow,
}

impl PuyoColor {
    /// All colors in their stable order.
    pub const ALL: [PuyoColor; 4] = [
        PuyoColor::Red,
        PuyoColor::Blue,
        PuyoColor::Green,
        PuyoColor::Yellow,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            PuyoColor::Red => "red",
            PuyoColor::Blue => "blue",
            PuyoColor::Green => "green",
            PuyoColor::Yellow => "yellow",
        }
    }
}

/// A cell on the game board
///
/// - `Empty`: nothing here
/// - `Colored`: a settled puyo of one color
/// - `Garbage`: a colorless obstruction; never part of a group, removed when
///   adjacent to a cleared group
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Cell {
    #[default]
    Empty,
    Colored(PuyoColor),
    Garbage,
}

impl Cell {
    pub fn is_empty(&self) -> bool {
        matches!(self, Cell::Empty)
    }

    pub fn is_colored(&self) -> bool {
        matches!(self, Cell::Colored(_))
    }
}

/// Rotation states of a falling pair
///
/// Each state names where the satellite sits relative to the pivot:
/// - **Up**: (0, -1), the spawn orientation
/// - **Right**: (1, 0)
/// - **Down**: (0, 1)
/// - **Left**: (-1, 0)
///
/// The rotation cycle goes: Up → Right → Down → Left → Up
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Rotation {
    Up,
    Right,
    Down,
    Left,
}

impl Rotation {
    pub const ALL: [Rotation; 4] = [Rotation::Up, Rotation::Right, Rotation::Down, Rotation::Left];

    /// Map a rotation index in `0..4` to a state.
    ///
    /// # Panics
    ///
    /// Panics on any index outside `0..4`; a rotation index that large means
    /// the caller is corrupted.
    pub fn from_index(index: u8) -> Self {
        match index {
            0 => Rotation::Up,
            1 => Rotation::Right,
            2 => Rotation::Down,
            3 => Rotation::Left,
            _ => panic!("rotation index {index} out of range 0..4"),
        }
    }

    pub fn index(&self) -> u8 {
        match self {
            Rotation::Up => 0,
            Rotation::Right => 1,
            Rotation::Down => 2,
            Rotation::Left => 3,
        }
    }

    /// Rotate clockwise (90°)
    ///
    /// # Examples
    ///
    /// ```
    /// use puyo_tui_types::Rotation;
    ///
    /// assert_eq!(Rotation::Up.rotate_cw(), Rotation::Right);
    /// assert_eq!(Rotation::Right.rotate_cw(), Rotation::Down);
    /// assert_eq!(Rotation::Down.rotate_cw(), Rotation::Left);
    /// assert_eq!(Rotation::Left.rotate_cw(), Rotation::Up);
    /// ```
    pub fn rotate_cw(&self) -> Self {
        Self::from_index((self.index() + 1) % 4)
    }

    /// Satellite offset `(dx, dy)` relative to the pivot.
    pub fn satellite_offset(&self) -> (i8, i8) {
        match self {
            Rotation::Up => (0, -1),
            Rotation::Right => (1, 0),
            Rotation::Down => (0, 1),
            Rotation::Left => (-1, 0),
        }
    }
}

/// Commands accepted by the game
///
/// These are the only inputs besides `tick`. While the game is over every
/// command except `Restart` is ignored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Command {
    /// Move the pair one column left
    MoveLeft,
    /// Move the pair one column right
    MoveRight,
    /// Move the pair one row down, locking it when it cannot move
    SoftDrop,
    /// Rotate the satellite clockwise around the pivot (with wall kicks)
    Rotate,
    /// End the current match immediately
    EndGame,
    /// Start a fresh match
    Restart,
}

/// Kind of a board event handed to renderers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BoardEventKind {
    /// A cell was removed by a chain pass.
    Cleared,
    /// A falling garbage unit was written into the board.
    GarbageLanded,
}

/// Event emitted by the core for renderers to animate.
///
/// Events carry the cell value as it was at the moment of the event, so a
/// renderer can pick effect colors without looking at the (already mutated)
/// board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct BoardEvent {
    pub kind: BoardEventKind,
    pub x: u8,
    pub y: u8,
    pub cell: Cell,
    /// Chain level of the pass that produced the event (1 for landings).
    pub chain: u32,
}
