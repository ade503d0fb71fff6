//! Garbage module - periodic obstruction drops
//!
//! Every `interval_ms` of simulated time the scheduler adds `level` garbage to
//! its pending count and releases up to one unit per column, in a shuffled
//! column order. Released units fall from above the board at a fixed speed per
//! tick and write a [`Cell::Garbage`] into the board when they reach their
//! target row.
//!
//! Vertical progress is measured in sub-row units ([`GARBAGE_UNITS_PER_ROW`]
//! per row, 0 = top edge of row 0) so the fall stays exact and deterministic.

use crate::board::Board;
use crate::rng::GameRng;
use crate::types::{
    BoardEvent, BoardEventKind, Cell, BOARD_HEIGHT, BOARD_WIDTH, GARBAGE_FALL_STEP,
    GARBAGE_LANDING_TOLERANCE, GARBAGE_LOST_PROGRESS, GARBAGE_START_PROGRESS,
    GARBAGE_UNITS_PER_ROW,
};

/// Row a garbage unit in `column` is heading for.
///
/// This is the topmost empty row of the column, which on a settled board is
/// row 0 unless the column is completely full. A full column reports the bottom
/// row; the landing check then finds it occupied and writes nothing.
pub fn find_target_row(board: &Board, column: u8) -> u8 {
    board.top_vacant_row(column).unwrap_or(BOARD_HEIGHT - 1)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GarbageStatus {
    Falling,
    /// Reached its target row (whether or not a cell was written)
    Landed,
    /// Fell past the bottom without landing
    Lost,
}

/// A garbage unit on its way down
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FallingGarbage {
    pub column: u8,
    /// Vertical position in sub-row units
    pub progress: i32,
    pub target_row: u8,
    pub status: GarbageStatus,
}

impl FallingGarbage {
    fn new(column: u8, target_row: u8) -> Self {
        Self {
            column,
            progress: GARBAGE_START_PROGRESS,
            target_row,
            status: GarbageStatus::Falling,
        }
    }

    /// Row the unit currently overlaps (negative while above the board).
    pub fn row(&self) -> i32 {
        self.progress.div_euclid(GARBAGE_UNITS_PER_ROW)
    }

    fn reached_target(&self) -> bool {
        self.progress >= self.target_row as i32 * GARBAGE_UNITS_PER_ROW - GARBAGE_LANDING_TOLERANCE
    }
}

/// What happened to falling units during one update
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct GarbageUpdate {
    /// Units that wrote a garbage cell into the board
    pub written: u32,
    /// Units that landed on an already occupied target
    pub blocked: u32,
    /// Units that fell out of the board
    pub lost: u32,
}

/// Tracks the garbage timer, the pending count and units in flight
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GarbageScheduler {
    interval_ms: u32,
    timer_ms: u32,
    pending: u32,
    falling: Vec<FallingGarbage>,
}

impl GarbageScheduler {
    pub fn new(interval_ms: u32) -> Self {
        Self {
            interval_ms,
            timer_ms: 0,
            pending: 0,
            falling: Vec::with_capacity(BOARD_WIDTH as usize),
        }
    }

    pub fn reset(&mut self) {
        self.timer_ms = 0;
        self.pending = 0;
        self.falling.clear();
    }

    pub fn timer_ms(&self) -> u32 {
        self.timer_ms
    }

    pub fn pending(&self) -> u32 {
        self.pending
    }

    pub fn falling(&self) -> &[FallingGarbage] {
        &self.falling
    }

    /// Advance the garbage timer; trigger a drop when the interval elapses.
    ///
    /// Returns the number of units released.
    pub fn advance_timer<R: GameRng>(
        &mut self,
        elapsed_ms: u32,
        level: u32,
        board: &Board,
        rng: &mut R,
    ) -> usize {
        self.timer_ms = self.timer_ms.saturating_add(elapsed_ms);
        if self.timer_ms < self.interval_ms {
            return 0;
        }
        self.timer_ms = 0;
        self.trigger(level, board, rng)
    }

    /// Queue `level` more garbage and release up to one unit per column.
    pub fn trigger<R: GameRng>(&mut self, level: u32, board: &Board, rng: &mut R) -> usize {
        self.pending += level;

        let mut columns: [u8; BOARD_WIDTH as usize] = std::array::from_fn(|i| i as u8);
        rng.shuffle(&mut columns);

        let count = self.pending.min(BOARD_WIDTH as u32) as usize;
        for &column in &columns[..count] {
            self.falling
                .push(FallingGarbage::new(column, find_target_row(board, column)));
        }
        self.pending -= count as u32;

        log::info!(
            "garbage drop: level {}, released {} unit(s) into columns {:?}, {} pending",
            level,
            count,
            &columns[..count],
            self.pending
        );
        count
    }

    /// Move every unit one step down and land the ones that arrived.
    ///
    /// Landing writes into the board and emits a landing event; gravity for the
    /// landed cell is left to the caller.
    pub fn update_falling(
        &mut self,
        board: &mut Board,
        mut emit: impl FnMut(BoardEvent),
    ) -> GarbageUpdate {
        let mut update = GarbageUpdate::default();

        for unit in &mut self.falling {
            unit.progress += GARBAGE_FALL_STEP;
            unit.target_row = find_target_row(board, unit.column);

            if unit.reached_target() {
                unit.status = GarbageStatus::Landed;
                if board.get(unit.column, unit.target_row).is_empty() {
                    board.set(unit.column, unit.target_row, Cell::Garbage);
                    emit(BoardEvent {
                        kind: BoardEventKind::GarbageLanded,
                        x: unit.column,
                        y: unit.target_row,
                        cell: Cell::Garbage,
                        chain: 1,
                    });
                    update.written += 1;
                } else {
                    update.blocked += 1;
                }
            } else if unit.progress > GARBAGE_LOST_PROGRESS {
                unit.status = GarbageStatus::Lost;
                log::warn!("garbage unit in column {} fell out of the board", unit.column);
                update.lost += 1;
            }
        }

        self.falling
            .retain(|unit| unit.status == GarbageStatus::Falling);
        update
    }
}

impl Default for GarbageScheduler {
    fn default() -> Self {
        Self::new(crate::types::GARBAGE_INTERVAL_MS)
    }
}
