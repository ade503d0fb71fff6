//! Chain module - group detection, clearing and chain scoring
//!
//! A resolution call repeats detect → clear → collapse until no group of
//! [`CLEAR_GROUP_MIN`] or more same-colored, 4-connected cells remains. Each
//! iteration is one chain pass; later passes are worth more:
//!
//! ```text
//! pass score = cleared_cells * SCORE_PER_CELL + pass_index * SCORE_PER_CHAIN
//! ```
//!
//! Garbage never forms groups. A garbage cell orthogonally next to a cleared
//! cell is removed with it, one layer deep.

use arrayvec::ArrayVec;

use crate::board::Board;
use crate::types::{
    BoardEvent, BoardEventKind, Cell, CLEAR_GROUP_MIN, BOARD_HEIGHT, BOARD_SIZE, BOARD_WIDTH,
    SCORE_PER_CELL, SCORE_PER_CHAIN,
};

/// Four orthogonal neighbour offsets
const DIRECTIONS: [(i8, i8); 4] = [(0, 1), (0, -1), (1, 0), (-1, 0)];

/// Chain passes that can possibly happen in one call (each clears >= 4 cells).
const MAX_PASSES: usize = BOARD_SIZE / CLEAR_GROUP_MIN;

/// Score for one chain pass
///
/// # Examples
///
/// ```
/// use puyo_tui_core::chain::pass_score;
///
/// assert_eq!(pass_score(4, 1), 90);
/// assert_eq!(pass_score(5, 2), 150);
/// ```
pub fn pass_score(cleared: usize, chain: u32) -> u32 {
    cleared as u32 * SCORE_PER_CELL + chain * SCORE_PER_CHAIN
}

/// Outcome of one resolution call
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ChainResult {
    /// Number of passes that cleared something
    pub chain_count: u32,
    /// Score earned across all passes
    pub score: u32,
    /// Colored cells cleared per pass, in pass order
    pub cleared_per_pass: ArrayVec<u16, MAX_PASSES>,
    /// Garbage cells removed across all passes
    pub garbage_cleared: u32,
}

impl ChainResult {
    pub fn cleared_total(&self) -> u32 {
        self.cleared_per_pass.iter().map(|&n| n as u32).sum()
    }
}

/// Cells marked during one pass
struct ChainPass {
    marked: [bool; BOARD_SIZE],
    colored: usize,
}

#[inline(always)]
fn flat(x: u8, y: u8) -> usize {
    y as usize * BOARD_WIDTH as usize + x as usize
}

/// Collect the 4-connected component of `color` starting at (x, y).
///
/// Every visited cell is flagged in `visited`.
fn flood_fill(
    board: &Board,
    x: u8,
    y: u8,
    visited: &mut [bool; BOARD_SIZE],
    out: &mut ArrayVec<(u8, u8), BOARD_SIZE>,
) {
    out.clear();
    let target = board.get(x, y);
    if !target.is_colored() {
        return;
    }

    let mut stack = ArrayVec::<(u8, u8), BOARD_SIZE>::new();
    visited[flat(x, y)] = true;
    stack.push((x, y));

    while let Some((cx, cy)) = stack.pop() {
        out.push((cx, cy));
        for (dx, dy) in DIRECTIONS {
            let nx = cx as i8 + dx;
            let ny = cy as i8 + dy;
            if board.cell_at(nx, ny) != Some(target) {
                continue;
            }
            let idx = flat(nx as u8, ny as u8);
            if !visited[idx] {
                visited[idx] = true;
                stack.push((nx as u8, ny as u8));
            }
        }
    }
}

/// Scan the board and mark every group large enough to clear.
fn find_groups(board: &Board) -> ChainPass {
    let mut pass = ChainPass {
        marked: [false; BOARD_SIZE],
        colored: 0,
    };
    let mut visited = [false; BOARD_SIZE];
    let mut group = ArrayVec::<(u8, u8), BOARD_SIZE>::new();

    for y in 0..BOARD_HEIGHT {
        for x in 0..BOARD_WIDTH {
            if visited[flat(x, y)] || !board.get(x, y).is_colored() {
                continue;
            }
            flood_fill(board, x, y, &mut visited, &mut group);
            if group.len() >= CLEAR_GROUP_MIN {
                for &(gx, gy) in &group {
                    pass.marked[flat(gx, gy)] = true;
                }
                pass.colored += group.len();
            }
        }
    }

    pass
}

/// Run chain passes until the board is stable.
///
/// Clear events go to `emit` in board order (row-major) for each pass:
/// colored cells first, then the garbage pulled in around them.
pub fn resolve_chains(board: &mut Board, mut emit: impl FnMut(BoardEvent)) -> ChainResult {
    let mut result = ChainResult::default();

    loop {
        let pass = find_groups(board);
        if pass.colored == 0 {
            break;
        }

        result.chain_count += 1;
        let chain = result.chain_count;
        result.score += pass_score(pass.colored, chain);
        result.cleared_per_pass.push(pass.colored as u16);

        let mut garbage = [false; BOARD_SIZE];
        for y in 0..BOARD_HEIGHT {
            for x in 0..BOARD_WIDTH {
                if !pass.marked[flat(x, y)] {
                    continue;
                }
                for (dx, dy) in DIRECTIONS {
                    let nx = x as i8 + dx;
                    let ny = y as i8 + dy;
                    if board.cell_at(nx, ny) == Some(Cell::Garbage) {
                        garbage[flat(nx as u8, ny as u8)] = true;
                    }
                }
            }
        }

        for y in 0..BOARD_HEIGHT {
            for x in 0..BOARD_WIDTH {
                if pass.marked[flat(x, y)] {
                    emit(clear_event(x, y, board.get(x, y), chain));
                    board.set(x, y, Cell::Empty);
                }
            }
        }
        for y in 0..BOARD_HEIGHT {
            for x in 0..BOARD_WIDTH {
                if garbage[flat(x, y)] {
                    // Garbage bursts always animate as a first-level clear.
                    emit(clear_event(x, y, Cell::Garbage, 1));
                    board.set(x, y, Cell::Empty);
                    result.garbage_cleared += 1;
                }
            }
        }

        board.collapse_all();

        log::debug!(
            "chain pass {}: cleared {} cells, {} garbage",
            chain,
            pass.colored,
            result.garbage_cleared
        );
    }

    result
}

fn clear_event(x: u8, y: u8, cell: Cell, chain: u32) -> BoardEvent {
    BoardEvent {
        kind: BoardEventKind::Cleared,
        x,
        y,
        cell,
        chain,
    }
}
