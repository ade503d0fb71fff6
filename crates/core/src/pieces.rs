//! Pieces module - the falling pair and its wall kick tables
//!
//! A pair is a pivot cell plus a satellite cell. The satellite's offset from the
//! pivot is fixed by the [`Rotation`] state. Rotation is always clockwise; when
//! the rotated pair does not fit in place, a per-transition list of kick
//! offsets is tried in order, followed by a shared fallback list.

use crate::board::Board;
use crate::types::{Cell, PuyoColor, Rotation, SPAWN_X, SPAWN_Y};

/// Offset applied to the pivot when trying a kick
pub type KickOffset = (i8, i8);

/// Fallback kicks, appended after every transition-specific list.
pub const FALLBACK_KICKS: [KickOffset; 10] = [
    (1, 0),
    (-1, 0),
    (0, -1),
    (2, 0),
    (-2, 0),
    (1, -1),
    (-1, -1),
    (0, 1),
    (1, 1),
    (-1, 1),
];

/// Up -> Right
const UP_TO_RIGHT_KICKS: [KickOffset; 4] = [(-1, 0), (-2, 0), (0, -1), (-1, -1)];
/// Right -> Down
const RIGHT_TO_DOWN_KICKS: [KickOffset; 4] = [(0, -1), (1, 0), (2, 0), (1, -1)];
/// Down -> Left
const DOWN_TO_LEFT_KICKS: [KickOffset; 4] = [(1, 0), (2, 0), (0, -1), (1, -1)];
/// Left -> Up
const LEFT_TO_UP_KICKS: [KickOffset; 4] = [(-1, 0), (-2, 0), (0, -1), (-1, -1)];

/// Transition-specific kicks; empty for transitions without a table.
fn transition_kicks(from: Rotation, to: Rotation) -> &'static [KickOffset] {
    match (from, to) {
        (Rotation::Up, Rotation::Right) => &UP_TO_RIGHT_KICKS,
        (Rotation::Right, Rotation::Down) => &RIGHT_TO_DOWN_KICKS,
        (Rotation::Down, Rotation::Left) => &DOWN_TO_LEFT_KICKS,
        (Rotation::Left, Rotation::Up) => &LEFT_TO_UP_KICKS,
        _ => &[],
    }
}

/// Ordered kick candidates for a rotation transition.
///
/// The in-place attempt is not part of the list.
pub fn kick_offsets(from: Rotation, to: Rotation) -> impl Iterator<Item = KickOffset> {
    transition_kicks(from, to)
        .iter()
        .chain(FALLBACK_KICKS.iter())
        .copied()
}

/// Satellite position for a pivot and rotation.
pub fn satellite_of(x: i8, y: i8, rotation: Rotation) -> (i8, i8) {
    let (dx, dy) = rotation.satellite_offset();
    (x + dx, y + dy)
}

/// Check whether a pair with this pivot and rotation fits on the board.
///
/// Both cells must be inside the board and empty.
pub fn fits(board: &Board, x: i8, y: i8, rotation: Rotation) -> bool {
    let (sx, sy) = satellite_of(x, y, rotation);
    board.is_vacant(x, y) && board.is_vacant(sx, sy)
}

/// Try to rotate a pair clockwise with wall kicks
///
/// Returns Some(new_rotation, new_x, new_y) on success, None if the pair fits
/// neither in place nor at any kick offset.
pub fn try_rotate(
    rotation: Rotation,
    x: i8,
    y: i8,
    is_valid: impl Fn(i8, i8, Rotation) -> bool,
) -> Option<(Rotation, i8, i8)> {
    let new_rotation = rotation.rotate_cw();

    if is_valid(x, y, new_rotation) {
        return Some((new_rotation, x, y));
    }

    kick_offsets(rotation, new_rotation)
        .map(|(dx, dy)| (x + dx, y + dy))
        .find(|&(nx, ny)| is_valid(nx, ny, new_rotation))
        .map(|(nx, ny)| (new_rotation, nx, ny))
}

/// The falling pair
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PuyoPair {
    /// Colors of (pivot, satellite)
    pub colors: [PuyoColor; 2],
    pub rotation: Rotation,
    pub x: i8,
    pub y: i8,
}

impl PuyoPair {
    /// Create a new pair at the spawn position
    pub fn new(colors: [PuyoColor; 2]) -> Self {
        Self {
            colors,
            rotation: Rotation::Up,
            x: SPAWN_X,
            y: SPAWN_Y,
        }
    }

    /// (pivot, satellite) positions
    pub fn positions(&self) -> [(i8, i8); 2] {
        [(self.x, self.y), satellite_of(self.x, self.y, self.rotation)]
    }

    /// Move by (dx, dy) if the target position fits.
    ///
    /// Returns false and leaves the pair unchanged otherwise.
    pub fn try_move(&mut self, board: &Board, dx: i8, dy: i8) -> bool {
        let (nx, ny) = (self.x + dx, self.y + dy);
        if !fits(board, nx, ny, self.rotation) {
            return false;
        }
        self.x = nx;
        self.y = ny;
        true
    }

    /// Rotate clockwise with wall kicks. Returns whether the pair rotated.
    pub fn rotate(&mut self, board: &Board) -> bool {
        match try_rotate(self.rotation, self.x, self.y, |x, y, r| fits(board, x, y, r)) {
            Some((rotation, x, y)) => {
                self.rotation = rotation;
                self.x = x;
                self.y = y;
                true
            }
            None => false,
        }
    }

    /// Write both cells into the board, consuming the pair.
    ///
    /// A satellite still above the board (the spawn orientation before the
    /// first drop) has nowhere to go and is discarded.
    ///
    /// # Panics
    ///
    /// Panics when a cell lies beside or below the board.
    pub fn lock(self, board: &mut Board) {
        for (&(x, y), &color) in self.positions().iter().zip(self.colors.iter()) {
            if y < 0 && (0..board.width() as i8).contains(&x) {
                log::warn!("discarding {} puyo locked above the board at ({x}, {y})", color.as_str());
                continue;
            }
            assert!(
                !board.is_out_of_bounds(x, y),
                "locking pair outside the board at ({x}, {y})"
            );
            board.set(x as u8, y as u8, Cell::Colored(color));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_pair_at_spawn() {
        let pair = PuyoPair::new([PuyoColor::Red, PuyoColor::Blue]);
        assert_eq!(pair.positions(), [(2, 0), (2, -1)]);
        assert_eq!(pair.rotation, Rotation::Up);
    }

    #[test]
    fn test_kick_list_starts_with_transition_table() {
        let kicks: Vec<_> = kick_offsets(Rotation::Right, Rotation::Down).collect();
        assert_eq!(kicks.len(), 14);
        assert_eq!(&kicks[..4], &RIGHT_TO_DOWN_KICKS);
        assert_eq!(&kicks[4..], &FALLBACK_KICKS);
    }

    #[test]
    fn test_unlisted_transition_uses_fallback_verbatim() {
        let kicks: Vec<_> = kick_offsets(Rotation::Up, Rotation::Down).collect();
        assert_eq!(kicks, FALLBACK_KICKS.to_vec());
    }

    #[test]
    fn test_try_rotate_prefers_in_place() {
        let result = try_rotate(Rotation::Up, 2, 5, |_, _, _| true);
        assert_eq!(result, Some((Rotation::Right, 2, 5)));
    }

    #[test]
    fn test_try_rotate_gives_up_when_nothing_fits() {
        let result = try_rotate(Rotation::Down, 2, 5, |_, _, _| false);
        assert_eq!(result, None);
    }

    #[test]
    fn test_lock_writes_both_colors() {
        let mut board = Board::new();
        let mut pair = PuyoPair::new([PuyoColor::Green, PuyoColor::Yellow]);
        pair.y = 11;
        pair.lock(&mut board);
        assert_eq!(board.get(2, 11), Cell::Colored(PuyoColor::Green));
        assert_eq!(board.get(2, 10), Cell::Colored(PuyoColor::Yellow));
    }

    #[test]
    fn test_lock_discards_satellite_above_board() {
        let mut board = Board::new();
        PuyoPair::new([PuyoColor::Red, PuyoColor::Blue]).lock(&mut board);
        assert_eq!(board.get(2, 0), Cell::Colored(PuyoColor::Red));
        assert_eq!(board.occupied_count(), 1);
    }

    #[test]
    #[should_panic(expected = "outside the board")]
    fn test_lock_beside_board_panics() {
        let mut board = Board::new();
        let mut pair = PuyoPair::new([PuyoColor::Red, PuyoColor::Red]);
        pair.x = 5;
        pair.y = 4;
        pair.rotation = Rotation::Right;
        pair.lock(&mut board);
    }
}
