use arrayvec::ArrayVec;

use crate::game_state::GamePhase;
use crate::garbage::FallingGarbage;
use crate::pieces::PuyoPair;
use crate::session::{ScoreEntry, SessionStats, RANKING_CAPACITY};
use crate::types::{Cell, PuyoColor, Rotation, BOARD_HEIGHT, BOARD_WIDTH};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ActiveSnapshot {
    pub pivot: (i8, i8),
    pub satellite: (i8, i8),
    /// Colors of (pivot, satellite)
    pub colors: [PuyoColor; 2],
    pub rotation: Rotation,
}

impl From<PuyoPair> for ActiveSnapshot {
    fn from(value: PuyoPair) -> Self {
        let [pivot, satellite] = value.positions();
        Self {
            pivot,
            satellite,
            colors: value.colors,
            rotation: value.rotation,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct GarbageSnapshot {
    pub column: u8,
    /// Vertical progress in sub-row units
    pub progress: i32,
    /// Row currently overlapped; negative above the board
    pub row: i32,
    pub target_row: u8,
}

impl From<&FallingGarbage> for GarbageSnapshot {
    fn from(value: &FallingGarbage) -> Self {
        Self {
            column: value.column,
            progress: value.progress,
            row: value.row(),
            target_row: value.target_row,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct TimersSnapshot {
    pub fall_ms: u32,
    pub garbage_ms: u32,
    pub deferred_tasks: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct GameSnapshot {
    pub board: [[Cell; BOARD_WIDTH as usize]; BOARD_HEIGHT as usize],
    pub active: Option<ActiveSnapshot>,
    pub next: [PuyoColor; 2],
    pub garbage: Vec<GarbageSnapshot>,
    pub pending_garbage: u32,
    pub phase: GamePhase,
    pub game_over: bool,
    pub score: u32,
    pub level: u32,
    pub total_chains: u32,
    pub max_chain: u32,
    pub high_score: u32,
    pub play_time_ms: u64,
    /// Session top scores, best first
    pub ranking: ArrayVec<ScoreEntry, RANKING_CAPACITY>,
    pub stats: SessionStats,
    /// Rank of the finished game shown on the game-over screen
    pub last_rank: Option<u32>,
    pub timers: TimersSnapshot,
}

impl GameSnapshot {
    /// Reset every field, keeping the garbage buffer's allocation.
    pub fn clear(&mut self) {
        self.board = [[Cell::Empty; BOARD_WIDTH as usize]; BOARD_HEIGHT as usize];
        self.active = None;
        self.next = [PuyoColor::Red; 2];
        self.garbage.clear();
        self.pending_garbage = 0;
        self.phase = GamePhase::Spawning;
        self.game_over = false;
        self.score = 0;
        self.level = 0;
        self.total_chains = 0;
        self.max_chain = 0;
        self.high_score = 0;
        self.play_time_ms = 0;
        self.ranking.clear();
        self.stats = SessionStats::default();
        self.last_rank = None;
        self.timers = TimersSnapshot::default();
    }

    /// Cell at (x, y), or None outside the board.
    pub fn cell(&self, x: i8, y: i8) -> Option<Cell> {
        if x < 0 || y < 0 {
            return None;
        }
        self.board
            .get(y as usize)
            .and_then(|row| row.get(x as usize))
            .copied()
    }
}

impl Default for GameSnapshot {
    fn default() -> Self {
        let mut s = Self {
            board: [[Cell::Empty; BOARD_WIDTH as usize]; BOARD_HEIGHT as usize],
            active: None,
            next: [PuyoColor::Red; 2],
            garbage: Vec::new(),
            pending_garbage: 0,
            phase: GamePhase::Spawning,
            game_over: false,
            score: 0,
            level: 0,
            total_chains: 0,
            max_chain: 0,
            high_score: 0,
            play_time_ms: 0,
            ranking: ArrayVec::new(),
            stats: SessionStats::default(),
            last_rank: None,
            timers: TimersSnapshot::default(),
        };
        s.clear();
        s
    }
}
