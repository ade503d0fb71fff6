//! Session records - top scores and play statistics
//!
//! Finished games are recorded in memory for the lifetime of the process.
//! Nothing is written to disk.

use arrayvec::ArrayVec;

/// Entries kept in the ranking.
pub const RANKING_CAPACITY: usize = 10;

/// One finished game
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ScoreEntry {
    pub score: u32,
    /// Longest chain reached during the game
    pub max_chain: u32,
    pub level: u32,
    /// Simulated time spent playing
    pub play_time_ms: u64,
    /// 1-based number of the game within the session
    pub game: u32,
}

/// Top scores of the session, best first.
///
/// Ties keep the earlier game ahead.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct Ranking {
    entries: ArrayVec<ScoreEntry, RANKING_CAPACITY>,
}

impl Ranking {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert `entry` and return its 1-based rank, or None when it did not
    /// make the table.
    pub fn add(&mut self, entry: ScoreEntry) -> Option<u32> {
        let pos = self
            .entries
            .iter()
            .position(|e| entry.score > e.score)
            .unwrap_or(self.entries.len());
        if pos >= RANKING_CAPACITY {
            return None;
        }
        if self.entries.is_full() {
            self.entries.pop();
        }
        self.entries.insert(pos, entry);
        Some(pos as u32 + 1)
    }

    pub fn entries(&self) -> &[ScoreEntry] {
        &self.entries
    }
}

/// Totals over every finished game of the session
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct SessionStats {
    pub games_played: u32,
    pub total_score: u64,
    pub best_score: u32,
    pub best_chain: u32,
    pub total_play_time_ms: u64,
}

impl SessionStats {
    pub fn record(&mut self, entry: &ScoreEntry) {
        self.games_played += 1;
        self.total_score += entry.score as u64;
        self.best_score = self.best_score.max(entry.score);
        self.best_chain = self.best_chain.max(entry.max_chain);
        self.total_play_time_ms = self.total_play_time_ms.saturating_add(entry.play_time_ms);
    }

    /// Mean final score, rounded down; 0 before the first game.
    pub fn average_score(&self) -> u32 {
        match self.games_played {
            0 => 0,
            n => (self.total_score / n as u64) as u32,
        }
    }
}
