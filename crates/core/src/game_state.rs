//! Game state module - manages the complete game state
//!
//! This module ties together all core components: board, falling pair, RNG,
//! chain resolution and garbage. It handles the fall timer, locking, scoring,
//! game-over detection and the game lifecycle.

use crate::chain::{resolve_chains, ChainResult};
use crate::deferred::{DeferredQueue, DeferredTask};
use crate::garbage::GarbageScheduler;
use crate::pieces::{fits, PuyoPair};
use crate::rng::{draw_pair, GameRng, SimpleRng};
use crate::session::{Ranking, ScoreEntry, SessionStats};
use crate::snapshot::{ActiveSnapshot, GameSnapshot, GarbageSnapshot, TimersSnapshot};
use crate::types::*;
use crate::Board;

/// Tunable timing and difficulty
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct GameConfig {
    pub fall_interval_ms: u32,
    pub garbage_interval_ms: u32,
    pub garbage_collapse_delay_ms: u32,
    /// Level at the start of every game; also the floor of level progression.
    pub start_level: u32,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            fall_interval_ms: FALL_INTERVAL_MS,
            garbage_interval_ms: GARBAGE_INTERVAL_MS,
            garbage_collapse_delay_ms: GARBAGE_COLLAPSE_DELAY_MS,
            start_level: START_LEVEL,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GamePhase {
    /// Promoting the next pair to the spawn position
    Spawning,
    /// A pair is under player control
    Falling,
    /// The landed pair is being written into the board
    Locking,
    /// Chain passes are running
    Resolving,
    /// Terminal; only a reset leaves it
    GameOver,
}

impl GamePhase {
    pub fn as_str(&self) -> &'static str {
        match self {
            GamePhase::Spawning => "spawning",
            GamePhase::Falling => "falling",
            GamePhase::Locking => "locking",
            GamePhase::Resolving => "resolving",
            GamePhase::GameOver => "game_over",
        }
    }
}

/// Complete game state
#[derive(Debug, Clone)]
pub struct GameState<R: GameRng = SimpleRng> {
    board: Board,
    current: PuyoPair,
    next: [PuyoColor; 2],
    rng: R,
    config: GameConfig,
    phase: GamePhase,
    score: u32,
    level: u32,
    total_chains: u32,
    max_chain: u32,
    /// Simulated time of the current game, paused once it is over
    play_time_ms: u64,
    ranking: Ranking,
    stats: SessionStats,
    /// Rank of the last finished game, if it made the table
    last_rank: Option<u32>,
    fall_timer_ms: u32,
    garbage: GarbageScheduler,
    deferred: DeferredQueue<DeferredTask>,
    /// Clear and landing events not yet drained
    events: Vec<BoardEvent>,
    last_chain: Option<ChainResult>,
}

impl GameState<SimpleRng> {
    /// Create a new game with the given RNG seed
    pub fn new(seed: u32) -> Self {
        Self::with_rng(SimpleRng::new(seed), GameConfig::default())
    }
}

impl<R: GameRng> GameState<R> {
    /// Create a game driven by `rng`, with the first pair already spawned.
    pub fn with_rng(mut rng: R, config: GameConfig) -> Self {
        let current = PuyoPair::new(draw_pair(&mut rng));
        let next = draw_pair(&mut rng);

        Self {
            board: Board::new(),
            current,
            next,
            rng,
            config,
            phase: GamePhase::Falling,
            score: 0,
            level: config.start_level,
            total_chains: 0,
            max_chain: 0,
            play_time_ms: 0,
            ranking: Ranking::new(),
            stats: SessionStats::default(),
            last_rank: None,
            fall_timer_ms: 0,
            garbage: GarbageScheduler::new(config.garbage_interval_ms),
            deferred: DeferredQueue::new(),
            events: Vec::new(),
            last_chain: None,
        }
    }

    /// Start a fresh game on the same generator.
    ///
    /// Session records and any already scheduled deferred collapses survive.
    pub fn reset(&mut self) {
        self.board.clear();
        self.current = PuyoPair::new(draw_pair(&mut self.rng));
        self.next = draw_pair(&mut self.rng);
        self.phase = GamePhase::Falling;
        self.score = 0;
        self.level = self.config.start_level;
        self.total_chains = 0;
        self.max_chain = 0;
        self.play_time_ms = 0;
        self.last_rank = None;
        self.fall_timer_ms = 0;
        self.garbage.reset();
        self.events.clear();
        self.last_chain = None;

        log::info!("game reset (high score {})", self.high_score());
    }

    pub fn game_over(&self) -> bool {
        self.phase == GamePhase::GameOver
    }

    pub fn phase(&self) -> GamePhase {
        self.phase
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn level(&self) -> u32 {
        self.level
    }

    pub fn total_chains(&self) -> u32 {
        self.total_chains
    }

    pub fn max_chain(&self) -> u32 {
        self.max_chain
    }

    /// Best final score of the session.
    pub fn high_score(&self) -> u32 {
        self.stats.best_score
    }

    pub fn ranking(&self) -> &Ranking {
        &self.ranking
    }

    pub fn stats(&self) -> &SessionStats {
        &self.stats
    }

    pub fn play_time_ms(&self) -> u64 {
        self.play_time_ms
    }

    /// Rank of the most recently finished game, None while playing or when it
    /// missed the table.
    pub fn last_rank(&self) -> Option<u32> {
        self.last_rank
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    /// The falling pair, or None once the game is over.
    pub fn active(&self) -> Option<PuyoPair> {
        (!self.game_over()).then_some(self.current)
    }

    pub fn next_colors(&self) -> [PuyoColor; 2] {
        self.next
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Direct board access for scenario setup and tools.
    pub fn board_mut(&mut self) -> &mut Board {
        &mut self.board
    }

    pub fn garbage(&self) -> &GarbageScheduler {
        &self.garbage
    }

    /// Result of the most recent lock's chain resolution.
    pub fn last_chain(&self) -> Option<&ChainResult> {
        self.last_chain.as_ref()
    }

    pub fn snapshot_into(&self, out: &mut GameSnapshot) {
        self.board.write_grid(&mut out.board);

        out.active = self.active().map(ActiveSnapshot::from);
        out.next = self.next;
        out.garbage.clear();
        out.garbage
            .extend(self.garbage.falling().iter().map(GarbageSnapshot::from));
        out.pending_garbage = self.garbage.pending();
        out.phase = self.phase;
        out.game_over = self.game_over();
        out.score = self.score;
        out.level = self.level;
        out.total_chains = self.total_chains;
        out.max_chain = self.max_chain;
        out.high_score = self.high_score();
        out.play_time_ms = self.play_time_ms;
        out.ranking.clear();
        out.ranking.extend(self.ranking.entries().iter().copied());
        out.stats = self.stats;
        out.last_rank = self.last_rank;
        out.timers = TimersSnapshot {
            fall_ms: self.fall_timer_ms,
            garbage_ms: self.garbage.timer_ms(),
            deferred_tasks: self.deferred.len() as u32,
        };
    }

    pub fn snapshot(&self) -> GameSnapshot {
        let mut s = GameSnapshot::default();
        self.snapshot_into(&mut s);
        s
    }

    /// Take every clear and landing event recorded since the last drain.
    pub fn drain_events(&mut self) -> std::vec::Drain<'_, BoardEvent> {
        self.events.drain(..)
    }

    /// Whether no rotation of a pair fits at the game-over check position.
    fn spawn_blocked(&self) -> bool {
        !Rotation::ALL
            .iter()
            .any(|&rotation| fits(&self.board, SPAWN_X, GAME_OVER_CHECK_Y, rotation))
    }

    fn set_game_over(&mut self) {
        let from = self.phase;
        self.phase = GamePhase::GameOver;

        let entry = ScoreEntry {
            score: self.score,
            max_chain: self.max_chain,
            level: self.level,
            play_time_ms: self.play_time_ms,
            game: self.stats.games_played + 1,
        };
        self.stats.record(&entry);
        self.last_rank = self.ranking.add(entry);

        log::info!(
            "game over while {}: score {}, level {}, max chain {}, rank {:?}",
            from.as_str(),
            self.score,
            self.level,
            self.max_chain,
            self.last_rank
        );
    }

    /// Move the pair down one row, or lock it when it cannot move.
    fn step_down(&mut self) -> bool {
        if self.current.try_move(&self.board, 0, 1) {
            return true;
        }
        self.lock_pair();
        true
    }

    /// Lock the pair, resolve chains, then spawn the next pair or end the game.
    fn lock_pair(&mut self) {
        self.phase = GamePhase::Locking;
        self.current.lock(&mut self.board);
        self.board.collapse_all();

        self.phase = GamePhase::Resolving;
        let events = &mut self.events;
        let result = resolve_chains(&mut self.board, |e| events.push(e));
        self.apply_chain_result(&result);
        self.last_chain = Some(result);

        if self.spawn_blocked() {
            self.set_game_over();
            return;
        }

        self.phase = GamePhase::Spawning;
        self.current = PuyoPair::new(self.next);
        self.next = draw_pair(&mut self.rng);
        self.phase = GamePhase::Falling;
    }

    fn apply_chain_result(&mut self, result: &ChainResult) {
        if result.chain_count == 0 {
            return;
        }

        self.score += result.score;
        self.total_chains += result.chain_count;
        self.max_chain = self.max_chain.max(result.chain_count);

        let level = self.config.start_level + self.total_chains / CHAINS_PER_LEVEL;
        if level > self.level {
            log::info!("level up: {} -> {}", self.level, level);
            self.level = level;
        }

        log::info!(
            "{} chain(s), cleared {} cells {:?}, +{} points (score {})",
            result.chain_count,
            result.cleared_total(),
            result.cleared_per_pass.as_slice(),
            result.score,
            self.score
        );
    }

    fn run_deferred(&mut self, elapsed_ms: u32) {
        let board = &mut self.board;
        self.deferred.advance(elapsed_ms, |task| match task {
            DeferredTask::CollapseAll => board.collapse_all(),
        });
    }

    /// Main game tick - advance timers, gravity and garbage
    ///
    /// Returns true when the falling pair moved or locked.
    pub fn tick(&mut self, elapsed_ms: u32) -> bool {
        self.run_deferred(elapsed_ms);

        let mut stepped = false;
        if !self.game_over() {
            self.play_time_ms = self.play_time_ms.saturating_add(elapsed_ms as u64);
            self.fall_timer_ms = self.fall_timer_ms.saturating_add(elapsed_ms);
            if self.fall_timer_ms >= self.config.fall_interval_ms {
                stepped = self.step_down();
                self.fall_timer_ms = 0;
            }

            self.garbage
                .advance_timer(elapsed_ms, self.level, &self.board, &mut self.rng);
        }

        // Units in flight keep falling after the game ends.
        let events = &mut self.events;
        let update = self
            .garbage
            .update_falling(&mut self.board, |e| events.push(e));
        for _ in 0..update.written {
            self.deferred
                .schedule(self.config.garbage_collapse_delay_ms, DeferredTask::CollapseAll);
        }
        if update.written > 0 {
            log::debug!("{} garbage unit(s) landed", update.written);
        }

        stepped
    }

    /// Apply a player command
    ///
    /// Returns whether the command changed the game state. Everything but
    /// `Restart` is ignored once the game is over.
    pub fn handle_command(&mut self, command: Command) -> bool {
        if self.game_over() && command != Command::Restart {
            return false;
        }

        match command {
            Command::MoveLeft => self.current.try_move(&self.board, -1, 0),
            Command::MoveRight => self.current.try_move(&self.board, 1, 0),
            Command::SoftDrop => self.step_down(),
            Command::Rotate => self.current.rotate(&self.board),
            Command::EndGame => {
                self.set_game_over();
                true
            }
            Command::Restart => {
                self.reset();
                true
            }
        }
    }
}

impl Default for GameState {
    fn default() -> Self {
        Self::new(1)
    }
}
