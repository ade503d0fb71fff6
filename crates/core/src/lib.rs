//! Core game logic module - pure, deterministic, and testable
//!
//! This crate contains all the game rules, state management, and simulation logic.
//! It has no dependencies on UI, terminal, or I/O, making it:
//!
//! - **Deterministic**: Same generator produces identical games
//! - **Testable**: Unit tests for every rule, scripted RNGs for scenarios
//! - **Portable**: Can run in any environment (terminal, headless)
//!
//! # Module Structure
//!
//! - [`board`]: 6x12 grid with per-column gravity
//! - [`pieces`]: the falling pair, rotation and wall kicks
//! - [`chain`]: group detection, clearing and chain scoring
//! - [`garbage`]: periodic garbage drops and falling garbage units
//! - [`deferred`]: delayed tasks on the simulated clock
//! - [`game_state`]: the state machine tying everything together
//! - [`rng`]: injectable randomness
//! - [`session`]: top scores and statistics of finished games
//! - [`snapshot`]: read-only view for renderers
//!
//! # Game Rules
//!
//! - A pair spawns at column 2 with the satellite pointing up, and falls one
//!   row every 500ms. When it cannot fall it locks, gravity settles both cells.
//! - Four or more same-colored cells connected orthogonally are cleared. Each
//!   cascade pass is worth `cells * 10 + pass * 50`.
//! - Garbage never clears on its own; it breaks when a neighbouring group clears.
//! - Every 30s, `level` garbage units drop into random columns.
//! - The game ends when no pair orientation fits at column 2, row 1.
//!
//! # Example
//!
//! ```
//! use puyo_tui_core::GameState;
//! use puyo_tui_types::{Command, TICK_MS};
//!
//! let mut game = GameState::new(12345);
//!
//! game.handle_command(Command::SoftDrop);
//! game.handle_command(Command::MoveRight);
//! game.handle_command(Command::Rotate);
//! game.tick(TICK_MS);
//!
//! let snap = game.snapshot();
//! assert!(!snap.game_over);
//! assert!(snap.active.is_some());
//! ```
//!
//! # Timing
//!
//! All timers run on simulated time. Call
//! [`GameState::tick`](game_state::GameState::tick) every frame with the
//! elapsed milliseconds; nothing reads a wall clock.

pub mod board;
pub mod chain;
pub mod deferred;
pub mod game_state;
pub mod garbage;
pub mod pieces;
pub mod rng;
pub mod session;
pub mod snapshot;

pub use puyo_tui_types as types;

// Re-export commonly used types for convenience
pub use board::Board;
pub use chain::{pass_score, resolve_chains, ChainResult};
pub use game_state::{GameConfig, GamePhase, GameState};
pub use garbage::{find_target_row, FallingGarbage, GarbageScheduler};
pub use pieces::{fits, kick_offsets, try_rotate, PuyoPair};
pub use rng::{draw_pair, GameRng, SimpleRng};
pub use session::{Ranking, ScoreEntry, SessionStats, RANKING_CAPACITY};
pub use snapshot::{ActiveSnapshot, GameSnapshot, GarbageSnapshot};
