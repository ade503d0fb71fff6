//! Terminal "game renderer" module.
//!
//! A small, game-oriented rendering layer for terminal play. It avoids widget
//! toolkits and renders into a simple framebuffer that is flushed to the
//! terminal with crossterm.
//!
//! Goals:
//! - Keep `core` deterministic and testable
//! - Precise control over aspect ratio (2 chars wide per board cell)
//! - Only redraw what changed between frames

pub mod effects;
pub mod fb;
pub mod game_view;
pub mod renderer;

pub use puyo_tui_core as core;
pub use puyo_tui_types as types;

pub use effects::ClearEffects;
pub use fb::{Cell, CellStyle, FrameBuffer, Rgb};
pub use game_view::{AnchorY, GameView, Viewport};
pub use renderer::{encode_diff_into, encode_full_into, TerminalRenderer};
