//! Puyo TUI (workspace facade crate).
//!
//! Re-exports the workspace crates as `puyo_tui::{core,input,term,types}` and
//! holds the binary's configuration and logging setup.

pub mod config;
pub mod logging;

pub use puyo_tui_core as core;
pub use puyo_tui_input as input;
pub use puyo_tui_term as term;
pub use puyo_tui_types as types;
