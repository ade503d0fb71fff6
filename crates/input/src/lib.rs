//! Terminal input module.
//!
//! This crate is independent of any UI framework. It maps `crossterm` key
//! events into [`crate::types::Command`] and provides a DAS/ARR input handler
//! suitable for terminal environments (including terminals without key-release
//! events).

pub mod handler;
pub mod map;

pub use puyo_tui_types as types;

pub use handler::InputHandler;
pub use map::{handle_key_event, should_quit};
