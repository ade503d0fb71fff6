//! Key mapping from terminal events to game commands.

use crate::types::Command;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

/// Map keyboard input to game commands.
pub fn handle_key_event(key: KeyEvent) -> Option<Command> {
    if key.modifiers.contains(KeyModifiers::CONTROL) {
        return None;
    }

    match key.code {
        KeyCode::Left | KeyCode::Char('h' | 'H' | 'a' | 'A') => Some(Command::MoveLeft),
        KeyCode::Right | KeyCode::Char('l' | 'L' | 'd' | 'D') => Some(Command::MoveRight),
        KeyCode::Down | KeyCode::Char('j' | 'J' | 's' | 'S') => Some(Command::SoftDrop),

        KeyCode::Char(' ') | KeyCode::Up | KeyCode::Char('k' | 'K' | 'w' | 'W') => {
            Some(Command::Rotate)
        }

        KeyCode::Char('q' | 'Q') => Some(Command::EndGame),
        KeyCode::Char('r' | 'R') => Some(Command::Restart),

        _ => None,
    }
}

/// Check if key should quit the program regardless of game state.
///
/// `Q` only ends the current game; pressing it again on the game-over screen
/// quits, which the caller decides from the game state.
pub fn should_quit(key: KeyEvent) -> bool {
    key.code == KeyCode::Esc
        || (matches!(key.code, KeyCode::Char('c' | 'C')) && key.modifiers.contains(KeyModifiers::CONTROL))
}
