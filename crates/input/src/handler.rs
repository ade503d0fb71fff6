//! DAS/ARR input handler for terminal environments.
//!
//! Held movement keys repeat after a delay (DAS) at a fixed rate (ARR). Many
//! terminals never report key releases, so a held key is also released after
//! a short quiet period.

use std::time::{Duration, Instant};

use arrayvec::ArrayVec;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::types::{Command, DEFAULT_ARR_MS, DEFAULT_DAS_MS, SOFT_DROP_ARR_MS, SOFT_DROP_DAS_MS};

/// Direction for horizontal movement.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HorizontalDirection {
    Left,
    Right,
    None,
}

impl HorizontalDirection {
    fn command(self) -> Option<Command> {
        match self {
            HorizontalDirection::Left => Some(Command::MoveLeft),
            HorizontalDirection::Right => Some(Command::MoveRight),
            HorizontalDirection::None => None,
        }
    }
}

/// Repeat timers for one held key
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
struct Repeat {
    das_timer: u32,
    arr_accumulator: u32,
}

impl Repeat {
    fn clear(&mut self) {
        *self = Self::default();
    }

    /// Advance by `elapsed_ms` and return how many repeats fired.
    fn advance(&mut self, elapsed_ms: u32, das: u32, arr: u32) -> u32 {
        let prev_das = self.das_timer;
        self.das_timer = self.das_timer.saturating_add(elapsed_ms);
        if self.das_timer < das {
            return 0;
        }

        // Only time past the DAS threshold counts towards the first repeat.
        let counted = if prev_das < das {
            self.das_timer - das
        } else {
            elapsed_ms
        };
        self.arr_accumulator = self.arr_accumulator.saturating_add(counted);

        let arr = arr.max(1);
        let fired = self.arr_accumulator / arr;
        self.arr_accumulator %= arr;
        fired
    }
}

// A short timeout keeps a single tap from turning into a held key on terminals
// without release events.
const DEFAULT_KEY_RELEASE_TIMEOUT_MS: u32 = 150;

/// Tracks input state for DAS/ARR handling.
#[derive(Debug, Clone)]
pub struct InputHandler {
    horizontal: HorizontalDirection,
    down_held: bool,
    last_key_time: Instant,
    horizontal_repeat: Repeat,
    down_repeat: Repeat,
    das_delay: u32,
    arr_rate: u32,
    key_release_timeout_ms: u32,
}

fn is_left(code: KeyCode) -> bool {
    matches!(code, KeyCode::Left | KeyCode::Char('h' | 'H' | 'a' | 'A'))
}

fn is_right(code: KeyCode) -> bool {
    matches!(code, KeyCode::Right | KeyCode::Char('l' | 'L' | 'd' | 'D'))
}

fn is_down(code: KeyCode) -> bool {
    matches!(code, KeyCode::Down | KeyCode::Char('j' | 'J' | 's' | 'S'))
}

impl InputHandler {
    pub fn new() -> Self {
        Self::with_config(DEFAULT_DAS_MS, DEFAULT_ARR_MS)
    }

    pub fn with_config(das_delay: u32, arr_rate: u32) -> Self {
        Self {
            horizontal: HorizontalDirection::None,
            down_held: false,
            last_key_time: Instant::now(),
            horizontal_repeat: Repeat::default(),
            down_repeat: Repeat::default(),
            das_delay,
            arr_rate,
            key_release_timeout_ms: DEFAULT_KEY_RELEASE_TIMEOUT_MS,
        }
    }

    pub fn with_key_release_timeout_ms(mut self, timeout_ms: u32) -> Self {
        self.key_release_timeout_ms = timeout_ms;
        self
    }

    pub fn horizontal(&self) -> HorizontalDirection {
        self.horizontal
    }

    fn press_horizontal(&mut self, direction: HorizontalDirection) -> Option<Command> {
        self.last_key_time = Instant::now();
        if self.horizontal == direction {
            return None;
        }
        self.horizontal = direction;
        self.horizontal_repeat.clear();
        direction.command()
    }

    /// Record a movement key press.
    ///
    /// Returns the command for the initial press; repeats of an already held
    /// key return None and are produced by [`InputHandler::update`] instead.
    /// Keys pressed with Ctrl never move the pair.
    pub fn handle_key_press(&mut self, key: KeyEvent) -> Option<Command> {
        if key.modifiers.contains(KeyModifiers::CONTROL) {
            return None;
        }

        let code = key.code;
        if is_left(code) {
            self.press_horizontal(HorizontalDirection::Left)
        } else if is_right(code) {
            self.press_horizontal(HorizontalDirection::Right)
        } else if is_down(code) {
            self.last_key_time = Instant::now();
            if self.down_held {
                return None;
            }
            self.down_held = true;
            self.down_repeat.clear();
            Some(Command::SoftDrop)
        } else {
            None
        }
    }

    pub fn handle_key_release(&mut self, code: KeyCode) {
        let released = if is_left(code) {
            HorizontalDirection::Left
        } else if is_right(code) {
            HorizontalDirection::Right
        } else {
            if is_down(code) {
                self.down_held = false;
                self.down_repeat.clear();
            }
            return;
        };

        if self.horizontal == released {
            self.horizontal = HorizontalDirection::None;
            self.horizontal_repeat.clear();
        }
    }

    /// Advance repeat timers and collect the repeated commands.
    pub fn update(&mut self, elapsed_ms: u32) -> ArrayVec<Command, 32> {
        let mut commands = ArrayVec::<Command, 32>::new();

        let quiet = self.last_key_time.elapsed() > Duration::from_millis(self.key_release_timeout_ms as u64);
        if quiet {
            self.horizontal = HorizontalDirection::None;
            self.down_held = false;
        }

        match self.horizontal.command() {
            Some(command) => {
                let fired = self
                    .horizontal_repeat
                    .advance(elapsed_ms, self.das_delay, self.arr_rate);
                for _ in 0..fired.min(commands.remaining_capacity() as u32) {
                    commands.push(command);
                }
            }
            None => self.horizontal_repeat.clear(),
        }

        if self.down_held {
            let fired = self
                .down_repeat
                .advance(elapsed_ms, SOFT_DROP_DAS_MS, SOFT_DROP_ARR_MS);
            for _ in 0..fired.min(commands.remaining_capacity() as u32) {
                commands.push(Command::SoftDrop);
            }
        } else {
            self.down_repeat.clear();
        }

        commands
    }

    pub fn reset(&mut self) {
        self.horizontal = HorizontalDirection::None;
        self.down_held = false;
        self.last_key_time = Instant::now();
        self.horizontal_repeat.clear();
        self.down_repeat.clear();
    }
}

impl Default for InputHandler {
    fn default() -> Self {
        Self::new()
    }
}
