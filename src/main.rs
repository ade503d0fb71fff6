//! Terminal puzzle runner (default binary).
//!
//! Uses crossterm for input and a custom framebuffer-based renderer.

use std::time::{Duration, Instant};

use anyhow::Result;
use crossterm::event::{self, Event, KeyEventKind};
use rand::rngs::StdRng;
use rand::SeedableRng;

use puyo_tui::config::AppConfig;
use puyo_tui::core::{GameSnapshot, GameState};
use puyo_tui::input::{handle_key_event, should_quit, InputHandler};
use puyo_tui::logging::init_log;
use puyo_tui::term::{ClearEffects, FrameBuffer, GameView, TerminalRenderer, Viewport};
use puyo_tui::types::{Command, TICK_MS};

fn main() -> Result<()> {
    let config = AppConfig::from_env();
    if let Some(path) = &config.log_path {
        init_log(config.log_level, path)?;
    }

    let rng = match config.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };
    let game = GameState::with_rng(rng, config.game_config());
    log::info!("starting game: seed {:?}, level {}", config.seed, config.start_level);

    let mut term = TerminalRenderer::new();
    let result = term.enter().and_then(|()| run(&mut term, game));

    // Always try to restore terminal state.
    let _ = term.exit();
    if let Err(err) = &result {
        log::error!("exiting with error: {err:#}");
    }
    result
}

/// Apply one command; returns false when the player asked to quit.
fn dispatch(
    game: &mut GameState<StdRng>,
    command: Command,
    input: &mut InputHandler,
    effects: &mut ClearEffects,
) -> bool {
    // A second Q on the game-over screen leaves the program.
    if command == Command::EndGame && game.game_over() {
        return false;
    }
    if command == Command::Restart {
        input.reset();
        effects.clear();
    }
    game.handle_command(command);
    true
}

fn run(term: &mut TerminalRenderer, mut game: GameState<StdRng>) -> Result<()> {
    let view = GameView::default();
    let mut input = InputHandler::new();
    let mut effects = ClearEffects::new();
    let mut snap = GameSnapshot::default();
    let mut fb = FrameBuffer::new(0, 0);

    let mut last_tick = Instant::now();
    let tick_duration = Duration::from_millis(TICK_MS as u64);

    loop {
        // Render.
        let (w, h) = crossterm::terminal::size().unwrap_or((80, 24));
        game.snapshot_into(&mut snap);
        view.render_into_with_effects(&snap, Some(&effects), Viewport::new(w, h), &mut fb);
        term.draw_swap(&mut fb)?;

        // Input with timeout until next tick.
        let timeout = tick_duration.saturating_sub(last_tick.elapsed());
        if event::poll(timeout)? {
            match event::read()? {
                Event::Key(key) => match key.kind {
                    KeyEventKind::Press => {
                        if should_quit(key) {
                            return Ok(());
                        }

                        // Movement goes through the repeat handler; everything else is direct.
                        let command = input
                            .handle_key_press(key)
                            .or_else(|| {
                                handle_key_event(key).filter(|c| {
                                    !matches!(c, Command::MoveLeft | Command::MoveRight | Command::SoftDrop)
                                })
                            });
                        if let Some(command) = command {
                            if !dispatch(&mut game, command, &mut input, &mut effects) {
                                return Ok(());
                            }
                        }
                    }
                    // DAS/ARR produces repeats itself.
                    KeyEventKind::Repeat => {}
                    KeyEventKind::Release => input.handle_key_release(key.code),
                },
                Event::Resize(_, _) => term.invalidate(),
                _ => {}
            }
        }

        // Tick.
        if last_tick.elapsed() >= tick_duration {
            last_tick = Instant::now();

            for command in input.update(TICK_MS) {
                game.handle_command(command);
            }
            game.tick(TICK_MS);

            effects.update(TICK_MS);
            effects.extend(game.drain_events());
        }
    }
}
