use puyo_tui::core::{GameConfig, GameState, SimpleRng};
use puyo_tui::term::{AnchorY, ClearEffects, GameView, Viewport};
use puyo_tui::types::{BoardEvent, BoardEventKind, Cell, Command, PuyoColor, TICK_MS};

fn screen_text(fb: &puyo_tui::term::FrameBuffer) -> String {
    (0..fb.height())
        .map(|y| fb.row_text(y))
        .collect::<Vec<_>>()
        .join("\n")
}

#[test]
fn term_view_renders_border_corners() {
    let snap = GameState::new(1).snapshot();

    // With cell_w=2 and cell_h=1: 6*2 by 12*1 plus border => 14x14
    let fb = GameView::default().render(&snap, Viewport::new(14, 14));

    assert_eq!(fb.get(0, 0).unwrap().ch, '┌');
    assert_eq!(fb.get(13, 0).unwrap().ch, '┐');
    assert_eq!(fb.get(0, 13).unwrap().ch, '└');
    assert_eq!(fb.get(13, 13).unwrap().ch, '┘');
}

#[test]
fn term_view_renders_cells_two_chars_wide() {
    let mut snap = GameState::new(1).snapshot();
    snap.board[11][0] = Cell::Colored(PuyoColor::Green);
    snap.board[11][1] = Cell::Garbage;
    snap.active = None;

    let fb = GameView::default().render(&snap, Viewport::new(14, 14));

    let y = 1 + 11;
    assert_eq!(fb.get(1, y).unwrap().ch, '█');
    assert_eq!(fb.get(2, y).unwrap().ch, '█');
    assert_eq!(fb.get(3, y).unwrap().ch, '▒');
    assert_eq!(fb.get(4, y).unwrap().ch, '▒');
    assert_eq!(fb.get(5, y).unwrap().ch, '·');
}

#[test]
fn term_view_draws_side_panel_when_wide_enough() {
    let mut snap = GameState::new(1).snapshot();
    snap.score = 1234;
    snap.high_score = 5678;
    snap.level = 3;

    let fb = GameView::default()
        .with_anchor_y(AnchorY::Top)
        .render(&snap, Viewport::new(48, 14));
    let text = screen_text(&fb);

    assert!(text.contains("SCORE"));
    assert!(text.contains("1234"));
    assert!(text.contains("HIGH"));
    assert!(text.contains("5678"));
    assert!(text.contains("LEVEL"));
    assert!(text.contains("NEXT"));
}

#[test]
fn term_view_omits_side_panel_when_narrow() {
    let snap = GameState::new(1).snapshot();
    let fb = GameView::default().render(&snap, Viewport::new(14, 14));
    assert!(!screen_text(&fb).contains("SCORE"));
}

#[test]
fn term_view_shows_incoming_garbage() {
    let config = GameConfig {
        garbage_interval_ms: 1_000,
        ..GameConfig::default()
    };
    let mut game = GameState::with_rng(SimpleRng::new(4), config);
    game.tick(1_000);
    let snap = game.snapshot();
    assert_eq!(snap.garbage.len(), 1);

    let fb = GameView::default()
        .with_anchor_y(AnchorY::Top)
        .render(&snap, Viewport::new(48, 24));
    assert!(screen_text(&fb).contains("GARBAGE 1"));
}

#[test]
fn term_view_shows_game_over_overlay() {
    let mut game = GameState::new(1);
    game.handle_command(Command::EndGame);
    let snap = game.snapshot();

    let fb = GameView::default().render(&snap, Viewport::new(40, 20));
    let text = screen_text(&fb);
    assert!(text.contains("GAME OVER"));
    assert!(text.contains("R retry"));
    assert!(text.contains("Q quit"));
}

#[test]
fn term_view_shows_chain_banner() {
    let snap = GameState::new(1).snapshot();
    let mut effects = ClearEffects::new();
    for chain in 1..=3 {
        effects.push(BoardEvent {
            kind: BoardEventKind::Cleared,
            x: 0,
            y: 11,
            cell: Cell::Colored(PuyoColor::Red),
            chain,
        });
    }

    let fb = GameView::default()
        .with_anchor_y(AnchorY::Top)
        .render_with_effects(&snap, &effects, Viewport::new(48, 24));
    assert!(screen_text(&fb).contains("3 CHAIN!"));
}

#[test]
fn term_view_shows_rank_and_session_records() {
    let mut game = GameState::new(1);
    for _ in 0..125 {
        game.tick(TICK_MS);
    }
    game.handle_command(Command::EndGame);
    let snap = game.snapshot();
    assert_eq!(snap.last_rank, Some(1));

    let fb = GameView::default()
        .with_anchor_y(AnchorY::Top)
        .render(&snap, Viewport::new(48, 28));
    let text = screen_text(&fb);
    assert!(text.contains("RANK #1"));
    assert!(text.contains("GAMES 1"));
    assert!(text.contains("TIME  2"));
}
