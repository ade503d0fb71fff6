use criterion::{black_box, criterion_group, criterion_main, Criterion};
use puyo_tui::core::{resolve_chains, Board, GameSnapshot, GameState};
use puyo_tui::types::{Command, TICK_MS};

fn bench_tick(c: &mut Criterion) {
    let mut state = GameState::new(12345);

    c.bench_function("game_tick_16ms", |b| {
        b.iter(|| {
            if state.game_over() {
                state.reset();
            }
            state.tick(black_box(TICK_MS));
        })
    });
}

fn bench_resolve_tall_stack(c: &mut Criterion) {
    // A full bottom group under a tall mixed stack.
    let rows = [
        "GBYRGB", "GBYRGB", "RGBYRG", "RGBYRG", "YRGBYR", "YRGBYR", "BYRGBY", "BYRGBY",
        "GGGGGG",
    ];
    let template = Board::from_rows(&rows);

    c.bench_function("resolve_tall_stack", |b| {
        b.iter(|| {
            let mut board = template.clone();
            let result = resolve_chains(&mut board, |e| {
                black_box(e);
            });
            black_box(result.score)
        })
    });
}

fn bench_collapse_all(c: &mut Criterion) {
    let template = Board::from_rows(&[
        "R.G.B.", "......", ".Y.R.G", "......", "B.Y.#.", "......",
    ]);

    c.bench_function("collapse_all", |b| {
        b.iter(|| {
            let mut board = template.clone();
            board.collapse_all();
            black_box(board.occupied_count())
        })
    });
}

fn bench_rotate(c: &mut Criterion) {
    let mut state = GameState::new(12345);
    state.handle_command(Command::SoftDrop);

    c.bench_function("rotate", |b| {
        b.iter(|| {
            state.handle_command(black_box(Command::Rotate));
        })
    });
}

fn bench_snapshot_into(c: &mut Criterion) {
    let state = GameState::new(12345);
    let mut snap = GameSnapshot::default();

    c.bench_function("snapshot_into", |b| {
        b.iter(|| {
            state.snapshot_into(&mut snap);
            black_box(snap.score)
        })
    });
}

criterion_group!(
    benches,
    bench_tick,
    bench_resolve_tall_stack,
    bench_collapse_all,
    bench_rotate,
    bench_snapshot_into
);
criterion_main!(benches);
