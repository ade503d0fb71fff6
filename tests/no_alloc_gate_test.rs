use std::alloc::{GlobalAlloc, Layout, System};
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

use puyo_tui::core::{GameSnapshot, GameState};
use puyo_tui::term::{FrameBuffer, GameView, Viewport};
use puyo_tui::types::{Command, TICK_MS};

struct CountingAlloc;

static COUNT_ENABLED: AtomicBool = AtomicBool::new(false);
static ALLOC_COUNT: AtomicUsize = AtomicUsize::new(0);

#[global_allocator]
static GLOBAL: CountingAlloc = CountingAlloc;

unsafe impl GlobalAlloc for CountingAlloc {
    unsafe fn alloc(&self, layout: Layout) -> *mut u8 {
        if COUNT_ENABLED.load(Ordering::Relaxed) {
            ALLOC_COUNT.fetch_add(1, Ordering::Relaxed);
        }
        System.alloc(layout)
    }

    unsafe fn dealloc(&self, ptr: *mut u8, layout: Layout) {
        System.dealloc(ptr, layout)
    }

    unsafe fn realloc(&self, ptr: *mut u8, layout: Layout, new_size: usize) -> *mut u8 {
        if COUNT_ENABLED.load(Ordering::Relaxed) {
            ALLOC_COUNT.fetch_add(1, Ordering::Relaxed);
        }
        System.realloc(ptr, layout, new_size)
    }
}

fn with_alloc_counting<F: FnOnce()>(f: F) -> usize {
    ALLOC_COUNT.store(0, Ordering::Relaxed);
    COUNT_ENABLED.store(true, Ordering::Relaxed);
    f();
    COUNT_ENABLED.store(false, Ordering::Relaxed);
    ALLOC_COUNT.load(Ordering::Relaxed)
}

#[test]
fn frame_hot_paths_do_not_allocate() {
    // Setup (outside counting) so one-time allocations don't trip the gate.
    let mut game = GameState::new(1);
    let mut snap = GameSnapshot::default();
    let view = GameView::default();
    let viewport = Viewport::new(40, 16);
    let mut fb = FrameBuffer::new(viewport.width, viewport.height);

    // Warm-up.
    game.tick(TICK_MS);
    game.snapshot_into(&mut snap);
    view.render_into(&snap, viewport, &mut fb);

    let allocs = with_alloc_counting(|| {
        // 3.2s of simulated time: the pair falls but never locks.
        for _ in 0..200 {
            game.tick(TICK_MS);
            game.snapshot_into(&mut snap);
            view.render_into(&snap, viewport, &mut fb);
        }

        for _ in 0..50 {
            game.handle_command(Command::MoveLeft);
            game.handle_command(Command::MoveRight);
            game.handle_command(Command::Rotate);
        }
    });

    assert_eq!(allocs, 0);
}
