//! GameView: maps a [`GameSnapshot`] into a terminal framebuffer.
//!
//! This module is pure (no I/O). It can be unit-tested.

use crate::core::GameSnapshot;
use crate::effects::ClearEffects;
use crate::fb::{CellStyle, FrameBuffer, Rgb};
use crate::types::{BoardEventKind, Cell as BoardCell, PuyoColor, BOARD_HEIGHT, BOARD_WIDTH};

const PLAY_BG: Rgb = Rgb::new(30, 30, 40);
const SCREEN_BG: Rgb = Rgb::new(0, 0, 0);
const GARBAGE_FG: Rgb = Rgb::new(150, 150, 160);

/// Terminal viewport dimensions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Viewport {
    pub width: u16,
    pub height: u16,
}

impl Viewport {
    pub fn new(width: u16, height: u16) -> Self {
        Self { width, height }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnchorY {
    Center,
    Top,
}

/// A lightweight terminal renderer for the puzzle board.
pub struct GameView {
    /// Board cell width in terminal columns.
    cell_w: u16,
    /// Board cell height in terminal rows.
    cell_h: u16,
    anchor_y: AnchorY,
}

impl Default for GameView {
    fn default() -> Self {
        // 2x1 helps compensate for typical terminal glyph aspect ratio.
        Self::new(2, 1)
    }
}

/// Board origin and frame size for one render pass.
#[derive(Debug, Clone, Copy)]
struct Frame {
    x: u16,
    y: u16,
    w: u16,
    h: u16,
}

pub fn color_rgb(color: PuyoColor) -> Rgb {
    match color {
        PuyoColor::Red => Rgb::new(230, 70, 70),
        PuyoColor::Blue => Rgb::new(80, 120, 230),
        PuyoColor::Green => Rgb::new(90, 210, 110),
        PuyoColor::Yellow => Rgb::new(240, 210, 70),
    }
}

fn color_letter(color: PuyoColor) -> char {
    match color {
        PuyoColor::Red => 'R',
        PuyoColor::Blue => 'B',
        PuyoColor::Green => 'G',
        PuyoColor::Yellow => 'Y',
    }
}

impl GameView {
    pub fn new(cell_w: u16, cell_h: u16) -> Self {
        Self {
            cell_w,
            cell_h,
            anchor_y: AnchorY::Center,
        }
    }

    pub fn with_anchor_y(mut self, anchor_y: AnchorY) -> Self {
        self.anchor_y = anchor_y;
        self
    }

    /// Render the snapshot into an existing framebuffer.
    ///
    /// Callers can reuse a framebuffer across frames and only resize when the
    /// terminal size changes.
    pub fn render_into(&self, snap: &GameSnapshot, viewport: Viewport, fb: &mut FrameBuffer) {
        self.render_into_with_effects(snap, None, viewport, fb);
    }

    pub fn render_into_with_effects(
        &self,
        snap: &GameSnapshot,
        effects: Option<&ClearEffects>,
        viewport: Viewport,
        fb: &mut FrameBuffer,
    ) {
        fb.resize(viewport.width, viewport.height);
        fb.clear(CellStyle::new(Rgb::new(220, 220, 220), SCREEN_BG).into_cell(' '));

        let board_w = (BOARD_WIDTH as u16) * self.cell_w;
        let board_h = (BOARD_HEIGHT as u16) * self.cell_h;
        let w = board_w + 2;
        let h = board_h + 2;
        let frame = Frame {
            x: viewport.width.saturating_sub(w) / 2,
            y: match self.anchor_y {
                AnchorY::Center => viewport.height.saturating_sub(h) / 2,
                AnchorY::Top => 0,
            },
            w,
            h,
        };

        fb.fill_rect(
            frame.x + 1,
            frame.y + 1,
            board_w,
            board_h,
            ' ',
            CellStyle::new(Rgb::new(80, 80, 90), PLAY_BG),
        );
        draw_border(fb, frame, CellStyle::new(Rgb::new(200, 200, 200), SCREEN_BG));

        for y in 0..BOARD_HEIGHT {
            for x in 0..BOARD_WIDTH {
                let cell = snap.board[y as usize][x as usize];
                self.draw_board_cell(fb, frame, x as i8, y as i8, cell);
            }
        }

        // Garbage still in the air, drawn only where the board is empty.
        let falling = CellStyle::new(GARBAGE_FG, PLAY_BG).dim();
        for unit in &snap.garbage {
            let (x, y) = (unit.column as i8, unit.row);
            if y < 0 || y >= BOARD_HEIGHT as i32 {
                continue;
            }
            if snap.cell(x, y as i8) == Some(BoardCell::Empty) {
                self.fill_cell(fb, frame, x, y as i8, '▓', falling);
            }
        }

        if let Some(active) = snap.active {
            for (&(x, y), &color) in [active.pivot, active.satellite].iter().zip(active.colors.iter()) {
                let style = CellStyle::new(color_rgb(color).lighten(40), PLAY_BG).bold();
                self.fill_cell(fb, frame, x, y, '█', style);
            }
        }

        if let Some(effects) = effects {
            self.draw_flashes(fb, frame, snap, effects);
        }

        self.draw_side_panel(fb, snap, effects, viewport, frame);

        if snap.game_over {
            draw_overlay_text(fb, frame, 0, "GAME OVER");
            if let Some(rank) = snap.last_rank {
                draw_overlay_rank(fb, frame, 1, rank);
            }
            draw_overlay_text(fb, frame, 2, "R retry");
            draw_overlay_text(fb, frame, 3, "Q quit");
        }
    }

    /// Convenience helper that allocates a new framebuffer.
    pub fn render(&self, snap: &GameSnapshot, viewport: Viewport) -> FrameBuffer {
        let mut fb = FrameBuffer::new(viewport.width, viewport.height);
        self.render_into(snap, viewport, &mut fb);
        fb
    }

    pub fn render_with_effects(
        &self,
        snap: &GameSnapshot,
        effects: &ClearEffects,
        viewport: Viewport,
    ) -> FrameBuffer {
        let mut fb = FrameBuffer::new(viewport.width, viewport.height);
        self.render_into_with_effects(snap, Some(effects), viewport, &mut fb);
        fb
    }

    fn draw_board_cell(&self, fb: &mut FrameBuffer, frame: Frame, x: i8, y: i8, cell: BoardCell) {
        let (ch, style) = match cell {
            BoardCell::Empty => ('·', CellStyle::new(Rgb::new(90, 90, 100), PLAY_BG).dim()),
            BoardCell::Colored(color) => ('█', CellStyle::new(color_rgb(color), PLAY_BG)),
            BoardCell::Garbage => ('▒', CellStyle::new(GARBAGE_FG, PLAY_BG)),
        };
        self.fill_cell(fb, frame, x, y, ch, style);
    }

    fn draw_flashes(&self, fb: &mut FrameBuffer, frame: Frame, snap: &GameSnapshot, effects: &ClearEffects) {
        for flash in effects.flashes() {
            let (x, y) = (flash.x as i8, flash.y as i8);
            let under = snap.cell(x, y);
            match flash.kind {
                // Cells that fell into a cleared spot win over the flash.
                BoardEventKind::Cleared if under == Some(BoardCell::Empty) => {
                    let fg = match flash.cell {
                        BoardCell::Colored(color) => color_rgb(color).lighten(120),
                        _ => GARBAGE_FG.lighten(120),
                    };
                    self.fill_cell(fb, frame, x, y, '░', CellStyle::new(fg, PLAY_BG).bold());
                }
                BoardEventKind::GarbageLanded if under == Some(BoardCell::Garbage) => {
                    let style = CellStyle::new(GARBAGE_FG.lighten(160), PLAY_BG).bold();
                    self.fill_cell(fb, frame, x, y, '▒', style);
                }
                _ => {}
            }
        }
    }

    /// Fill the terminal rectangle of one board cell; off-board cells are skipped.
    fn fill_cell(&self, fb: &mut FrameBuffer, frame: Frame, x: i8, y: i8, ch: char, style: CellStyle) {
        if x < 0 || y < 0 || x >= BOARD_WIDTH as i8 || y >= BOARD_HEIGHT as i8 {
            return;
        }
        let px = frame.x + 1 + x as u16 * self.cell_w;
        let py = frame.y + 1 + y as u16 * self.cell_h;
        fb.fill_rect(px, py, self.cell_w, self.cell_h, ch, style);
    }

    fn draw_side_panel(
        &self,
        fb: &mut FrameBuffer,
        snap: &GameSnapshot,
        effects: Option<&ClearEffects>,
        viewport: Viewport,
        frame: Frame,
    ) {
        let panel_x = frame.x.saturating_add(frame.w).saturating_add(2);
        if panel_x >= viewport.width || viewport.width - panel_x < 12 {
            return;
        }

        let label = CellStyle::new(Rgb::new(220, 220, 220), SCREEN_BG).bold();
        let value = CellStyle::new(Rgb::new(200, 200, 200), SCREEN_BG);

        let mut y = frame.y;
        for (name, number) in [
            ("SCORE", snap.score),
            ("HIGH", snap.high_score),
            ("LEVEL", snap.level),
            ("MAX CHAIN", snap.max_chain),
        ] {
            fb.put_str(panel_x, y, name, label);
            fb.put_u32(panel_x, y.saturating_add(1), number, value);
            y = y.saturating_add(3);
        }

        fb.put_str(panel_x, y, "NEXT", label);
        y = y.saturating_add(1);
        // Satellite above pivot, as the pair spawns.
        for color in [snap.next[1], snap.next[0]] {
            let style = CellStyle::new(color_rgb(color), SCREEN_BG);
            fb.put_str(panel_x, y, "██", style);
            fb.put_char(panel_x + 3, y, color_letter(color), CellStyle { dim: true, ..value });
            y = y.saturating_add(1);
        }
        y = y.saturating_add(1);

        let incoming = snap.pending_garbage + snap.garbage.len() as u32;
        if incoming > 0 {
            let warn = CellStyle::new(GARBAGE_FG.lighten(80), SCREEN_BG).bold();
            fb.put_str(panel_x, y, "GARBAGE", warn);
            fb.put_u32(panel_x + 8, y, incoming, warn);
        }
        y = y.saturating_add(2);

        if let Some(chain) = effects.and_then(ClearEffects::banner) {
            let banner = CellStyle::new(Rgb::new(255, 230, 120), SCREEN_BG).bold();
            fb.put_u32(panel_x, y, chain, banner);
            fb.put_str(panel_x + digit_count(chain) + 1, y, "CHAIN!", banner);
        }
        y = y.saturating_add(2);

        // Session records
        let play_secs = (snap.play_time_ms / 1000).min(u32::MAX as u64) as u32;
        for (name, number) in [
            ("TIME", play_secs),
            ("GAMES", snap.stats.games_played),
            ("AVG", snap.stats.average_score()),
            ("BEST", snap.ranking.first().map_or(0, |e| e.score)),
        ] {
            fb.put_str(panel_x, y, name, label);
            fb.put_u32(panel_x + 6, y, number, value);
            y = y.saturating_add(1);
        }
    }
}

fn draw_border(fb: &mut FrameBuffer, frame: Frame, style: CellStyle) {
    let Frame { x, y, w, h } = frame;
    if w < 2 || h < 2 {
        return;
    }

    fb.put_char(x, y, '┌', style);
    fb.put_char(x + w - 1, y, '┐', style);
    fb.put_char(x, y + h - 1, '└', style);
    fb.put_char(x + w - 1, y + h - 1, '┘', style);

    for dx in 1..w - 1 {
        fb.put_char(x + dx, y, '─', style);
        fb.put_char(x + dx, y + h - 1, '─', style);
    }
    for dy in 1..h - 1 {
        fb.put_char(x, y + dy, '│', style);
        fb.put_char(x + w - 1, y + dy, '│', style);
    }
}

fn digit_count(n: u32) -> u16 {
    n.checked_ilog10().unwrap_or(0) as u16 + 1
}

/// Centered "RANK #n" line.
fn draw_overlay_rank(fb: &mut FrameBuffer, frame: Frame, line: u16, rank: u32) {
    const PREFIX: &str = "RANK #";
    let y = frame.y.saturating_add(frame.h / 2).saturating_add(line);
    let text_w = PREFIX.len() as u16 + digit_count(rank);
    let x = frame.x.saturating_add(frame.w.saturating_sub(text_w) / 2);
    let style = CellStyle::new(Rgb::new(255, 230, 120), SCREEN_BG).bold();
    fb.put_str(x, y, PREFIX, style);
    fb.put_u32(x + PREFIX.len() as u16, y, rank, style);
}

/// Centered text `line` rows below the middle of the frame.
fn draw_overlay_text(fb: &mut FrameBuffer, frame: Frame, line: u16, text: &str) {
    let y = frame.y.saturating_add(frame.h / 2).saturating_add(line);
    let text_w = text.chars().count() as u16;
    let x = frame.x.saturating_add(frame.w.saturating_sub(text_w) / 2);
    let style = CellStyle::new(Rgb::new(255, 255, 255), SCREEN_BG).bold();
    fb.put_str(x, y, text, style);
}
