//! Short-lived visual effects fed by drained board events.
//!
//! Effects live on the frontend side only; the simulation never waits for them.

use crate::types::{BoardEvent, BoardEventKind, Cell};

/// How long a cleared cell keeps flashing.
pub const CLEAR_FLASH_MS: u32 = 300;

/// How long a landed garbage cell is highlighted.
pub const LANDING_FLASH_MS: u32 = 120;

/// How long a chain banner stays in the side panel.
pub const CHAIN_BANNER_MS: u32 = 1200;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Flash {
    pub x: u8,
    pub y: u8,
    pub cell: Cell,
    pub kind: BoardEventKind,
    pub chain: u32,
    pub remaining_ms: u32,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ClearEffects {
    flashes: Vec<Flash>,
    /// (chain level, remaining ms)
    banner: Option<(u32, u32)>,
}

impl ClearEffects {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, event: BoardEvent) {
        let remaining_ms = match event.kind {
            BoardEventKind::Cleared => CLEAR_FLASH_MS,
            BoardEventKind::GarbageLanded => LANDING_FLASH_MS,
        };
        self.flashes.push(Flash {
            x: event.x,
            y: event.y,
            cell: event.cell,
            kind: event.kind,
            chain: event.chain,
            remaining_ms,
        });

        if event.kind == BoardEventKind::Cleared && event.chain >= 2 {
            let shown = self.banner.map_or(0, |(chain, _)| chain);
            if event.chain >= shown {
                self.banner = Some((event.chain, CHAIN_BANNER_MS));
            }
        }
    }

    pub fn extend(&mut self, events: impl IntoIterator<Item = BoardEvent>) {
        for event in events {
            self.push(event);
        }
    }

    /// Age every effect, dropping the expired ones.
    pub fn update(&mut self, elapsed_ms: u32) {
        for flash in &mut self.flashes {
            flash.remaining_ms = flash.remaining_ms.saturating_sub(elapsed_ms);
        }
        self.flashes.retain(|f| f.remaining_ms > 0);

        self.banner = self
            .banner
            .map(|(chain, ms)| (chain, ms.saturating_sub(elapsed_ms)))
            .filter(|&(_, ms)| ms > 0);
    }

    pub fn clear(&mut self) {
        self.flashes.clear();
        self.banner = None;
    }

    pub fn flashes(&self) -> &[Flash] {
        &self.flashes
    }

    /// Chain level to announce, if a multi-pass chain happened recently.
    pub fn banner(&self) -> Option<u32> {
        self.banner.map(|(chain, _)| chain)
    }

    pub fn is_empty(&self) -> bool {
        self.flashes.is_empty() && self.banner.is_none()
    }
}
