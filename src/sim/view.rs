//! Read-only per-tick snapshot for renderers
//!
//! The core never draws; a frontend takes a [`FrameSnapshot`] each frame
//! and renders it however it likes.

use glam::Vec2;

use super::state::{GamePhase, GameState};
use crate::consts::{PIPE_GAP, WINDOW_HEIGHT, WINDOW_WIDTH};
use crate::skins::{self, CATALOG, SkinSpec};

#[derive(Debug, Clone, Copy)]
pub struct BirdView {
    /// Top-left of the bounding box
    pub pos: Vec2,
    /// Visual tilt in degrees
    pub angle: f32,
    pub size: f32,
    pub skin: &'static SkinSpec,
}

#[derive(Debug, Clone, Copy)]
pub struct PipeView {
    pub x: f32,
    pub gap_y: f32,
    pub gap: f32,
    pub width: f32,
}

#[derive(Debug, Clone, Copy)]
pub struct CoinView {
    pub pos: Vec2,
    pub radius: f32,
    pub special: bool,
    pub value: u32,
}

/// One catalog row as the shop menu should present it
#[derive(Debug, Clone, Copy)]
pub struct ShopRowView {
    pub skin: &'static SkinSpec,
    pub owned: bool,
    pub equipped: bool,
    pub affordable: bool,
    pub selected: bool,
}

#[derive(Debug, Clone)]
pub struct FrameSnapshot {
    pub width: f32,
    pub height: f32,
    pub phase: GamePhase,
    pub bird: BirdView,
    pub pipes: Vec<PipeView>,
    pub coins: Vec<CoinView>,
    pub score: u32,
    pub high_score: u32,
    pub balance: u32,
    pub shop_rows: Vec<ShopRowView>,
}

impl GameState {
    /// Capture everything a renderer needs for this tick.
    pub fn snapshot(&self) -> FrameSnapshot {
        let skin = skins::skin(&self.bird.current_skin)
            .unwrap_or_else(|| &CATALOG[0]);

        let shop_rows = CATALOG
            .iter()
            .enumerate()
            .map(|(i, spec)| ShopRowView {
                skin: spec,
                owned: self.bird.owned_skins.contains(spec.id),
                equipped: self.bird.current_skin == spec.id,
                affordable: self.balance >= spec.price,
                selected: self.shop.cursor == i,
            })
            .collect();

        FrameSnapshot {
            width: WINDOW_WIDTH,
            height: WINDOW_HEIGHT,
            phase: self.phase,
            bird: BirdView {
                pos: self.bird.pos,
                angle: self.bird.angle,
                size: self.bird.size,
                skin,
            },
            pipes: self
                .pipes
                .iter()
                .map(|p| PipeView {
                    x: p.x,
                    gap_y: p.gap_y,
                    gap: PIPE_GAP,
                    width: p.width,
                })
                .collect(),
            coins: self
                .coins
                .iter()
                .map(|c| CoinView {
                    pos: c.pos,
                    radius: c.radius,
                    special: c.special,
                    value: c.value,
                })
                .collect(),
            score: self.score,
            high_score: self.high_score,
            balance: self.balance,
            shop_rows,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::persistence::MemoryStore;

    #[test]
    fn test_snapshot_reflects_state() {
        let mut store = MemoryStore::new();
        let mut state = GameState::new(1, &mut store);
        state.score = 7;
        state.balance = 60;

        let snap = state.snapshot();
        assert_eq!(snap.score, 7);
        assert_eq!(snap.balance, 60);
        assert_eq!(snap.phase, GamePhase::Running);
        assert_eq!(snap.bird.skin.id, "default");
        assert_eq!(snap.shop_rows.len(), CATALOG.len());
        // blue_jay costs 50: affordable at 60 coins but not owned
        let row = snap.shop_rows.iter().find(|r| r.skin.id == "blue_jay").unwrap();
        assert!(row.affordable && !row.owned && !row.equipped);
    }
}
