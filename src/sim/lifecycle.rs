//! Pooled entity lifecycle
//!
//! Bullets and enemies are fixed (layer, moving layer, flag) slots allocated
//! once at scene setup. Nothing is freed during play:
//! - `spawn` unlinks the slot wherever it is, relinks it right after the
//!   anchor (the player) in both lists, then places and colors it.
//! - `kill` leaves the slot linked but static and background-colored, so the
//!   next repaint of its unchanged box erases its last footprint.

use glam::IVec2;

use super::layer::{LayerId, MoverId, Scene};
use crate::renderer::Color;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntityKind {
    Bullet,
    Enemy,
}

/// Where spawned entities are spliced in
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Anchor {
    pub layer: LayerId,
    pub mover: MoverId,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SpawnParams {
    pub pos: IVec2,
    pub velocity: IVec2,
    pub color: Color,
}

/// One pooled slot
#[derive(Debug, Clone)]
pub struct Entity {
    pub kind: EntityKind,
    pub layer: LayerId,
    pub mover: MoverId,
    active: bool,
}

impl Entity {
    /// A new INACTIVE slot; its layer and mover must already be in the arena
    pub fn new(kind: EntityKind, layer: LayerId, mover: MoverId) -> Self {
        Self {
            kind,
            layer,
            mover,
            active: false,
        }
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    /// Unlink from both lists (no-op where absent)
    pub fn unlink(&self, scene: &mut Scene) {
        scene.paint_order.remove(self.layer);
        scene.motion_order.remove(self.mover);
    }

    /// (Re)activate this slot right behind `anchor`.
    ///
    /// An anchor that is not linked puts the slot at the back of that list
    /// instead, so an active slot is always linked exactly once.
    pub fn spawn(&mut self, scene: &mut Scene, anchor: Anchor, params: SpawnParams) {
        self.unlink(scene);
        if !scene.paint_order.insert_after(anchor.layer, self.layer) {
            scene.paint_order.push_back(self.layer);
        }
        if !scene.motion_order.insert_after(anchor.mover, self.mover) {
            scene.motion_order.push_back(self.mover);
        }
        log::debug!("{:?} spawned at {:?}", self.kind, params.pos);

        let layer = scene.layer_mut(self.layer);
        layer.pos.place(params.pos);
        layer.color = params.color;
        scene.mover_mut(self.mover).velocity = params.velocity;

        self.active = true;
    }

    /// Deactivate in place. Returns false if the slot was already inactive.
    pub fn kill(&mut self, scene: &mut Scene, background: Color) -> bool {
        if !self.active {
            return false;
        }
        // Stay on the last rendered box so the next pass erases it
        let layer = scene.layer_mut(self.layer);
        layer.color = background;
        layer.pos.hold();
        scene.mover_mut(self.mover).velocity = IVec2::ZERO;
        self.active = false;
        true
    }
}

/// Enemy color ramp indexed by score
pub const TIER_COLORS: [Color; 8] = [
    Color::RED,
    Color::ORANGE_RED,
    Color::DARK_ORANGE,
    Color::ORANGE,
    Color::YELLOW,
    Color::GREEN_YELLOW,
    Color::GREEN,
    Color::FOREST_GREEN,
];

/// Color for scores past the ramp
pub const TERMINAL_TIER_COLOR: Color = Color::BLUE;

pub fn tier_color(score: u32) -> Color {
    TIER_COLORS
        .get(score as usize)
        .copied()
        .unwrap_or(TERMINAL_TIER_COLOR)
}
