//! Game state and scene setup
//!
//! Builds the playing field, the player and the entity pools, and owns the
//! lifecycle rules (who kills whom, when the run ends).

use std::sync::Arc;

use glam::IVec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use super::collision::layers_collide;
use super::layer::{Layer, LayerId, Scene};
use super::lifecycle::{Anchor, Entity, EntityKind, SpawnParams, tier_color};
use crate::consts::*;
use crate::error::Result;
use crate::geometry::Region;
use crate::renderer::{Banner, Color};
use crate::settings::Settings;
use crate::shape::{MouthPhase, Shape};

/// Player rests this far above the bottom edge
const PLAYER_BOTTOM_GAP: i32 = 22;
/// Field outline and zones are inset this much from each side
const FIELD_INSET: i32 = 10;
/// Zone rectangles are this tall (half size)
const ZONE_HALF_HEIGHT: i32 = 9;
const TOP_ZONE_Y: i32 = 20;
const BOTTOM_ZONE_GAP: i32 = 5;
const ENEMY_SPAWN_Y: i32 = 20;
/// Spawn offset added per point of score
const ENEMY_OFFSET_PER_SCORE: i32 = 5;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Won,
    Lost,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GamePhase {
    Running,
    Ended(Outcome),
}

/// Things that happened during one tick, in order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameEvent {
    /// An active tick started (feedback tone resets)
    Silence,
    BulletFired { slot: usize },
    /// A bullet reached the top zone
    BulletExpired { slot: usize },
    EnemySpawned { slot: usize, color: Color },
    /// An enemy reached the bottom zone
    EnemyEscaped { slot: usize },
    /// An enemy was shot; carries the new score
    EnemyDestroyed { slot: usize, score: u32 },
    PlayerHit,
    Victory,
    /// Emitted every tick once the run has ended
    EndingPulse { counter: u32, outcome: Outcome },
}

/// Complete game state
#[derive(Debug, Clone)]
pub struct GameState {
    pub settings: Settings,
    pub scene: Scene,
    pub player: Anchor,
    pub field: LayerId,
    /// Collision-only layers, never painted
    pub top_zone: LayerId,
    pub bottom_zone: LayerId,
    /// Region moving layers bounce inside
    pub fence: Region,
    pub bullets: Vec<Entity>,
    pub enemies: Vec<Entity>,
    pub score: u32,
    pub phase: GamePhase,
    /// Tick counter
    pub time_ticks: u64,
    pub mouth: MouthPhase,
    pub(crate) spawn_timer: u32,
    pub(crate) end_counter: u32,
    rng: Pcg32,
}

impl GameState {
    /// Build the scene described by `settings`
    pub fn new(settings: Settings) -> Result<Self> {
        settings.validate()?;

        let w = settings.screen_width;
        let h = settings.screen_height;
        let bg = settings.background;
        let center_x = w / 2;

        let player_shape = Arc::new(Shape::pac_circle(settings.player_radius)?);
        let field_shape = Arc::new(Shape::rect_outline(
            IVec2::new(w / 2 - FIELD_INSET, h / 2 - FIELD_INSET),
            1,
        )?);
        let zone_shape = Arc::new(Shape::rect(IVec2::new(
            w / 2 - FIELD_INSET,
            ZONE_HALF_HEIGHT,
        ))?);
        let bullet_shape = Arc::new(Shape::rect(IVec2::splat(settings.bullet_half_size))?);
        let enemy_shape = Arc::new(Shape::rect(IVec2::splat(settings.enemy_half_size))?);

        let mut scene = Scene::new();
        let player = scene.add_layer(Layer::new(
            player_shape,
            IVec2::new(center_x, h - PLAYER_BOTTOM_GAP),
            Color::GREEN,
        ));
        let field = scene.add_layer(Layer::new(
            field_shape,
            IVec2::new(center_x, h / 2),
            Color::BLACK,
        ));
        let top_zone = scene.add_layer(Layer::new(
            zone_shape.clone(),
            IVec2::new(center_x, TOP_ZONE_Y),
            Color::BLACK,
        ));
        let bottom_zone = scene.add_layer(Layer::new(
            zone_shape,
            IVec2::new(center_x, h - BOTTOM_ZONE_GAP),
            Color::BLACK,
        ));
        let player_mover = scene.add_mover(player, IVec2::ZERO);

        let bullets = (0..BULLET_SLOTS)
            .map(|_| {
                let layer = scene.add_layer(Layer::new(bullet_shape.clone(), IVec2::ZERO, bg));
                let mover = scene.add_mover(layer, IVec2::ZERO);
                Entity::new(EntityKind::Bullet, layer, mover)
            })
            .collect();
        let enemies = (0..ENEMY_SLOTS)
            .map(|_| {
                let layer = scene.add_layer(Layer::new(enemy_shape.clone(), IVec2::ZERO, bg));
                let mover = scene.add_mover(layer, IVec2::ZERO);
                Entity::new(EntityKind::Enemy, layer, mover)
            })
            .collect();

        // Static layers are linked once and never removed
        scene.paint_order.push_back(player);
        scene.paint_order.push_back(field);
        scene.motion_order.push_back(player_mover);

        let fence = scene.layer(field).bounds();
        let rng = Pcg32::seed_from_u64(settings.seed);

        log::info!(
            "Scene ready: {}x{} screen, fence {:?}..{:?}",
            w,
            h,
            fence.top_left,
            fence.bot_right
        );

        Ok(Self {
            settings,
            scene,
            player: Anchor {
                layer: player,
                mover: player_mover,
            },
            field,
            top_zone,
            bottom_zone,
            fence,
            bullets,
            enemies,
            score: 0,
            phase: GamePhase::Running,
            time_ticks: 0,
            mouth: MouthPhase::default(),
            spawn_timer: 0,
            end_counter: 0,
            rng,
        })
    }

    pub fn is_ended(&self) -> bool {
        matches!(self.phase, GamePhase::Ended(_))
    }

    pub fn outcome(&self) -> Option<Outcome> {
        match self.phase {
            GamePhase::Ended(outcome) => Some(outcome),
            GamePhase::Running => None,
        }
    }

    pub fn player_layer(&self) -> &Layer {
        self.scene.layer(self.player.layer)
    }

    /// Set the player's horizontal velocity (vertical is always zero)
    pub fn steer(&mut self, vx: i32) {
        self.scene.mover_mut(self.player.mover).velocity = IVec2::new(vx, 0);
    }

    /// Launch bullet `slot` from just above the player
    pub fn fire(&mut self, slot: usize) {
        let muzzle =
            self.player_layer().pos.current - IVec2::new(0, self.settings.bullet_muzzle_offset);
        let params = SpawnParams {
            pos: muzzle,
            velocity: IVec2::new(0, -self.settings.bullet_speed),
            color: Color::BLACK,
        };
        let anchor = self.player;
        self.bullets[slot].spawn(&mut self.scene, anchor, params);
        log::debug!("Bullet {} fired from {:?}", slot, muzzle);
    }

    /// Spawn enemy `slot` near the top, faster and recolored as score grows
    pub fn spawn_enemy(&mut self, slot: usize) -> Color {
        let jitter = self.settings.enemy_spawn_jitter;
        let offset = self.rng.random_range(-jitter..=jitter)
            + ENEMY_OFFSET_PER_SCORE * self.score as i32;

        let speed = 1 + self.score as i32;
        let vx = if offset % 2 != 0 { -speed } else { speed };

        // Keep the whole box inside the fence on spawn
        let half = self.settings.enemy_half_size;
        let x = (self.settings.screen_width / 2 + offset)
            .min(self.fence.bot_right.x - half)
            .max(self.fence.top_left.x + half);

        let color = tier_color(self.score);
        let params = SpawnParams {
            pos: IVec2::new(x, ENEMY_SPAWN_Y),
            velocity: IVec2::new(vx, speed),
            color,
        };
        let anchor = self.player;
        self.enemies[slot].spawn(&mut self.scene, anchor, params);
        log::info!("Enemy {} spawned at x={} (score {})", slot, x, self.score);
        color
    }

    /// Apply kill rules on current positions, then end-of-game checks
    pub fn evaluate_lifecycle(&mut self, events: &mut Vec<GameEvent>) {
        let bg = self.settings.background;
        let top = self.top_zone;
        let bottom = self.bottom_zone;

        for (slot, bullet) in self.bullets.iter_mut().enumerate() {
            if bullet.is_active()
                && layers_collide(self.scene.layer(bullet.layer), self.scene.layer(top))
            {
                bullet.kill(&mut self.scene, bg);
                events.push(GameEvent::BulletExpired { slot });
            }
        }

        for (slot, enemy) in self.enemies.iter_mut().enumerate() {
            if !enemy.is_active() {
                continue;
            }
            if layers_collide(self.scene.layer(enemy.layer), self.scene.layer(bottom)) {
                enemy.kill(&mut self.scene, bg);
                events.push(GameEvent::EnemyEscaped { slot });
                continue;
            }
            let shot = self.bullets.iter().filter(|b| b.is_active()).any(|b| {
                layers_collide(self.scene.layer(enemy.layer), self.scene.layer(b.layer))
            });
            if shot {
                enemy.kill(&mut self.scene, bg);
                self.score += 1;
                events.push(GameEvent::EnemyDestroyed {
                    slot,
                    score: self.score,
                });
                log::info!("Enemy {} destroyed, score {}", slot, self.score);
            }
        }

        let player = self.player_layer();
        let player_hit = self
            .enemies
            .iter()
            .filter(|e| e.is_active())
            .any(|e| layers_collide(player, self.scene.layer(e.layer)));
        if player_hit {
            events.push(GameEvent::PlayerHit);
            self.end(Outcome::Lost);
            return;
        }

        if self.score >= self.settings.win_score {
            events.push(GameEvent::Victory);
            self.end(Outcome::Won);
        }
    }

    /// Freeze the run on the positions the outcome was decided on: no more
    /// motion, banner from now on
    pub fn end(&mut self, outcome: Outcome) {
        if self.is_ended() {
            return;
        }
        self.phase = GamePhase::Ended(outcome);
        let movers: Vec<_> = self.scene.motion_order.iter().collect();
        for id in movers {
            let mover = self.scene.mover_mut(id);
            mover.velocity = IVec2::ZERO;
            let layer = mover.layer;
            self.scene.layer_mut(layer).pos.hold();
        }
        log::info!("Game over: {:?} with score {}", outcome, self.score);
    }

    /// End-of-game text overlay
    pub fn banner(&self) -> Option<Banner> {
        let text = match self.outcome()? {
            Outcome::Won => "YOU WIN!",
            Outcome::Lost => "YOU LOSE",
        };
        Some(Banner {
            at: IVec2::new(self.settings.screen_width / 2 - BANNER_X_OFFSET, BANNER_Y),
            text,
            fg: Color::RED,
            bg: self.settings.background,
        })
    }
}
