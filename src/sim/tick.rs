//! Fixed-rate tick handler
//!
//! One call per hardware tick: steer the player, fire, integrate motion,
//! run the spawn timer, then apply kill and end-of-game rules. Once the run
//! has ended only the mouth animation and the end counter advance.

use super::physics;
use super::state::{GameEvent, GamePhase, GameState};
use crate::consts::END_COUNTER_WRAP;

/// Button state sampled once per tick
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TickInput {
    pub left: bool,
    pub right: bool,
    /// Fire bullet slot 0
    pub fire_a: bool,
    /// Fire bullet slot 1
    pub fire_b: bool,
}

impl TickInput {
    pub fn fire(&self, slot: usize) -> bool {
        match slot {
            0 => self.fire_a,
            1 => self.fire_b,
            _ => false,
        }
    }
}

/// Advance the game by one tick
pub fn tick(state: &mut GameState, input: &TickInput) -> Vec<GameEvent> {
    let mut events = Vec::new();

    state.time_ticks += 1;
    if state.time_ticks % u64::from(state.settings.mouth_cycle_ticks) == 0 {
        state.mouth = state.mouth.next();
    }

    if let GamePhase::Ended(outcome) = state.phase {
        state.end_counter = (state.end_counter + 1) % END_COUNTER_WRAP;
        events.push(GameEvent::EndingPulse {
            counter: state.end_counter,
            outcome,
        });
        return events;
    }

    events.push(GameEvent::Silence);

    // Right wins when both directions are held
    let speed = state.settings.player_speed;
    let mut vx = 0;
    if input.left {
        vx = -speed;
    }
    if input.right {
        vx = speed;
    }
    state.steer(vx);

    for slot in 0..state.bullets.len() {
        if input.fire(slot) && !state.bullets[slot].is_active() {
            state.fire(slot);
            events.push(GameEvent::BulletFired { slot });
        }
    }

    physics::advance(&mut state.scene, &state.fence);

    if state.settings.zigzag_score == Some(state.score) {
        for enemy in &state.enemies {
            let mover = state.scene.mover_mut(enemy.mover);
            mover.velocity.x = -mover.velocity.x;
        }
    }

    state.spawn_timer += 1;
    if state.spawn_timer >= state.settings.enemy_spawn_interval {
        state.spawn_timer = 0;
        if let Some(slot) = state.enemies.iter().position(|e| !e.is_active()) {
            let color = state.spawn_enemy(slot);
            events.push(GameEvent::EnemySpawned { slot, color });
        }
    }

    state.evaluate_lifecycle(&mut events);
    events
}
