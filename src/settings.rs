//! Game settings
//!
//! Every tunable of the scene and the tick handler. Loaded from JSON; any
//! field left out takes its default.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::audio::EndToneRule;
use crate::consts::*;
use crate::error::{Error, Result};
use crate::renderer::Color;

/// Game settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    // === Display ===
    pub screen_width: i32,
    pub screen_height: i32,
    pub background: Color,

    // === Timing ===
    /// Tick handler frequency (Hz)
    pub tick_hz: u32,
    /// Ticks between mouth phase changes
    pub mouth_cycle_ticks: u32,
    /// Seed for enemy spawn jitter
    pub seed: u64,

    // === Rules ===
    pub win_score: u32,
    /// While the score equals this, the enemy zig-zags horizontally
    pub zigzag_score: Option<u32>,

    // === Player ===
    pub player_radius: u32,
    pub player_speed: i32,

    // === Bullets ===
    pub bullet_half_size: i32,
    pub bullet_speed: i32,
    /// Bullets spawn this far above the player's center
    pub bullet_muzzle_offset: i32,

    // === Enemy ===
    pub enemy_half_size: i32,
    /// Ticks between spawn attempts
    pub enemy_spawn_interval: u32,
    /// Random horizontal offset range (+/-) at spawn
    pub enemy_spawn_jitter: i32,

    // === Audio ===
    pub end_tone_rule: EndToneRule,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            screen_width: SCREEN_WIDTH,
            screen_height: SCREEN_HEIGHT,
            background: Color::BEIGE,

            tick_hz: TICK_HZ,
            mouth_cycle_ticks: 1,
            seed: 0x5eed,

            win_score: WIN_SCORE,
            zigzag_score: Some(5),

            player_radius: 10,
            player_speed: 4,

            bullet_half_size: 3,
            bullet_speed: 8,
            bullet_muzzle_offset: 13,

            enemy_half_size: 9,
            enemy_spawn_interval: 25,
            enemy_spawn_jitter: 10,

            end_tone_rule: EndToneRule::default(),
        }
    }
}

impl Settings {
    pub fn from_json(json: &str) -> Result<Self> {
        let settings: Settings = serde_json::from_str(json)?;
        settings.validate()?;
        Ok(settings)
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Load and validate a JSON settings file
    pub fn load(path: &Path) -> Result<Self> {
        let json = std::fs::read_to_string(path)?;
        let settings = Self::from_json(&json)?;
        log::info!("Loaded settings from {}", path.display());
        Ok(settings)
    }

    /// Load from `path` if given, falling back to defaults on any error
    pub fn load_or_default(path: Option<&Path>) -> Self {
        let Some(path) = path else {
            log::info!("Using default settings");
            return Self::default();
        };
        match Self::load(path) {
            Ok(settings) => settings,
            Err(e) => {
                log::warn!("Ignoring settings file {}: {}", path.display(), e);
                Self::default()
            }
        }
    }

    /// Reject settings the scene cannot be built from
    pub fn validate(&self) -> Result<()> {
        if self.screen_width <= 0 || self.screen_height <= 0 {
            return Err(Error::settings(format!(
                "screen must be positive, got {}x{}",
                self.screen_width, self.screen_height
            )));
        }
        if self.tick_hz == 0 {
            return Err(Error::settings("tick_hz must be non-zero"));
        }
        if self.mouth_cycle_ticks == 0 {
            return Err(Error::settings("mouth_cycle_ticks must be non-zero"));
        }
        if self.win_score == 0 {
            return Err(Error::settings("win_score must be non-zero"));
        }
        if self.enemy_spawn_interval == 0 {
            return Err(Error::settings("enemy_spawn_interval must be non-zero"));
        }
        if self.enemy_spawn_jitter < 0 {
            return Err(Error::settings("enemy_spawn_jitter must not be negative"));
        }
        Ok(())
    }

    /// Largest addressable pixel
    pub fn screen_max(&self) -> glam::IVec2 {
        glam::IVec2::new(self.screen_width - 1, self.screen_height - 1)
    }

    /// Tick period
    pub fn tick_interval(&self) -> std::time::Duration {
        std::time::Duration::from_secs(1) / self.tick_hz.max(1)
    }
}
