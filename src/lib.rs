//! Shape Motion - a layered raster compositor for a small display
//!
//! Core modules:
//! - `geometry`: Axis-aligned regions over integer vectors
//! - `shape`: Closed set of shapes (bounding box + pixel membership)
//! - `sim`: Layer graph, physics, collisions and the entity pool
//! - `renderer`: Frame snapshots painted into a display sink
//! - `engine`: Host-facing tick/render entry points
//! - `platform`: Tick thread, frame wakeups and input sources
//! - `audio`: Tone feedback derived from game events

pub mod audio;
pub mod engine;
pub mod error;
pub mod geometry;
pub mod platform;
pub mod renderer;
pub mod settings;
pub mod shape;
pub mod sim;

pub use engine::Engine;
pub use error::{Error, Result};
pub use geometry::Region;
pub use renderer::{Color, DisplaySink, FrameBuffer};
pub use settings::Settings;
pub use shape::{MouthPhase, Shape};

/// Game configuration constants
pub mod consts {
    /// Physical display size (pixels)
    pub const SCREEN_WIDTH: i32 = 128;
    pub const SCREEN_HEIGHT: i32 = 160;

    /// Tick handler frequency (Hz)
    pub const TICK_HZ: u32 = 15;

    /// Largest circle radius the chord table can hold
    pub const MAX_CHORD_RADIUS: u32 = 64;

    /// Score that ends the run as a win
    pub const WIN_SCORE: u32 = 8;

    /// Number of pooled bullet slots
    pub const BULLET_SLOTS: usize = 2;

    /// Number of pooled enemy slots
    pub const ENEMY_SLOTS: usize = 1;

    /// End-of-game tone counter wraps here
    pub const END_COUNTER_WRAP: u32 = 1000;

    /// Banner offset from the horizontal center, and its row
    pub const BANNER_X_OFFSET: i32 = 20;
    pub const BANNER_Y: i32 = 30;
}
