//! Deterministic simulation module
//!
//! All gameplay logic lives here:
//! - Layer graph (arena + paint/motion orderings)
//! - Motion integration and fence bounces
//! - Bounding-box collisions
//! - Pooled entity lifecycle and end-of-game rules
//!
//! Nothing here touches the display; the renderer reads committed positions
//! through a frame snapshot.

pub mod collision;
pub mod layer;
pub mod lifecycle;
pub mod physics;
pub mod state;
pub mod tick;

pub use collision::{layers_collide, regions_collide};
pub use layer::{DrawList, Layer, LayerId, MoverId, MovingLayer, PositionBuffer, Scene};
pub use lifecycle::{Anchor, Entity, EntityKind, SpawnParams, tier_color};
pub use state::{GameEvent, GamePhase, GameState, Outcome};
pub use tick::{TickInput, tick};
