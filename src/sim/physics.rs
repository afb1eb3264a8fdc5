//! Motion integration with elastic fence reflection
//!
//! Each axis is handled on its own: a bound crossing the fence on that axis
//! negates the velocity component and folds the overshoot back by twice the
//! new velocity. Corner hits flip both axes in the same pass.

use glam::IVec2;

use super::layer::Scene;
use crate::geometry::Region;
use crate::shape::Shape;

/// Result of advancing one shape
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Step {
    pub pos: IVec2,
    pub velocity: IVec2,
}

/// Advance a shape from `pending` by `velocity`, bouncing off `fence`
pub fn step(shape: &Shape, pending: IVec2, velocity: IVec2, fence: &Region) -> Step {
    let mut pos = pending + velocity;
    let mut velocity = velocity;
    let bounds = shape.bounding_region(pos);

    for axis in 0..2 {
        if bounds.top_left[axis] < fence.top_left[axis]
            || bounds.bot_right[axis] > fence.bot_right[axis]
        {
            velocity[axis] = -velocity[axis];
            pos[axis] += 2 * velocity[axis];
        }
    }

    Step { pos, velocity }
}

/// Advance every linked moving layer; results land in `pending`
pub fn advance(scene: &mut Scene, fence: &Region) {
    let ids: Vec<_> = scene.motion_order.iter().collect();
    for id in ids {
        let mover = *scene.mover(id);
        let layer = scene.layer(mover.layer);
        let next = step(&layer.shape, layer.pos.pending, mover.velocity, fence);

        scene.mover_mut(id).velocity = next.velocity;
        scene.layer_mut(mover.layer).pos.pending = next.pos;
    }
}
