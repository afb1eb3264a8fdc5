//! Bounding-box collision detection
//!
//! Only the axis-aligned boxes at the visible (`current`) positions are
//! compared. Shape membership is never consulted, so a circle near the
//! corner of a rectangle can collide without any pixel touching.

use super::layer::Layer;
use crate::geometry::Region;

/// Boxes collide when their overlap has strictly positive extent on both
/// axes. Touching edges do not count.
#[inline]
pub fn regions_collide(a: &Region, b: &Region) -> bool {
    let overlap = a.intersect(b);
    overlap.is_well_formed() && overlap.has_interior()
}

/// Collision between two layers at their current positions
pub fn layers_collide(a: &Layer, b: &Layer) -> bool {
    regions_collide(&a.bounds(), &b.bounds())
}
