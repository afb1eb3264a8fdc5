//! Axis-aligned regions over integer screen coordinates
//!
//! Corners are inclusive: a region covers every pixel with
//! `top_left <= p <= bot_right` on both axes.

use glam::IVec2;
use serde::{Deserialize, Serialize};

/// An axis-aligned box given by its two inclusive corners.
///
/// Intersecting disjoint regions yields an ill-formed region
/// (`top_left > bot_right` on some axis). Check [`Region::is_well_formed`]
/// before treating a computed region as an area.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Region {
    pub top_left: IVec2,
    pub bot_right: IVec2,
}

impl Region {
    pub const fn new(top_left: IVec2, bot_right: IVec2) -> Self {
        Self {
            top_left,
            bot_right,
        }
    }

    /// Box of `half_size` around `center` (inclusive on both sides)
    #[inline]
    pub fn around(center: IVec2, half_size: IVec2) -> Self {
        Self::new(center - half_size, center + half_size)
    }

    /// Smallest region covering both
    #[inline]
    pub fn union(&self, other: &Region) -> Region {
        Region::new(
            self.top_left.min(other.top_left),
            self.bot_right.max(other.bot_right),
        )
    }

    /// Overlap of both regions; ill-formed when they are disjoint
    #[inline]
    pub fn intersect(&self, other: &Region) -> Region {
        Region::new(
            self.top_left.max(other.top_left),
            self.bot_right.min(other.bot_right),
        )
    }

    /// Trim to `[0,0]..=max`.
    ///
    /// The top-left corner never goes below zero and the bottom-right never
    /// past `max`. A region lying wholly off-screen comes back ill-formed.
    #[inline]
    pub fn clip_screen(&self, max: IVec2) -> Region {
        Region::new(self.top_left.max(IVec2::ZERO), self.bot_right.min(max))
    }

    /// `top_left <= bot_right` on both axes
    #[inline]
    pub fn is_well_formed(&self) -> bool {
        self.top_left.cmple(self.bot_right).all()
    }

    /// Strictly positive extent on both axes (touching edges do not count)
    #[inline]
    pub fn has_interior(&self) -> bool {
        self.top_left.cmplt(self.bot_right).all()
    }

    /// Whether `point` lies inside (inclusive)
    #[inline]
    pub fn contains(&self, point: IVec2) -> bool {
        point.cmpge(self.top_left).all() && point.cmple(self.bot_right).all()
    }

    /// Number of pixels covered, zero when ill-formed
    pub fn area(&self) -> u64 {
        if !self.is_well_formed() {
            return 0;
        }
        let extent = self.bot_right - self.top_left + IVec2::ONE;
        extent.x as u64 * extent.y as u64
    }

    /// Pixels in row-major order
    pub fn pixels(&self) -> impl Iterator<Item = IVec2> + '_ {
        let (tl, br) = (self.top_left, self.bot_right);
        (tl.y..=br.y).flat_map(move |y| (tl.x..=br.x).map(move |x| IVec2::new(x, y)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn region(x0: i32, y0: i32, x1: i32, y1: i32) -> Region {
        Region::new(IVec2::new(x0, y0), IVec2::new(x1, y1))
    }

    #[test]
    fn test_union_covers_both() {
        let u = region(0, 5, 10, 10).union(&region(-3, 8, 4, 20));
        assert_eq!(u, region(-3, 5, 10, 20));
    }

    #[test]
    fn test_intersect_overlap() {
        let i = region(0, 0, 10, 10).intersect(&region(5, 5, 15, 15));
        assert_eq!(i, region(5, 5, 10, 10));
        assert!(i.is_well_formed());
        assert!(i.has_interior());
    }

    #[test]
    fn test_intersect_disjoint_is_ill_formed() {
        let i = region(0, 0, 10, 10).intersect(&region(20, 0, 30, 10));
        assert!(!i.is_well_formed());
        assert_eq!(i.area(), 0);
    }

    #[test]
    fn test_touching_edge_has_no_interior() {
        let i = region(0, 0, 10, 10).intersect(&region(10, 0, 20, 10));
        assert!(i.is_well_formed());
        assert!(!i.has_interior());
    }

    #[test]
    fn test_clip_screen() {
        let max = IVec2::new(127, 159);
        assert_eq!(region(-5, -5, 200, 100).clip_screen(max), region(0, 0, 127, 100));

        // Fully off the right edge
        let off = region(130, 10, 140, 20).clip_screen(max);
        assert!(!off.is_well_formed());
    }

    #[test]
    fn test_pixels_row_major() {
        let px: Vec<_> = region(1, 1, 2, 2).pixels().collect();
        assert_eq!(
            px,
            vec![
                IVec2::new(1, 1),
                IVec2::new(2, 1),
                IVec2::new(1, 2),
                IVec2::new(2, 2)
            ]
        );
        assert_eq!(region(1, 1, 2, 2).area(), 4);
    }
}
