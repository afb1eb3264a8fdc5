//! Shapes: a bounding box plus a per-pixel membership test
//!
//! The set is closed ({Rect, RectOutline, Circle, PacCircle}), so shapes are
//! an enum rather than trait objects. Shapes are immutable once built and are
//! shared between layers behind an `Arc`.

use glam::IVec2;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::consts::MAX_CHORD_RADIUS;
use crate::geometry::Region;

/// Construction-time precondition violations
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ShapeError {
    #[error("radius {radius} exceeds chord table capacity {max}")]
    RadiusTooLarge { radius: u32, max: u32 },
    #[error("half size {x}x{y} has a negative axis")]
    NegativeExtent { x: i32, y: i32 },
    #[error("border width {border} does not fit half size {x}x{y}")]
    BorderTooWide { border: i32, x: i32, y: i32 },
}

/// Mouth opening of a pac-circle.
///
/// The carved wedge on the +x side covers `|dy| < dx / divisor`, so its
/// half-angle is `atan(1 / divisor)`. `Closed` (250) leaves the wedge empty
/// for any radius the chord table allows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum MouthPhase {
    #[default]
    Wide,
    Open,
    Narrow,
    Closed,
}

impl MouthPhase {
    pub const ALL: [MouthPhase; 4] = [
        MouthPhase::Wide,
        MouthPhase::Open,
        MouthPhase::Narrow,
        MouthPhase::Closed,
    ];

    pub fn divisor(self) -> i32 {
        match self {
            MouthPhase::Wide => 1,
            MouthPhase::Open => 2,
            MouthPhase::Narrow => 4,
            MouthPhase::Closed => 250,
        }
    }

    /// Next phase in the chomp cycle
    pub fn next(self) -> Self {
        match self {
            MouthPhase::Wide => MouthPhase::Open,
            MouthPhase::Open => MouthPhase::Narrow,
            MouthPhase::Narrow => MouthPhase::Closed,
            MouthPhase::Closed => MouthPhase::Wide,
        }
    }
}

/// Solid axis-aligned rectangle
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rect {
    pub half_size: IVec2,
}

/// One-color frame: inside the outer rectangle, outside the inner one
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RectOutline {
    pub half_size: IVec2,
    pub border: i32,
}

/// Filled circle driven by a precomputed chord table.
///
/// `chords[x]` is the largest `|y|` inside the circle at horizontal
/// offset `|x|`, for `x` in `0..=radius`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Circle {
    radius: i32,
    chords: Box<[u8]>,
}

impl Circle {
    pub fn new(radius: u32) -> Result<Self, ShapeError> {
        if radius > MAX_CHORD_RADIUS {
            return Err(ShapeError::RadiusTooLarge {
                radius,
                max: MAX_CHORD_RADIUS,
            });
        }
        let r2 = radius * radius;
        let chords = (0..=radius)
            .map(|x| (r2 - x * x).isqrt() as u8)
            .collect::<Vec<_>>()
            .into_boxed_slice();
        Ok(Self {
            radius: radius as i32,
            chords,
        })
    }

    pub fn radius(&self) -> i32 {
        self.radius
    }

    pub fn chords(&self) -> &[u8] {
        &self.chords
    }

    /// Membership after reflecting `offset` into the first quadrant
    #[inline]
    pub fn contains_offset(&self, offset: IVec2) -> bool {
        let rel = offset.abs();
        rel.x <= self.radius && i32::from(self.chords[rel.x as usize]) >= rel.y
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Shape {
    Rect(Rect),
    RectOutline(RectOutline),
    Circle(Circle),
    /// A circle with a wedge carved on its +x side
    PacCircle(Circle),
}

impl Shape {
    pub fn rect(half_size: IVec2) -> Result<Self, ShapeError> {
        check_extent(half_size)?;
        Ok(Shape::Rect(Rect { half_size }))
    }

    pub fn rect_outline(half_size: IVec2, border: i32) -> Result<Self, ShapeError> {
        check_extent(half_size)?;
        if border < 1 || border > half_size.min_element() {
            return Err(ShapeError::BorderTooWide {
                border,
                x: half_size.x,
                y: half_size.y,
            });
        }
        Ok(Shape::RectOutline(RectOutline { half_size, border }))
    }

    pub fn circle(radius: u32) -> Result<Self, ShapeError> {
        Circle::new(radius).map(Shape::Circle)
    }

    pub fn pac_circle(radius: u32) -> Result<Self, ShapeError> {
        Circle::new(radius).map(Shape::PacCircle)
    }

    /// Box covering every pixel `contains` can accept at `origin`
    pub fn bounding_region(&self, origin: IVec2) -> Region {
        match self {
            Shape::Rect(r) => Region::around(origin, r.half_size),
            Shape::RectOutline(r) => Region::around(origin, r.half_size),
            Shape::Circle(c) | Shape::PacCircle(c) => {
                Region::around(origin, IVec2::splat(c.radius))
            }
        }
    }

    /// Whether `pixel` belongs to this shape placed at `origin`.
    ///
    /// `phase` only affects `PacCircle`; the other variants ignore it.
    pub fn contains(&self, origin: IVec2, pixel: IVec2, phase: MouthPhase) -> bool {
        let d = pixel - origin;
        match self {
            Shape::Rect(r) => d.abs().cmple(r.half_size).all(),
            Shape::RectOutline(r) => {
                let d = d.abs();
                let inner = r.half_size - IVec2::splat(r.border);
                d.cmple(r.half_size).all() && !d.cmple(inner).all()
            }
            Shape::Circle(c) => c.contains_offset(d),
            Shape::PacCircle(c) => c.contains_offset(d) && !in_mouth(d, phase),
        }
    }
}

/// Wedge opening toward +x. Screen y grows downward, but the wedge is
/// symmetric about the x axis so only `|dy|` matters.
#[inline]
fn in_mouth(d: IVec2, phase: MouthPhase) -> bool {
    d.x > 0 && d.y.abs() < d.x / phase.divisor()
}

fn check_extent(half_size: IVec2) -> Result<(), ShapeError> {
    if half_size.min_element() < 0 {
        return Err(ShapeError::NegativeExtent {
            x: half_size.x,
            y: half_size.y,
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    const O: IVec2 = IVec2::new(50, 50);

    #[test]
    fn test_rect_membership_and_bounds() {
        let s = Shape::rect(IVec2::new(3, 2)).unwrap();
        assert!(s.contains(O, O + IVec2::new(3, 2), MouthPhase::Wide));
        assert!(s.contains(O, O - IVec2::new(3, 2), MouthPhase::Wide));
        assert!(!s.contains(O, O + IVec2::new(4, 0), MouthPhase::Wide));
        assert!(!s.contains(O, O + IVec2::new(0, 3), MouthPhase::Wide));
        assert_eq!(
            s.bounding_region(O),
            Region::new(IVec2::new(47, 48), IVec2::new(53, 52))
        );
    }

    #[test]
    fn test_rect_outline_is_hollow() {
        let s = Shape::rect_outline(IVec2::new(5, 5), 1).unwrap();
        assert!(s.contains(O, O + IVec2::new(5, 0), MouthPhase::Wide));
        assert!(s.contains(O, O + IVec2::new(-2, -5), MouthPhase::Wide));
        assert!(!s.contains(O, O, MouthPhase::Wide));
        assert!(!s.contains(O, O + IVec2::new(4, 4), MouthPhase::Wide));
        assert!(!s.contains(O, O + IVec2::new(6, 0), MouthPhase::Wide));

        let thick = Shape::rect_outline(IVec2::new(5, 5), 2).unwrap();
        assert!(thick.contains(O, O + IVec2::new(4, 0), MouthPhase::Wide));
        assert!(!thick.contains(O, O + IVec2::new(3, 3), MouthPhase::Wide));
    }

    #[test]
    fn test_outline_border_validation() {
        assert!(matches!(
            Shape::rect_outline(IVec2::new(5, 3), 4),
            Err(ShapeError::BorderTooWide { .. })
        ));
        assert!(Shape::rect_outline(IVec2::new(5, 3), 0).is_err());
        assert!(matches!(
            Shape::rect(IVec2::new(-1, 3)),
            Err(ShapeError::NegativeExtent { .. })
        ));
    }

    #[test]
    fn test_chord_table() {
        let c = Circle::new(5).unwrap();
        assert_eq!(c.chords(), &[5, 4, 4, 4, 3, 0]);
    }

    #[test]
    fn test_radius_too_large_fails_at_construction() {
        assert_eq!(
            Circle::new(MAX_CHORD_RADIUS + 1),
            Err(ShapeError::RadiusTooLarge {
                radius: MAX_CHORD_RADIUS + 1,
                max: MAX_CHORD_RADIUS
            })
        );
        assert!(Shape::circle(MAX_CHORD_RADIUS).is_ok());
    }

    #[test]
    fn test_circle_membership() {
        let s = Shape::circle(10).unwrap();
        assert!(s.contains(O, O, MouthPhase::Wide));
        assert!(s.contains(O, O + IVec2::new(10, 0), MouthPhase::Wide));
        assert!(s.contains(O, O + IVec2::new(0, -10), MouthPhase::Wide));
        assert!(!s.contains(O, O + IVec2::new(8, 8), MouthPhase::Wide));
        assert!(s.contains(O, O + IVec2::new(-7, 7), MouthPhase::Wide));
        assert!(!s.contains(O, O + IVec2::new(11, 0), MouthPhase::Wide));
    }

    #[test]
    fn test_pac_circle_mouth_follows_phase() {
        let s = Shape::pac_circle(10).unwrap();
        let p = O + IVec2::new(8, 2);

        // 45 degree half-angle swallows (8, 2)
        assert!(!s.contains(O, p, MouthPhase::Wide));
        // atan(1/2): 2 < 8/2 still carved
        assert!(!s.contains(O, p, MouthPhase::Open));
        // atan(1/4): 2 < 8/4 is false
        assert!(s.contains(O, p, MouthPhase::Narrow));
        assert!(s.contains(O, p, MouthPhase::Closed));

        // The back of the circle is never carved
        assert!(s.contains(O, O - IVec2::new(8, 2), MouthPhase::Wide));
        // Center stays filled
        assert!(s.contains(O, O, MouthPhase::Wide));
    }

    #[test]
    fn test_mouth_phase_cycle() {
        let mut phase = MouthPhase::Wide;
        let divisors: Vec<_> = (0..5)
            .map(|_| {
                let d = phase.divisor();
                phase = phase.next();
                d
            })
            .collect();
        assert_eq!(divisors, vec![1, 2, 4, 250, 1]);
    }
}
