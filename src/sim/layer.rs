//! Layer graph
//!
//! Layers and moving layers live in fixed arenas and are addressed by id.
//! Two ordered id lists sit on top of the arenas:
//! - paint order: front-to-back occlusion order used by the renderer
//! - motion order: the subset of layers advanced by physics and repainted
//!
//! Unlinking a layer never frees it; pooled entities keep their slot for
//! the lifetime of the scene.

use std::sync::Arc;

use glam::IVec2;

use crate::geometry::Region;
use crate::renderer::Color;
use crate::shape::Shape;

/// Index of a layer in the scene arena
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct LayerId(usize);

/// Index of a moving layer in the scene arena
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MoverId(usize);

/// Three-deep position buffer.
///
/// Physics writes `pending`; the renderer promotes it to `current` (and the
/// old `current` to `previous`) once per frame, under the engine lock.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PositionBuffer {
    pub previous: IVec2,
    pub current: IVec2,
    pub pending: IVec2,
}

impl PositionBuffer {
    pub fn at(pos: IVec2) -> Self {
        Self {
            previous: pos,
            current: pos,
            pending: pos,
        }
    }

    /// pending -> current -> previous
    #[inline]
    pub fn commit(&mut self) {
        self.previous = self.current;
        self.current = self.pending;
    }

    /// Discard motion not yet rendered
    pub fn hold(&mut self) {
        self.pending = self.current;
    }

    /// Teleport: both the visible and the next position become `pos`
    pub fn place(&mut self, pos: IVec2) {
        self.current = pos;
        self.pending = pos;
    }
}

/// A positioned, colored shape
#[derive(Debug, Clone)]
pub struct Layer {
    pub shape: Arc<Shape>,
    pub color: Color,
    pub pos: PositionBuffer,
}

impl Layer {
    pub fn new(shape: Arc<Shape>, pos: IVec2, color: Color) -> Self {
        Self {
            shape,
            color,
            pos: PositionBuffer::at(pos),
        }
    }

    /// Bounding box at the visible position
    #[inline]
    pub fn bounds(&self) -> Region {
        self.shape.bounding_region(self.pos.current)
    }
}

/// A layer reference plus the velocity physics applies to it each tick
#[derive(Debug, Clone, Copy)]
pub struct MovingLayer {
    pub layer: LayerId,
    pub velocity: IVec2,
}

/// Ordered list of ids with splice semantics.
///
/// An id appears at most once: inserting an id that is already linked moves
/// it instead of duplicating it, and removing an absent id is a no-op.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DrawList<T> {
    ids: Vec<T>,
}

impl<T> Default for DrawList<T> {
    fn default() -> Self {
        Self { ids: Vec::new() }
    }
}

impl<T: Copy + PartialEq> DrawList<T> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push_back(&mut self, id: T) {
        self.remove(id);
        self.ids.push(id);
    }

    /// Link `id` directly after `anchor`, keeping the rest of the list.
    ///
    /// Returns false (and leaves the list untouched) if `anchor` is not linked.
    pub fn insert_after(&mut self, anchor: T, id: T) -> bool {
        if anchor == id || !self.contains(anchor) {
            return false;
        }
        self.remove(id);
        // anchor is still present: it differs from id
        match self.position(anchor) {
            Some(at) => {
                self.ids.insert(at + 1, id);
                true
            }
            None => false,
        }
    }

    /// Unlink `id`; returns whether it was present
    pub fn remove(&mut self, id: T) -> bool {
        match self.position(id) {
            Some(at) => {
                self.ids.remove(at);
                true
            }
            None => false,
        }
    }

    pub fn contains(&self, id: T) -> bool {
        self.ids.contains(&id)
    }

    pub fn position(&self, id: T) -> Option<usize> {
        self.ids.iter().position(|&x| x == id)
    }

    pub fn iter(&self) -> impl Iterator<Item = T> + '_ {
        self.ids.iter().copied()
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    pub fn count(&self, id: T) -> usize {
        self.ids.iter().filter(|&&x| x == id).count()
    }
}

/// Arena of layers and moving layers plus their two orderings
#[derive(Debug, Clone, Default)]
pub struct Scene {
    layers: Vec<Layer>,
    movers: Vec<MovingLayer>,
    pub paint_order: DrawList<LayerId>,
    pub motion_order: DrawList<MoverId>,
}

impl Scene {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a layer to the arena without linking it anywhere
    pub fn add_layer(&mut self, layer: Layer) -> LayerId {
        self.layers.push(layer);
        LayerId(self.layers.len() - 1)
    }

    /// Add a moving layer for `layer` without linking it
    pub fn add_mover(&mut self, layer: LayerId, velocity: IVec2) -> MoverId {
        self.movers.push(MovingLayer { layer, velocity });
        MoverId(self.movers.len() - 1)
    }

    pub fn layer(&self, id: LayerId) -> &Layer {
        &self.layers[id.0]
    }

    pub fn layer_mut(&mut self, id: LayerId) -> &mut Layer {
        &mut self.layers[id.0]
    }

    pub fn mover(&self, id: MoverId) -> &MovingLayer {
        &self.movers[id.0]
    }

    pub fn mover_mut(&mut self, id: MoverId) -> &mut MovingLayer {
        &mut self.movers[id.0]
    }

    /// Layers in paint order (front first)
    pub fn painted(&self) -> impl Iterator<Item = &Layer> + '_ {
        self.paint_order.iter().map(|id| &self.layers[id.0])
    }

    /// Moving layers in motion order
    pub fn moving(&self) -> impl Iterator<Item = &MovingLayer> + '_ {
        self.motion_order.iter().map(|id| &self.movers[id.0])
    }

    /// Promote pending positions of every linked moving layer
    pub fn commit_positions(&mut self) {
        for id in self.motion_order.iter() {
            let layer = self.movers[id.0].layer;
            self.layers[layer.0].pos.commit();
        }
    }

    /// Linked moving layers whose target is not in the paint order.
    ///
    /// These are advanced by physics but never drawn.
    pub fn orphaned_movers(&self) -> Vec<MoverId> {
        self.motion_order
            .iter()
            .filter(|&id| !self.paint_order.contains(self.movers[id.0].layer))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn square() -> Arc<Shape> {
        Arc::new(Shape::rect(IVec2::splat(2)).unwrap())
    }

    #[test]
    fn test_position_buffer_commit() {
        let mut pos = PositionBuffer::at(IVec2::new(1, 1));
        pos.pending = IVec2::new(4, 1);
        pos.commit();
        assert_eq!(pos.previous, IVec2::new(1, 1));
        assert_eq!(pos.current, IVec2::new(4, 1));
        pos.commit();
        assert_eq!(pos.previous, IVec2::new(4, 1));
        assert_eq!(pos.current, IVec2::new(4, 1));
    }

    #[test]
    fn test_insert_after_splices() {
        let mut list = DrawList::new();
        list.push_back(1);
        list.push_back(9);
        assert!(list.insert_after(1, 5));
        assert!(list.insert_after(1, 6));
        assert_eq!(list.iter().collect::<Vec<_>>(), vec![1, 6, 5, 9]);
    }

    #[test]
    fn test_insert_never_duplicates() {
        let mut list = DrawList::new();
        list.push_back(1);
        list.push_back(2);
        list.push_back(3);
        assert!(list.insert_after(1, 3));
        assert!(list.insert_after(1, 3));
        assert_eq!(list.iter().collect::<Vec<_>>(), vec![1, 3, 2]);
        assert_eq!(list.count(3), 1);

        list.push_back(1);
        assert_eq!(list.iter().collect::<Vec<_>>(), vec![3, 2, 1]);
    }

    #[test]
    fn test_insert_after_missing_anchor() {
        let mut list = DrawList::new();
        list.push_back(1);
        assert!(!list.insert_after(7, 2));
        assert!(!list.insert_after(1, 1));
        assert_eq!(list.iter().collect::<Vec<_>>(), vec![1]);
    }

    #[test]
    fn test_remove_absent_is_noop() {
        let mut list = DrawList::new();
        list.push_back(1);
        list.push_back(2);
        assert!(!list.remove(42));
        assert_eq!(list.len(), 2);
        assert!(list.remove(1));
        assert!(!list.remove(1));
        assert_eq!(list.iter().collect::<Vec<_>>(), vec![2]);
    }

    #[test]
    fn test_commit_only_touches_linked_movers() {
        let mut scene = Scene::new();
        let a = scene.add_layer(Layer::new(square(), IVec2::ZERO, Color::BLACK));
        let b = scene.add_layer(Layer::new(square(), IVec2::ZERO, Color::BLACK));
        let ma = scene.add_mover(a, IVec2::ZERO);
        let _mb = scene.add_mover(b, IVec2::ZERO);
        scene.motion_order.push_back(ma);

        scene.layer_mut(a).pos.pending = IVec2::new(3, 3);
        scene.layer_mut(b).pos.pending = IVec2::new(3, 3);
        scene.commit_positions();

        assert_eq!(scene.layer(a).pos.current, IVec2::new(3, 3));
        assert_eq!(scene.layer(b).pos.current, IVec2::ZERO);
    }

    #[test]
    fn test_orphaned_movers() {
        let mut scene = Scene::new();
        let a = scene.add_layer(Layer::new(square(), IVec2::ZERO, Color::BLACK));
        let b = scene.add_layer(Layer::new(square(), IVec2::ZERO, Color::BLACK));
        let ma = scene.add_mover(a, IVec2::ZERO);
        let mb = scene.add_mover(b, IVec2::ZERO);
        scene.paint_order.push_back(a);
        scene.motion_order.push_back(ma);
        scene.motion_order.push_back(mb);

        assert_eq!(scene.orphaned_movers(), vec![mb]);
        scene.paint_order.push_back(b);
        assert!(scene.orphaned_movers().is_empty());
    }
}
