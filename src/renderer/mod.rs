//! Software compositor
//!
//! A [`Frame`] is a snapshot of everything the per-pixel scan needs: shapes,
//! colors and current positions in paint order, plus the repaint windows of
//! the moving layers. It is captured under the engine lock and painted
//! after the lock is released, so the tick handler can keep mutating (and
//! splicing) the live scene while a long repaint is in flight.

pub mod framebuffer;

use std::sync::Arc;

use glam::IVec2;
use serde::{Deserialize, Serialize};

use crate::geometry::Region;
use crate::shape::{MouthPhase, Shape};
use crate::sim::layer::Scene;

pub use framebuffer::FrameBuffer;

/// RGB565 pixel color
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Color(pub u16);

impl Color {
    pub const BLACK: Color = Color(0x0000);
    pub const WHITE: Color = Color(0xffff);
    pub const RED: Color = Color(0xf800);
    pub const ORANGE_RED: Color = Color(0xfa20);
    pub const DARK_ORANGE: Color = Color(0xfc60);
    pub const ORANGE: Color = Color(0xfd20);
    pub const YELLOW: Color = Color(0xffe0);
    pub const GREEN_YELLOW: Color = Color(0xafe5);
    pub const GREEN: Color = Color(0x07e0);
    pub const FOREST_GREEN: Color = Color(0x2444);
    pub const BLUE: Color = Color(0x001f);
    pub const BEIGE: Color = Color(0xf7bb);

    /// Expand to 8-bit channels
    pub fn to_rgb888(self) -> [u8; 3] {
        let r = (self.0 >> 11) & 0x1f;
        let g = (self.0 >> 5) & 0x3f;
        let b = self.0 & 0x1f;
        [
            ((r << 3) | (r >> 2)) as u8,
            ((g << 2) | (g >> 4)) as u8,
            ((b << 3) | (b >> 2)) as u8,
        ]
    }
}

/// Pixel consumer (an LCD controller, a framebuffer, ...).
///
/// Pixels arrive in row-major order over the last window set. Windows
/// handed to the sink are already clipped to the display.
pub trait DisplaySink {
    fn set_draw_window(&mut self, window: Region);

    fn write_pixel(&mut self, color: Color);

    /// Text overlay (end-of-game banner). Sinks without a font ignore it.
    fn draw_text(&mut self, _at: IVec2, _text: &str, _fg: Color, _bg: Color) {}
}

/// Text drawn over a frame
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Banner {
    pub at: IVec2,
    pub text: &'static str,
    pub fg: Color,
    pub bg: Color,
}

/// One layer as seen by the painter
#[derive(Debug, Clone)]
pub struct FrameLayer {
    pub shape: Arc<Shape>,
    pub color: Color,
    pub pos: IVec2,
}

/// Everything needed to paint one frame, detached from the live scene
#[derive(Debug, Clone)]
pub struct Frame {
    pub layers: Vec<FrameLayer>,
    /// Clipped, well-formed repaint windows in motion order
    pub windows: Vec<Region>,
    pub background: Color,
    pub phase: MouthPhase,
    pub banner: Option<Banner>,
}

impl Frame {
    /// Snapshot `scene` after its positions were committed.
    ///
    /// Each moving layer contributes its bounding box at the new current
    /// position, clipped to `[0,0]..=max`. Boxes that fall wholly off-screen
    /// are dropped.
    pub fn capture(scene: &Scene, background: Color, phase: MouthPhase, max: IVec2) -> Self {
        let layers = scene
            .painted()
            .map(|l| FrameLayer {
                shape: Arc::clone(&l.shape),
                color: l.color,
                pos: l.pos.current,
            })
            .collect();

        let windows = scene
            .moving()
            .map(|m| scene.layer(m.layer).bounds().clip_screen(max))
            .filter(Region::is_well_formed)
            .collect();

        Self {
            layers,
            windows,
            background,
            phase,
            banner: None,
        }
    }

    /// Snapshot whose single window is the whole display
    pub fn full_screen(scene: &Scene, background: Color, phase: MouthPhase, max: IVec2) -> Self {
        let mut frame = Self::capture(scene, background, phase, max);
        frame.windows = vec![Region::new(IVec2::ZERO, max)];
        frame
    }

    pub fn with_banner(mut self, banner: Option<Banner>) -> Self {
        self.banner = banner;
        self
    }

    /// First layer in paint order whose shape covers `pixel`
    pub fn color_at(&self, pixel: IVec2) -> Color {
        self.layers
            .iter()
            .find(|l| l.shape.contains(l.pos, pixel, self.phase))
            .map_or(self.background, |l| l.color)
    }

    /// Repaint every window, then the banner. Returns pixels written.
    pub fn paint<S: DisplaySink + ?Sized>(&self, sink: &mut S) -> u64 {
        let mut written = 0;
        for window in &self.windows {
            sink.set_draw_window(*window);
            for pixel in window.pixels() {
                sink.write_pixel(self.color_at(pixel));
            }
            written += window.area();
        }
        if let Some(banner) = &self.banner {
            sink.draw_text(banner.at, banner.text, banner.fg, banner.bg);
        }
        written
    }
}
