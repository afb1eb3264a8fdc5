//! In-memory display sink
//!
//! Mimics an LCD controller: a draw window is opened, then pixels are
//! streamed row-major into it. Pixels that land outside the physical
//! display are dropped.

use glam::IVec2;

use super::{Color, DisplaySink};
use crate::geometry::Region;

/// Text the sink was asked to overlay
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextRun {
    pub at: IVec2,
    pub text: String,
    pub fg: Color,
    pub bg: Color,
}

#[derive(Debug, Clone)]
pub struct FrameBuffer {
    width: i32,
    height: i32,
    pixels: Vec<Color>,
    window: Region,
    cursor: IVec2,
    /// Total pixels streamed in (including dropped ones)
    pub written: u64,
    pub text: Vec<TextRun>,
}

impl FrameBuffer {
    pub fn new(width: i32, height: i32, fill: Color) -> Self {
        let width = width.max(0);
        let height = height.max(0);
        let window = Region::new(IVec2::ZERO, IVec2::new(width - 1, height - 1));
        Self {
            width,
            height,
            pixels: vec![fill; (width * height) as usize],
            window,
            cursor: IVec2::ZERO,
            written: 0,
            text: Vec::new(),
        }
    }

    pub fn size(&self) -> IVec2 {
        IVec2::new(self.width, self.height)
    }

    /// Largest addressable coordinate
    pub fn max(&self) -> IVec2 {
        self.size() - IVec2::ONE
    }

    pub fn clear(&mut self, color: Color) {
        self.pixels.fill(color);
        self.text.clear();
    }

    pub fn pixel(&self, at: IVec2) -> Option<Color> {
        self.index(at).map(|i| self.pixels[i])
    }

    pub fn pixels(&self) -> &[Color] {
        &self.pixels
    }

    /// Count of pixels with the given color
    pub fn count(&self, color: Color) -> usize {
        self.pixels.iter().filter(|&&c| c == color).count()
    }

    /// Binary PPM (P6) dump
    pub fn to_ppm(&self) -> Vec<u8> {
        let mut out = format!("P6\n{} {}\n255\n", self.width, self.height).into_bytes();
        out.reserve(self.pixels.len() * 3);
        for c in &self.pixels {
            out.extend_from_slice(&c.to_rgb888());
        }
        out
    }

    fn index(&self, at: IVec2) -> Option<usize> {
        if at.x < 0 || at.y < 0 || at.x >= self.width || at.y >= self.height {
            return None;
        }
        Some((at.y * self.width + at.x) as usize)
    }
}

impl DisplaySink for FrameBuffer {
    fn set_draw_window(&mut self, window: Region) {
        self.window = window;
        self.cursor = window.top_left;
    }

    fn write_pixel(&mut self, color: Color) {
        self.written += 1;
        if let Some(i) = self.index(self.cursor) {
            self.pixels[i] = color;
        }
        self.cursor.x += 1;
        if self.cursor.x > self.window.bot_right.x {
            self.cursor.x = self.window.top_left.x;
            self.cursor.y += 1;
        }
    }

    fn draw_text(&mut self, at: IVec2, text: &str, fg: Color, bg: Color) {
        self.text.push(TextRun {
            at,
            text: text.to_string(),
            fg,
            bg,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_window_wraps_rows() {
        let mut fb = FrameBuffer::new(8, 8, Color::BLACK);
        fb.set_draw_window(Region::new(IVec2::new(2, 3), IVec2::new(3, 4)));
        for c in [Color::RED, Color::GREEN, Color::BLUE, Color::WHITE] {
            fb.write_pixel(c);
        }
        assert_eq!(fb.pixel(IVec2::new(2, 3)), Some(Color::RED));
        assert_eq!(fb.pixel(IVec2::new(3, 3)), Some(Color::GREEN));
        assert_eq!(fb.pixel(IVec2::new(2, 4)), Some(Color::BLUE));
        assert_eq!(fb.pixel(IVec2::new(3, 4)), Some(Color::WHITE));
        assert_eq!(fb.count(Color::BLACK), 60);
        assert_eq!(fb.written, 4);
    }

    #[test]
    fn test_out_of_range_pixels_dropped() {
        let mut fb = FrameBuffer::new(4, 4, Color::BLACK);
        fb.set_draw_window(Region::new(IVec2::new(3, 3), IVec2::new(4, 3)));
        fb.write_pixel(Color::RED);
        fb.write_pixel(Color::RED);
        assert_eq!(fb.count(Color::RED), 1);
        assert_eq!(fb.pixel(IVec2::new(4, 3)), None);
    }

    #[test]
    fn test_ppm_header() {
        let fb = FrameBuffer::new(2, 1, Color::WHITE);
        let ppm = fb.to_ppm();
        assert!(ppm.starts_with(b"P6\n2 1\n255\n"));
        assert_eq!(ppm.len(), b"P6\n2 1\n255\n".len() + 6);
    }
}
