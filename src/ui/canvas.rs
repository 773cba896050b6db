//! Drawing surface abstraction

use super::paint::{Color, Paint};
use crate::Result;

/// Pixel dimensions of an image the host can blit.
pub trait Bitmap {
    fn width(&self) -> u32;
    fn height(&self) -> u32;
}

/// Axis-aligned rectangle in surface pixels, right and bottom exclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Rect {
    pub left: i32,
    pub top: i32,
    pub right: i32,
    pub bottom: i32,
}

impl Rect {
    pub const fn new(left: i32, top: i32, right: i32, bottom: i32) -> Self {
        Self {
            left,
            top,
            right,
            bottom,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.left >= self.right || self.top >= self.bottom
    }

    pub fn width(&self) -> u32 {
        (self.right - self.left).max(0) as u32
    }

    pub fn height(&self) -> u32 {
        (self.bottom - self.top).max(0) as u32
    }
}

/// Drawing primitives the renderer emits, in the style of a 2D canvas with
/// a transform stack.
///
/// Coordinates pass through the current transform. Failures propagate to
/// the host, which owns recovery.
pub trait Canvas<B: Bitmap> {
    /// Fill the whole surface.
    fn fill(&mut self, color: Color) -> Result<()>;

    /// Blit `bitmap` with its top-left corner at `(x, y)`.
    fn draw_bitmap(&mut self, bitmap: &B, x: f32, y: f32, paint: &Paint) -> Result<()>;

    fn draw_line(&mut self, x1: f32, y1: f32, x2: f32, y2: f32, paint: &Paint) -> Result<()>;

    fn draw_circle(&mut self, cx: f32, cy: f32, radius: f32, paint: &Paint) -> Result<()>;

    fn draw_rect(&mut self, rect: &Rect, paint: &Paint) -> Result<()>;

    /// Draw `text` with its baseline starting at `(x, y)`.
    fn draw_text(&mut self, text: &str, x: f32, y: f32, paint: &Paint) -> Result<()>;

    /// Push the current transform.
    fn save(&mut self);

    /// Rotate clockwise by `degrees` around `(cx, cy)`, on top of the current
    /// transform.
    fn rotate(&mut self, degrees: f32, cx: f32, cy: f32);

    /// Pop the transform pushed by the matching [`Canvas::save`].
    fn restore(&mut self);
}
