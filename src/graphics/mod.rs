//! embedded-graphics backend
//!
//! Runs the watch face on any `DrawTarget<Color = Rgb565>`, such as the
//! PineTime's ST7789 panel.

use embedded_graphics::{pixelcolor::Rgb565, prelude::*};

use crate::ui::canvas::Bitmap;

mod canvas;
mod smiley;
mod transform;

pub use canvas::DisplayCanvas;
pub use smiley::{desaturate, SmileyBitmap, SmileyResources, SOURCE_SIZE};
pub use transform::Transform;

/// A bitmap that knows how to put itself on a display.
pub trait Sprite: Bitmap {
    /// Draw at `top_left`, clipped to the sprite's own bounds.
    fn draw<D>(&self, target: &mut D, top_left: Point) -> Result<(), D::Error>
    where
        D: DrawTarget<Color = Rgb565>;
}
