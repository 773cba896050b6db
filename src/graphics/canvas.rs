//! [`Canvas`] on top of an embedded-graphics draw target

use embedded_graphics::{
    mono_font::{MonoFont, MonoTextStyle},
    pixelcolor::{Rgb565, Rgb888, RgbColor},
    prelude::*,
    primitives::{Circle, Line, PrimitiveStyle, Rectangle},
    text::Text,
};
use heapless::Vec;
use libm::roundf;
use profont::{
    PROFONT_10_POINT, PROFONT_12_POINT, PROFONT_14_POINT, PROFONT_18_POINT, PROFONT_24_POINT,
};

use super::{Sprite, Transform};
use crate::ui::canvas::{Canvas, Rect};
use crate::ui::paint::{Color, Paint, PaintStyle, StrokeCap};
use crate::{warn, Error, Result};

const SAVE_DEPTH: usize = 4;
/// Opacity of hand shadows, which are approximated by a halo.
const SHADOW_ALPHA: u8 = 60;

/// Draws on a display through a transform stack.
///
/// Bitmaps are placed at their transformed origin but never rotated. Alpha
/// is applied against black.
pub struct DisplayCanvas<'a, D> {
    target: &'a mut D,
    transform: Transform,
    saved: Vec<Transform, SAVE_DEPTH>,
}

impl<'a, D> DisplayCanvas<'a, D>
where
    D: DrawTarget<Color = Rgb565>,
{
    pub fn new(target: &'a mut D) -> Self {
        Self {
            target,
            transform: Transform::IDENTITY,
            saved: Vec::new(),
        }
    }

    fn point(&self, x: f32, y: f32) -> Point {
        let (x, y) = self.transform.apply(x, y);
        Point::new(roundf(x) as i32, roundf(y) as i32)
    }

    fn stroke_line(&mut self, start: Point, end: Point, width: u32, color: Rgb565, round: bool) -> Result<()> {
        Line::new(start, end)
            .into_styled(PrimitiveStyle::with_stroke(color, width))
            .draw(self.target)
            .map_err(|_| Error::DrawPrimitive)?;
        if round && width > 1 {
            for end in [start, end] {
                Circle::with_center(end, width)
                    .into_styled(PrimitiveStyle::with_fill(color))
                    .draw(self.target)
                    .map_err(|_| Error::DrawPrimitive)?;
            }
        }
        Ok(())
    }
}

/// Scale `color` toward black by `alpha`.
pub fn shade(color: Rgb888, alpha: u8) -> Rgb565 {
    let scale = |channel: u8| (channel as u16 * alpha as u16 / 255) as u8;
    Rgb888::new(scale(color.r()), scale(color.g()), scale(color.b())).into()
}

fn stroke_width(paint: &Paint) -> u32 {
    (roundf(paint.stroke_width) as u32).max(1)
}

fn font_for(paint: &Paint) -> &'static MonoFont<'static> {
    match paint.text_size {
        Some(size) if size >= 24.0 => &PROFONT_24_POINT,
        Some(size) if size >= 18.0 => &PROFONT_18_POINT,
        Some(size) if size >= 14.0 => &PROFONT_14_POINT,
        Some(size) if size >= 12.0 => &PROFONT_12_POINT,
        _ => &PROFONT_10_POINT,
    }
}

impl<D, B> Canvas<B> for DisplayCanvas<'_, D>
where
    D: DrawTarget<Color = Rgb565>,
    B: Sprite,
{
    fn fill(&mut self, color: Color) -> Result<()> {
        self.target
            .clear(color.into())
            .map_err(|_| Error::DrawPrimitive)
    }

    fn draw_bitmap(&mut self, bitmap: &B, x: f32, y: f32, _paint: &Paint) -> Result<()> {
        let origin = self.point(x, y);
        bitmap
            .draw(self.target, origin)
            .map_err(|_| Error::DrawPrimitive)
    }

    fn draw_line(&mut self, x1: f32, y1: f32, x2: f32, y2: f32, paint: &Paint) -> Result<()> {
        let (start, end) = (self.point(x1, y1), self.point(x2, y2));
        let width = stroke_width(paint);
        let round = paint.cap == StrokeCap::Round;

        if let Some(shadow) = paint.shadow {
            let halo = width + 2 * (roundf(shadow.radius) as u32);
            self.stroke_line(start, end, halo, shade(shadow.color, SHADOW_ALPHA), round)?;
        }
        self.stroke_line(start, end, width, shade(paint.color, paint.alpha), round)
    }

    fn draw_circle(&mut self, cx: f32, cy: f32, radius: f32, paint: &Paint) -> Result<()> {
        let center = self.point(cx, cy);
        let diameter = (roundf(radius * 2.0) as u32).max(1);
        let color = shade(paint.color, paint.alpha);
        let style = match paint.style {
            PaintStyle::Fill => PrimitiveStyle::with_fill(color),
            PaintStyle::Stroke => PrimitiveStyle::with_stroke(color, stroke_width(paint)),
        };
        Circle::with_center(center, diameter)
            .into_styled(style)
            .draw(self.target)
            .map_err(|_| Error::DrawPrimitive)
    }

    fn draw_rect(&mut self, rect: &Rect, paint: &Paint) -> Result<()> {
        if rect.is_empty() {
            return Ok(());
        }
        let top_left = self.point(rect.left as f32, rect.top as f32);
        let bottom_right = self.point(rect.right as f32 - 1.0, rect.bottom as f32 - 1.0);
        let color = shade(paint.color, paint.alpha);
        let style = match paint.style {
            PaintStyle::Fill => PrimitiveStyle::with_fill(color),
            PaintStyle::Stroke => PrimitiveStyle::with_stroke(color, stroke_width(paint)),
        };
        Rectangle::with_corners(top_left, bottom_right)
            .into_styled(style)
            .draw(self.target)
            .map_err(|_| Error::DrawPrimitive)
    }

    fn draw_text(&mut self, text: &str, x: f32, y: f32, paint: &Paint) -> Result<()> {
        let style = MonoTextStyle::new(font_for(paint), shade(paint.color, paint.alpha));
        Text::new(text, self.point(x, y), style)
            .draw(self.target)
            .map(|_| ())
            .map_err(|_| Error::DrawPrimitive)
    }

    fn save(&mut self) {
        if self.saved.push(self.transform).is_err() {
            warn!("Canvas save stack full, transform not saved");
        }
    }

    fn rotate(&mut self, degrees: f32, cx: f32, cy: f32) {
        self.transform = self.transform.rotate_about(degrees, cx, cy);
    }

    fn restore(&mut self) {
        self.transform = self.saved.pop().unwrap_or(Transform::IDENTITY);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graphics::SmileyBitmap;
    use embedded_graphics::mock_display::MockDisplay;

    fn display() -> MockDisplay<Rgb565> {
        let mut display = MockDisplay::new();
        display.set_allow_overdraw(true);
        display.set_allow_out_of_bounds_drawing(true);
        display
    }

    #[test]
    fn alpha_darkens() {
        assert_eq!(shade(Rgb888::WHITE, 255), Rgb565::WHITE);
        assert_eq!(shade(Rgb888::WHITE, 0), Rgb565::BLACK);
        assert_eq!(
            shade(Rgb888::new(200, 100, 50), 128),
            Rgb565::from(Rgb888::new(100, 50, 25))
        );
    }

    #[test]
    fn fonts_by_text_size() {
        let size = |text_size| font_for(&Paint::new(Rgb888::RED).with_text_size(text_size)).character_size;
        assert_eq!(size(None), PROFONT_10_POINT.character_size);
        assert_eq!(size(Some(16.0)), PROFONT_14_POINT.character_size);
        assert_eq!(size(Some(18.0)), PROFONT_18_POINT.character_size);
        assert_eq!(size(Some(40.0)), PROFONT_24_POINT.character_size);
    }

    #[test]
    fn rotated_line_lands_clockwise() {
        let mut display = display();
        let mut canvas = DisplayCanvas::new(&mut display);
        let paint = Paint::new(Rgb888::WHITE);

        Canvas::<SmileyBitmap>::save(&mut canvas);
        Canvas::<SmileyBitmap>::rotate(&mut canvas, 90.0, 32.0, 32.0);
        Canvas::<SmileyBitmap>::draw_line(&mut canvas, 32.0, 28.0, 32.0, 10.0, &paint).unwrap();
        Canvas::<SmileyBitmap>::restore(&mut canvas);

        // Pointing up before the turn, pointing right after it
        assert_eq!(display.get_pixel(Point::new(45, 32)), Some(Rgb565::WHITE));
        assert_eq!(display.get_pixel(Point::new(32, 20)), None);
    }

    #[test]
    fn restore_returns_to_identity() {
        let mut display = display();
        let mut canvas = DisplayCanvas::new(&mut display);
        let paint = Paint::new(Rgb888::WHITE);

        Canvas::<SmileyBitmap>::save(&mut canvas);
        Canvas::<SmileyBitmap>::rotate(&mut canvas, 45.0, 32.0, 32.0);
        Canvas::<SmileyBitmap>::restore(&mut canvas);
        Canvas::<SmileyBitmap>::draw_line(&mut canvas, 32.0, 28.0, 32.0, 10.0, &paint).unwrap();

        assert_eq!(display.get_pixel(Point::new(32, 20)), Some(Rgb565::WHITE));
    }

    #[test]
    fn fill_and_rect() {
        let mut display = display();
        let mut canvas = DisplayCanvas::new(&mut display);
        Canvas::<SmileyBitmap>::fill(&mut canvas, Rgb888::BLACK).unwrap();
        Canvas::<SmileyBitmap>::draw_rect(&mut canvas, &Rect::new(0, 50, 64, 64), &Paint::new(Rgb888::RED))
            .unwrap();

        assert_eq!(display.get_pixel(Point::new(10, 10)), Some(Rgb565::BLACK));
        assert_eq!(display.get_pixel(Point::new(10, 55)), Some(Rgb565::RED));
        assert_eq!(display.get_pixel(Point::new(63, 63)), Some(Rgb565::RED));
    }

    #[test]
    fn bitmap_is_placed_at_origin() {
        let mut display = display();
        let mut canvas = DisplayCanvas::new(&mut display);
        let bitmap = SmileyBitmap::new(0, Size::new(16, 16));
        canvas
            .draw_bitmap(&bitmap, 4.0, 4.0, &Paint::new(Rgb888::BLACK))
            .unwrap();

        assert_eq!(
            display.affected_area(),
            Rectangle::new(Point::new(4, 4), Size::new(16, 16))
        );
    }
}
