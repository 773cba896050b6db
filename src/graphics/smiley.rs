//! Procedural smiley frames
//!
//! The frames are drawn from primitives at blit time instead of being
//! decoded from image files, so "scaling" only changes the target size and
//! no pixel buffer is ever held in RAM.

use embedded_graphics::{
    pixelcolor::{Rgb565, Rgb888, RgbColor},
    prelude::*,
    primitives::{Arc, Circle, PrimitiveStyle, PrimitiveStyleBuilder, Rectangle},
};

use super::Sprite;
use crate::system::host::{DimensionId, Resources};
use crate::ui::{assets::BitmapId, canvas::Bitmap};
use crate::Result;

/// Design size of the bundled frames.
pub const SOURCE_SIZE: Size = Size::new(240, 240);

const BACKDROP: Rgb888 = Rgb888::new(0x12, 0x2c, 0x5a);
const FACE: Rgb888 = Rgb888::new(0xff, 0xd0, 0x1c);
const FACE_OUTLINE: Rgb888 = Rgb888::new(0xd0, 0x7a, 0x00);
const EYE: Rgb888 = Rgb888::WHITE;
const PUPIL: Rgb888 = Rgb888::BLACK;
const MOUTH: Rgb888 = Rgb888::new(0x5a, 0x2a, 0x00);

/// Pupil direction per frame: at rest, then up, right, down, left.
const GAZE: [(i32, i32); 5] = [(0, 0), (0, -1), (1, 0), (0, 1), (-1, 0)];

/// One smiley frame at a given size.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SmileyBitmap {
    frame: u8,
    size: Size,
    gray: bool,
}

impl SmileyBitmap {
    pub const fn new(frame: u8, size: Size) -> Self {
        Self {
            frame,
            size,
            gray: false,
        }
    }

    pub fn frame(&self) -> usize {
        self.frame as usize
    }

    pub fn is_gray(&self) -> bool {
        self.gray
    }

    pub fn size(&self) -> Size {
        self.size
    }

    pub fn scaled(self, size: Size) -> Self {
        Self { size, ..self }
    }

    pub fn desaturated(self) -> Self {
        Self { gray: true, ..self }
    }

    fn color(&self, color: Rgb888) -> Rgb565 {
        if self.gray {
            desaturate(color).into()
        } else {
            color.into()
        }
    }
}

impl Bitmap for SmileyBitmap {
    fn width(&self) -> u32 {
        self.size.width
    }

    fn height(&self) -> u32 {
        self.size.height
    }
}

impl Sprite for SmileyBitmap {
    fn draw<D>(&self, target: &mut D, top_left: Point) -> core::result::Result<(), D::Error>
    where
        D: DrawTarget<Color = Rgb565>,
    {
        let mut clipped = target.clipped(&Rectangle::new(top_left, self.size));
        let mut target = clipped.translated(top_left);

        let (w, h) = (self.size.width as i32, self.size.height as i32);
        let diameter = (w.min(h) * 9 / 10).max(1);
        let center = Point::new(w / 2, h / 2);

        Rectangle::new(Point::zero(), self.size)
            .into_styled(PrimitiveStyle::with_fill(self.color(BACKDROP)))
            .draw(&mut target)?;

        let face_style = PrimitiveStyleBuilder::new()
            .fill_color(self.color(FACE))
            .stroke_color(self.color(FACE_OUTLINE))
            .stroke_width((diameter as u32 / 60).max(1))
            .build();
        Circle::with_center(center, diameter as u32)
            .into_styled(face_style)
            .draw(&mut target)?;

        // Eyes
        let eye_diameter = (diameter / 5).max(2);
        let pupil_diameter = (diameter / 12).max(1);
        let reach = (eye_diameter - pupil_diameter) / 2;
        let (gx, gy) = GAZE[self.frame() % GAZE.len()];
        for side in [-1, 1] {
            let eye = center + Point::new(side * diameter * 17 / 100, -diameter * 12 / 100);
            Circle::with_center(eye, eye_diameter as u32)
                .into_styled(PrimitiveStyle::with_fill(self.color(EYE)))
                .draw(&mut target)?;
            Circle::with_center(eye + Point::new(gx * reach, gy * reach), pupil_diameter as u32)
                .into_styled(PrimitiveStyle::with_fill(self.color(PUPIL)))
                .draw(&mut target)?;
        }

        Arc::with_center(center, (diameter * 55 / 100) as u32, 20.0.deg(), 140.0.deg())
            .into_styled(PrimitiveStyle::with_stroke(
                self.color(MOUTH),
                (diameter as u32 / 40).max(1),
            ))
            .draw(&mut target)
    }
}

/// Zero-saturation color: every channel set to the Rec. 601 luma.
pub fn desaturate(color: Rgb888) -> Rgb888 {
    let luma =
        (color.r() as u32 * 299 + color.g() as u32 * 587 + color.b() as u32 * 114) / 1000;
    let luma = luma as u8;
    Rgb888::new(luma, luma, luma)
}

/// Resource service serving procedural smiley frames.
#[derive(Debug, Clone, Copy)]
pub struct SmileyResources {
    source_size: Size,
}

impl Default for SmileyResources {
    fn default() -> Self {
        Self::new(SOURCE_SIZE)
    }
}

impl SmileyResources {
    pub const fn new(source_size: Size) -> Self {
        Self { source_size }
    }
}

impl Resources for SmileyResources {
    type Bitmap = SmileyBitmap;

    fn load_bitmap(&mut self, id: BitmapId) -> Result<SmileyBitmap> {
        Ok(SmileyBitmap::new(id.frame() as u8, self.source_size))
    }

    fn scale_bitmap(
        &mut self,
        bitmap: &SmileyBitmap,
        width: u32,
        height: u32,
        _filter: bool,
    ) -> Result<SmileyBitmap> {
        Ok(bitmap.scaled(Size::new(width, height)))
    }

    fn desaturate(&mut self, bitmap: &SmileyBitmap) -> Result<SmileyBitmap> {
        Ok(bitmap.desaturated())
    }

    fn dimension(&self, id: DimensionId) -> f32 {
        match id {
            DimensionId::InteractiveXOffset => 15.0,
            DimensionId::InteractiveXOffsetRound => 40.0,
            DimensionId::InteractiveYOffset => 70.0,
            DimensionId::InteractiveYOffsetRound => 80.0,
            DimensionId::InteractiveTextSize => 16.0,
            DimensionId::InteractiveTextSizeRound => 18.0,
        }
    }
}
