//! Dial rendering
//!
//! Draw order is fixed: overlay text, background, hour, minute and second
//! hands, center cap, then the peek card backing in ambient mode.

use super::animation::TapDriver;
use super::assets::AssetSet;
use super::canvas::{Bitmap, Canvas, Rect};
use super::clock::HandAngles;
use super::mode::DisplayMode;
use super::paint::{Color, Paint, PaintProfile};
use super::scheduler::FrameRequest;
use crate::system::config::WatchFaceConfig;
use crate::{trace, Result};

use embedded_graphics::pixelcolor::{Rgb888, RgbColor};

/// Gap between the center and the start of each hand, also the cap radius.
pub const CENTER_GAP_AND_CIRCLE_RADIUS: f32 = 4.0;

const HOUR_HAND_RATIO: f32 = 0.5;
const MINUTE_HAND_RATIO: f32 = 0.75;
const SECOND_HAND_RATIO: f32 = 0.875;

const OVERLAY_TEXT_COLOR: Rgb888 = Rgb888::RED;
const OVERLAY_BUF_LEN: usize = 24;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Surface {
    pub width: u32,
    pub height: u32,
    pub round: bool,
}

impl Surface {
    pub const fn new(width: u32, height: u32, round: bool) -> Self {
        Self {
            width,
            height,
            round,
        }
    }

    pub fn center_x(&self) -> f32 {
        self.width as f32 / 2.0
    }

    pub fn center_y(&self) -> f32 {
        self.height as f32 / 2.0
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct HandLengths {
    pub hour: f32,
    pub minute: f32,
    pub second: f32,
}

impl HandLengths {
    /// Lengths relative to the horizontal center, so round watches with a
    /// flat "chin" keep the dial centered on the whole screen.
    pub fn for_surface(surface: &Surface) -> Self {
        let center_x = surface.center_x();
        Self {
            hour: center_x * HOUR_HAND_RATIO,
            minute: center_x * MINUTE_HAND_RATIO,
            second: center_x * SECOND_HAND_RATIO,
        }
    }
}

/// Placement and style of the tap counter text.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TextOverlay {
    pub x_offset: f32,
    pub y_offset: f32,
    /// Distance between the two lines.
    pub spacing: f32,
    pub paint: Paint,
}

impl TextOverlay {
    /// Offsets stay at zero until the host applies the screen shape.
    pub fn new(spacing: f32) -> Self {
        Self {
            x_offset: 0.0,
            y_offset: 0.0,
            spacing,
            paint: Paint::new(OVERLAY_TEXT_COLOR)
                .with_anti_alias(true)
                .with_bold(true),
        }
    }

    pub fn apply_shape(&mut self, x_offset: f32, y_offset: f32, text_size: f32) {
        self.x_offset = x_offset;
        self.y_offset = y_offset;
        self.paint = self.paint.with_text_size(Some(text_size));
    }
}

/// Everything a frame reads besides the animation driver.
pub struct Scene<'a, B> {
    pub angles: HandAngles,
    pub mode: DisplayMode,
    pub paints: &'a PaintProfile,
    pub assets: &'a AssetSet<B>,
    pub overlay: &'a TextOverlay,
    pub peek_card: Rect,
    pub visible: bool,
    pub config: &'a WatchFaceConfig,
}

/// Which background the frame used.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Background {
    Frame(usize),
    Gray,
    Black,
}

#[derive(Debug, Default)]
pub struct Renderer {
    surface: Option<Surface>,
    lengths: HandLengths,
    round: bool,
}

impl Renderer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adopt a new surface size. Hand lengths only change with the size.
    pub fn set_surface(&mut self, width: u32, height: u32) -> Surface {
        let surface = Surface::new(width, height, self.round);
        if self.surface.map(|s| (s.width, s.height)) != Some((width, height)) {
            self.lengths = HandLengths::for_surface(&surface);
        }
        self.surface = Some(surface);
        surface
    }

    /// Forget the surface; drawing is a no-op until a valid one arrives.
    pub fn clear_surface(&mut self) {
        self.surface = None;
    }

    pub fn set_round(&mut self, round: bool) {
        self.round = round;
        if let Some(surface) = self.surface.as_mut() {
            surface.round = round;
        }
    }

    pub fn surface(&self) -> Option<Surface> {
        self.surface
    }

    pub fn hand_lengths(&self) -> HandLengths {
        self.lengths
    }

    /// Draw one frame and return when the next one is due. Without a valid
    /// surface nothing is drawn.
    pub fn draw<B, C>(
        &self,
        canvas: &mut C,
        scene: &Scene<'_, B>,
        taps: &mut TapDriver,
    ) -> Result<Option<(Background, FrameRequest)>>
    where
        B: Bitmap,
        C: Canvas<B> + ?Sized,
    {
        let Some(surface) = self.surface else {
            return Ok(None);
        };
        let interactive = scene.mode.is_interactive();

        if interactive && scene.visible {
            self.draw_overlay(canvas, scene, taps)?;
        }

        let background = self.draw_background(canvas, scene, taps)?;
        self.draw_hands(canvas, &surface, scene)?;

        if scene.mode.is_ambient() && !scene.peek_card.is_empty() {
            canvas.draw_rect(&scene.peek_card, &scene.paints.background)?;
        }

        let request = FrameRequest::after_draw(scene.mode, taps.state(), scene.visible, scene.config);
        trace!("Drew {:?}, next {:?}", background, request);
        Ok(Some((background, request)))
    }

    fn draw_overlay<B, C>(&self, canvas: &mut C, scene: &Scene<'_, B>, taps: &TapDriver) -> Result<()>
    where
        B: Bitmap,
        C: Canvas<B> + ?Sized,
    {
        let overlay = scene.overlay;
        let counters = taps.counters();

        let mut buf = [0u8; OVERLAY_BUF_LEN];
        if let Ok(text) = format_no_std::show(&mut buf, format_args!("TAP: {}", counters.tap)) {
            canvas.draw_text(text, overlay.x_offset, overlay.y_offset, &overlay.paint)?;
        }

        let mut buf = [0u8; OVERLAY_BUF_LEN];
        if let Ok(text) =
            format_no_std::show(&mut buf, format_args!("CANCEL: {}", counters.touch_cancel))
        {
            canvas.draw_text(
                text,
                overlay.x_offset,
                overlay.y_offset + overlay.spacing,
                &overlay.paint,
            )?;
        }
        Ok(())
    }

    fn draw_background<B, C>(
        &self,
        canvas: &mut C,
        scene: &Scene<'_, B>,
        taps: &mut TapDriver,
    ) -> Result<Background>
    where
        B: Bitmap,
        C: Canvas<B> + ?Sized,
    {
        let paint = &scene.paints.background;

        if scene.mode.requires_black_background() {
            return fill_black::<B, C>(canvas);
        }

        if scene.mode.is_ambient() {
            // Animation is held, not advanced, while ambient
            return match scene.assets.gray() {
                Some(gray) => {
                    canvas.draw_bitmap(gray, 0.0, 0.0, paint)?;
                    Ok(Background::Gray)
                }
                None => fill_black::<B, C>(canvas),
            };
        }

        let index = taps.advance(scene.config.animation_frame_step);
        match scene.assets.frame(index) {
            Some(frame) => {
                canvas.draw_bitmap(frame, 0.0, 0.0, paint)?;
                Ok(Background::Frame(index))
            }
            None => fill_black::<B, C>(canvas),
        }
    }

    fn draw_hands<B, C>(&self, canvas: &mut C, surface: &Surface, scene: &Scene<'_, B>) -> Result<()>
    where
        B: Bitmap,
        C: Canvas<B> + ?Sized,
    {
        let (cx, cy) = (surface.center_x(), surface.center_y());
        let angles = scene.angles;
        let paints = scene.paints;
        let lengths = self.lengths;
        let gap = CENTER_GAP_AND_CIRCLE_RADIUS;

        canvas.save();
        let result = (|| -> Result<()> {
            canvas.rotate(angles.hour, cx, cy);
            canvas.draw_line(cx, cy - gap, cx, cy - lengths.hour, &paints.hour)?;

            canvas.rotate(angles.minute - angles.hour, cx, cy);
            canvas.draw_line(cx, cy - gap, cx, cy - lengths.minute, &paints.minute)?;

            // Ambient redraws once a minute, a second hand would lie
            if scene.mode.is_interactive() {
                canvas.rotate(angles.second - angles.minute, cx, cy);
                canvas.draw_line(cx, cy - gap, cx, cy - lengths.second, &paints.second)?;
            }

            canvas.draw_circle(cx, cy, gap, &paints.tick)
        })();
        canvas.restore();
        result
    }
}

fn fill_black<B, C>(canvas: &mut C) -> Result<Background>
where
    B: Bitmap,
    C: Canvas<B> + ?Sized,
{
    canvas.fill(Color::BLACK)?;
    Ok(Background::Black)
}
