//! Drawing styles
//!
//! A [`Paint`] is a plain description handed to the [`Canvas`]; the backend
//! decides how to honor each attribute. [`PaintProfile`] derives the hand
//! paints from the current [`DisplayMode`].
//!
//! [`Canvas`]: super::canvas::Canvas

use embedded_graphics::pixelcolor::{Rgb888, RgbColor};

use super::mode::DisplayMode;
use crate::system::config::WatchFaceConfig;

pub type Color = Rgb888;

pub const HOUR_STROKE_WIDTH: f32 = 5.0;
pub const MINUTE_STROKE_WIDTH: f32 = 3.0;
pub const SECOND_TICK_STROKE_WIDTH: f32 = 2.0;

const OPAQUE: u8 = 255;
const MUTED_HOUR_ALPHA: u8 = 100;
const MUTED_MINUTE_ALPHA: u8 = 100;
const MUTED_SECOND_ALPHA: u8 = 80;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PaintStyle {
    Fill,
    Stroke,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StrokeCap {
    Butt,
    Round,
}

/// Blurred shadow drawn under a shape.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Shadow {
    pub radius: f32,
    pub color: Color,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Paint {
    pub color: Color,
    pub alpha: u8,
    pub stroke_width: f32,
    pub anti_alias: bool,
    pub cap: StrokeCap,
    pub style: PaintStyle,
    pub shadow: Option<Shadow>,
    pub text_size: Option<f32>,
    pub bold: bool,
}

impl Paint {
    /// Opaque fill paint without anti-aliasing
    pub const fn new(color: Color) -> Self {
        Self {
            color,
            alpha: OPAQUE,
            stroke_width: 0.0,
            anti_alias: false,
            cap: StrokeCap::Butt,
            style: PaintStyle::Fill,
            shadow: None,
            text_size: None,
            bold: false,
        }
    }

    /// Round-capped stroke, the shape of every hand
    pub const fn stroke(color: Color, width: f32) -> Self {
        let mut paint = Self::new(color);
        paint.style = PaintStyle::Stroke;
        paint.stroke_width = width;
        paint.cap = StrokeCap::Round;
        paint
    }

    pub const fn with_anti_alias(mut self, anti_alias: bool) -> Self {
        self.anti_alias = anti_alias;
        self
    }

    pub const fn with_alpha(mut self, alpha: u8) -> Self {
        self.alpha = alpha;
        self
    }

    pub const fn with_shadow(mut self, shadow: Option<Shadow>) -> Self {
        self.shadow = shadow;
        self
    }

    pub const fn with_text_size(mut self, size: Option<f32>) -> Self {
        self.text_size = size;
        self
    }

    pub const fn with_bold(mut self, bold: bool) -> Self {
        self.bold = bold;
        self
    }
}

/// Paints for every element of the dial in one display regime.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PaintProfile {
    pub hour: Paint,
    pub minute: Paint,
    pub second: Paint,
    /// Center cap (and ticks)
    pub tick: Paint,
    /// Solid black, used for black backgrounds and the peek card backing.
    pub background: Paint,
}

impl PaintProfile {
    pub fn new(mode: DisplayMode, muted: bool, config: &WatchFaceConfig) -> Self {
        let ambient = mode.is_ambient();
        let (hour, minute, second, tick) = if ambient {
            (Rgb888::WHITE, Rgb888::WHITE, Rgb888::WHITE, Rgb888::WHITE)
        } else {
            (
                config.hour_hand_color,
                config.minute_hand_color,
                config.second_hand_color,
                config.hour_hand_color,
            )
        };
        let shadow = (!ambient).then_some(Shadow {
            radius: config.shadow_radius,
            color: config.shadow_color,
        });
        let (hour_alpha, minute_alpha, second_alpha) = if muted {
            (MUTED_HOUR_ALPHA, MUTED_MINUTE_ALPHA, MUTED_SECOND_ALPHA)
        } else {
            (OPAQUE, OPAQUE, OPAQUE)
        };

        let hand = |color, width, alpha| {
            Paint::stroke(color, width)
                .with_anti_alias(!ambient)
                .with_shadow(shadow)
                .with_alpha(alpha)
        };

        let mut tick = hand(tick, SECOND_TICK_STROKE_WIDTH, OPAQUE);
        tick.cap = StrokeCap::Butt;

        Self {
            hour: hand(hour, HOUR_STROKE_WIDTH, hour_alpha),
            minute: hand(minute, MINUTE_STROKE_WIDTH, minute_alpha),
            second: hand(second, SECOND_TICK_STROKE_WIDTH, second_alpha),
            tick,
            background: Paint::new(Rgb888::BLACK),
        }
    }
}
