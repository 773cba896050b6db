//! Test doubles for the host services and the canvas

use chrono::FixedOffset;
use embassy_time::Duration;
use embedded_graphics::geometry::Size;

use super::assets::BitmapId;
use super::canvas::{Canvas, Rect};
use super::paint::{Color, Paint};
use crate::graphics::{SmileyBitmap, SmileyResources};
use crate::system::host::{DimensionId, Resources, SubscriptionToken, TimeService, Timer, TimerToken};
use crate::{Error, Result};

/// 2024-03-03 12:00:00 UTC
pub const NOON_UTC: i64 = 1_709_467_200_000;

/// Host with a settable clock, recorded timers and subscriptions.
pub struct FakeHost {
    resources: SmileyResources,
    missing: Option<BitmapId>,
    scale_calls: usize,
    now: i64,
    time_zone: FixedOffset,
    next_token: u32,
    live: Vec<(TimerToken, Duration)>,
    cancelled: Vec<TimerToken>,
    subscriptions: Vec<SubscriptionToken>,
}

impl FakeHost {
    pub fn new() -> Self {
        Self {
            resources: SmileyResources::default(),
            missing: None,
            scale_calls: 0,
            now: NOON_UTC,
            time_zone: FixedOffset::east_opt(0).unwrap(),
            next_token: 1,
            live: Vec::new(),
            cancelled: Vec::new(),
            subscriptions: Vec::new(),
        }
    }

    pub fn without_bitmap(mut self, id: BitmapId) -> Self {
        self.missing = Some(id);
        self
    }

    pub fn with_source_size(mut self, width: u32, height: u32) -> Self {
        self.resources = SmileyResources::new(Size::new(width, height));
        self
    }

    pub fn scale_calls(&self) -> usize {
        self.scale_calls
    }

    pub fn set_now(&mut self, millis: i64) {
        self.now = millis;
    }

    pub fn set_time_zone(&mut self, zone: FixedOffset) {
        self.time_zone = zone;
    }

    pub fn live_timers(&self) -> &[(TimerToken, Duration)] {
        &self.live
    }

    pub fn cancelled_timers(&self) -> &[TimerToken] {
        &self.cancelled
    }

    pub fn subscriptions(&self) -> &[SubscriptionToken] {
        &self.subscriptions
    }

    /// Remove and return the oldest live timer, as if it had fired.
    pub fn fire(&mut self) -> Option<TimerToken> {
        if self.live.is_empty() {
            None
        } else {
            Some(self.live.remove(0).0)
        }
    }

    fn token(&mut self) -> u32 {
        let token = self.next_token;
        self.next_token += 1;
        token
    }
}

impl Resources for FakeHost {
    type Bitmap = SmileyBitmap;

    fn load_bitmap(&mut self, id: BitmapId) -> Result<SmileyBitmap> {
        if self.missing == Some(id) {
            return Err(Error::AssetLoad(id));
        }
        self.resources.load_bitmap(id)
    }

    fn scale_bitmap(
        &mut self,
        bitmap: &SmileyBitmap,
        width: u32,
        height: u32,
        filter: bool,
    ) -> Result<SmileyBitmap> {
        self.scale_calls += 1;
        self.resources.scale_bitmap(bitmap, width, height, filter)
    }

    fn desaturate(&mut self, bitmap: &SmileyBitmap) -> Result<SmileyBitmap> {
        self.resources.desaturate(bitmap)
    }

    fn dimension(&self, id: DimensionId) -> f32 {
        self.resources.dimension(id)
    }
}

impl TimeService for FakeHost {
    fn now_millis(&self) -> i64 {
        self.now
    }

    fn current_time_zone(&self) -> FixedOffset {
        self.time_zone
    }

    fn subscribe_time_zone_changes(&mut self) -> SubscriptionToken {
        let token = SubscriptionToken(self.token());
        self.subscriptions.push(token);
        token
    }

    fn unsubscribe_time_zone_changes(&mut self, token: SubscriptionToken) {
        self.subscriptions.retain(|t| *t != token);
    }
}

impl Timer for FakeHost {
    fn post_delayed(&mut self, delay: Duration) -> TimerToken {
        let token = TimerToken(self.token());
        self.live.push((token, delay));
        token
    }

    fn cancel(&mut self, token: TimerToken) {
        self.live.retain(|(t, _)| *t != token);
        self.cancelled.push(token);
    }
}

/// One recorded canvas call. Coordinates are the untransformed arguments.
#[derive(Debug, Clone, PartialEq)]
pub enum DrawOp {
    Fill(Color),
    Bitmap {
        frame: usize,
        gray: bool,
        x: f32,
        y: f32,
    },
    Line {
        start: (f32, f32),
        end: (f32, f32),
        color: Color,
        alpha: u8,
        shadow: bool,
    },
    Circle {
        center: (f32, f32),
        radius: f32,
        color: Color,
    },
    Rect(Rect),
    Text(String),
    Save,
    Rotate(f32),
    Restore,
}

/// Canvas that records every call. Optionally fails every primitive.
#[derive(Debug, Default)]
pub struct RecordingCanvas {
    ops: Vec<DrawOp>,
    text_origins: Vec<(f32, f32)>,
    failing: bool,
}

impl RecordingCanvas {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn failing() -> Self {
        Self {
            failing: true,
            ..Self::default()
        }
    }

    pub fn ops(&self) -> &[DrawOp] {
        &self.ops
    }

    pub fn line_count(&self) -> usize {
        self.ops
            .iter()
            .filter(|op| matches!(op, DrawOp::Line { .. }))
            .count()
    }

    pub fn bitmap_count(&self) -> usize {
        self.ops
            .iter()
            .filter(|op| matches!(op, DrawOp::Bitmap { .. }))
            .count()
    }

    /// Frame index of the background bitmap, if one was drawn.
    pub fn background(&self) -> Option<(usize, bool)> {
        self.ops.iter().find_map(|op| match op {
            DrawOp::Bitmap { frame, gray, .. } => Some((*frame, *gray)),
            _ => None,
        })
    }

    pub fn lines(&self) -> Vec<&DrawOp> {
        self.ops
            .iter()
            .filter(|op| matches!(op, DrawOp::Line { .. }))
            .collect()
    }

    pub fn text_origins(&self) -> Vec<(f32, f32)> {
        self.text_origins.clone()
    }

    fn record(&mut self, op: DrawOp) -> Result<()> {
        if self.failing {
            return Err(Error::DrawPrimitive);
        }
        self.ops.push(op);
        Ok(())
    }
}

impl Canvas<SmileyBitmap> for RecordingCanvas {
    fn fill(&mut self, color: Color) -> Result<()> {
        self.record(DrawOp::Fill(color))
    }

    fn draw_bitmap(&mut self, bitmap: &SmileyBitmap, x: f32, y: f32, _paint: &Paint) -> Result<()> {
        self.record(DrawOp::Bitmap {
            frame: bitmap.frame(),
            gray: bitmap.is_gray(),
            x,
            y,
        })
    }

    fn draw_line(&mut self, x1: f32, y1: f32, x2: f32, y2: f32, paint: &Paint) -> Result<()> {
        self.record(DrawOp::Line {
            start: (x1, y1),
            end: (x2, y2),
            color: paint.color,
            alpha: paint.alpha,
            shadow: paint.shadow.is_some(),
        })
    }

    fn draw_circle(&mut self, cx: f32, cy: f32, radius: f32, paint: &Paint) -> Result<()> {
        self.record(DrawOp::Circle {
            center: (cx, cy),
            radius,
            color: paint.color,
        })
    }

    fn draw_rect(&mut self, rect: &Rect, _paint: &Paint) -> Result<()> {
        self.record(DrawOp::Rect(*rect))
    }

    fn draw_text(&mut self, text: &str, x: f32, y: f32, _paint: &Paint) -> Result<()> {
        self.record(DrawOp::Text(text.into()))?;
        self.text_origins.push((x, y));
        Ok(())
    }

    fn save(&mut self) {
        self.ops.push(DrawOp::Save);
    }

    fn rotate(&mut self, degrees: f32, _cx: f32, _cy: f32) {
        self.ops.push(DrawOp::Rotate(degrees));
    }

    fn restore(&mut self) {
        self.ops.push(DrawOp::Restore);
    }
}
