//! Services the watch face consumes from its host

use chrono::FixedOffset;
use embassy_time::Duration;

use crate::ui::{assets::BitmapId, canvas::Bitmap};
use crate::Result;

/// Layout dimensions provided by the host, in surface pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DimensionId {
    InteractiveXOffset,
    InteractiveXOffsetRound,
    InteractiveYOffset,
    InteractiveYOffsetRound,
    InteractiveTextSize,
    InteractiveTextSizeRound,
}

/// Bitmap loading and processing.
pub trait Resources {
    type Bitmap: Bitmap;

    fn load_bitmap(&mut self, id: BitmapId) -> Result<Self::Bitmap>;

    /// Resample `bitmap` to `width` x `height`, bilinear when `filter` is set.
    fn scale_bitmap(
        &mut self,
        bitmap: &Self::Bitmap,
        width: u32,
        height: u32,
        filter: bool,
    ) -> Result<Self::Bitmap>;

    /// Zero-saturation copy of `bitmap`.
    fn desaturate(&mut self, bitmap: &Self::Bitmap) -> Result<Self::Bitmap>;

    fn dimension(&self, id: DimensionId) -> f32;

    /// Pick the round or square variant of a dimension.
    fn shape_dimension(&self, round: DimensionId, square: DimensionId, is_round: bool) -> f32 {
        self.dimension(if is_round { round } else { square })
    }
}

/// Handle of a time-zone change subscription.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct SubscriptionToken(pub u32);

/// Wall clock and time-zone change notifications.
pub trait TimeService {
    /// Milliseconds since the Unix epoch.
    fn now_millis(&self) -> i64;

    fn current_time_zone(&self) -> FixedOffset;

    /// Ask the host to call `on_time_zone_changed` when the zone changes.
    fn subscribe_time_zone_changes(&mut self) -> SubscriptionToken;

    fn unsubscribe_time_zone_changes(&mut self, token: SubscriptionToken);
}

/// Handle of a posted timer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct TimerToken(pub u32);

/// One-shot timers. A fired timer is reported back through `on_timer`.
pub trait Timer {
    fn post_delayed(&mut self, delay: Duration) -> TimerToken;

    fn cancel(&mut self, token: TimerToken);
}

/// Everything the watch face needs from its host.
pub trait Host: Resources + TimeService + Timer {}

impl<T> Host for T where T: Resources + TimeService + Timer {}
