//! Watch face configuration

use embassy_time::Duration;
use embedded_graphics::pixelcolor::{Rgb888, RgbColor};

/// Tunables of the watch face.
///
/// Nothing here is persisted or user-facing; the defaults are the face's
/// design values.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WatchFaceConfig {
    pub hour_hand_color: Rgb888,
    pub minute_hand_color: Rgb888,
    /// Highlight color, also used for the second hand only.
    pub second_hand_color: Rgb888,
    pub shadow_color: Rgb888,
    pub shadow_radius: f32,
    /// Phase advance per interactive frame of the eye animation.
    pub animation_frame_step: u16,
    /// Delay between animation frames.
    pub animation_frame_delay: Duration,
}

impl WatchFaceConfig {
    /// Create the default configuration
    pub const fn new() -> Self {
        Self {
            hour_hand_color: Rgb888::WHITE,
            minute_hand_color: Rgb888::WHITE,
            second_hand_color: Rgb888::BLUE,
            shadow_color: Rgb888::WHITE,
            shadow_radius: 6.0,
            animation_frame_step: 5,
            animation_frame_delay: Duration::from_millis(50),
        }
    }
}

impl Default for WatchFaceConfig {
    fn default() -> Self {
        Self::new()
    }
}
