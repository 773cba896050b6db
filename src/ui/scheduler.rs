//! Frame invalidation policy
//!
//! | Mode        | Idle                       | Animation playing         |
//! |-------------|----------------------------|---------------------------|
//! | Interactive | next frame right away      | next frame after 50 ms    |
//! | Ambient     | host time tick (1/min)     | suppressed, idle rules    |
//! | Not visible | nothing, pending dropped   | nothing, pending dropped  |

use embassy_time::Duration;

use super::animation::AnimationState;
use super::mode::DisplayMode;
use crate::system::config::WatchFaceConfig;
use crate::system::host::{Timer, TimerToken};
use crate::trace;

/// When the next frame should be drawn.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum FrameRequest {
    Now,
    After(Duration),
    /// Wait for the host's time tick.
    OnTimeTick,
    /// Not visible: no drawing at all.
    Suspended,
}

impl FrameRequest {
    /// Continuation after a completed draw.
    pub fn after_draw(
        mode: DisplayMode,
        animation: AnimationState,
        visible: bool,
        config: &WatchFaceConfig,
    ) -> Self {
        if !visible {
            Self::Suspended
        } else if mode.is_ambient() {
            Self::OnTimeTick
        } else if animation.is_playing() {
            Self::After(config.animation_frame_delay)
        } else {
            Self::Now
        }
    }
}

/// Holds at most one pending frame timer. A new request supersedes the
/// pending one.
#[derive(Debug, Default)]
pub struct FrameScheduler {
    pending: Option<TimerToken>,
}

impl FrameScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn request<T: Timer + ?Sized>(&mut self, timer: &mut T, request: FrameRequest) {
        self.cancel(timer);
        let delay = match request {
            FrameRequest::Now => Duration::from_ticks(0),
            FrameRequest::After(delay) => delay,
            FrameRequest::OnTimeTick | FrameRequest::Suspended => return,
        };
        self.pending = Some(timer.post_delayed(delay));
    }

    /// Drop the pending timer, if any.
    pub fn cancel<T: Timer + ?Sized>(&mut self, timer: &mut T) {
        if let Some(token) = self.pending.take() {
            timer.cancel(token);
        }
    }

    /// Accept a fired timer. Returns whether a frame should be drawn now.
    ///
    /// Stale tokens are ignored; a fire during a running draw is folded into
    /// that draw.
    pub fn on_timer_fired(&mut self, token: TimerToken, drawing: bool) -> bool {
        if self.pending != Some(token) {
            trace!("Ignoring stale frame timer {}", token.0);
            return false;
        }
        self.pending = None;
        if drawing {
            trace!("Frame timer coalesced into running draw");
            return false;
        }
        true
    }

    pub fn pending(&self) -> Option<TimerToken> {
        self.pending
    }
}
