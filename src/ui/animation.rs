//! Tap handling and the eye rotation animation
//!
//! A touch-down arms the animation, the next touch-down disarms it. While
//! armed, every interactive draw shows the frame of the current phase and
//! advances it; after a full cycle the face returns to rest.

use crate::debug;

/// Phase length of a complete eye rotation.
pub const CYCLE_LENGTH: u16 = 200;
/// Phase span during which one frame is shown.
pub const FRAME_WINDOW: u16 = 50;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum TapKind {
    /// Initial touch-down.
    Touch,
    /// The touch turned into something other than a tap.
    TouchCancel,
    /// Completed tap.
    Tap,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct TapEvent {
    pub kind: TapKind,
    pub x: i32,
    pub y: i32,
    /// Host event time in milliseconds.
    pub time: i64,
}

impl TapEvent {
    pub const fn new(kind: TapKind, x: i32, y: i32, time: i64) -> Self {
        Self { kind, x, y, time }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum AnimationState {
    #[default]
    Idle,
    Playing {
        phase: u16,
    },
}

impl AnimationState {
    /// Background frame for this state: `0` at rest, `1..=4` while playing.
    pub fn frame(self) -> usize {
        match self {
            Self::Idle => 0,
            Self::Playing { phase } if phase < CYCLE_LENGTH => 1 + (phase / FRAME_WINDOW) as usize,
            Self::Playing { .. } => 0,
        }
    }

    pub fn is_playing(self) -> bool {
        matches!(self, Self::Playing { .. })
    }
}

/// Tap totals, shown as overlay text. Overflow wraps.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct TapCounters {
    pub touch: u32,
    pub touch_cancel: u32,
    pub tap: u32,
}

/// Owner of the tap counters and the animation state.
#[derive(Debug, Clone, Copy, Default)]
pub struct TapDriver {
    counters: TapCounters,
    state: AnimationState,
    last_touch: (i32, i32),
}

impl TapDriver {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn on_tap(&mut self, event: TapEvent) {
        self.last_touch = (event.x, event.y);

        match event.kind {
            TapKind::Touch => {
                self.counters.touch = self.counters.touch.wrapping_add(1);
                // Toggle on touch-down so a held touch does not re-trigger
                self.state = if self.armed() {
                    AnimationState::Idle
                } else {
                    AnimationState::Playing { phase: 0 }
                };
                debug!("Touch at ({}, {}), armed: {}", event.x, event.y, self.armed());
            }
            TapKind::TouchCancel => {
                self.counters.touch_cancel = self.counters.touch_cancel.wrapping_add(1);
                debug!("Touch cancelled");
            }
            TapKind::Tap => {
                self.counters.tap = self.counters.tap.wrapping_add(1);
                debug!("Tap at ({}, {})", event.x, event.y);
            }
        }
    }

    /// Frame to show on this interactive draw. Advances a playing animation
    /// by `step` and disarms it once the cycle completes.
    pub fn advance(&mut self, step: u16) -> usize {
        let frame = self.state.frame();
        if let AnimationState::Playing { phase } = self.state {
            let phase = phase.saturating_add(step);
            self.state = if phase >= CYCLE_LENGTH {
                debug!("Eye rotation finished");
                AnimationState::Idle
            } else {
                AnimationState::Playing { phase }
            };
        }
        frame
    }

    /// Whether the last touch armed the animation and it is still running.
    pub fn armed(&self) -> bool {
        self.state.is_playing()
    }

    pub fn state(&self) -> AnimationState {
        self.state
    }

    pub fn counters(&self) -> TapCounters {
        self.counters
    }

    pub fn last_touch(&self) -> (i32, i32) {
        self.last_touch
    }
}
