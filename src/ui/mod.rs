//! Watch face core
//!
//! Everything here is independent of the display and the platform. A host
//! drives a [`WatchFace`] through its lifecycle callbacks and renders it on
//! any [`Canvas`].

use crate::system::config::WatchFaceConfig;
use crate::system::host::{Host, Resources, TimerToken};
use crate::Result;

pub mod animation;
pub mod assets;
pub mod canvas;
pub mod clock;
pub mod mode;
pub mod paint;
pub mod renderer;
pub mod scheduler;
mod smiley_watchface;

#[cfg(test)]
pub(crate) mod testing;

pub use smiley_watchface::SmileyWatchFace;

use animation::TapEvent;
use canvas::{Canvas, Rect};
use mode::{AmbientProperties, InterruptionFilter};

/// Lifecycle callbacks a host delivers to a watch face.
///
/// Callbacks run to completion one at a time. Those returning an error
/// report it to the host, which owns recovery.
pub trait WatchFace: Sized {
    type Host: Host;

    /// Create the watch face and load its assets.
    fn create(host: Self::Host, config: WatchFaceConfig) -> Result<Self>;

    /// Adopt a new surface size, rescaling the background frames.
    fn on_surface_changed(&mut self, width: i32, height: i32) -> Result<()>;

    /// Screen shape, round or square.
    fn on_apply_shape(&mut self, round: bool);

    fn on_visibility_changed(&mut self, visible: bool);

    fn on_properties_changed(&mut self, properties: AmbientProperties) -> Result<()>;

    fn on_ambient_mode_changed(&mut self, ambient: bool);

    fn on_interruption_filter_changed(&mut self, filter: InterruptionFilter);

    /// Bounds of a peeking notification card, empty when none is shown.
    fn on_peek_card_position_update(&mut self, bounds: Rect);

    /// Once-per-minute tick, the only redraw trigger in ambient mode.
    fn on_time_tick(&mut self);

    fn on_time_zone_changed(&mut self);

    fn on_tap(&mut self, event: TapEvent);

    /// A posted timer fired. Returns whether the host should draw a frame.
    fn on_timer(&mut self, token: TimerToken) -> bool;

    /// Draw one frame.
    fn on_draw<C>(&mut self, canvas: &mut C, bounds: Rect) -> Result<()>
    where
        C: Canvas<<Self::Host as Resources>::Bitmap> + ?Sized;
}
