//! Smiley watch face
//!
//! Owns all watch face state and turns lifecycle events into state changes
//! and frame requests. Drawing itself is delegated to the [`Renderer`].

use chrono::FixedOffset;

use super::animation::{TapDriver, TapEvent};
use super::assets::AssetSet;
use super::canvas::{Canvas, Rect};
use super::clock::angles_at;
use super::mode::{AmbientProperties, DisplayMode, InterruptionFilter, ModeTracker};
use super::paint::PaintProfile;
use super::renderer::{Renderer, Scene, TextOverlay};
use super::scheduler::{FrameRequest, FrameScheduler};
use super::WatchFace;
use crate::system::config::WatchFaceConfig;
use crate::system::host::{DimensionId, Host, SubscriptionToken, TimerToken};
use crate::{debug, info, trace, warn, Error, Result};

pub struct SmileyWatchFace<H: Host> {
    host: H,
    config: WatchFaceConfig,
    modes: ModeTracker,
    paints: PaintProfile,
    assets: AssetSet<H::Bitmap>,
    taps: TapDriver,
    scheduler: FrameScheduler,
    renderer: Renderer,
    overlay: TextOverlay,
    peek_card: Rect,
    time_zone: FixedOffset,
    /// Time zone change subscription, held while visible
    subscription: Option<SubscriptionToken>,
    visible: bool,
    drawing: bool,
}

impl<H: Host> SmileyWatchFace<H> {
    pub fn host(&self) -> &H {
        &self.host
    }

    pub fn host_mut(&mut self) -> &mut H {
        &mut self.host
    }

    pub fn display_mode(&self) -> DisplayMode {
        self.modes.mode()
    }

    pub fn paints(&self) -> &PaintProfile {
        &self.paints
    }

    pub fn taps(&self) -> &TapDriver {
        &self.taps
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    pub fn time_zone(&self) -> FixedOffset {
        self.time_zone
    }

    /// Request a frame right away, if anyone can see it.
    fn invalidate(&mut self) {
        if self.visible {
            self.scheduler.request(&mut self.host, FrameRequest::Now);
        }
    }

    fn refresh_paints(&mut self) {
        self.paints = PaintProfile::new(self.modes.mode(), self.modes.muted(), &self.config);
    }

    /// Drop the time zone subscription and the pending frame timer.
    fn release(&mut self) {
        if let Some(token) = self.subscription.take() {
            self.host.unsubscribe_time_zone_changes(token);
        }
        self.scheduler.cancel(&mut self.host);
    }
}

impl<H: Host> WatchFace for SmileyWatchFace<H> {
    type Host = H;

    fn create(mut host: H, config: WatchFaceConfig) -> Result<Self> {
        let assets = AssetSet::load(&mut host)?;
        let modes = ModeTracker::new();
        let paints = PaintProfile::new(modes.mode(), modes.muted(), &config);
        let overlay = TextOverlay::new(host.dimension(DimensionId::InteractiveTextSize));
        let time_zone = host.current_time_zone();
        info!("Watch face created");

        Ok(Self {
            host,
            config,
            modes,
            paints,
            assets,
            taps: TapDriver::new(),
            scheduler: FrameScheduler::new(),
            renderer: Renderer::new(),
            overlay,
            peek_card: Rect::default(),
            time_zone,
            subscription: None,
            visible: false,
            drawing: false,
        })
    }

    fn on_surface_changed(&mut self, width: i32, height: i32) -> Result<()> {
        if width <= 0 || height <= 0 {
            warn!("Rejecting surface {}x{}", width, height);
            self.renderer.clear_surface();
            return Err(Error::SurfaceInvalid { width, height });
        }

        let surface = self.renderer.set_surface(width as u32, height as u32);
        self.assets
            .resize(&mut self.host, &surface, self.modes.properties())?;
        info!("Surface {}x{}", width, height);
        self.invalidate();
        Ok(())
    }

    fn on_apply_shape(&mut self, round: bool) {
        let x = self.host.shape_dimension(
            DimensionId::InteractiveXOffsetRound,
            DimensionId::InteractiveXOffset,
            round,
        );
        let y = self.host.shape_dimension(
            DimensionId::InteractiveYOffsetRound,
            DimensionId::InteractiveYOffset,
            round,
        );
        let text_size = self.host.shape_dimension(
            DimensionId::InteractiveTextSizeRound,
            DimensionId::InteractiveTextSize,
            round,
        );
        self.overlay.apply_shape(x, y, text_size);
        self.renderer.set_round(round);
        debug!("Shape applied, round: {}", round);
        self.invalidate();
    }

    fn on_visibility_changed(&mut self, visible: bool) {
        self.visible = visible;
        if visible {
            if self.subscription.is_none() {
                self.subscription = Some(self.host.subscribe_time_zone_changes());
            }
            // The zone may have changed while nobody was listening
            self.time_zone = self.host.current_time_zone();
            self.invalidate();
        } else {
            self.release();
        }
        debug!("Visible: {}", visible);
    }

    fn on_properties_changed(&mut self, properties: AmbientProperties) -> Result<()> {
        let changed = self.modes.on_properties_changed(properties);
        self.assets.refresh_gray(&mut self.host, properties)?;
        if changed {
            self.refresh_paints();
            self.invalidate();
        }
        Ok(())
    }

    fn on_ambient_mode_changed(&mut self, ambient: bool) {
        if self.modes.on_ambient_changed(ambient) {
            self.refresh_paints();
        }
        self.invalidate();
    }

    fn on_interruption_filter_changed(&mut self, filter: InterruptionFilter) {
        if self.modes.on_interruption_filter_changed(filter) {
            self.refresh_paints();
            self.invalidate();
        }
    }

    fn on_peek_card_position_update(&mut self, bounds: Rect) {
        self.peek_card = bounds;
        self.invalidate();
    }

    fn on_time_tick(&mut self) {
        self.invalidate();
    }

    fn on_time_zone_changed(&mut self) {
        self.time_zone = self.host.current_time_zone();
        debug!("Time zone offset {} s", self.time_zone.local_minus_utc());
        self.invalidate();
    }

    fn on_tap(&mut self, event: TapEvent) {
        self.taps.on_tap(event);
        self.invalidate();
    }

    fn on_timer(&mut self, token: TimerToken) -> bool {
        self.scheduler.on_timer_fired(token, self.drawing)
    }

    fn on_draw<C>(&mut self, canvas: &mut C, bounds: Rect) -> Result<()>
    where
        C: Canvas<H::Bitmap> + ?Sized,
    {
        trace!("Draw into {}x{}", bounds.width(), bounds.height());
        let scene = Scene {
            angles: angles_at(self.host.now_millis(), self.time_zone),
            mode: self.modes.mode(),
            paints: &self.paints,
            assets: &self.assets,
            overlay: &self.overlay,
            peek_card: self.peek_card,
            visible: self.visible,
            config: &self.config,
        };

        self.drawing = true;
        let result = self.renderer.draw(canvas, &scene, &mut self.taps);
        self.drawing = false;

        if let Some((_, request)) = result? {
            self.scheduler.request(&mut self.host, request);
        }
        Ok(())
    }
}

impl<H: Host> Drop for SmileyWatchFace<H> {
    fn drop(&mut self) {
        self.release();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ui::animation::{AnimationState, TapKind};
    use crate::ui::assets::BitmapId;
    use crate::ui::testing::{DrawOp, FakeHost, RecordingCanvas};
    use embassy_time::Duration;
    use embedded_graphics::pixelcolor::{Rgb888, RgbColor};

    type Face = SmileyWatchFace<FakeHost>;

    const BOUNDS: Rect = Rect::new(0, 0, 320, 320);

    fn face() -> Face {
        let mut face = Face::create(FakeHost::new(), WatchFaceConfig::default()).unwrap();
        face.on_surface_changed(320, 320).unwrap();
        face.on_visibility_changed(true);
        face
    }

    fn draw(face: &mut Face) -> RecordingCanvas {
        let mut canvas = RecordingCanvas::new();
        face.on_draw(&mut canvas, BOUNDS).unwrap();
        canvas
    }

    fn touch(face: &mut Face) {
        face.on_tap(TapEvent::new(TapKind::Touch, 160, 160, 0));
    }

    fn alphas(canvas: &RecordingCanvas) -> Vec<u8> {
        canvas
            .lines()
            .into_iter()
            .map(|op| match op {
                DrawOp::Line { alpha, .. } => *alpha,
                _ => unreachable!(),
            })
            .collect()
    }

    #[test]
    fn create_fails_without_every_frame() {
        let host = FakeHost::new().without_bitmap(BitmapId::Smiley2);
        let result = Face::create(host, WatchFaceConfig::default());
        assert_eq!(result.err(), Some(Error::AssetLoad(BitmapId::Smiley2)));
    }

    #[test]
    fn tap_cycle() {
        let mut face = face();
        touch(&mut face);

        let backgrounds: Vec<usize> = (0..41)
            .map(|_| draw(&mut face).background().unwrap().0)
            .collect();

        let mut expected = Vec::new();
        for frame in 1..=4 {
            expected.extend([frame; 10]);
        }
        expected.push(0);
        assert_eq!(backgrounds, expected);
        assert!(!face.taps().armed());
    }

    #[test]
    fn ambient_entry_holds_animation() {
        let mut face = face();
        touch(&mut face);
        for _ in 0..15 {
            draw(&mut face);
        }
        assert_eq!(face.taps().state(), AnimationState::Playing { phase: 75 });

        face.on_ambient_mode_changed(true);
        assert_eq!(face.display_mode(), DisplayMode::AmbientNormal);

        let canvas = draw(&mut face);
        assert_eq!(canvas.background(), Some((0, true)));
        assert_eq!(canvas.line_count(), 2);
        assert!(canvas
            .lines()
            .iter()
            .all(|op| matches!(op, DrawOp::Line { shadow: false, .. })));
        assert_eq!(face.taps().state(), AnimationState::Playing { phase: 75 });

        // Ambient waits for the time tick
        assert!(face.host().live_timers().is_empty());
    }

    #[test]
    fn mute_toggle() {
        let mut face = face();
        face.on_interruption_filter_changed(InterruptionFilter::None);
        assert_eq!(face.display_mode(), DisplayMode::Muted);
        assert_eq!(alphas(&draw(&mut face)), vec![100, 100, 80]);

        let timers = face.host().live_timers().to_vec();
        face.on_interruption_filter_changed(InterruptionFilter::None);
        assert_eq!(face.host().live_timers(), &timers[..]);

        face.on_interruption_filter_changed(InterruptionFilter::All);
        assert_eq!(face.display_mode(), DisplayMode::Interactive);
        assert_eq!(alphas(&draw(&mut face)), vec![255, 255, 255]);
    }

    #[test]
    fn visibility_holds_one_subscription() {
        let mut face = face();
        face.on_visibility_changed(true);
        assert_eq!(face.host().subscriptions().len(), 1);

        face.on_visibility_changed(false);
        assert!(face.host().subscriptions().is_empty());
        assert!(face.host().live_timers().is_empty());

        face.on_visibility_changed(true);
        assert_eq!(face.host().subscriptions().len(), 1);
    }

    #[test]
    fn hidden_face_requests_nothing() {
        let mut face = face();
        face.on_visibility_changed(false);

        touch(&mut face);
        face.on_time_tick();
        draw(&mut face);
        assert!(face.host().live_timers().is_empty());
    }

    #[test]
    fn timer_drives_frames() {
        let mut face = face();
        touch(&mut face);
        let token = face.host_mut().fire().unwrap();
        assert!(face.on_timer(token));
        assert!(!face.on_timer(token));

        draw(&mut face);
        assert_eq!(
            face.host().live_timers().last().map(|(_, delay)| *delay),
            Some(Duration::from_millis(50))
        );
    }

    #[test]
    fn invalid_surface_stops_drawing() {
        let mut face = face();
        assert_eq!(
            face.on_surface_changed(0, 320),
            Err(Error::SurfaceInvalid {
                width: 0,
                height: 320
            })
        );
        assert!(draw(&mut face).ops().is_empty());

        face.on_surface_changed(240, 240).unwrap();
        assert_eq!(draw(&mut face).bitmap_count(), 1);
    }

    #[test]
    fn time_zone_change_moves_hands() {
        let mut face = face();
        // 12:00 UTC
        assert_eq!(draw(&mut face).ops()[4], DrawOp::Rotate(0.0));

        face.host_mut()
            .set_time_zone(FixedOffset::east_opt(3 * 3600).unwrap());
        face.on_time_zone_changed();
        assert_eq!(draw(&mut face).ops()[4], DrawOp::Rotate(90.0));
    }

    #[test]
    fn zone_is_refreshed_when_shown() {
        let mut face = face();
        face.on_visibility_changed(false);
        face.host_mut()
            .set_time_zone(FixedOffset::west_opt(3600).unwrap());
        face.on_visibility_changed(true);
        assert_eq!(face.time_zone(), FixedOffset::west_opt(3600).unwrap());
    }

    #[test]
    fn peek_card_backing_only_in_ambient() {
        let mut face = face();
        let card = Rect::new(0, 240, 320, 320);
        face.on_peek_card_position_update(card);
        assert!(!draw(&mut face).ops().contains(&DrawOp::Rect(card)));

        face.on_ambient_mode_changed(true);
        assert_eq!(draw(&mut face).ops().last(), Some(&DrawOp::Rect(card)));
    }

    #[test]
    fn low_bit_drops_gray_frame() {
        let mut face = face();
        face.on_properties_changed(AmbientProperties {
            low_bit: true,
            burn_in: false,
        })
        .unwrap();
        face.on_ambient_mode_changed(true);
        assert_eq!(face.display_mode(), DisplayMode::AmbientLowBit);

        let canvas = draw(&mut face);
        assert_eq!(canvas.ops()[0], DrawOp::Fill(Rgb888::BLACK));
        assert_eq!(canvas.bitmap_count(), 0);
    }

    #[test]
    fn shape_moves_overlay() {
        let mut face = face();
        face.on_apply_shape(true);
        assert_eq!(draw(&mut face).text_origins(), vec![(40.0, 80.0), (40.0, 96.0)]);
    }

    #[test]
    fn draw_failure_reaches_host() {
        let mut face = face();
        let mut canvas = RecordingCanvas::failing();
        assert_eq!(face.on_draw(&mut canvas, BOUNDS), Err(Error::DrawPrimitive));
        assert!(!face.drawing);
    }

    #[test]
    fn release_frees_host_resources() {
        let mut face = face();
        touch(&mut face);
        assert_eq!(face.host().subscriptions().len(), 1);
        assert_eq!(face.host().live_timers().len(), 1);

        // Also what dropping the face does
        face.release();
        assert!(face.host().subscriptions().is_empty());
        assert!(face.host().live_timers().is_empty());
    }
}
