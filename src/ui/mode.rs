//! Display mode tracking
//!
//! The host reports ambient state, the low-bit and burn-in capabilities of
//! the panel and the interruption filter as separate events. They collapse
//! into a single [`DisplayMode`] so impossible combinations never reach the
//! renderer.

use crate::debug;

/// Rendering regime of the watch face. Exactly one is active.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DisplayMode {
    /// Full color, anti-aliased, shadows, animated second hand.
    Interactive,
    /// Monochrome background, no anti-aliasing, no shadows, no second hand.
    AmbientNormal,
    /// Solid black background, reduced color depth.
    AmbientLowBit,
    /// Solid black background, no large bright regions.
    AmbientBurnIn,
    /// Interactive with dimmed hands while do-not-disturb is active.
    Muted,
}

impl DisplayMode {
    pub fn is_ambient(self) -> bool {
        matches!(
            self,
            Self::AmbientNormal | Self::AmbientLowBit | Self::AmbientBurnIn
        )
    }

    pub fn is_interactive(self) -> bool {
        !self.is_ambient()
    }

    /// Ambient regimes that forbid any bitmap background.
    pub fn requires_black_background(self) -> bool {
        matches!(self, Self::AmbientLowBit | Self::AmbientBurnIn)
    }
}

/// Panel capabilities reported with the host properties.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct AmbientProperties {
    pub low_bit: bool,
    pub burn_in: bool,
}

impl AmbientProperties {
    /// A desaturated background only looks acceptable on full-depth panels
    /// without burn-in protection.
    pub fn allows_gray_background(self) -> bool {
        !self.low_bit && !self.burn_in
    }
}

/// Interruption filter values delivered by the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum InterruptionFilter {
    All,
    Priority,
    /// Do not disturb: hands are dimmed.
    None,
    Alarms,
    Unknown,
}

/// Owner of the display regime inputs.
#[derive(Debug, Clone, Copy, Default)]
pub struct ModeTracker {
    ambient: bool,
    properties: AmbientProperties,
    muted: bool,
}

impl ModeTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current rendering regime.
    pub fn mode(&self) -> DisplayMode {
        if self.ambient {
            if self.properties.low_bit {
                DisplayMode::AmbientLowBit
            } else if self.properties.burn_in {
                DisplayMode::AmbientBurnIn
            } else {
                DisplayMode::AmbientNormal
            }
        } else if self.muted {
            DisplayMode::Muted
        } else {
            DisplayMode::Interactive
        }
    }

    /// Whether hands are dimmed. Survives ambient transitions.
    pub fn muted(&self) -> bool {
        self.muted
    }

    pub fn properties(&self) -> AmbientProperties {
        self.properties
    }

    /// Enter or leave the ambient family. Returns whether anything changed.
    pub fn on_ambient_changed(&mut self, ambient: bool) -> bool {
        let before = self.mode();
        self.ambient = ambient;
        self.report(before)
    }

    /// Update panel capabilities, re-selecting the ambient sub-mode.
    pub fn on_properties_changed(&mut self, properties: AmbientProperties) -> bool {
        let before = self.mode();
        self.properties = properties;
        debug!(
            "Properties: low-bit = {}, burn-in = {}",
            properties.low_bit, properties.burn_in
        );
        self.report(before)
    }

    /// Toggle the muted overlay. Returns whether the flag flipped.
    pub fn on_interruption_filter_changed(&mut self, filter: InterruptionFilter) -> bool {
        let muted = filter == InterruptionFilter::None;
        if muted == self.muted {
            return false;
        }
        self.muted = muted;
        debug!("Mute mode: {}", muted);
        true
    }

    fn report(&self, before: DisplayMode) -> bool {
        let after = self.mode();
        if after != before {
            debug!("Display mode: {:?} -> {:?}", before, after);
        }
        after != before
    }
}
