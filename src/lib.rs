//! Smiley analog watch face
//!
//! Hour, minute and second hands over an animated smiley background. A
//! touch sets the smiley's eyes rolling for a short cycle. The face adapts
//! to interactive, ambient (normal, low-bit, burn-in) and muted display
//! regimes.
//!
//! The core in [`ui`] is host agnostic: a host delivers lifecycle events to
//! [`ui::SmileyWatchFace`] and provides drawing, resource, time and timer
//! services through the traits in [`ui::canvas`] and [`system::host`]. The
//! [`graphics`] module hosts the core on any embedded-graphics display.

#![cfg_attr(not(test), no_std)]

pub mod error;
pub mod graphics;
pub mod system;
pub mod ui;

pub use error::{Error, Result};

// Logging goes through `log` unless the firmware selects `defmt`
cfg_if::cfg_if! {
    if #[cfg(feature = "defmt")] {
        pub(crate) use defmt::{debug, info, trace, warn};
    } else {
        pub(crate) use log::{debug, info, trace, warn};
    }
}
