//! PineTime peripherals used by the watch face

pub(super) mod backlight;
pub(super) mod display;
pub(super) mod touch;
