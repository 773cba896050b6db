//! Touch controller module for PineTime

pub use cst816s::TouchGesture;

use cst816s::CST816S;
use embassy_nrf::{
    gpio::{AnyPin, Input, Output},
    twim::{self, Twim},
};
use embassy_time::{Delay, Instant};

use smiley_watchface::ui::animation::{TapEvent, TapKind};

/// CST816S action code of a touch-down report
const ACTION_DOWN: u8 = 0;

pub struct TouchController<TWI>
where
    TWI: twim::Instance,
{
    /// Touchpad instance
    touchpad: CST816S<Twim<'static, TWI>, Input<'static, AnyPin>, Output<'static, AnyPin>>,
}

impl<TWI> TouchController<TWI>
where
    TWI: twim::Instance,
{
    /// Configure touch controller on boot
    pub fn init(
        twi: Twim<'static, TWI>,
        interrupt_pin: Input<'static, AnyPin>,
        reset_pin: Output<'static, AnyPin>,
    ) -> Self {
        let mut touchpad = CST816S::new(twi, interrupt_pin, reset_pin);
        if touchpad.setup(&mut Delay).is_err() {
            defmt::warn!("Touch controller setup failed");
        }
        Self { touchpad }
    }

    /// Check for a new touch report and translate it into a tap event
    pub fn try_event_detected(&mut self) -> Option<TapEvent> {
        let event = self.touchpad.read_one_touch_event(true)?;
        let kind = tap_kind(event.gesture, event.action)?;
        Some(TapEvent::new(
            kind,
            event.x,
            event.y,
            Instant::now().as_millis() as i64,
        ))
    }
}

/// Touch-down starts a tap, a click completes it, any other gesture
/// cancels it. Contact and lift reports without a gesture are dropped.
fn tap_kind(gesture: TouchGesture, action: u8) -> Option<TapKind> {
    match gesture {
        TouchGesture::SingleClick => Some(TapKind::Tap),
        TouchGesture::None if action == ACTION_DOWN => Some(TapKind::Touch),
        TouchGesture::None => None,
        _ => Some(TapKind::TouchCancel),
    }
}
