//! Display control module for PineTime

use display_interface_spi::SPIInterface;
use embassy_nrf::{
    gpio::{AnyPin, Output},
    peripherals::SPI2,
    spim::Spim,
};
use embassy_time::Delay;
use embedded_graphics::{pixelcolor::Rgb565, prelude::*};
use mipidsi::{models::ST7789, Builder, Orientation};

use smiley_watchface::ui::canvas::Rect;

const LCD_W: u16 = 240;
const LCD_H: u16 = 240;

/// The ST7789 panel behind its SPI interface.
pub type Lcd = mipidsi::Display<
    SPIInterface<Spim<'static, SPI2>, Output<'static, AnyPin>, Output<'static, AnyPin>>,
    ST7789,
    Output<'static, AnyPin>,
>;

pub struct Display {
    lcd: Lcd,
}

impl Display {
    /// Configure the panel on boot. `None` if the controller did not
    /// respond to initialization.
    pub fn init(
        spim: Spim<'static, SPI2>,
        cs: Output<'static, AnyPin>,
        dc: Output<'static, AnyPin>,
        rst: Output<'static, AnyPin>,
    ) -> Option<Self> {
        let lcd = Builder::st7789(SPIInterface::new(spim, dc, cs))
            .with_display_size(LCD_W, LCD_H)
            .with_orientation(Orientation::Portrait(false))
            .init(&mut Delay, Some(rst))
            .ok()?;

        let mut display = Self { lcd };
        if display.lcd.clear(Rgb565::BLACK).is_err() {
            defmt::warn!("Display could not be cleared");
        }
        Some(display)
    }

    /// Panel size in pixels
    pub fn size(&self) -> (i32, i32) {
        (LCD_W as i32, LCD_H as i32)
    }

    pub fn bounds(&self) -> Rect {
        Rect::new(0, 0, LCD_W as i32, LCD_H as i32)
    }

    /// Draw target for the watch face canvas
    pub fn lcd_mut(&mut self) -> &mut Lcd {
        &mut self.lcd
    }
}
