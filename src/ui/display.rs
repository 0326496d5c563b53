//! SSD1306 OLED time readout.

use embedded_graphics::mono_font::ascii::{FONT_10X20, FONT_6X10};
use embedded_graphics::mono_font::{MonoFont, MonoTextStyle, MonoTextStyleBuilder};
use embedded_graphics::pixelcolor::BinaryColor;
use embedded_graphics::prelude::*;
use embedded_graphics::text::Text;
use rotary_timer::config::DISPLAY_I2C_ADDRESS;
use rotary_timer::hal::DisplayPresenter;
use rotary_timer::{format_mm_ss, Error};
use ssd1306::mode::BufferedGraphicsMode;
use ssd1306::prelude::*;
use ssd1306::I2CDisplayInterface;
use ssd1306::Ssd1306;

/// Type alias for the concrete display driver.
///
/// Generic over the I²C implementation so callers pass in their HAL's
/// I²C peripheral.
pub type Display<I2C> =
    Ssd1306<I2CInterface<I2C>, DisplaySize128x64, BufferedGraphicsMode<DisplaySize128x64>>;

/// Initialise the SSD1306 display and clear the screen.
///
/// Fails when the panel does not answer; the firmware cannot run without it.
pub fn init<I2C>(i2c: I2C) -> Result<Display<I2C>, Error>
where
    I2C: embedded_hal::i2c::I2c,
{
    let interface = I2CDisplayInterface::new_custom_address(i2c, DISPLAY_I2C_ADDRESS);
    let mut display = Ssd1306::new(interface, DisplaySize128x64, DisplayRotation::Rotate0)
        .into_buffered_graphics_mode();
    display.init().map_err(|_| Error::DisplayInit)?;
    display.clear_buffer();
    display.flush().map_err(|_| Error::DisplayInit)?;
    Ok(display)
}

fn text_style(font: &'static MonoFont<'static>) -> MonoTextStyle<'static, BinaryColor> {
    MonoTextStyleBuilder::new()
        .font(font)
        .text_color(BinaryColor::On)
        .build()
}

/// Renders "Timer" and a large `MM:SS`.
pub struct OledPresenter<I2C> {
    display: Display<I2C>,
}

impl<I2C> OledPresenter<I2C>
where
    I2C: embedded_hal::i2c::I2c,
{
    pub fn new(display: Display<I2C>) -> Self {
        Self { display }
    }

    fn draw(&mut self, remaining_secs: u32) -> Result<(), Error> {
        self.display.clear_buffer();

        let _ = Text::new("Timer", Point::new(5, 24), text_style(&FONT_6X10)).draw(&mut self.display);

        let time = format_mm_ss(remaining_secs);
        let _ = Text::new(time.as_str(), Point::new(5, 56), text_style(&FONT_10X20))
            .draw(&mut self.display);

        self.display.flush().map_err(|_| Error::DisplayFlush)
    }
}

impl<I2C> DisplayPresenter for OledPresenter<I2C>
where
    I2C: embedded_hal::i2c::I2c,
{
    fn render(&mut self, remaining_secs: u32) {
        if let Err(e) = self.draw(remaining_secs) {
            defmt::warn!("Display: {}", e);
        }
    }
}
