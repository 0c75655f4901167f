//! SSD1306 OLED display wrapper.

use ssd1306::mode::BufferedGraphicsMode;
use ssd1306::prelude::*;
use ssd1306::I2CDisplayInterface;
use ssd1306::Ssd1306;

use super::Present;
use crate::config::DISPLAY_I2C_ADDR;
use crate::error::{Error, Result};

/// Type alias for the concrete display driver.
///
/// Generic over the I²C implementation so callers pass in their HAL's
/// I²C peripheral.
pub type Display<I2C> =
    Ssd1306<I2CInterface<I2C>, DisplaySize128x64, BufferedGraphicsMode<DisplaySize128x64>>;

/// Initialise the SSD1306 display and clear the screen.
///
/// Fails if the panel does not answer at [`DISPLAY_I2C_ADDR`].
pub fn init<I2C>(i2c: I2C, rotation: DisplayRotation) -> Result<Display<I2C>>
where
    I2C: embedded_hal::i2c::I2c,
{
    let interface = I2CDisplayInterface::new_custom_address(i2c, DISPLAY_I2C_ADDR);
    let mut display =
        Ssd1306::new(interface, DisplaySize128x64, rotation).into_buffered_graphics_mode();
    display.init().map_err(|_| Error::Display)?;
    display.clear_buffer();
    display.flush().map_err(|_| Error::Display)?;
    Ok(display)
}

impl<I2C> Present for Display<I2C>
where
    I2C: embedded_hal::i2c::I2c,
{
    fn present(&mut self) -> Result<()> {
        self.flush().map_err(|_| Error::Display)
    }
}
