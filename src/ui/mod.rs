//! User feedback - per-key LEDs and the OLED glyph.
//!
//! ## Components
//!
//! - **LEDs**: one WS2812 per key, colours kept in a [`LedBuffer`] and
//!   flushed once per loop through an [`LedStrip`]
//! - **Display**: SSD1306 128×64 OLED via I²C, used in portrait orientation;
//!   the [`GlyphRenderer`] shows the glyph of the last pressed key

#[cfg(feature = "embedded")]
pub mod display;
#[cfg(feature = "embedded")]
pub mod led_strip;
pub mod text;

use embedded_graphics::pixelcolor::BinaryColor;
use embedded_graphics::prelude::*;
use u8g2_fonts::fonts;
use u8g2_fonts::types::{FontColor, VerticalPosition};
use u8g2_fonts::FontRenderer;

use crate::config::GLYPH_ORIGIN;
use crate::error::{Error, Result};

/// A frame buffer that can be pushed to the panel.
pub trait Present {
    fn present(&mut self) -> Result<()>;
}

/// Sink for a whole strip of packed `0x00RRGGBB` colours.
pub trait LedStrip<const N: usize> {
    /// Transmit every LED in one transfer.
    async fn write(&mut self, colors: &[u32; N]) -> Result<()>;
}

/// Split a packed `0x00RRGGBB` colour into `[r, g, b]`.
pub const fn unpack_rgb(color: u32) -> [u8; 3] {
    [(color >> 16) as u8, (color >> 8) as u8, color as u8]
}

/// Current colour of every key, in strip order.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LedBuffer<const N: usize> {
    colors: [u32; N],
}

impl<const N: usize> LedBuffer<N> {
    pub const fn new(colors: [u32; N]) -> Self {
        Self { colors }
    }

    /// Set LED `index`, returning whether the colour changed.
    ///
    /// Out-of-range indices are ignored.
    pub fn set(&mut self, index: usize, color: u32) -> bool {
        match self.colors.get_mut(index) {
            Some(slot) if *slot != color => {
                *slot = color;
                true
            }
            _ => false,
        }
    }

    pub fn get(&self, index: usize) -> Option<u32> {
        self.colors.get(index).copied()
    }

    pub fn colors(&self) -> &[u32; N] {
        &self.colors
    }

    pub const fn len(&self) -> usize {
        N
    }

    pub const fn is_empty(&self) -> bool {
        N == 0
    }

    /// Flush the whole buffer, changed or not.
    pub async fn flush<S: LedStrip<N>>(&self, strip: &mut S) -> Result<()> {
        strip.write(&self.colors).await
    }
}

/// Full-screen single-glyph renderer.
pub struct GlyphRenderer {
    font: FontRenderer,
    origin: Point,
}

impl Default for GlyphRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl GlyphRenderer {
    pub fn new() -> Self {
        Self {
            font: FontRenderer::new::<fonts::u8g2_font_logisoso58_tr>(),
            origin: Point::new(GLYPH_ORIGIN.0, GLYPH_ORIGIN.1),
        }
    }

    /// Clear the frame, draw `glyph` at the baseline origin and present it.
    pub fn show<D>(&self, display: &mut D, glyph: &str) -> Result<()>
    where
        D: DrawTarget<Color = BinaryColor> + Present,
    {
        display.clear(BinaryColor::Off).map_err(|_| Error::Display)?;
        self.font
            .render(
                glyph,
                self.origin,
                VerticalPosition::Baseline,
                FontColor::Transparent(BinaryColor::On),
                display,
            )
            .map_err(|_| Error::Display)?;
        display.present()
    }
}

#[cfg(test)]
pub(crate) mod testing {
    use core::convert::Infallible;

    use embedded_graphics::mock_display::MockDisplay;
    use embedded_graphics::pixelcolor::BinaryColor;
    use embedded_graphics::prelude::*;

    use super::Present;
    use crate::error::Result;

    /// `MockDisplay` that counts presents and tolerates clipping/overdraw.
    pub struct TestFrame {
        pub display: MockDisplay<BinaryColor>,
        pub presents: usize,
    }

    impl TestFrame {
        pub fn new() -> Self {
            let mut display = MockDisplay::new();
            display.set_allow_out_of_bounds_drawing(true);
            display.set_allow_overdraw(true);
            Self {
                display,
                presents: 0,
            }
        }

        pub fn lit_pixels(&self) -> usize {
            self.display
                .bounding_box()
                .points()
                .filter(|p| self.display.get_pixel(*p) == Some(BinaryColor::On))
                .count()
        }
    }

    impl OriginDimensions for TestFrame {
        fn size(&self) -> Size {
            self.display.size()
        }
    }

    impl DrawTarget for TestFrame {
        type Color = BinaryColor;
        type Error = Infallible;

        fn draw_iter<I>(&mut self, pixels: I) -> core::result::Result<(), Self::Error>
        where
            I: IntoIterator<Item = Pixel<Self::Color>>,
        {
            self.display.draw_iter(pixels)
        }
    }

    impl Present for TestFrame {
        fn present(&mut self) -> Result<()> {
            self.presents += 1;
            Ok(())
        }
    }
}
