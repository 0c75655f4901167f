//! WS2812 strip driven by the RP2040 PIO.

use embassy_rp::pio::Instance;
use embassy_rp::pio_programs::ws2812::PioWs2812;
use smart_leds::RGB8;

use super::{unpack_rgb, LedStrip};
use crate::error::Result;

/// `N` WS2812 LEDs on one PIO state machine.
pub struct Ws2812Strip<'d, P: Instance, const S: usize, const N: usize> {
    ws: PioWs2812<'d, P, S, N>,
}

impl<'d, P: Instance, const S: usize, const N: usize> Ws2812Strip<'d, P, S, N> {
    pub fn new(ws: PioWs2812<'d, P, S, N>) -> Self {
        Self { ws }
    }
}

impl<P: Instance, const S: usize, const N: usize> LedStrip<N> for Ws2812Strip<'_, P, S, N> {
    async fn write(&mut self, colors: &[u32; N]) -> Result<()> {
        let mut rgb = [RGB8::default(); N];
        for (out, &color) in rgb.iter_mut().zip(colors.iter()) {
            let [r, g, b] = unpack_rgb(color);
            *out = RGB8::new(r, g, b);
        }
        self.ws.write(&rgb).await;
        Ok(())
    }
}
