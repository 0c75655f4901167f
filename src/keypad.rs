//! Main loop context.
//!
//! [`Keypad`] owns every hardware handle the firmware touches and runs one
//! loop iteration per [`Keypad::tick`]:
//!
//! 1. flush the LED buffer (always, changed or not)
//! 2. scan the matrix column by column; after each column, apply the
//!    feedback for every key that changed: LED colour, HID key event and,
//!    on press, a glyph redraw
//! 3. sample the joystick and forward motion and button state
//!
//! A failing step is logged and the rest of the iteration still runs.

use embedded_graphics::pixelcolor::BinaryColor;
use embedded_graphics::prelude::DrawTarget;
use embedded_hal::digital::{InputPin, OutputPin};
use embedded_hal_async::delay::DelayNs;
use heapless::Vec;

use crate::config::{IDLE_GLYPH, REDRAW_ON_RELEASE};
use crate::error::{Error, LayoutError, Result};
use crate::keymap::{KeyConfig, KeyPos, Layout};
use crate::matrix::{Matrix, Transition};
use crate::pointer::{AnalogInput, Joystick, PointerSample};
use crate::sink::HidSink;
use crate::ui::{GlyphRenderer, LedBuffer, LedStrip, Present};

/// Behaviour switches.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Options {
    /// Redraw `idle_glyph` when a key is released.
    pub redraw_on_release: bool,
    /// Glyph shown at startup.
    pub idle_glyph: &'static str,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            redraw_on_release: REDRAW_ON_RELEASE,
            idle_glyph: IDLE_GLYPH,
        }
    }
}

/// A key that changed state during a tick.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct KeyEvent {
    pub pos: KeyPos,
    pub keycode: u8,
    pub transition: Transition,
}

/// What one iteration did.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TickReport<const N: usize> {
    /// Key transitions in scan order.
    pub changes: Vec<KeyEvent, N>,
    /// `None` when the joystick could not be read.
    pub pointer: Option<PointerSample>,
    /// First failure of the iteration, if any.
    pub error: Option<Error>,
}

impl<const N: usize> TickReport<N> {
    fn new() -> Self {
        Self {
            changes: Vec::new(),
            pointer: None,
            error: None,
        }
    }

    fn note(&mut self, result: Result<()>) {
        if let Err(e) = result {
            self.error.get_or_insert(e);
        }
    }
}

/// Hardware handles owned by a [`Keypad`].
pub struct Parts<M, J, L, G, S> {
    pub matrix: M,
    pub joystick: J,
    pub strip: L,
    pub display: G,
    pub sink: S,
}

/// The keypad: matrix, joystick, LEDs, display and HID sink in one context.
pub struct Keypad<In, Out, D, X, Y, B, L, G, S, const COLS: usize, const ROWS: usize, const N: usize>
{
    matrix: Matrix<In, Out, D, COLS, ROWS>,
    joystick: Joystick<X, Y, B>,
    layout: Layout<N>,
    leds: LedBuffer<N>,
    strip: L,
    display: G,
    renderer: GlyphRenderer,
    sink: S,
    options: Options,
}

impl<In, Out, D, X, Y, B, L, G, S, const COLS: usize, const ROWS: usize, const N: usize>
    Keypad<In, Out, D, X, Y, B, L, G, S, COLS, ROWS, N>
where
    In: InputPin,
    Out: OutputPin,
    D: DelayNs,
    X: AnalogInput,
    Y: AnalogInput,
    B: InputPin,
    L: LedStrip<N>,
    G: DrawTarget<Color = BinaryColor> + Present,
    S: HidSink,
{
    /// Assemble the context. The layout must describe exactly `COLS × ROWS` keys.
    pub fn new(
        parts: Parts<Matrix<In, Out, D, COLS, ROWS>, Joystick<X, Y, B>, L, G, S>,
        layout: Layout<N>,
        options: Options,
    ) -> Result<Self> {
        if layout.columns() != COLS || layout.rows() != ROWS {
            return Err(Error::Layout(LayoutError::SizeMismatch {
                expected: COLS * ROWS,
                found: layout.columns() * layout.rows(),
            }));
        }
        let leds = LedBuffer::new(layout.idle_colors());
        Ok(Self {
            matrix: parts.matrix,
            joystick: parts.joystick,
            layout,
            leds,
            strip: parts.strip,
            display: parts.display,
            renderer: GlyphRenderer::new(),
            sink: parts.sink,
            options,
        })
    }

    /// Show the idle glyph and light every key in its idle colour.
    pub async fn start(&mut self) -> Result<()> {
        self.renderer.show(&mut self.display, self.options.idle_glyph)?;
        self.leds.flush(&mut self.strip).await?;
        info!("keypad ready: {}x{} keys", COLS, ROWS);
        Ok(())
    }

    /// Run forever.
    pub async fn run(&mut self) -> ! {
        loop {
            self.tick().await;
        }
    }

    /// One loop iteration.
    pub async fn tick(&mut self) -> TickReport<N> {
        let mut report = TickReport::new();

        if let Err(e) = self.leds.flush(&mut self.strip).await {
            warn!("LED refresh failed: {}", e);
            report.note(Err(e));
        }

        for column in 0..COLS {
            let transitions = match self.matrix.scan_column(column).await {
                Ok(t) => t,
                Err(e) => {
                    warn!("scan of column {} failed: {}", column, e);
                    report.note(Err(e));
                    continue;
                }
            };
            for (row, transition) in transitions.into_iter().enumerate() {
                if !transition.is_change() {
                    continue;
                }
                let Some(key) = self.layout.key(column, row).copied() else {
                    continue;
                };
                let result = self.apply(&key, transition).await;
                report.note(result);
                let _ = report.changes.push(KeyEvent {
                    pos: key.pos(),
                    keycode: key.keycode,
                    transition,
                });
            }
        }

        match self.joystick.sample().await {
            Ok(sample) => {
                self.sink.move_by(sample.dx, sample.dy).await;
                self.sink.button(sample.button_pressed).await;
                report.pointer = Some(sample);
            }
            Err(e) => {
                warn!("joystick sample failed: {}", e);
                report.note(Err(e));
            }
        }

        report
    }

    async fn apply(&mut self, key: &KeyConfig, transition: Transition) -> Result<()> {
        let index = self.layout.led_index(key.column, key.row);
        match transition {
            Transition::Pressed => {
                debug!("key ({}, {}) down", key.column, key.row);
                self.sink.key_down(key.keycode).await;
                self.leds.set(index, key.active_color);
                self.redraw(key.glyph)
            }
            Transition::Released => {
                debug!("key ({}, {}) up", key.column, key.row);
                self.sink.key_up(key.keycode).await;
                self.leds.set(index, key.idle_color);
                if self.options.redraw_on_release {
                    self.redraw(self.options.idle_glyph)
                } else {
                    Ok(())
                }
            }
            Transition::Unchanged => Ok(()),
        }
    }

    fn redraw(&mut self, glyph: &str) -> Result<()> {
        self.renderer.show(&mut self.display, glyph).inspect_err(|e| {
            warn!("glyph redraw failed: {}", e);
        })
    }

    pub fn layout(&self) -> &Layout<N> {
        &self.layout
    }

    pub fn leds(&self) -> &LedBuffer<N> {
        &self.leds
    }

    pub fn matrix(&self) -> &Matrix<In, Out, D, COLS, ROWS> {
        &self.matrix
    }

    pub fn strip(&self) -> &L {
        &self.strip
    }

    pub fn display(&self) -> &G {
        &self.display
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }

    pub fn options(&self) -> &Options {
        &self.options
    }
}
