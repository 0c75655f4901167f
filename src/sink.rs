//! Output emulation - virtual keyboard and mouse.
//!
//! [`HidSink`] is the four-operation surface the main loop talks to.
//! [`ReportSink`] implements it on top of a [`ReportWriter`] by keeping the
//! current keyboard report and mouse buttons and writing a report whenever
//! one of them changes (or, for the mouse, whenever there is motion).
//!
//! Transport failures are logged and dropped; nothing is retried.

use crate::error::Result;
use crate::hid::mouse::BUTTON_LEFT;
use crate::hid::{KeyboardReport, MouseReport};

/// Virtual keyboard + mouse as seen by the main loop.
pub trait HidSink {
    async fn key_down(&mut self, code: u8);
    async fn key_up(&mut self, code: u8);
    /// Relative pointer motion. `(0, 0)` is a no-op.
    async fn move_by(&mut self, dx: i8, dy: i8);
    /// Left button state.
    async fn button(&mut self, pressed: bool);
}

/// Transport for encoded HID reports.
pub trait ReportWriter {
    async fn write_keyboard(&mut self, report: &KeyboardReport) -> Result<()>;
    async fn write_mouse(&mut self, report: &MouseReport) -> Result<()>;
}

/// [`HidSink`] that tracks report state and only writes on change.
pub struct ReportSink<W> {
    writer: W,
    keyboard: KeyboardReport,
    buttons: u8,
}

impl<W: ReportWriter> ReportSink<W> {
    pub fn new(writer: W) -> Self {
        Self {
            writer,
            keyboard: KeyboardReport::empty(),
            buttons: 0,
        }
    }

    /// Keys currently reported as held.
    pub fn keyboard(&self) -> &KeyboardReport {
        &self.keyboard
    }

    pub fn buttons(&self) -> u8 {
        self.buttons
    }

    pub fn writer(&self) -> &W {
        &self.writer
    }

    pub fn writer_mut(&mut self) -> &mut W {
        &mut self.writer
    }

    async fn send_keyboard(&mut self) {
        if let Err(e) = self.writer.write_keyboard(&self.keyboard).await {
            warn!("keyboard report dropped: {}", e);
        }
    }

    async fn send_mouse(&mut self, dx: i8, dy: i8) {
        let report = MouseReport::motion(self.buttons, dx, dy);
        if let Err(e) = self.writer.write_mouse(&report).await {
            warn!("mouse report dropped: {}", e);
        }
    }
}

impl<W: ReportWriter> HidSink for ReportSink<W> {
    async fn key_down(&mut self, code: u8) {
        if self.keyboard.press(code) {
            self.send_keyboard().await;
        } else if !self.keyboard.contains(code) {
            debug!("key {=u8:#x} not reported, rollover full", code);
        }
    }

    async fn key_up(&mut self, code: u8) {
        if self.keyboard.release(code) {
            self.send_keyboard().await;
        }
    }

    async fn move_by(&mut self, dx: i8, dy: i8) {
        if dx == 0 && dy == 0 {
            return;
        }
        self.send_mouse(dx, dy).await;
    }

    async fn button(&mut self, pressed: bool) {
        let buttons = if pressed {
            self.buttons | BUTTON_LEFT
        } else {
            self.buttons & !BUTTON_LEFT
        };
        if buttons != self.buttons {
            self.buttons = buttons;
            self.send_mouse(0, 0).await;
        }
    }
}
