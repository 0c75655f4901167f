//! Analog joystick as a relative pointer.
//!
//! Each axis is centered on [`JOYSTICK_CENTER`], negated and scaled down by
//! [`JOYSTICK_DIVISOR`]; anything smaller than [`JOYSTICK_DEAD_ZONE`] is
//! treated as rest. The stick is mounted rotated, so the X channel drives
//! vertical motion and the Y channel horizontal motion.

use embedded_hal::digital::InputPin;

use crate::config::{JOYSTICK_CENTER, JOYSTICK_DEAD_ZONE, JOYSTICK_DIVISOR};
use crate::error::{Error, Result};

/// One analog channel returning 16-bit-scaled readings.
pub trait AnalogInput {
    async fn read(&mut self) -> Result<u16>;
}

/// Motion and button state from one sample.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct PointerSample {
    pub dx: i8,
    pub dy: i8,
    pub button_pressed: bool,
}

impl PointerSample {
    pub fn is_still(&self) -> bool {
        self.dx == 0 && self.dy == 0
    }
}

/// Signed, scaled offset of one raw reading from center.
///
/// Division truncates toward zero.
pub fn axis_delta(raw: u16) -> i32 {
    -(raw as i32 - JOYSTICK_CENTER) / JOYSTICK_DIVISOR
}

/// Zero any delta inside the dead zone.
pub fn dead_zone(delta: i32) -> i32 {
    if delta.abs() < JOYSTICK_DEAD_ZONE {
        0
    } else {
        delta
    }
}

/// `(dx, dy)` for a pair of raw readings, axes cross-mapped.
pub fn motion(raw_x: u16, raw_y: u16) -> (i8, i8) {
    let dx = dead_zone(axis_delta(raw_y));
    let dy = dead_zone(axis_delta(raw_x));
    (clamp_i8(dx), clamp_i8(dy))
}

fn clamp_i8(v: i32) -> i8 {
    v.clamp(i8::MIN as i32, i8::MAX as i32) as i8
}

/// Two analog axes plus an active-low push button.
pub struct Joystick<X, Y, B> {
    x: X,
    y: Y,
    button: B,
}

impl<X, Y, B> Joystick<X, Y, B>
where
    X: AnalogInput,
    Y: AnalogInput,
    B: InputPin,
{
    pub fn new(x: X, y: Y, button: B) -> Self {
        Self { x, y, button }
    }

    /// Read both channels and the button once.
    pub async fn sample(&mut self) -> Result<PointerSample> {
        let raw_x = self.x.read().await?;
        let raw_y = self.y.read().await?;
        let (dx, dy) = motion(raw_x, raw_y);
        let button_pressed = self.button.is_low().map_err(|_| Error::Pin)?;
        trace!("joystick raw=({}, {}) delta=({}, {})", raw_x, raw_y, dx, dy);
        Ok(PointerSample {
            dx,
            dy,
            button_pressed,
        })
    }
}
