//! Column-driven key matrix scanner.
//!
//! One column is driven high at a time while every other column is held
//! low; after a short settle delay the row inputs (pulled down) are read and
//! a high row means the key at `(column, row)` is closed. The matrix has no
//! diodes, so two columns must never be active together.
//!
//! There is no software debounce. A bouncing contact can produce a
//! press/release pair across consecutive scans.

use embedded_hal::digital::{InputPin, OutputPin};
use embedded_hal_async::delay::DelayNs;

use crate::config::SETTLE_DELAY_MS;
use crate::error::{Error, Result};

/// What happened to a key between two scans.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Transition {
    Pressed,
    Released,
    Unchanged,
}

impl Transition {
    fn between(was_pressed: bool, is_pressed: bool) -> Self {
        match (was_pressed, is_pressed) {
            (false, true) => Transition::Pressed,
            (true, false) => Transition::Released,
            _ => Transition::Unchanged,
        }
    }

    pub fn is_change(&self) -> bool {
        *self != Transition::Unchanged
    }
}

/// Matrix is the physical layout of `COLS` driven lines over `ROWS` sensed lines.
pub struct Matrix<In, Out, D, const COLS: usize, const ROWS: usize> {
    /// Row (input) pins, pulled down
    rows: [In; ROWS],
    /// Column (output) pins
    columns: [Out; COLS],
    /// Settle delay provider
    delay: D,
    /// Key state as of the last scan, `[column][row]`
    pressed: [[bool; ROWS]; COLS],
}

impl<In, Out, D, const COLS: usize, const ROWS: usize> Matrix<In, Out, D, COLS, ROWS>
where
    In: InputPin,
    Out: OutputPin,
    D: DelayNs,
{
    /// Take ownership of the pins and drive every column low.
    pub fn new(rows: [In; ROWS], mut columns: [Out; COLS], delay: D) -> Result<Self> {
        for column in columns.iter_mut() {
            column.set_low().map_err(|_| Error::Pin)?;
        }
        Ok(Self {
            rows,
            columns,
            delay,
            pressed: [[false; ROWS]; COLS],
        })
    }

    /// Activate `column`, sample every row, deactivate it again.
    ///
    /// The column is driven low before this returns even if a row read
    /// fails, so the next column activation never overlaps this one.
    pub async fn scan_column(&mut self, column: usize) -> Result<[Transition; ROWS]> {
        let Some(out) = self.columns.get_mut(column) else {
            return Err(Error::Pin);
        };

        out.set_high().map_err(|_| Error::Pin)?;
        self.delay.delay_ms(SETTLE_DELAY_MS).await;

        let mut levels = [false; ROWS];
        let mut read = Ok(());
        for (level, pin) in levels.iter_mut().zip(self.rows.iter_mut()) {
            match pin.is_high() {
                Ok(high) => *level = high,
                Err(_) => {
                    read = Err(Error::Pin);
                    break;
                }
            }
        }

        out.set_low().map_err(|_| Error::Pin)?;
        read?;

        let state = &mut self.pressed[column];
        let mut transitions = [Transition::Unchanged; ROWS];
        for ((transition, was), now) in transitions.iter_mut().zip(state.iter_mut()).zip(levels) {
            *transition = Transition::between(*was, now);
            *was = now;
        }
        Ok(transitions)
    }

    /// Full scan, columns low to high.
    pub async fn scan(&mut self) -> Result<[[Transition; ROWS]; COLS]> {
        let mut grid = [[Transition::Unchanged; ROWS]; COLS];
        for (column, transitions) in grid.iter_mut().enumerate() {
            *transitions = self.scan_column(column).await?;
        }
        Ok(grid)
    }

    /// State of `(column, row)` as of the last scan.
    pub fn is_pressed(&self, column: usize, row: usize) -> bool {
        self.pressed
            .get(column)
            .and_then(|rows| rows.get(row))
            .copied()
            .unwrap_or(false)
    }

    /// Number of keys currently held.
    #[cfg(test)]
    pub fn pressed_count(&self) -> usize {
        self.pressed.iter().flatten().filter(|&&p| p).count()
    }
}
