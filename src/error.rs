//! Unified error type for tenkey.
//!
//! We avoid `alloc` - all error variants carry only fixed-size data.
//! Implements `defmt::Format` for efficient on-target logging.

use core::fmt;

/// Top-level error type used across the application.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Error {
    // GPIO
    /// Driving a column or reading a row/button pin failed.
    Pin,

    // Analog
    /// The ADC conversion failed.
    Adc,

    // Feedback
    /// The LED strip transfer failed.
    Led,

    /// I²C transaction to the display failed, or a glyph could not be drawn.
    Display,

    // USB
    /// USB stack returned an error.
    Usb,

    // Configuration
    /// The key layout does not describe the matrix.
    Layout(LayoutError),
}

/// Ways a key table can disagree with the matrix it claims to describe.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum LayoutError {
    /// A key sits outside the `COLS × ROWS` grid.
    OutOfRange { column: usize, row: usize },
    /// Two keys claim the same position.
    Duplicate { column: usize, row: usize },
    /// The table does not hold exactly one key per matrix position.
    SizeMismatch { expected: usize, found: usize },
}

// Convenience conversions

impl From<LayoutError> for Error {
    fn from(e: LayoutError) -> Self {
        Error::Layout(e)
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Pin => f.write_str("GPIO access failed"),
            Error::Adc => f.write_str("ADC conversion failed"),
            Error::Led => f.write_str("LED strip write failed"),
            Error::Display => f.write_str("display write failed"),
            Error::Usb => f.write_str("USB transfer failed"),
            Error::Layout(e) => write!(f, "invalid key layout: {e}"),
        }
    }
}

impl fmt::Display for LayoutError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LayoutError::OutOfRange { column, row } => {
                write!(f, "key ({column}, {row}) is outside the matrix")
            }
            LayoutError::Duplicate { column, row } => {
                write!(f, "key ({column}, {row}) is defined twice")
            }
            LayoutError::SizeMismatch { expected, found } => {
                write!(f, "expected {expected} keys, found {found}")
            }
        }
    }
}

/// Result alias used throughout the crate.
pub type Result<T> = core::result::Result<T, Error>;
