//! Key table - one record per matrix position.
//!
//! Each key carries everything the main loop needs to react to it: the HID
//! usage it emits, the glyph shown on the OLED while it is pressed and its
//! two LED colours. A [`Layout`] is validated once at startup so the rest of
//! the firmware can index it by `(column, row)` without further checks.

use crate::config::{ACTIVE_COLOR, IDLE_COLOR, MATRIX_COLS, MATRIX_ROWS};
use crate::error::LayoutError;
use crate::hid::keycode::*;

/// Position of a key in the matrix.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct KeyPos {
    pub column: usize,
    pub row: usize,
}

/// Static description of one key.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct KeyConfig {
    pub column: usize,
    pub row: usize,
    /// HID usage code sent while the key is held.
    pub keycode: u8,
    /// Glyph drawn on the display when the key goes down.
    pub glyph: &'static str,
    /// LED colour while released.
    pub idle_color: u32,
    /// LED colour while held.
    pub active_color: u32,
}

impl KeyConfig {
    /// A key with the default white/black LED colours.
    pub const fn new(column: usize, row: usize, keycode: u8, glyph: &'static str) -> Self {
        Self {
            column,
            row,
            keycode,
            glyph,
            idle_color: IDLE_COLOR,
            active_color: ACTIVE_COLOR,
        }
    }

    pub const fn with_colors(mut self, idle_color: u32, active_color: u32) -> Self {
        self.idle_color = idle_color;
        self.active_color = active_color;
        self
    }

    pub const fn pos(&self) -> KeyPos {
        KeyPos {
            column: self.column,
            row: self.row,
        }
    }
}

/// A validated table of `N` keys covering a `columns × rows` matrix.
///
/// Keys are stored in LED strip order (`column * rows + row`), so the key at
/// index `i` owns LED `i`.
#[derive(Clone, Debug)]
pub struct Layout<const N: usize> {
    keys: [KeyConfig; N],
    columns: usize,
    rows: usize,
}

impl<const N: usize> Layout<N> {
    /// Validate `keys` against a `columns × rows` matrix.
    pub fn new(mut keys: [KeyConfig; N], columns: usize, rows: usize) -> Result<Self, LayoutError> {
        if columns * rows != N {
            return Err(LayoutError::SizeMismatch {
                expected: columns * rows,
                found: N,
            });
        }
        for (i, key) in keys.iter().enumerate() {
            if key.column >= columns || key.row >= rows {
                return Err(LayoutError::OutOfRange {
                    column: key.column,
                    row: key.row,
                });
            }
            if keys[..i].iter().any(|k| k.pos() == key.pos()) {
                return Err(LayoutError::Duplicate {
                    column: key.column,
                    row: key.row,
                });
            }
        }
        keys.sort_unstable_by_key(|k| k.column * rows + k.row);
        Ok(Self { keys, columns, rows })
    }

    pub fn columns(&self) -> usize {
        self.columns
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    /// LED strip index of `(column, row)`.
    pub fn led_index(&self, column: usize, row: usize) -> usize {
        column * self.rows + row
    }

    /// Key at `(column, row)`, or `None` outside the matrix.
    pub fn key(&self, column: usize, row: usize) -> Option<&KeyConfig> {
        if column >= self.columns || row >= self.rows {
            return None;
        }
        self.keys.get(self.led_index(column, row))
    }

    /// Keys in LED strip order.
    pub fn keys(&self) -> &[KeyConfig; N] {
        &self.keys
    }

    /// Idle colour of every key, in strip order.
    pub fn idle_colors(&self) -> [u32; N] {
        self.keys.map(|k| k.idle_color)
    }
}

// Built-in tables

/// Number pad: backspace / 0 / enter on the first column, then 1-9.
pub const NUMPAD: [KeyConfig; MATRIX_COLS * MATRIX_ROWS] = [
    KeyConfig::new(0, 0, KEY_BACKSPACE, "A"),
    KeyConfig::new(0, 1, KEY_0, "B"),
    KeyConfig::new(0, 2, KEY_ENTER, "C"),
    KeyConfig::new(1, 0, KEY_1, "D"),
    KeyConfig::new(1, 1, KEY_2, "E"),
    KeyConfig::new(1, 2, KEY_3, "F"),
    KeyConfig::new(2, 0, KEY_4, "G"),
    KeyConfig::new(2, 1, KEY_5, "I"),
    KeyConfig::new(2, 2, KEY_6, "J"),
    KeyConfig::new(3, 0, KEY_7, "M"),
    KeyConfig::new(3, 1, KEY_8, "N"),
    KeyConfig::new(3, 2, KEY_9, "P"),
];

/// Twelve letter keys, `A` through `L`, same glyphs as [`NUMPAD`].
pub const LETTERS: [KeyConfig; MATRIX_COLS * MATRIX_ROWS] = [
    KeyConfig::new(0, 0, KEY_A, "A"),
    KeyConfig::new(0, 1, KEY_B, "B"),
    KeyConfig::new(0, 2, KEY_C, "C"),
    KeyConfig::new(1, 0, KEY_D, "D"),
    KeyConfig::new(1, 1, KEY_E, "E"),
    KeyConfig::new(1, 2, KEY_F, "F"),
    KeyConfig::new(2, 0, KEY_G, "G"),
    KeyConfig::new(2, 1, KEY_H, "I"),
    KeyConfig::new(2, 2, KEY_I, "J"),
    KeyConfig::new(3, 0, KEY_J, "M"),
    KeyConfig::new(3, 1, KEY_K, "N"),
    KeyConfig::new(3, 2, KEY_L, "P"),
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn numpad_is_a_valid_layout() {
        let layout = Layout::new(NUMPAD, MATRIX_COLS, MATRIX_ROWS).unwrap();
        assert_eq!(layout.key(0, 0).unwrap().keycode, KEY_BACKSPACE);
        assert_eq!(layout.key(0, 1).unwrap().keycode, KEY_0);
        assert_eq!(layout.key(3, 2).unwrap().keycode, KEY_9);
        assert_eq!(layout.key(2, 1).unwrap().glyph, "I");
    }

    #[test]
    fn letters_is_a_valid_layout() {
        let layout = Layout::new(LETTERS, MATRIX_COLS, MATRIX_ROWS).unwrap();
        let codes: Vec<u8> = layout.keys().iter().map(|k| k.keycode).collect();
        assert_eq!(codes[0], KEY_A);
        assert_eq!(codes[11], KEY_L);
    }

    #[test]
    fn keys_are_stored_in_strip_order() {
        let mut shuffled = NUMPAD;
        shuffled.reverse();
        let layout = Layout::new(shuffled, MATRIX_COLS, MATRIX_ROWS).unwrap();
        for (i, key) in layout.keys().iter().enumerate() {
            assert_eq!(layout.led_index(key.column, key.row), i);
        }
        assert_eq!(layout.keys()[3].keycode, KEY_1);
    }

    #[test]
    fn led_index_is_column_major() {
        let layout = Layout::new(NUMPAD, MATRIX_COLS, MATRIX_ROWS).unwrap();
        assert_eq!(layout.led_index(0, 0), 0);
        assert_eq!(layout.led_index(0, 2), 2);
        assert_eq!(layout.led_index(1, 0), 3);
        assert_eq!(layout.led_index(3, 2), 11);
    }

    #[test]
    fn key_outside_matrix_is_none() {
        let layout = Layout::new(NUMPAD, MATRIX_COLS, MATRIX_ROWS).unwrap();
        assert!(layout.key(4, 0).is_none());
        assert!(layout.key(0, 3).is_none());
    }

    #[test]
    fn size_mismatch_is_rejected() {
        let err = Layout::new(NUMPAD, 3, 3).unwrap_err();
        assert_eq!(
            err,
            LayoutError::SizeMismatch {
                expected: 9,
                found: 12
            }
        );
    }

    #[test]
    fn out_of_range_key_is_rejected() {
        let mut keys = NUMPAD;
        keys[4] = KeyConfig::new(1, 3, KEY_2, "E");
        let err = Layout::new(keys, MATRIX_COLS, MATRIX_ROWS).unwrap_err();
        assert_eq!(err, LayoutError::OutOfRange { column: 1, row: 3 });
    }

    #[test]
    fn duplicate_key_is_rejected() {
        let mut keys = NUMPAD;
        keys[5] = KeyConfig::new(1, 1, KEY_3, "F");
        let err = Layout::new(keys, MATRIX_COLS, MATRIX_ROWS).unwrap_err();
        assert_eq!(err, LayoutError::Duplicate { column: 1, row: 1 });
    }

    #[test]
    fn custom_colors_flow_into_idle_table() {
        let mut keys = NUMPAD;
        keys[0] = keys[0].with_colors(0x0000_00FF, 0x00FF_0000);
        let layout = Layout::new(keys, MATRIX_COLS, MATRIX_ROWS).unwrap();
        let idle = layout.idle_colors();
        assert_eq!(idle[0], 0x0000_00FF);
        assert!(idle[1..].iter().all(|&c| c == IDLE_COLOR));
    }
}
