//! Application-wide constants and compile-time configuration.
//!
//! Matrix geometry, timing parameters, joystick scaling and protocol
//! constants live here so they can be tuned in one place.

// Key matrix

/// Number of column (driven) lines.
pub const MATRIX_COLS: usize = 4;

/// Number of row (sensed) lines.
pub const MATRIX_ROWS: usize = 3;

/// Total number of keys, and therefore LEDs on the strip.
pub const KEY_COUNT: usize = MATRIX_COLS * MATRIX_ROWS;

/// Time a freshly driven column needs before its rows read reliably (ms).
///
/// Charged once per column per loop, so a full scan costs
/// `MATRIX_COLS * SETTLE_DELAY_MS`.
pub const SETTLE_DELAY_MS: u32 = 1;

// Joystick

/// Raw reading of a centered axis (16-bit scale).
pub const JOYSTICK_CENTER: i32 = 0x8000;

/// Raw units per unit of mouse motion.
pub const JOYSTICK_DIVISOR: i32 = 0x800;

/// Deltas with an absolute value below this are reported as zero.
pub const JOYSTICK_DEAD_ZONE: i32 = 2;

/// Left shift that brings the RP2040's 12-bit ADC result to the 16-bit scale.
pub const ADC_SCALE_SHIFT: u32 = 4;

// Feedback

/// LED colour of a released key (packed `0x00RRGGBB`).
pub const IDLE_COLOR: u32 = 0x00FF_FFFF;

/// LED colour of a held key.
pub const ACTIVE_COLOR: u32 = 0x0000_0000;

/// Glyph drawn at startup (and on release when `REDRAW_ON_RELEASE` is set).
pub const IDLE_GLYPH: &str = "H";

/// Baseline origin of the key glyph on the portrait frame.
pub const GLYPH_ORIGIN: (i32, i32) = (10, 70);

/// Redraw the idle glyph when a key is released.
///
/// Off by default: the display keeps showing the last pressed key.
pub const REDRAW_ON_RELEASE: bool = false;

// Display

/// SSD1306 I²C address.
pub const DISPLAY_I2C_ADDR: u8 = 0x3C;

/// I²C bus frequency for the OLED (Hz).
pub const DISPLAY_I2C_FREQ_HZ: u32 = 400_000;

/// Pause after clearing the text demo's screen before drawing (ms).
pub const TEXT_DEMO_SETTLE_MS: u64 = 50;

// USB

/// USB VID/PID - use the "pid.codes" open-source test VID.
/// Replace with your own allocated VID/PID for production.
pub const USB_VID: u16 = 0x1209;
pub const USB_PID: u16 = 0x0001;

/// USB device strings.
pub const USB_MANUFACTURER: &str = "tenkey";
pub const USB_PRODUCT: &str = "tenkey macro pad";
pub const USB_SERIAL_NUMBER: &str = "000001";

/// USB HID polling interval (ms).
pub const USB_HID_POLL_MS: u8 = 1;

// GPIO pin assignments (RP2040)
//
// Logical names only; the concrete `embassy_rp::peripherals::*` are picked
// in `main.rs`.
//
//   Joystick button  → GPIO0 (pull-up, active-low)
//   WS2812 data      → GPIO1 (PIO0 SM0, DMA CH0)
//   Columns          → GPIO5, GPIO6, GPIO7, GPIO8
//   Rows             → GPIO9, GPIO10, GPIO11 (pull-down)
//   I²C0 SDA / SCL   → GPIO12 / GPIO13
//   Joystick Y / X   → GPIO28 / GPIO29 (ADC2 / ADC3)
