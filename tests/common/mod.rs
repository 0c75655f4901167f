//! Host fakes for the keypad's hardware seams.
#![allow(dead_code)]

use std::cell::{Cell, RefCell};
use std::convert::Infallible;
use std::rc::Rc;

use embedded_graphics::mock_display::MockDisplay;
use embedded_graphics::pixelcolor::BinaryColor;
use embedded_graphics::prelude::*;
use embedded_hal::digital::{ErrorType, InputPin, OutputPin};
use embedded_hal_mock::eh1::delay::NoopDelay;

use tenkey::config::{KEY_COUNT, MATRIX_COLS, MATRIX_ROWS};
use tenkey::hid::{HidReport, KeyboardReport, MouseReport};
use tenkey::keymap::NUMPAD;
use tenkey::ui::{LedStrip, Present};
use tenkey::{
    AnalogInput, Error, Joystick, Keypad, Layout, Matrix, Options, Parts, ReportSink,
    ReportWriter, Result,
};

pub const CENTER: u16 = 0x8000;

/// Physical state of the switch matrix.
#[derive(Default)]
pub struct Board {
    held: [[bool; MATRIX_ROWS]; MATRIX_COLS],
    driven: Option<usize>,
}

pub type SharedBoard = Rc<RefCell<Board>>;

pub fn hold(board: &SharedBoard, column: usize, row: usize, down: bool) {
    board.borrow_mut().held[column][row] = down;
}

/// Column line: while high, closes the circuit for its column's keys.
pub struct ColumnPin {
    board: SharedBoard,
    column: usize,
}

impl ErrorType for ColumnPin {
    type Error = Infallible;
}

impl OutputPin for ColumnPin {
    fn set_low(&mut self) -> core::result::Result<(), Infallible> {
        let mut board = self.board.borrow_mut();
        if board.driven == Some(self.column) {
            board.driven = None;
        }
        Ok(())
    }

    fn set_high(&mut self) -> core::result::Result<(), Infallible> {
        self.board.borrow_mut().driven = Some(self.column);
        Ok(())
    }
}

/// Row line: reads high when the driven column's key on this row is held.
pub struct RowPin {
    board: SharedBoard,
    row: usize,
}

impl ErrorType for RowPin {
    type Error = Infallible;
}

impl InputPin for RowPin {
    fn is_high(&mut self) -> core::result::Result<bool, Infallible> {
        let board = self.board.borrow();
        Ok(board.driven.is_some_and(|c| board.held[c][self.row]))
    }

    fn is_low(&mut self) -> core::result::Result<bool, Infallible> {
        self.is_high().map(|h| !h)
    }
}

/// Analog axis whose reading the test controls.
#[derive(Clone)]
pub struct Axis(pub Rc<Cell<u16>>);

impl AnalogInput for Axis {
    async fn read(&mut self) -> Result<u16> {
        Ok(self.0.get())
    }
}

/// Active-low push button.
#[derive(Clone)]
pub struct Button(pub Rc<Cell<bool>>);

impl ErrorType for Button {
    type Error = Infallible;
}

impl InputPin for Button {
    fn is_high(&mut self) -> core::result::Result<bool, Infallible> {
        Ok(!self.0.get())
    }

    fn is_low(&mut self) -> core::result::Result<bool, Infallible> {
        Ok(self.0.get())
    }
}

/// Records every frame written to the strip.
pub struct Strip<const N: usize> {
    pub frames: Vec<[u32; N]>,
    pub fail: bool,
}

impl<const N: usize> Strip<N> {
    pub fn new() -> Self {
        Self {
            frames: Vec::new(),
            fail: false,
        }
    }

    /// A strip whose every transfer fails.
    pub fn failing() -> Self {
        Self {
            frames: Vec::new(),
            fail: true,
        }
    }

    pub fn last(&self) -> Option<&[u32; N]> {
        self.frames.last()
    }
}

impl<const N: usize> LedStrip<N> for Strip<N> {
    async fn write(&mut self, colors: &[u32; N]) -> Result<()> {
        if self.fail {
            return Err(Error::Led);
        }
        self.frames.push(*colors);
        Ok(())
    }
}

/// `MockDisplay` that counts presents.
pub struct Frame {
    pub display: MockDisplay<BinaryColor>,
    pub presents: usize,
}

impl Frame {
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

impl OriginDimensions for Frame {
    fn size(&self) -> Size {
        self.display.size()
    }
}

impl DrawTarget for Frame {
    type Color = BinaryColor;
    type Error = Infallible;

    fn draw_iter<I>(&mut self, pixels: I) -> core::result::Result<(), Self::Error>
    where
        I: IntoIterator<Item = Pixel<Self::Color>>,
    {
        self.display.draw_iter(pixels)
    }
}

impl Present for Frame {
    fn present(&mut self) -> Result<()> {
        self.presents += 1;
        Ok(())
    }
}

/// Report transport that keeps everything written to it.
#[derive(Default)]
pub struct Recorder {
    pub reports: Vec<HidReport>,
}

impl Recorder {
    pub fn keyboard(&self) -> Vec<KeyboardReport> {
        self.reports
            .iter()
            .filter_map(|r| match r {
                HidReport::Keyboard(k) => Some(*k),
                _ => None,
            })
            .collect()
    }

    pub fn mouse(&self) -> Vec<MouseReport> {
        self.reports
            .iter()
            .filter_map(|r| match r {
                HidReport::Mouse(m) => Some(*m),
                _ => None,
            })
            .collect()
    }
}

impl ReportWriter for Recorder {
    async fn write_keyboard(&mut self, report: &KeyboardReport) -> Result<()> {
        self.reports.push(HidReport::Keyboard(*report));
        Ok(())
    }

    async fn write_mouse(&mut self, report: &MouseReport) -> Result<()> {
        self.reports.push(HidReport::Mouse(*report));
        Ok(())
    }
}

pub type TestKeypad = Keypad<
    RowPin,
    ColumnPin,
    NoopDelay,
    Axis,
    Axis,
    Button,
    Strip<KEY_COUNT>,
    Frame,
    ReportSink<Recorder>,
    MATRIX_COLS,
    MATRIX_ROWS,
    KEY_COUNT,
>;

/// Handles the test keeps after the keypad takes ownership of its parts.
pub struct Rig {
    pub board: SharedBoard,
    pub x: Rc<Cell<u16>>,
    pub y: Rc<Cell<u16>>,
    pub button: Rc<Cell<bool>>,
}

pub fn matrix(board: &SharedBoard) -> Matrix<RowPin, ColumnPin, NoopDelay, MATRIX_COLS, MATRIX_ROWS> {
    let rows = core::array::from_fn(|row| RowPin {
        board: board.clone(),
        row,
    });
    let columns = core::array::from_fn(|column| ColumnPin {
        board: board.clone(),
        column,
    });
    Matrix::new(rows, columns, NoopDelay::new()).unwrap()
}

/// A NUMPAD keypad on fake hardware, joystick centered.
pub fn keypad(options: Options) -> (TestKeypad, Rig) {
    keypad_with_strip(options, Strip::new())
}

/// Same as [`keypad`] with the given LED strip.
pub fn keypad_with_strip(options: Options, strip: Strip<KEY_COUNT>) -> (TestKeypad, Rig) {
    let rig = Rig {
        board: SharedBoard::default(),
        x: Rc::new(Cell::new(CENTER)),
        y: Rc::new(Cell::new(CENTER)),
        button: Rc::new(Cell::new(false)),
    };
    let joystick = Joystick::new(
        Axis(rig.x.clone()),
        Axis(rig.y.clone()),
        Button(rig.button.clone()),
    );
    let layout = Layout::new(NUMPAD, MATRIX_COLS, MATRIX_ROWS).unwrap();
    let keypad = Keypad::new(
        Parts {
            matrix: matrix(&rig.board),
            joystick,
            strip,
            display: Frame::new(),
            sink: ReportSink::new(Recorder::default()),
        },
        layout,
        options,
    )
    .unwrap();
    (keypad, rig)
}
