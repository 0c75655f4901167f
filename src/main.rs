//! tenkey - 4×3 macro pad firmware for the RP2040.
//!
//! Wires the board's peripherals into a [`Keypad`] and runs it forever
//! alongside the USB device task.
//!
//! Pin map: LED data GPIO1, columns GPIO5-8, rows GPIO9-11, joystick
//! X/Y on GPIO29/GPIO28, joystick button GPIO0, OLED SDA/SCL on GPIO12/13.

#![no_std]
#![no_main]

use core::cell::RefCell;

use defmt::{info, unwrap};
use embassy_executor::Spawner;
use embassy_rp::adc::{self, Adc, Channel};
use embassy_rp::bind_interrupts;
use embassy_rp::gpio::{Input, Level, Output, Pull};
use embassy_rp::i2c::{self, I2c};
use embassy_rp::peripherals::{PIO0, USB};
use embassy_rp::pio::{self, Pio};
use embassy_rp::pio_programs::ws2812::{PioWs2812, PioWs2812Program};
use embassy_rp::usb::{self as rp_usb, Driver};
use embassy_time::Delay;
use embassy_usb::UsbDevice;
use ssd1306::prelude::DisplayRotation;
use {defmt_rtt as _, panic_probe as _};

use tenkey::adc::AdcAxis;
use tenkey::config::{DISPLAY_I2C_FREQ_HZ, KEY_COUNT, MATRIX_COLS, MATRIX_ROWS};
#[cfg(feature = "letters")]
use tenkey::keymap::LETTERS as KEYS;
#[cfg(not(feature = "letters"))]
use tenkey::keymap::NUMPAD as KEYS;
use tenkey::ui::{display, led_strip::Ws2812Strip};
use tenkey::usb::hid_device::{self, UsbDriver};
use tenkey::{Joystick, Keypad, Layout, Matrix, Options, Parts, ReportSink};

bind_interrupts!(struct Irqs {
    USBCTRL_IRQ => rp_usb::InterruptHandler<USB>;
    PIO0_IRQ_0 => pio::InterruptHandler<PIO0>;
    ADC_IRQ_FIFO => adc::InterruptHandler;
});

#[embassy_executor::task]
async fn usb_task(device: UsbDevice<'static, UsbDriver>) -> ! {
    hid_device::run_usb_device(device).await
}

#[embassy_executor::main]
async fn main(spawner: Spawner) {
    info!("tenkey v{}", env!("CARGO_PKG_VERSION"));

    let p = embassy_rp::init(Default::default());

    // LED strip
    let Pio { mut common, sm0, .. } = Pio::new(p.PIO0, Irqs);
    let program = PioWs2812Program::new(&mut common);
    let ws: PioWs2812<'_, PIO0, 0, KEY_COUNT> =
        PioWs2812::new(&mut common, sm0, p.DMA_CH0, p.PIN_1, &program);
    let strip = Ws2812Strip::new(ws);

    // Key matrix: columns driven high one at a time, rows pulled down.
    let columns = [
        Output::new(p.PIN_5, Level::Low),
        Output::new(p.PIN_6, Level::Low),
        Output::new(p.PIN_7, Level::Low),
        Output::new(p.PIN_8, Level::Low),
    ];
    let rows = [
        Input::new(p.PIN_9, Pull::Down),
        Input::new(p.PIN_10, Pull::Down),
        Input::new(p.PIN_11, Pull::Down),
    ];
    let matrix = unwrap!(Matrix::<_, _, _, MATRIX_COLS, MATRIX_ROWS>::new(rows, columns, Delay));

    // Joystick
    let adc = RefCell::new(Adc::new(p.ADC, Irqs, adc::Config::default()));
    let x = AdcAxis::new(&adc, Channel::new_pin(p.PIN_29, Pull::None));
    let y = AdcAxis::new(&adc, Channel::new_pin(p.PIN_28, Pull::None));
    let joystick = Joystick::new(x, y, Input::new(p.PIN_0, Pull::Up));

    // OLED, portrait
    let mut i2c_config = i2c::Config::default();
    i2c_config.frequency = DISPLAY_I2C_FREQ_HZ;
    let i2c = I2c::new_blocking(p.I2C0, p.PIN_13, p.PIN_12, i2c_config);
    let display = unwrap!(display::init(i2c, DisplayRotation::Rotate270));

    // USB
    let usb = hid_device::init(Driver::new(p.USB, Irqs));
    unwrap!(spawner.spawn(usb_task(usb.device)));
    let sink = ReportSink::new(usb.reports);

    let layout = unwrap!(Layout::new(KEYS, MATRIX_COLS, MATRIX_ROWS));
    let mut keypad = unwrap!(Keypad::new(
        Parts {
            matrix,
            joystick,
            strip,
            display,
            sink,
        },
        layout,
        Options::default(),
    ));

    unwrap!(keypad.start().await);
    keypad.run().await
}
