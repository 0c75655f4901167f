//! oled-text - draws a mixed Japanese / Latin greeting on the SSD1306 once
//! and then idles.

#![no_std]
#![no_main]

use defmt::{info, unwrap};
use embassy_executor::Spawner;
use embassy_rp::i2c::{self, I2c};
use embassy_time::Timer;
use ssd1306::prelude::DisplayRotation;
use {defmt_rtt as _, panic_probe as _};

use tenkey::config::{DISPLAY_I2C_FREQ_HZ, TEXT_DEMO_SETTLE_MS};
use tenkey::ui::display;
use tenkey::ui::text::{render_lines, GREETING};

#[embassy_executor::main]
async fn main(_spawner: Spawner) {
    let p = embassy_rp::init(Default::default());

    let mut i2c_config = i2c::Config::default();
    i2c_config.frequency = DISPLAY_I2C_FREQ_HZ;
    let i2c = I2c::new_blocking(p.I2C0, p.PIN_13, p.PIN_12, i2c_config);

    // Panel is mounted upside down.
    let mut display = unwrap!(display::init(i2c, DisplayRotation::Rotate180));
    Timer::after_millis(TEXT_DEMO_SETTLE_MS).await;

    unwrap!(render_lines(&mut display, &GREETING));
    info!("greeting drawn");

    core::future::pending::<()>().await;
}
