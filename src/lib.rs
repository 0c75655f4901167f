//! tenkey - macro pad firmware core.
//!
//! Everything in this crate outside the `embedded` feature is plain logic
//! over the `embedded-hal` / `embedded-graphics` traits and can be tested on
//! the host.
//!
//! Usage: `cargo test`
//!
//! The firmware binaries (`src/main.rs`, `src/bin/oled_text.rs`) need the
//! `embedded` feature and a `thumbv6m-none-eabi` target:
//! `cargo run --release --features embedded --target thumbv6m-none-eabi --bin tenkey`

#![cfg_attr(not(test), no_std)]
#![allow(async_fn_in_trait)]

// This mod MUST go first, so that the others see its macros.
mod fmt;

pub mod config;
pub mod error;
pub mod hid;
pub mod keymap;
pub mod keypad;
pub mod matrix;
pub mod pointer;
pub mod sink;
pub mod ui;

#[cfg(feature = "embedded")]
pub mod adc;
#[cfg(feature = "embedded")]
pub mod usb;

pub use error::{Error, LayoutError, Result};
pub use keymap::{KeyConfig, KeyPos, Layout};
pub use keypad::{KeyEvent, Keypad, Options, Parts, TickReport};
pub use matrix::{Matrix, Transition};
pub use pointer::{AnalogInput, Joystick, PointerSample};
pub use sink::{HidSink, ReportSink, ReportWriter};
