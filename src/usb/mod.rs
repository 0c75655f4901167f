//! USB Device subsystem - presents a composite HID device to the host.
//!
//! The RP2040's built-in USB 1.1 Full-Speed controller is driven by
//! `embassy-usb`.  We create a **composite device** with two HID
//! interfaces:
//!
//! - Interface 0: Keyboard (boot protocol)
//! - Interface 1: Mouse    (boot protocol)
//!
//! [`hid_device::UsbReports`] is the `ReportWriter` behind the keypad's
//! `ReportSink`.

pub mod hid_device;
