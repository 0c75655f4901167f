//! RP2040 ADC channels as joystick axes.
//!
//! Both axes share the single on-chip ADC, so each [`AdcAxis`] holds a
//! reference to it and converts on demand.

use core::cell::RefCell;

use embassy_rp::adc::{Adc, Async, Channel};

use crate::config::ADC_SCALE_SHIFT;
use crate::error::{Error, Result};
use crate::pointer::AnalogInput;

/// One ADC input pin.
pub struct AdcAxis<'a> {
    adc: &'a RefCell<Adc<'static, Async>>,
    channel: Channel<'static>,
}

impl<'a> AdcAxis<'a> {
    pub fn new(adc: &'a RefCell<Adc<'static, Async>>, channel: Channel<'static>) -> Self {
        Self { adc, channel }
    }
}

impl AnalogInput for AdcAxis<'_> {
    /// 12-bit conversion widened to the 16-bit scale.
    async fn read(&mut self) -> Result<u16> {
        // Held for one conversion. Both axes are read in turn from the same task.
        let mut adc = self.adc.try_borrow_mut().map_err(|_| Error::Adc)?;
        let raw = adc.read(&mut self.channel).await.map_err(|_| Error::Adc)?;
        Ok(raw << ADC_SCALE_SHIFT)
    }
}
