//! Backlight control
//!
//! Implementation based upon https://github.com/dbrgn/pinetime-rtic/blob/master/pinetime-rtic/src/backlight.rs
//! and https://wiki.pine64.org/wiki/PineTime.

use embassy_nrf::gpio::{AnyPin, Output};

/// Level while the face is interactive.
const INTERACTIVE_LEVEL: u8 = 4;
/// Level while the face is in ambient mode.
const AMBIENT_LEVEL: u8 = 1;

/// Control the backlight.
///
/// There are three active-low backlight pins, each connected to a FET that
/// toggles backlight power through a resistor.
///
/// - Low: 2.2 kΩ
/// - Mid: 100 Ω
/// - High: 30 Ω
///
/// Through combinations of these pins, 7 brightness levels (+ off) can be
/// configured.
pub struct Backlight {
    low: Output<'static, AnyPin>,
    mid: Output<'static, AnyPin>,
    high: Output<'static, AnyPin>,
}

impl Backlight {
    /// Initialize the backlight at the interactive level.
    pub fn init(
        low: Output<'static, AnyPin>,
        mid: Output<'static, AnyPin>,
        high: Output<'static, AnyPin>,
    ) -> Self {
        let mut backlight = Self { low, mid, high };
        backlight.set(INTERACTIVE_LEVEL);
        backlight
    }

    /// Dim for ambient mode, restore for interactive mode.
    pub fn set_ambient(&mut self, ambient: bool) {
        self.set(if ambient {
            AMBIENT_LEVEL
        } else {
            INTERACTIVE_LEVEL
        });
    }

    /// Set the brightness level between 0 (off) and 7, higher values are clamped.
    fn set(&mut self, brightness: u8) {
        let brightness = brightness.min(7);
        defmt::debug!("Setting backlight brightness to {}", brightness);

        Self::drive(&mut self.low, brightness & 0x01 > 0);
        Self::drive(&mut self.mid, brightness & 0x02 > 0);
        Self::drive(&mut self.high, brightness & 0x04 > 0);
    }

    fn drive(pin: &mut Output<'static, AnyPin>, on: bool) {
        if on {
            pin.set_low();
        } else {
            pin.set_high();
        }
    }
}
