//! PineTime board support: clocks, panel, backlight and the face's host

pub mod backlight;
pub mod display;
pub mod host;

use embassy_nrf::config::{Config, Debug, HfclkSource, LfclkSource};

/// nRF52832 configuration for the watch
pub fn config() -> Config {
    // `Config` is `non_exhaustive`, start from the defaults
    let mut config = Config::default();

    // Both clocks from the external crystals, the RTC drives embassy-time
    config.hfclk_source = HfclkSource::ExternalXtal;
    config.lfclk_source = LfclkSource::ExternalXtal;

    // DC/DC regulator cuts runtime current consumption
    config.dcdc.reg1 = true;

    config.debug = Debug::Allowed;

    config
}
