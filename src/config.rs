//! Watch face configuration

use embedded_graphics::pixelcolor::{Rgb565, RgbColor};

use crate::system::locale::Locale;

/// Redraw cadence while interactive, in milliseconds.
pub const INTERACTIVE_UPDATE_RATE_MS: u64 = 60_000;

/// Baseline of the date line, in pixels from the top.
pub const DATE_BASELINE_Y: i32 = 86;

/// Settings the face is built with. Fixed for the lifetime of the face.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FaceConfig {
    /// Language for weekday and month names
    pub locale: Locale,
    /// Text size in pixels; the time line sits this far below the date
    pub text_size: u32,
    /// Baseline of the date line
    pub date_baseline_y: i32,
    /// Redraw cadence while visible and interactive
    pub update_rate_ms: u64,
    /// Color of the date and time text
    pub text_color: Rgb565,
    /// Solid fill used instead of the background image in ambient mode
    pub ambient_background: Rgb565,
    /// Show 12 hour time instead of 24 hour time
    pub use_12hour_format: bool,
}

impl Default for FaceConfig {
    fn default() -> Self {
        Self {
            locale: Locale::default(),
            text_size: 42,
            date_baseline_y: DATE_BASELINE_Y,
            update_rate_ms: INTERACTIVE_UPDATE_RATE_MS,
            text_color: Rgb565::WHITE,
            ambient_background: Rgb565::BLACK,
            use_12hour_format: false,
        }
    }
}
