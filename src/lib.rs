//! PineTime watch face
//!
//! Date and time face with four complication slots and an ambient
//! (low-power) render mode. The face is driven entirely by host lifecycle
//! callbacks, see [`ui::WatchFace`] and [`ui::Host`]. On the watch the
//! firmware binary plays the host role; in tests a recording host does.

#![cfg_attr(not(test), no_std)]

#[macro_use]
mod fmt;

pub mod complication;
pub mod config;
pub mod system;
pub mod ui;

pub use complication::{ComplicationData, ComplicationLocation, ComplicationType, SystemProvider};
pub use config::FaceConfig;
pub use system::{
    time::{Clock, TimeManager, TimeReference},
    timer::{TickTimer, TickToken, TimerState},
};
pub use ui::{
    canvas::{Canvas, Paint, Surface},
    default_watchface::DefaultWatchface,
    Host, WatchFace,
};
