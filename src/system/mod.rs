//! System services: time keeping, locale tables and the redraw timer

pub mod locale;
pub mod time;
pub mod timer;
