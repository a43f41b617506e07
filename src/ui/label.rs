//! Fixed-capacity text labels

use core::fmt;

use chrono::{Datelike, NaiveDateTime, Timelike};

use crate::system::locale::Locale;

pub const BUF_LEN: usize = 32;

/// Text formatted into an inline buffer, no allocation.
#[derive(Clone)]
pub struct Label<const N: usize = BUF_LEN> {
    str_buf: [u8; N],
    len: usize,
}

impl<const N: usize> Label<N> {
    /// Create new empty label
    pub const fn new() -> Self {
        Self {
            str_buf: [0; N],
            len: 0,
        }
    }

    /// Replace the label text. On overflow the label is left empty.
    pub fn set_fmt(&mut self, args: fmt::Arguments<'_>) -> fmt::Result {
        self.len = 0;
        self.len = format_no_std::show(&mut self.str_buf, args)?.len();
        Ok(())
    }

    pub fn as_str(&self) -> &str {
        core::str::from_utf8(&self.str_buf[..self.len]).unwrap_or("")
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }
}

impl<const N: usize> Default for Label<N> {
    fn default() -> Self {
        Self::new()
    }
}

impl<const N: usize> fmt::Debug for Label<N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Label").field(&self.as_str()).finish()
    }
}

/// Date as weekday, day, month and year, e.g. "Sun 03 Mar 2024".
pub fn format_date<const N: usize>(
    label: &mut Label<N>,
    date: NaiveDateTime,
    locale: Locale,
) -> fmt::Result {
    label.set_fmt(format_args!(
        "{} {:02} {} {:04}",
        locale.weekday_abbrev(date.weekday()),
        date.day(),
        locale.month_abbrev(date.month0()),
        date.year()
    ))
}

/// Time of day as hours and minutes, e.g. "09:41".
pub fn format_time<const N: usize>(
    label: &mut Label<N>,
    time: NaiveDateTime,
    use_12hour_format: bool,
) -> fmt::Result {
    let hour = if use_12hour_format {
        time.hour12().1
    } else {
        time.hour()
    };
    label.set_fmt(format_args!("{:02}:{:02}", hour, time.minute()))
}
